//! Utilidades del sistema
//!
//! Este módulo contiene utilidades para manejo de errores, parseo tolerante
//! de parámetros y formateo común.

pub mod errors;
pub mod format;
pub mod validation;

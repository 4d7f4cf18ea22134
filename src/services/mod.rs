//! Services module
//!
//! Este módulo contiene la lógica de negocio de la aplicación: agregación de
//! estadísticas y exportación de recorridos (incluido el layout Power BI).

pub mod export_service;
pub mod export_writers;
pub mod powerbi_service;
pub mod stats_service;
pub mod seed_service;

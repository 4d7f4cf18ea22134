//! Fleet tracking backend
//!
//! Registro de recorridos de vehículos con filtros, estadísticas,
//! validación y exportación a CSV/Excel.

pub mod cache;
pub mod config;
pub mod controllers;
pub mod database;
pub mod dto;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;

pub use routes::create_app_router;
pub use state::AppState;

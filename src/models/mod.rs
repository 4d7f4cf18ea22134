//! Modelos del sistema
//!
//! Este módulo contiene los modelos de datos de recorridos, el filtro tipado
//! y las estadísticas agregadas.

pub mod stats;
pub mod trip;
pub mod trip_filter;

pub use stats::{TripStats, TypeBreakdown};
pub use trip::{Priority, TripDraft, TripRecord, TripStatus, VehicleType};
pub use trip_filter::TripFilter;

//! Modelos de estadísticas
//!
//! Resumen calculado sobre un conjunto filtrado de recorridos. Los nombres
//! JSON se mantienen compatibles con el dashboard existente.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::trip::VehicleType;

/// Conteo por tipo de vehículo (siempre los tres tipos, con ceros)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TypeBreakdown {
    pub turbo: u64,
    pub sencillo: u64,
    #[serde(rename = "eléctrico")]
    pub electrico: u64,
}

impl TypeBreakdown {
    pub fn total(&self) -> u64 {
        self.turbo + self.sencillo + self.electrico
    }

    pub fn count(&self, vehicle_type: VehicleType) -> u64 {
        match vehicle_type {
            VehicleType::Turbo => self.turbo,
            VehicleType::Standard => self.sencillo,
            VehicleType::Electric => self.electrico,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripStats {
    #[serde(rename = "total_vehiculos")]
    pub total: u64,
    #[serde(rename = "vehiculos_validados")]
    pub validated: u64,
    #[serde(rename = "vehiculos_no_validados")]
    pub unvalidated: u64,
    #[serde(rename = "porcentaje_validacion")]
    pub validation_percentage: f64,
    #[serde(rename = "stats_tipo")]
    pub by_type: TypeBreakdown,
    #[serde(rename = "total_entregas")]
    pub total_deliveries: i64,
    #[serde(rename = "total_facturacion")]
    pub total_billing: Decimal,
    #[serde(rename = "promedio_entregas")]
    pub average_deliveries: f64,
    #[serde(rename = "promedio_facturacion")]
    pub average_billing: Decimal,
    #[serde(rename = "ultima_actualizacion")]
    pub last_update: Option<DateTime<Utc>>,
    #[serde(rename = "vehiculos_hoy")]
    pub today_count: u64,
    #[serde(rename = "vehiculos_ultima_semana")]
    pub last_week_count: u64,
}

impl TripStats {
    /// Estadísticas de un conjunto vacío
    pub fn empty() -> Self {
        Self {
            total: 0,
            validated: 0,
            unvalidated: 0,
            validation_percentage: 0.0,
            by_type: TypeBreakdown::default(),
            total_deliveries: 0,
            total_billing: Decimal::ZERO,
            average_deliveries: 0.0,
            average_billing: Decimal::ZERO,
            last_update: None,
            today_count: 0,
            last_week_count: 0,
        }
    }
}

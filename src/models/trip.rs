//! Modelo de TripRecord
//!
//! Este módulo contiene el registro de recorrido de un vehículo, sus enums
//! y las métricas derivadas (duración, eficiencia, facturación por entrega).
//! Mapea a la tabla `trip_records`.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use num_traits::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::utils::errors::{bad_request_error, AppError, AppResult};
use crate::utils::format::round2;

/// Tipo de vehículo - mapea a la columna `vehicle_type`
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum VehicleType {
    Turbo,
    #[serde(rename = "Sencillo")]
    Standard,
    #[serde(rename = "Eléctrico")]
    Electric,
}

impl VehicleType {
    pub const ALL: [VehicleType; 3] = [VehicleType::Turbo, VehicleType::Standard, VehicleType::Electric];

    /// Valor almacenado en base de datos y mostrado en exportaciones
    pub fn as_str(&self) -> &'static str {
        match self {
            VehicleType::Turbo => "Turbo",
            VehicleType::Standard => "Sencillo",
            VehicleType::Electric => "Eléctrico",
        }
    }
}

impl fmt::Display for VehicleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VehicleType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Turbo" => Ok(VehicleType::Turbo),
            "Sencillo" => Ok(VehicleType::Standard),
            "Eléctrico" => Ok(VehicleType::Electric),
            other => Err(AppError::Internal(format!("Unknown vehicle type '{}'", other))),
        }
    }
}

/// Prioridad de procesamiento - columna SMALLINT 1..=3
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum Priority {
    #[default]
    #[serde(rename = "baja")]
    Low,
    #[serde(rename = "media")]
    Medium,
    #[serde(rename = "alta")]
    High,
}

impl Priority {
    pub fn as_i16(&self) -> i16 {
        match self {
            Priority::Low => 1,
            Priority::Medium => 2,
            Priority::High => 3,
        }
    }

    pub fn from_i16(value: i16) -> AppResult<Self> {
        match value {
            1 => Ok(Priority::Low),
            2 => Ok(Priority::Medium),
            3 => Ok(Priority::High),
            other => Err(AppError::Internal(format!("Unknown priority {}", other))),
        }
    }
}

/// Estado del vehículo - columna `status`
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum TripStatus {
    #[default]
    #[serde(rename = "activo")]
    Active,
    #[serde(rename = "mantenimiento")]
    Maintenance,
    #[serde(rename = "inactivo")]
    Inactive,
}

impl TripStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TripStatus::Active => "activo",
            TripStatus::Maintenance => "mantenimiento",
            TripStatus::Inactive => "inactivo",
        }
    }
}

impl FromStr for TripStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "activo" => Ok(TripStatus::Active),
            "mantenimiento" => Ok(TripStatus::Maintenance),
            "inactivo" => Ok(TripStatus::Inactive),
            other => Err(AppError::Internal(format!("Unknown trip status '{}'", other))),
        }
    }
}

/// Registro de recorrido tal como vive en el store
#[derive(Debug, Clone, PartialEq)]
pub struct TripRecord {
    pub id: i64,
    pub code: String,
    pub plate: String,
    pub vehicle_type: VehicleType,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub delivery_count: i32,
    pub billing_amount: Decimal,
    pub note: Option<String>,
    pub client: String,
    pub validated: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub created_by: Option<i64>,
    pub modified_by: Option<i64>,
    pub priority: Priority,
    pub status: TripStatus,
    pub performance_index: Decimal,
}

impl TripRecord {
    /// Duración en horas redondeada a 2 decimales
    pub fn duration_hours(&self) -> f64 {
        let seconds = (self.end_time - self.start_time).num_seconds();
        round2(seconds as f64 / 3600.0)
    }

    /// Entregas por hora; 0 si la duración no es positiva
    pub fn efficiency(&self) -> f64 {
        let duration = self.duration_hours();
        if duration > 0.0 {
            round2(self.delivery_count as f64 / duration)
        } else {
            0.0
        }
    }

    /// Facturación por entrega; 0 si no hay entregas
    pub fn billing_per_delivery(&self) -> f64 {
        if self.delivery_count > 0 {
            let billing = self.billing_amount.to_f64().unwrap_or(0.0);
            round2(billing / self.delivery_count as f64)
        } else {
            0.0
        }
    }

    /// Datos editables del registro, punto de partida para una actualización
    pub fn to_draft(&self) -> TripDraft {
        TripDraft {
            code: self.code.clone(),
            plate: self.plate.clone(),
            vehicle_type: self.vehicle_type,
            start_time: self.start_time,
            end_time: self.end_time,
            delivery_count: self.delivery_count,
            billing_amount: self.billing_amount,
            note: self.note.clone(),
            client: self.client.clone(),
            validated: self.validated,
            priority: self.priority,
            status: self.status,
            performance_index: self.performance_index,
        }
    }
}

/// Campos escribibles de un recorrido (creación y actualización)
#[derive(Debug, Clone, PartialEq)]
pub struct TripDraft {
    pub code: String,
    pub plate: String,
    pub vehicle_type: VehicleType,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub delivery_count: i32,
    pub billing_amount: Decimal,
    pub note: Option<String>,
    pub client: String,
    pub validated: bool,
    pub priority: Priority,
    pub status: TripStatus,
    pub performance_index: Decimal,
}

impl TripDraft {
    /// Invariantes que se aplican al escribir
    pub fn check_invariants(&self) -> AppResult<()> {
        if self.end_time < self.start_time {
            return Err(bad_request_error("fecha_fin must not be earlier than fecha_inicio"));
        }
        if self.delivery_count < 0 {
            return Err(bad_request_error("numero_entregas must be non-negative"));
        }
        if self.billing_amount < Decimal::ZERO {
            return Err(bad_request_error("facturacion must be non-negative"));
        }
        if self.client.chars().count() > 100 {
            return Err(bad_request_error("cliente must be at most 100 characters"));
        }
        Ok(())
    }

    /// Materializar el borrador como registro (usado por stores sin base de datos)
    pub fn into_record(
        self,
        id: i64,
        now: DateTime<Utc>,
        created_by: Option<i64>,
    ) -> TripRecord {
        TripRecord {
            id,
            code: self.code,
            plate: self.plate,
            vehicle_type: self.vehicle_type,
            start_time: self.start_time,
            end_time: self.end_time,
            delivery_count: self.delivery_count,
            billing_amount: self.billing_amount,
            note: self.note,
            client: self.client,
            validated: self.validated,
            created_at: now,
            updated_at: now,
            created_by,
            modified_by: None,
            priority: self.priority,
            status: self.status,
            performance_index: self.performance_index,
        }
    }
}

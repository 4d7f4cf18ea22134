//! DTOs de recorridos
//!
//! Los payloads de entrada usan nombres en inglés y aceptan los nombres en
//! español del frontend existente como alias. Las respuestas conservan las
//! claves en español.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::stats::TripStats;
use crate::models::trip::{Priority, TripDraft, TripRecord, TripStatus, VehicleType};
use crate::models::trip_filter::TripFilter;
use crate::services::export_service::ExportFormat;
use crate::utils::validation::validate_not_blank;

/// Parámetros de filtro crudos de la query string
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TripFilterParams {
    #[serde(alias = "placa")]
    pub plate: Option<String>,
    #[serde(alias = "fecha_inicio")]
    pub start_date: Option<String>,
    #[serde(alias = "fecha_fin")]
    pub end_date: Option<String>,
    #[serde(alias = "validado")]
    pub validated: Option<String>,
}

impl TripFilterParams {
    pub fn to_filter(&self) -> TripFilter {
        TripFilter::build(
            self.plate.as_deref(),
            self.start_date.as_deref(),
            self.end_date.as_deref(),
            self.validated.as_deref(),
        )
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExportQuery {
    #[serde(flatten)]
    pub filters: TripFilterParams,
    #[serde(rename = "type")]
    pub format: Option<String>,
}

impl ExportQuery {
    pub fn format(&self) -> ExportFormat {
        ExportFormat::from_param(self.format.as_deref())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CheckUpdatesQuery {
    pub since: Option<String>,
}

/// Request para crear un recorrido
#[derive(Debug, Deserialize, Validate)]
pub struct CreateTripRequest {
    #[serde(alias = "codigo")]
    #[validate(length(min = 1, max = 50), custom = "validate_not_blank")]
    pub code: String,

    #[serde(alias = "placa")]
    #[validate(length(min = 1, max = 20), custom = "validate_not_blank")]
    pub plate: String,

    #[serde(alias = "tipo_vehiculo")]
    pub vehicle_type: VehicleType,

    #[serde(alias = "fecha_inicio")]
    pub start_time: DateTime<Utc>,

    #[serde(alias = "fecha_fin")]
    pub end_time: DateTime<Utc>,

    #[serde(alias = "numero_entregas")]
    #[validate(range(min = 0))]
    pub delivery_count: i32,

    #[serde(alias = "facturacion")]
    pub billing_amount: Decimal,

    #[serde(alias = "observacion")]
    pub note: Option<String>,

    #[serde(alias = "cliente")]
    #[validate(length(min = 1, max = 100), custom = "validate_not_blank")]
    pub client: String,

    #[serde(alias = "validado")]
    pub validated: Option<bool>,

    #[serde(alias = "prioridad")]
    pub priority: Option<Priority>,

    #[serde(alias = "estado")]
    pub status: Option<TripStatus>,

    #[serde(alias = "indice_rendimiento")]
    pub performance_index: Option<Decimal>,

    #[serde(alias = "creado_por")]
    pub created_by: Option<i64>,
}

impl CreateTripRequest {
    pub fn to_draft(&self) -> TripDraft {
        TripDraft {
            code: self.code.trim().to_string(),
            plate: self.plate.trim().to_string(),
            vehicle_type: self.vehicle_type,
            start_time: self.start_time,
            end_time: self.end_time,
            delivery_count: self.delivery_count,
            billing_amount: self.billing_amount,
            note: self.note.clone().filter(|n| !n.trim().is_empty()),
            client: self.client.trim().to_string(),
            validated: self.validated.unwrap_or(false),
            priority: self.priority.unwrap_or_default(),
            status: self.status.unwrap_or_default(),
            performance_index: self.performance_index.unwrap_or(Decimal::ZERO),
        }
    }
}

/// Request para actualizar un recorrido; los campos ausentes se conservan
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateTripRequest {
    #[serde(alias = "codigo")]
    #[validate(length(min = 1, max = 50))]
    pub code: Option<String>,

    #[serde(alias = "placa")]
    #[validate(length(min = 1, max = 20))]
    pub plate: Option<String>,

    #[serde(alias = "tipo_vehiculo")]
    pub vehicle_type: Option<VehicleType>,

    #[serde(alias = "fecha_inicio")]
    pub start_time: Option<DateTime<Utc>>,

    #[serde(alias = "fecha_fin")]
    pub end_time: Option<DateTime<Utc>>,

    #[serde(alias = "numero_entregas")]
    #[validate(range(min = 0))]
    pub delivery_count: Option<i32>,

    #[serde(alias = "facturacion")]
    pub billing_amount: Option<Decimal>,

    #[serde(alias = "observacion")]
    pub note: Option<String>,

    #[serde(alias = "cliente")]
    #[validate(length(min = 1, max = 100))]
    pub client: Option<String>,

    #[serde(alias = "validado")]
    pub validated: Option<bool>,

    #[serde(alias = "prioridad")]
    pub priority: Option<Priority>,

    #[serde(alias = "estado")]
    pub status: Option<TripStatus>,

    #[serde(alias = "indice_rendimiento")]
    pub performance_index: Option<Decimal>,

    #[serde(alias = "modificado_por")]
    pub modified_by: Option<i64>,
}

impl UpdateTripRequest {
    /// Aplicar los campos presentes sobre el borrador actual
    pub fn apply(&self, draft: &mut TripDraft) {
        if let Some(code) = &self.code {
            draft.code = code.trim().to_string();
        }
        if let Some(plate) = &self.plate {
            draft.plate = plate.trim().to_string();
        }
        if let Some(vehicle_type) = self.vehicle_type {
            draft.vehicle_type = vehicle_type;
        }
        if let Some(start_time) = self.start_time {
            draft.start_time = start_time;
        }
        if let Some(end_time) = self.end_time {
            draft.end_time = end_time;
        }
        if let Some(delivery_count) = self.delivery_count {
            draft.delivery_count = delivery_count;
        }
        if let Some(billing_amount) = self.billing_amount {
            draft.billing_amount = billing_amount;
        }
        if let Some(note) = &self.note {
            draft.note = Some(note.clone()).filter(|n| !n.trim().is_empty());
        }
        if let Some(client) = &self.client {
            draft.client = client.trim().to_string();
        }
        if let Some(validated) = self.validated {
            draft.validated = validated;
        }
        if let Some(priority) = self.priority {
            draft.priority = priority;
        }
        if let Some(status) = self.status {
            draft.status = status;
        }
        if let Some(performance_index) = self.performance_index {
            draft.performance_index = performance_index;
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ToggleValidationRequest {
    #[serde(alias = "vehiculo_id")]
    pub trip_id: i64,
    #[serde(alias = "validado")]
    pub validated: bool,
    #[serde(alias = "modificado_por")]
    pub modified_by: Option<i64>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ToggleValidationResponse {
    pub id: i64,
    #[serde(rename = "placa")]
    pub plate: String,
    #[serde(rename = "validado")]
    pub validated: bool,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BulkAction {
    #[serde(alias = "validar")]
    Validate,
    #[serde(alias = "invalidar")]
    Invalidate,
}

impl BulkAction {
    pub fn validated(&self) -> bool {
        matches!(self, BulkAction::Validate)
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct BulkValidationRequest {
    #[serde(alias = "vehiculo_ids")]
    #[validate(length(min = 1))]
    pub trip_ids: Vec<i64>,
    #[serde(alias = "accion")]
    pub action: BulkAction,
    #[serde(alias = "modificado_por")]
    pub modified_by: Option<i64>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct BulkValidationResponse {
    pub updated_count: u64,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckUpdatesResponse {
    pub has_updates: bool,
    pub last_check: DateTime<Utc>,
    pub current_time: DateTime<Utc>,
}

/// Detalle de un recorrido con métricas derivadas
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TripResponse {
    pub id: i64,
    #[serde(rename = "codigo")]
    pub code: String,
    #[serde(rename = "placa")]
    pub plate: String,
    #[serde(rename = "tipo_vehiculo")]
    pub vehicle_type: VehicleType,
    #[serde(rename = "fecha_inicio")]
    pub start_time: DateTime<Utc>,
    #[serde(rename = "fecha_fin")]
    pub end_time: DateTime<Utc>,
    #[serde(rename = "numero_entregas")]
    pub delivery_count: i32,
    #[serde(rename = "facturacion")]
    pub billing_amount: Decimal,
    #[serde(rename = "observacion")]
    pub note: Option<String>,
    #[serde(rename = "cliente")]
    pub client: String,
    #[serde(rename = "validado")]
    pub validated: bool,
    #[serde(rename = "prioridad")]
    pub priority: Priority,
    #[serde(rename = "estado")]
    pub status: TripStatus,
    #[serde(rename = "indice_rendimiento")]
    pub performance_index: Decimal,
    #[serde(rename = "fecha_creacion")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "fecha_modificacion")]
    pub updated_at: DateTime<Utc>,
    #[serde(rename = "creado_por")]
    pub created_by: Option<i64>,
    #[serde(rename = "modificado_por")]
    pub modified_by: Option<i64>,
    #[serde(rename = "duracion_horas")]
    pub duration_hours: f64,
    #[serde(rename = "eficiencia")]
    pub efficiency: f64,
    #[serde(rename = "facturacion_por_entrega")]
    pub billing_per_delivery: f64,
}

impl From<&TripRecord> for TripResponse {
    fn from(record: &TripRecord) -> Self {
        Self {
            id: record.id,
            code: record.code.clone(),
            plate: record.plate.clone(),
            vehicle_type: record.vehicle_type,
            start_time: record.start_time,
            end_time: record.end_time,
            delivery_count: record.delivery_count,
            billing_amount: record.billing_amount,
            note: record.note.clone(),
            client: record.client.clone(),
            validated: record.validated,
            priority: record.priority,
            status: record.status,
            performance_index: record.performance_index,
            created_at: record.created_at,
            updated_at: record.updated_at,
            created_by: record.created_by,
            modified_by: record.modified_by,
            duration_hours: record.duration_hours(),
            efficiency: record.efficiency(),
            billing_per_delivery: record.billing_per_delivery(),
        }
    }
}

/// Vista de lista: recorridos filtrados, estadísticas y filtros aplicados
#[derive(Debug, Serialize)]
pub struct TripListResponse {
    pub trips: Vec<TripResponse>,
    pub stats: TripStats,
    pub filters: TripFilter,
}

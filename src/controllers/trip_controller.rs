//! Controlador de recorridos
//!
//! Orquesta store, agregador, exportador y cache para cada operación HTTP.

use std::sync::Arc;

use chrono::{Duration, Local, NaiveDate, Utc};
use validator::Validate;

use crate::cache::StatsCache;
use crate::dto::trip_dto::{
    BulkValidationRequest, BulkValidationResponse, CheckUpdatesQuery, CheckUpdatesResponse,
    CreateTripRequest, ExportQuery, ToggleValidationRequest, ToggleValidationResponse,
    TripListResponse, TripResponse, UpdateTripRequest,
};
use crate::dto::ApiResponse;
use crate::models::stats::TripStats;
use crate::models::trip::TripRecord;
use crate::models::trip_filter::TripFilter;
use crate::repositories::TripStore;
use crate::services::export_service::{export_filename_base, ExportOutcome, ExportPipeline, ExportRow};
use crate::services::stats_service;
use crate::state::AppState;
use crate::utils::errors::{not_found_error, AppError, AppResult};
use crate::utils::validation::parse_cursor;

pub struct TripController {
    store: Arc<dyn TripStore>,
    stats_cache: Option<StatsCache>,
    check_updates_window: Duration,
}

/// Fecha de evaluación para "hoy" y "última semana" (UTC)
fn today() -> NaiveDate {
    Utc::now().date_naive()
}

impl TripController {
    pub fn new(state: &AppState) -> Self {
        Self {
            store: state.store.clone(),
            stats_cache: state.stats_cache.clone(),
            check_updates_window: Duration::minutes(state.config.check_updates_window_minutes),
        }
    }

    async fn invalidate_stats(&self) {
        if let Some(cache) = &self.stats_cache {
            cache.invalidate().await;
        }
    }

    async fn find_or_404(&self, id: i64) -> AppResult<TripRecord> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Vehículo", &id.to_string()))
    }

    pub async fn list(&self, filter: TripFilter) -> AppResult<TripListResponse> {
        let records = self.store.list(&filter).await?;
        let stats = stats_service::aggregate(&records, today());

        log::info!("📋 Listado de recorridos: {} resultados", records.len());

        Ok(TripListResponse {
            trips: records.iter().map(TripResponse::from).collect(),
            stats,
            filters: filter,
        })
    }

    pub async fn get_by_id(&self, id: i64) -> AppResult<ApiResponse<TripResponse>> {
        let record = self.find_or_404(id).await?;
        Ok(ApiResponse::success(TripResponse::from(&record)))
    }

    pub async fn create(&self, request: CreateTripRequest) -> AppResult<ApiResponse<TripResponse>> {
        request.validate()?;

        let draft = request.to_draft();
        draft.check_invariants()?;

        let record = self.store.create(&draft, request.created_by).await?;
        self.invalidate_stats().await;

        log::info!("✅ Recorrido {} creado para placa {}", record.id, record.plate);
        Ok(ApiResponse::success_with_message(
            TripResponse::from(&record),
            "Vehículo creado exitosamente".to_string(),
        ))
    }

    pub async fn update(
        &self,
        id: i64,
        request: UpdateTripRequest,
    ) -> AppResult<ApiResponse<TripResponse>> {
        request.validate()?;

        let current = self.find_or_404(id).await?;
        let mut draft = current.to_draft();
        request.apply(&mut draft);
        draft.check_invariants()?;

        let record = self
            .store
            .update(id, &draft, request.modified_by)
            .await?
            .ok_or_else(|| not_found_error("Vehículo", &id.to_string()))?;
        self.invalidate_stats().await;

        log::info!("✏️ Recorrido {} actualizado", id);
        Ok(ApiResponse::success_with_message(
            TripResponse::from(&record),
            "Vehículo actualizado exitosamente".to_string(),
        ))
    }

    pub async fn delete(&self, id: i64) -> AppResult<ApiResponse<()>> {
        if !self.store.delete(id).await? {
            return Err(not_found_error("Vehículo", &id.to_string()));
        }
        self.invalidate_stats().await;

        log::info!("🗑️ Recorrido {} eliminado", id);
        Ok(ApiResponse::message("Vehículo eliminado exitosamente".to_string()))
    }

    pub async fn toggle_validation(
        &self,
        request: ToggleValidationRequest,
    ) -> AppResult<ApiResponse<ToggleValidationResponse>> {
        let record = self
            .store
            .set_validated(request.trip_id, request.validated, request.modified_by)
            .await?
            .ok_or_else(|| not_found_error("Vehículo", &request.trip_id.to_string()))?;
        self.invalidate_stats().await;

        let status = if record.validated { "validado" } else { "invalidado" };
        log::info!("🔄 Vehículo {} {}", record.plate, status);

        let message = format!("Vehículo {} {} correctamente", record.plate, status);
        Ok(ApiResponse::success_with_message(
            ToggleValidationResponse {
                id: record.id,
                plate: record.plate,
                validated: record.validated,
                timestamp: record.updated_at,
            },
            message,
        ))
    }

    pub async fn bulk_validation(
        &self,
        request: BulkValidationRequest,
    ) -> AppResult<ApiResponse<BulkValidationResponse>> {
        request.validate()?;

        let validated = request.action.validated();
        let updated_count = self
            .store
            .set_validated_many(&request.trip_ids, validated, request.modified_by)
            .await?;
        self.invalidate_stats().await;

        let verb = if validated { "validaron" } else { "invalidaron" };
        log::info!("📦 Acción masiva: se {} {} de {} vehículos", verb, updated_count, request.trip_ids.len());

        Ok(ApiResponse::success_with_message(
            BulkValidationResponse { updated_count },
            format!("Se {} {} vehículos exitosamente", verb, updated_count),
        ))
    }

    pub async fn stats(&self, filter: TripFilter) -> AppResult<TripStats> {
        if let Some(cache) = &self.stats_cache {
            if let Some(stats) = cache.get(&filter).await {
                return Ok(stats);
            }
        }

        let records = self.store.list(&filter).await?;
        let stats = stats_service::aggregate(&records, today());

        if let Some(cache) = &self.stats_cache {
            cache.put(&filter, &stats).await;
        }
        Ok(stats)
    }

    pub async fn check_updates(&self, query: CheckUpdatesQuery) -> AppResult<CheckUpdatesResponse> {
        let now = Utc::now();
        let since = parse_cursor(query.since.as_deref())
            .unwrap_or_else(|| now - self.check_updates_window);

        let has_updates = self.store.has_updates_since(since).await?;

        Ok(CheckUpdatesResponse {
            has_updates,
            last_check: since,
            current_time: now,
        })
    }

    pub async fn export(&self, query: ExportQuery) -> AppResult<ExportOutcome> {
        let filter = query.filters.to_filter();
        let records = self.store.list(&filter).await?;
        let rows: Vec<ExportRow> = records.iter().map(ExportRow::from).collect();

        let pipeline = ExportPipeline::for_format(query.format());
        let filename_base = export_filename_base(pipeline.layout(), Local::now().naive_local());

        pipeline
            .run(&rows, &filename_base)
            .map_err(|e| AppError::Export(e.to_string()))
    }
}

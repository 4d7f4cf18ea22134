//! Repositorios
//!
//! `TripStore` es la costura entre la lógica de la aplicación y el almacenamiento.
//! La implementación de producción es `TripRepository` sobre PostgreSQL.

pub mod trip_repository;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::models::trip::{TripDraft, TripRecord};
use crate::models::trip_filter::TripFilter;
use crate::utils::errors::AppResult;

pub use trip_repository::TripRepository;

#[async_trait]
pub trait TripStore: Send + Sync {
    /// Registros que cumplen el filtro, el más reciente (`start_time`) primero
    async fn list(&self, filter: &TripFilter) -> AppResult<Vec<TripRecord>>;

    async fn find_by_id(&self, id: i64) -> AppResult<Option<TripRecord>>;

    async fn create(&self, draft: &TripDraft, created_by: Option<i64>) -> AppResult<TripRecord>;

    /// Sobrescribe los campos editables; `None` si el id no existe
    async fn update(
        &self,
        id: i64,
        draft: &TripDraft,
        modified_by: Option<i64>,
    ) -> AppResult<Option<TripRecord>>;

    /// Borrado físico; `false` si el id no existe
    async fn delete(&self, id: i64) -> AppResult<bool>;

    async fn set_validated(
        &self,
        id: i64,
        validated: bool,
        modified_by: Option<i64>,
    ) -> AppResult<Option<TripRecord>>;

    /// Devuelve cuántos registros se actualizaron
    async fn set_validated_many(
        &self,
        ids: &[i64],
        validated: bool,
        modified_by: Option<i64>,
    ) -> AppResult<u64>;

    async fn has_updates_since(&self, since: DateTime<Utc>) -> AppResult<bool>;
}

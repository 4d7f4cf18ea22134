//! Store en memoria y helpers compartidos por los tests de integración

#![allow(dead_code)]

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{HeaderMap, Request, StatusCode};
use axum::Router;
use chrono::{DateTime, Duration, TimeZone, Utc};
use rust_decimal::Decimal;
use tokio::sync::RwLock;
use tower::ServiceExt;

use fleet_tracking::config::EnvironmentConfig;
use fleet_tracking::models::trip::{Priority, TripDraft, TripRecord, TripStatus, VehicleType};
use fleet_tracking::models::trip_filter::TripFilter;
use fleet_tracking::repositories::TripStore;
use fleet_tracking::utils::errors::AppResult;
use fleet_tracking::{create_app_router, AppState};

#[derive(Default)]
pub struct InMemoryTripStore {
    records: RwLock<Vec<TripRecord>>,
    next_id: AtomicI64,
}

impl InMemoryTripStore {
    /// Insertar un registro tal cual (fechas de auditoría incluidas)
    pub async fn insert(&self, draft: TripDraft, at: DateTime<Utc>) -> TripRecord {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        let record = draft.into_record(id, at, None);
        self.records.write().await.push(record.clone());
        record
    }
}

#[async_trait]
impl TripStore for InMemoryTripStore {
    async fn list(&self, filter: &TripFilter) -> AppResult<Vec<TripRecord>> {
        let mut matching: Vec<TripRecord> = self
            .records
            .read()
            .await
            .iter()
            .filter(|record| filter.matches(record))
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.start_time.cmp(&a.start_time).then(b.id.cmp(&a.id)));
        Ok(matching)
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<TripRecord>> {
        Ok(self.records.read().await.iter().find(|r| r.id == id).cloned())
    }

    async fn create(&self, draft: &TripDraft, created_by: Option<i64>) -> AppResult<TripRecord> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        let record = draft.clone().into_record(id, Utc::now(), created_by);
        self.records.write().await.push(record.clone());
        Ok(record)
    }

    async fn update(
        &self,
        id: i64,
        draft: &TripDraft,
        modified_by: Option<i64>,
    ) -> AppResult<Option<TripRecord>> {
        let mut records = self.records.write().await;
        let Some(existing) = records.iter_mut().find(|r| r.id == id) else {
            return Ok(None);
        };

        let mut updated = draft.clone().into_record(id, existing.created_at, existing.created_by);
        updated.updated_at = Utc::now();
        updated.modified_by = modified_by;
        *existing = updated.clone();
        Ok(Some(updated))
    }

    async fn delete(&self, id: i64) -> AppResult<bool> {
        let mut records = self.records.write().await;
        let before = records.len();
        records.retain(|r| r.id != id);
        Ok(records.len() < before)
    }

    async fn set_validated(
        &self,
        id: i64,
        validated: bool,
        modified_by: Option<i64>,
    ) -> AppResult<Option<TripRecord>> {
        let mut records = self.records.write().await;
        Ok(records.iter_mut().find(|r| r.id == id).map(|record| {
            record.validated = validated;
            record.modified_by = modified_by;
            record.updated_at = Utc::now();
            record.clone()
        }))
    }

    async fn set_validated_many(
        &self,
        ids: &[i64],
        validated: bool,
        modified_by: Option<i64>,
    ) -> AppResult<u64> {
        let mut records = self.records.write().await;
        let mut count = 0;
        for record in records.iter_mut().filter(|r| ids.contains(&r.id)) {
            record.validated = validated;
            record.modified_by = modified_by;
            record.updated_at = Utc::now();
            count += 1;
        }
        Ok(count)
    }

    async fn has_updates_since(&self, since: DateTime<Utc>) -> AppResult<bool> {
        Ok(self.records.read().await.iter().any(|r| r.updated_at > since))
    }
}

pub fn at(year: i32, month: u32, day: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, 0, 0).unwrap()
}

pub fn draft(code: &str, plate: &str, vehicle_type: VehicleType, start: DateTime<Utc>) -> TripDraft {
    TripDraft {
        code: code.to_string(),
        plate: plate.to_string(),
        vehicle_type,
        start_time: start,
        end_time: start + Duration::hours(2),
        delivery_count: 5,
        billing_amount: Decimal::new(100_000, 0),
        note: None,
        client: "Transportes Rápidos S.A.".to_string(),
        validated: true,
        priority: Priority::Low,
        status: TripStatus::Active,
        performance_index: Decimal::ZERO,
    }
}

/// Registro del escenario base: V-1 / ABC123, Turbo, validado
pub fn reference_trip() -> TripDraft {
    draft("V-1", "ABC123", VehicleType::Turbo, at(2024, 1, 10, 8))
}

pub fn test_state(store: Arc<InMemoryTripStore>) -> AppState {
    AppState::new(store, EnvironmentConfig::default())
}

pub fn test_app(store: Arc<InMemoryTripStore>) -> Router {
    create_app_router(test_state(store))
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl TestResponse {
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_slice(&self.body).expect("response body is not JSON")
    }

    pub fn header(&self, name: &str) -> &str {
        self.headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
    }
}

pub async fn send(app: Router, request: Request<Body>) -> TestResponse {
    let response = app.oneshot(request).await.expect("router is infallible");
    let status = response.status();
    let headers = response.headers().clone();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap().to_vec();
    TestResponse { status, headers, body }
}

pub async fn get(app: Router, uri: &str) -> TestResponse {
    send(app, Request::get(uri).body(Body::empty()).unwrap()).await
}

pub async fn send_json(app: Router, method: &str, uri: &str, body: serde_json::Value) -> TestResponse {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

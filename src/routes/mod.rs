//! Rutas HTTP
//!
//! `create_app_router` arma el router completo con sus capas.

pub mod export_routes;
pub mod stats_routes;
pub mod trip_routes;

use axum::{extract::State, response::Json, routing::get, Router};
use serde_json::json;
use tower_http::{compression::CompressionLayer, trace::TraceLayer};

use crate::middleware::cors_layer;
use crate::state::AppState;

pub fn create_app_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config.cors_origins);

    Router::new()
        .route("/health", get(health_check))
        .nest("/api/trips", trip_routes::create_trip_router())
        .nest(
            "/api",
            stats_routes::create_stats_router().merge(export_routes::create_export_router()),
        )
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

async fn health_check(State(state): State<AppState>) -> Json<serde_json::Value> {
    let cache = match &state.stats_cache {
        Some(cache) => {
            if cache.is_available().await {
                "connected"
            } else {
                "unavailable"
            }
        }
        None => "disabled",
    };

    Json(json!({
        "status": "ok",
        "service": "fleet-tracking",
        "cache": cache,
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

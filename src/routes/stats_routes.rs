use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};

use crate::controllers::TripController;
use crate::dto::trip_dto::{CheckUpdatesQuery, CheckUpdatesResponse, TripFilterParams};
use crate::models::stats::TripStats;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_stats_router() -> Router<AppState> {
    Router::new()
        .route("/stats/real-time", get(real_time_stats))
        .route("/check-updates", get(check_updates))
}

async fn real_time_stats(
    State(state): State<AppState>,
    Query(params): Query<TripFilterParams>,
) -> Result<Json<TripStats>, AppError> {
    let controller = TripController::new(&state);
    let stats = controller.stats(params.to_filter()).await?;
    Ok(Json(stats))
}

async fn check_updates(
    State(state): State<AppState>,
    Query(query): Query<CheckUpdatesQuery>,
) -> Result<Json<CheckUpdatesResponse>, AppError> {
    let controller = TripController::new(&state);
    let response = controller.check_updates(query).await?;
    Ok(Json(response))
}

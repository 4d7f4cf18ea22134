use axum::{
    extract::{Path, Query, State},
    routing::{get, post},
    Json, Router,
};

use crate::controllers::TripController;
use crate::dto::trip_dto::{
    BulkValidationRequest, BulkValidationResponse, CreateTripRequest, ToggleValidationRequest,
    ToggleValidationResponse, TripFilterParams, TripListResponse, TripResponse, UpdateTripRequest,
};
use crate::dto::ApiResponse;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_trip_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_trips).post(create_trip))
        .route("/toggle-validation", post(toggle_validation))
        .route("/bulk-validation", post(bulk_validation))
        .route("/:id", get(get_trip).put(update_trip).delete(delete_trip))
}

async fn list_trips(
    State(state): State<AppState>,
    Query(params): Query<TripFilterParams>,
) -> Result<Json<TripListResponse>, AppError> {
    let controller = TripController::new(&state);
    let response = controller.list(params.to_filter()).await?;
    Ok(Json(response))
}

async fn create_trip(
    State(state): State<AppState>,
    Json(request): Json<CreateTripRequest>,
) -> Result<Json<ApiResponse<TripResponse>>, AppError> {
    let controller = TripController::new(&state);
    let response = controller.create(request).await?;
    Ok(Json(response))
}

async fn get_trip(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<TripResponse>>, AppError> {
    let controller = TripController::new(&state);
    let response = controller.get_by_id(id).await?;
    Ok(Json(response))
}

async fn update_trip(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<UpdateTripRequest>,
) -> Result<Json<ApiResponse<TripResponse>>, AppError> {
    let controller = TripController::new(&state);
    let response = controller.update(id, request).await?;
    Ok(Json(response))
}

async fn delete_trip(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let controller = TripController::new(&state);
    let response = controller.delete(id).await?;
    Ok(Json(response))
}

async fn toggle_validation(
    State(state): State<AppState>,
    Json(request): Json<ToggleValidationRequest>,
) -> Result<Json<ApiResponse<ToggleValidationResponse>>, AppError> {
    let controller = TripController::new(&state);
    let response = controller.toggle_validation(request).await?;
    Ok(Json(response))
}

async fn bulk_validation(
    State(state): State<AppState>,
    Json(request): Json<BulkValidationRequest>,
) -> Result<Json<ApiResponse<BulkValidationResponse>>, AppError> {
    let controller = TripController::new(&state);
    let response = controller.bulk_validation(request).await?;
    Ok(Json(response))
}

use axum::{
    extract::{Query, State},
    http::header,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};

use crate::controllers::TripController;
use crate::dto::trip_dto::ExportQuery;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_export_router() -> Router<AppState> {
    Router::new().route("/export", get(export_trips))
}

async fn export_trips(
    State(state): State<AppState>,
    Query(query): Query<ExportQuery>,
) -> Result<Response, AppError> {
    let controller = TripController::new(&state);
    let outcome = controller.export(query).await?;

    let disposition = format!("attachment; filename=\"{}\"", outcome.filename);
    let headers = [
        (header::CONTENT_TYPE, outcome.content_type.to_string()),
        (header::CONTENT_DISPOSITION, disposition),
    ];

    Ok((headers, outcome.bytes).into_response())
}

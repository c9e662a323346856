use axum::{
    extract::{Path, State},
    response::Response,
    routing::get,
    Json, Router,
};

use crate::{
    dto::FilamentPayload,
    errors::ApiError,
    handlers::common::{created_response, deleted_response, success_response, validate},
    validation, AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_filaments).post(create_filament))
        .route("/alerts/low-stock", get(low_stock_alerts))
        .route(
            "/:id",
            get(get_filament).put(update_filament).delete(delete_filament),
        )
}

async fn list_filaments(State(state): State<AppState>) -> Result<Response, ApiError> {
    let filaments = state.filaments.list().await?;
    Ok(success_response(filaments))
}

async fn low_stock_alerts(State(state): State<AppState>) -> Result<Response, ApiError> {
    let alerts = state.filaments.low_stock_alerts().await?;
    Ok(success_response(alerts))
}

async fn get_filament(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Response, ApiError> {
    let filament = state.filaments.get(id).await?;
    Ok(success_response(filament))
}

async fn create_filament(
    State(state): State<AppState>,
    Json(payload): Json<FilamentPayload>,
) -> Result<Response, ApiError> {
    validate(validation::validate_filament(&payload, false))?;
    let filament = state.filaments.create(payload).await?;
    Ok(created_response(filament))
}

async fn update_filament(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<FilamentPayload>,
) -> Result<Response, ApiError> {
    validate(validation::validate_filament(&payload, true))?;
    let filament = state.filaments.update(id, payload).await?;
    Ok(success_response(filament))
}

async fn delete_filament(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Response, ApiError> {
    state.filaments.delete(id).await?;
    Ok(deleted_response("Filament deleted successfully"))
}

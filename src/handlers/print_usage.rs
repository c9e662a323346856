use axum::{
    extract::{Path, State},
    response::Response,
    routing::get,
    Json, Router,
};

use crate::{
    dto::PrintUsagePayload,
    errors::ApiError,
    handlers::common::{created_response, deleted_response, success_response, validate},
    validation, AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_usage).post(create_usage))
        .route("/order/:order_id", get(usage_by_order))
        .route("/:id", get(get_usage).delete(delete_usage))
}

async fn list_usage(State(state): State<AppState>) -> Result<Response, ApiError> {
    let rows = state.print_usage.list().await?;
    Ok(success_response(rows))
}

async fn usage_by_order(
    State(state): State<AppState>,
    Path(order_id): Path<i64>,
) -> Result<Response, ApiError> {
    let rows = state.print_usage.by_order(order_id).await?;
    Ok(success_response(rows))
}

async fn get_usage(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Response, ApiError> {
    let row = state.print_usage.get(id).await?;
    Ok(success_response(row))
}

async fn create_usage(
    State(state): State<AppState>,
    Json(payload): Json<PrintUsagePayload>,
) -> Result<Response, ApiError> {
    validate(validation::validate_print_usage(&payload))?;
    let row = state.print_usage.create(payload).await?;
    Ok(created_response(row))
}

async fn delete_usage(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Response, ApiError> {
    state.print_usage.remove(id).await?;
    Ok(deleted_response("Print usage deleted and stock restored"))
}

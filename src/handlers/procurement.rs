use axum::{
    extract::{Path, State},
    response::Response,
    routing::get,
    Json, Router,
};

use crate::{
    dto::ProcurementPayload,
    errors::ApiError,
    handlers::common::{created_response, deleted_response, success_response, validate},
    validation, AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_procurement).post(create_procurement))
        .route("/pending/list", get(pending_procurement))
        .route(
            "/:id",
            get(get_procurement)
                .put(update_procurement)
                .delete(delete_procurement),
        )
}

async fn list_procurement(State(state): State<AppState>) -> Result<Response, ApiError> {
    let rows = state.procurement.list().await?;
    Ok(success_response(rows))
}

async fn pending_procurement(State(state): State<AppState>) -> Result<Response, ApiError> {
    let rows = state.procurement.pending().await?;
    Ok(success_response(rows))
}

async fn get_procurement(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Response, ApiError> {
    let row = state.procurement.get(id).await?;
    Ok(success_response(row))
}

async fn create_procurement(
    State(state): State<AppState>,
    Json(payload): Json<ProcurementPayload>,
) -> Result<Response, ApiError> {
    validate(validation::validate_procurement(&payload, false))?;
    let row = state.procurement.create(payload).await?;
    Ok(created_response(row))
}

async fn update_procurement(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<ProcurementPayload>,
) -> Result<Response, ApiError> {
    validate(validation::validate_procurement(&payload, true))?;
    let row = state.procurement.update(id, payload).await?;
    Ok(success_response(row))
}

async fn delete_procurement(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Response, ApiError> {
    state.procurement.delete(id).await?;
    Ok(deleted_response("Procurement deleted successfully"))
}

use axum::{
    extract::{Path, State},
    response::Response,
    routing::get,
    Json, Router,
};

use crate::{
    dto::VendorPayload,
    errors::ApiError,
    handlers::common::{created_response, deleted_response, success_response, validate},
    validation, AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_vendors).post(create_vendor))
        .route(
            "/:id",
            get(get_vendor).put(update_vendor).delete(delete_vendor),
        )
}

async fn list_vendors(State(state): State<AppState>) -> Result<Response, ApiError> {
    let vendors = state.vendors.list().await?;
    Ok(success_response(vendors))
}

async fn get_vendor(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Response, ApiError> {
    let vendor = state.vendors.get(id).await?;
    Ok(success_response(vendor))
}

async fn create_vendor(
    State(state): State<AppState>,
    Json(payload): Json<VendorPayload>,
) -> Result<Response, ApiError> {
    validate(validation::validate_vendor(&payload, false))?;
    let vendor = state.vendors.create(payload).await?;
    Ok(created_response(vendor))
}

async fn update_vendor(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<VendorPayload>,
) -> Result<Response, ApiError> {
    validate(validation::validate_vendor(&payload, true))?;
    let vendor = state.vendors.update(id, payload).await?;
    Ok(success_response(vendor))
}

async fn delete_vendor(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Response, ApiError> {
    state.vendors.delete(id).await?;
    Ok(deleted_response("Vendor deleted successfully"))
}

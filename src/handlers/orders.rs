use axum::{
    extract::{Path, State},
    response::Response,
    routing::get,
    Json, Router,
};

use crate::{
    dto::OrderPayload,
    errors::ApiError,
    handlers::common::{created_response, deleted_response, success_response, validate},
    validation, AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_orders).post(create_order))
        .route("/active/list", get(active_orders))
        .route(
            "/:id",
            get(get_order).put(update_order).delete(delete_order),
        )
}

async fn list_orders(State(state): State<AppState>) -> Result<Response, ApiError> {
    let orders = state.orders.list().await?;
    Ok(success_response(orders))
}

async fn active_orders(State(state): State<AppState>) -> Result<Response, ApiError> {
    let orders = state.orders.active().await?;
    Ok(success_response(orders))
}

async fn get_order(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Response, ApiError> {
    let order = state.orders.get(id).await?;
    Ok(success_response(order))
}

async fn create_order(
    State(state): State<AppState>,
    Json(payload): Json<OrderPayload>,
) -> Result<Response, ApiError> {
    validate(validation::validate_order(&payload, false))?;
    let order = state.orders.create(payload).await?;
    Ok(created_response(order))
}

async fn update_order(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<OrderPayload>,
) -> Result<Response, ApiError> {
    validate(validation::validate_order(&payload, true))?;
    let order = state.orders.update(id, payload).await?;
    Ok(success_response(order))
}

async fn delete_order(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Response, ApiError> {
    state.orders.delete(id).await?;
    Ok(deleted_response("Order deleted successfully"))
}

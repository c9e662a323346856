use axum::{
    extract::{Path, State},
    response::Response,
    routing::get,
    Json, Router,
};

use crate::{
    dto::PaymentPayload,
    errors::ApiError,
    handlers::common::{created_response, deleted_response, success_response, validate},
    validation, AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_payments).post(create_payment))
        .route("/pending/receivables", get(pending_receivables))
        .route("/order/:order_id", get(payments_by_order))
        .route("/:id", get(get_payment).delete(delete_payment))
}

async fn list_payments(State(state): State<AppState>) -> Result<Response, ApiError> {
    let payments = state.payments.list().await?;
    Ok(success_response(payments))
}

async fn pending_receivables(State(state): State<AppState>) -> Result<Response, ApiError> {
    let receivables = state.payments.pending_receivables().await?;
    Ok(success_response(receivables))
}

async fn payments_by_order(
    State(state): State<AppState>,
    Path(order_id): Path<i64>,
) -> Result<Response, ApiError> {
    let payments = state.payments.by_order(order_id).await?;
    Ok(success_response(payments))
}

async fn get_payment(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Response, ApiError> {
    let payment = state.payments.get(id).await?;
    Ok(success_response(payment))
}

async fn create_payment(
    State(state): State<AppState>,
    Json(payload): Json<PaymentPayload>,
) -> Result<Response, ApiError> {
    validate(validation::validate_payment(&payload))?;
    let payment = state.payments.create(payload).await?;
    Ok(created_response(payment))
}

async fn delete_payment(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Response, ApiError> {
    state.payments.remove(id).await?;
    Ok(deleted_response("Payment deleted successfully"))
}

use axum::{extract::State, response::Response, routing::get, Router};

use crate::{errors::ApiError, handlers::common::success_response, AppState};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/stats", get(stats))
        .route("/upcoming-etas", get(upcoming_etas))
        .route("/chart-data", get(chart_data))
}

async fn stats(State(state): State<AppState>) -> Result<Response, ApiError> {
    let stats = state.dashboard.stats().await?;
    Ok(success_response(stats))
}

async fn upcoming_etas(State(state): State<AppState>) -> Result<Response, ApiError> {
    let etas = state.dashboard.upcoming_etas().await?;
    Ok(success_response(etas))
}

async fn chart_data(State(state): State<AppState>) -> Result<Response, ApiError> {
    let data = state.dashboard.chart_data().await?;
    Ok(success_response(data))
}

use axum::{extract::State, response::Response};
use serde::Serialize;

use crate::{db, handlers::common::success_response, AppState};

#[derive(Debug, Serialize)]
struct HealthStatus {
    status: &'static str,
    database: &'static str,
    version: &'static str,
}

pub async fn root() -> &'static str {
    "PrintDesk API is running"
}

pub async fn health(State(state): State<AppState>) -> Response {
    let database = match db::check_connection(&*state.db).await {
        Ok(()) => "up",
        Err(_) => "down",
    };

    success_response(HealthStatus {
        status: if database == "up" { "ok" } else { "degraded" },
        database,
        version: env!("CARGO_PKG_VERSION"),
    })
}

//! PrintDesk API: back-office for a small 3D-printing service. Vendors,
//! filament inventory, orders, payments, procurement and print-usage tracking
//! over a REST surface, with the cross-entity consistency rules (payment
//! recompute, delivery stock receipt, usage stock consumption) enforced in
//! the service layer.

pub mod config;
pub mod db;
pub mod dto;
pub mod entities;
pub mod errors;
pub mod events;
pub mod handlers;
pub mod migrator;
pub mod services;
pub mod validation;

use std::sync::Arc;

use axum::{routing::get, Router};
use sea_orm::DatabaseConnection;

use events::EventSender;
use services::{
    DashboardService, FilamentService, OrderService, PaymentService, PrintUsageService,
    ProcurementService, VendorService,
};

/// Shared application state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<DatabaseConnection>,
    pub vendors: Arc<VendorService>,
    pub filaments: Arc<FilamentService>,
    pub orders: Arc<OrderService>,
    pub payments: Arc<PaymentService>,
    pub procurement: Arc<ProcurementService>,
    pub print_usage: Arc<PrintUsageService>,
    pub dashboard: Arc<DashboardService>,
}

impl AppState {
    pub fn new(db: Arc<DatabaseConnection>, events: Option<EventSender>) -> Self {
        let vendors = Arc::new(VendorService::new(db.clone(), events.clone()));
        let filaments = Arc::new(FilamentService::new(db.clone(), events.clone()));
        let orders = Arc::new(OrderService::new(db.clone(), events.clone()));
        let payments = Arc::new(PaymentService::new(
            db.clone(),
            orders.clone(),
            events.clone(),
        ));
        let procurement = Arc::new(ProcurementService::new(
            db.clone(),
            filaments.clone(),
            events.clone(),
        ));
        let print_usage = Arc::new(PrintUsageService::new(
            db.clone(),
            filaments.clone(),
            events,
        ));
        let dashboard = Arc::new(DashboardService::new(
            db.clone(),
            filaments.clone(),
            payments.clone(),
        ));

        Self {
            db,
            vendors,
            filaments,
            orders,
            payments,
            procurement,
            print_usage,
            dashboard,
        }
    }
}

/// The `/api` resource routes.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/vendors", handlers::vendors::router())
        .nest("/inventory", handlers::inventory::router())
        .nest("/orders", handlers::orders::router())
        .nest("/payments", handlers::payments::router())
        .nest("/procurement", handlers::procurement::router())
        .nest("/print-usage", handlers::print_usage::router())
        .nest("/dashboard", handlers::dashboard::router())
}

/// Full application router: liveness probes plus the `/api` tree.
pub fn app_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::health::root))
        .route("/health", get(handlers::health::health))
        .nest("/api", api_routes())
        .with_state(state)
}

#![allow(dead_code)]

use std::sync::Arc;

use chrono::NaiveDate;
use printdesk_api::{
    db::{self, DbConfig},
    dto::{
        FilamentPayload, OrderPayload, PaymentPayload, PrintUsagePayload, ProcurementPayload,
        VendorPayload,
    },
    events::{self, Event},
    AppState,
};
use rust_decimal::Decimal;
use tokio::sync::mpsc;

/// Spins up an application state backed by a fresh in-memory SQLite database.
/// A single pooled connection keeps every query on the same database.
pub async fn setup() -> AppState {
    let (state, event_rx) = setup_with_events().await;
    tokio::spawn(events::process_events(event_rx));
    state
}

/// Like [`setup`], but hands the event receiver to the test so it can assert
/// on what the services published.
pub async fn setup_with_events() -> (AppState, mpsc::Receiver<Event>) {
    let cfg = DbConfig {
        url: "sqlite::memory:".to_string(),
        max_connections: 1,
        min_connections: 1,
        ..Default::default()
    };

    let pool = db::establish_connection_with_config(&cfg)
        .await
        .expect("failed to create test database");
    db::run_migrations(&pool)
        .await
        .expect("failed to run migrations");

    let (event_sender, event_rx) = events::event_channel(64);
    (AppState::new(Arc::new(pool), Some(event_sender)), event_rx)
}

pub fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").expect("bad test date")
}

pub fn vendor_payload(name: &str) -> VendorPayload {
    VendorPayload {
        name: Some(name.to_string()),
        contact: Some("9876543210".to_string()),
        ..Default::default()
    }
}

pub fn filament_payload(cost_per_kg: Decimal) -> FilamentPayload {
    FilamentPayload {
        filament_type: Some("pla".to_string()),
        brand: Some("Polymaker".to_string()),
        color: Some("black".to_string()),
        cost_per_kg: Some(cost_per_kg),
        ..Default::default()
    }
}

pub fn order_payload(total: Decimal, advance_pct: Decimal) -> OrderPayload {
    OrderPayload {
        customer_name: Some("Asha Verma".to_string()),
        order_date: Some(date("2026-03-01")),
        total_amount: Some(total),
        advance_percentage: Some(advance_pct),
        ..Default::default()
    }
}

pub fn payment_payload(order_id: i64, amount: Decimal) -> PaymentPayload {
    PaymentPayload {
        order_id: Some(order_id),
        amount: Some(amount),
        payment_type: Some("advance".to_string()),
        payment_date: Some(date("2026-03-02")),
        ..Default::default()
    }
}

pub fn procurement_payload(
    vendor_id: i64,
    filament_id: i64,
    quantity_kg: Decimal,
    cost_per_kg: Decimal,
) -> ProcurementPayload {
    ProcurementPayload {
        vendor_id: Some(vendor_id),
        filament_id: Some(filament_id),
        quantity_kg: Some(quantity_kg),
        cost_per_kg: Some(cost_per_kg),
        order_date: Some(date("2026-03-01")),
        eta_delivery: Some(date("2026-03-10")),
        ..Default::default()
    }
}

pub fn usage_payload(order_id: i64, filament_id: i64, quantity_kg: Decimal) -> PrintUsagePayload {
    PrintUsagePayload {
        order_id: Some(order_id),
        filament_id: Some(filament_id),
        quantity_used_kg: Some(quantity_kg),
        ..Default::default()
    }
}

/// Creates a filament and raises its stock to the given level through the
/// ledger path (create always starts at zero).
pub async fn seed_filament_with_stock(
    state: &AppState,
    cost_per_kg: Decimal,
    stock_kg: Decimal,
) -> i64 {
    let filament = state
        .filaments
        .create(filament_payload(cost_per_kg))
        .await
        .expect("failed to create filament");
    if stock_kg != Decimal::ZERO {
        state
            .filaments
            .adjust_stock(&*state.db, filament.id, stock_kg)
            .await
            .expect("failed to seed stock");
    }
    filament.id
}

mod common;

use printdesk_api::dto::ProcurementPayload;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use common::{date, procurement_payload, seed_filament_with_stock, setup, vendor_payload};

async fn seed(state: &printdesk_api::AppState) -> (i64, i64) {
    let vendor = state
        .vendors
        .create(vendor_payload("Prism Filaments"))
        .await
        .expect("vendor create failed");
    let filament_id = seed_filament_with_stock(state, dec!(1000), Decimal::ZERO).await;
    (vendor.id, filament_id)
}

#[tokio::test]
async fn create_derives_total_and_forces_pending() {
    let state = setup().await;
    let (vendor_id, filament_id) = seed(&state).await;

    let mut payload = procurement_payload(vendor_id, filament_id, dec!(5), dec!(900));
    payload.status = Some("delivered".to_string());
    let row = state.procurement.create(payload).await.expect("create failed");

    assert_eq!(row.total_amount, dec!(4500.00));
    assert_eq!(row.status, "pending");
    assert!(row.final_delivery_date.is_none());
}

#[tokio::test]
async fn patching_one_money_field_rederives_total() {
    let state = setup().await;
    let (vendor_id, filament_id) = seed(&state).await;
    let row = state
        .procurement
        .create(procurement_payload(vendor_id, filament_id, dec!(5), dec!(900)))
        .await
        .expect("create failed");
    assert_eq!(row.total_amount, dec!(4500.00));

    let patch = ProcurementPayload {
        cost_per_kg: Some(dec!(1000)),
        ..Default::default()
    };
    let updated = state.procurement.update(row.id, patch).await.expect("update failed");
    assert_eq!(updated.total_amount, dec!(5000.00));

    let patch = ProcurementPayload {
        quantity_kg: Some(dec!(4)),
        ..Default::default()
    };
    let updated = state.procurement.update(row.id, patch).await.expect("update failed");
    assert_eq!(updated.total_amount, dec!(4000.00));
}

#[tokio::test]
async fn on_time_delivery_marks_delivered_and_receipts_stock() {
    let state = setup().await;
    let (vendor_id, filament_id) = seed(&state).await;
    let row = state
        .procurement
        .create(procurement_payload(vendor_id, filament_id, dec!(5), dec!(900)))
        .await
        .expect("create failed");

    let patch = ProcurementPayload {
        final_delivery_date: Some(date("2026-03-09")),
        ..Default::default()
    };
    let updated = state.procurement.update(row.id, patch).await.expect("update failed");

    assert_eq!(updated.status, "delivered");
    let filament = state.filaments.get(filament_id).await.expect("get failed");
    assert_eq!(filament.current_stock_kg, dec!(5));
}

#[tokio::test]
async fn late_delivery_marks_delayed() {
    let state = setup().await;
    let (vendor_id, filament_id) = seed(&state).await;
    let row = state
        .procurement
        .create(procurement_payload(vendor_id, filament_id, dec!(5), dec!(900)))
        .await
        .expect("create failed");

    let patch = ProcurementPayload {
        final_delivery_date: Some(date("2026-03-15")),
        ..Default::default()
    };
    let updated = state.procurement.update(row.id, patch).await.expect("update failed");

    assert_eq!(updated.status, "delayed");
    // delayed still receipts the stock
    let filament = state.filaments.get(filament_id).await.expect("get failed");
    assert_eq!(filament.current_stock_kg, dec!(5));
}

#[tokio::test]
async fn resaving_delivered_row_never_double_increments() {
    let state = setup().await;
    let (vendor_id, filament_id) = seed(&state).await;
    let row = state
        .procurement
        .create(procurement_payload(vendor_id, filament_id, dec!(5), dec!(900)))
        .await
        .expect("create failed");

    let deliver = ProcurementPayload {
        final_delivery_date: Some(date("2026-03-09")),
        ..Default::default()
    };
    state
        .procurement
        .update(row.id, deliver)
        .await
        .expect("first update failed");

    // same date again, then a different date: neither may receipt again
    for day in ["2026-03-09", "2026-03-11"] {
        let patch = ProcurementPayload {
            final_delivery_date: Some(date(day)),
            ..Default::default()
        };
        state
            .procurement
            .update(row.id, patch)
            .await
            .expect("re-save failed");
    }

    let filament = state.filaments.get(filament_id).await.expect("get failed");
    assert_eq!(filament.current_stock_kg, dec!(5));
}

#[tokio::test]
async fn pending_list_returns_undelivered_rows_in_eta_order() {
    let state = setup().await;
    let (vendor_id, filament_id) = seed(&state).await;

    let mut late = procurement_payload(vendor_id, filament_id, dec!(2), dec!(900));
    late.eta_delivery = Some(date("2026-03-20"));
    let late = state.procurement.create(late).await.expect("create failed");

    let soon = state
        .procurement
        .create(procurement_payload(vendor_id, filament_id, dec!(3), dec!(900)))
        .await
        .expect("create failed");

    let delivered = state
        .procurement
        .create(procurement_payload(vendor_id, filament_id, dec!(4), dec!(900)))
        .await
        .expect("create failed");
    let patch = ProcurementPayload {
        final_delivery_date: Some(date("2026-03-09")),
        ..Default::default()
    };
    state
        .procurement
        .update(delivered.id, patch)
        .await
        .expect("update failed");

    let pending = state.procurement.pending().await.expect("pending failed");
    assert_eq!(pending.len(), 2);
    assert_eq!(pending[0].procurement.id, soon.id);
    assert_eq!(pending[1].procurement.id, late.id);
}

#[tokio::test]
async fn delete_leaves_receipted_stock_alone() {
    let state = setup().await;
    let (vendor_id, filament_id) = seed(&state).await;
    let row = state
        .procurement
        .create(procurement_payload(vendor_id, filament_id, dec!(5), dec!(900)))
        .await
        .expect("create failed");
    let patch = ProcurementPayload {
        final_delivery_date: Some(date("2026-03-09")),
        ..Default::default()
    };
    state.procurement.update(row.id, patch).await.expect("update failed");

    state.procurement.delete(row.id).await.expect("delete failed");

    let filament = state.filaments.get(filament_id).await.expect("get failed");
    assert_eq!(filament.current_stock_kg, dec!(5));
}

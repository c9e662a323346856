mod common;

use assert_matches::assert_matches;
use printdesk_api::{dto::FilamentPayload, errors::ServiceError, events::Event};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use common::{
    filament_payload, order_payload, seed_filament_with_stock, setup, setup_with_events,
    usage_payload,
};

#[tokio::test]
async fn filament_create_forces_zero_stock() {
    let state = setup().await;
    let filament = state
        .filaments
        .create(filament_payload(dec!(1200)))
        .await
        .expect("create failed");
    assert_eq!(filament.current_stock_kg, Decimal::ZERO);
}

#[tokio::test]
async fn filament_update_cannot_touch_stock() {
    let state = setup().await;
    let id = seed_filament_with_stock(&state, dec!(1200), dec!(5)).await;

    let patch = FilamentPayload {
        color: Some("red".to_string()),
        ..Default::default()
    };
    let updated = state.filaments.update(id, patch).await.expect("update failed");
    assert_eq!(updated.color, "red");
    assert_eq!(updated.current_stock_kg, dec!(5));
}

#[tokio::test]
async fn low_stock_uses_one_kg_floor_when_threshold_unset() {
    let state = setup().await;
    // 0.5 kg with no explicit threshold: alerts
    let low = seed_filament_with_stock(&state, dec!(1000), dec!(0.5)).await;
    // 5 kg: fine
    seed_filament_with_stock(&state, dec!(1000), dec!(5)).await;

    let alerts = state.filaments.low_stock_alerts().await.expect("alerts failed");
    assert_eq!(alerts.len(), 1);
    assert_eq!(alerts[0].id, low);
}

#[tokio::test]
async fn usage_snapshots_cost_and_decrements_stock() {
    let state = setup().await;
    let filament_id = seed_filament_with_stock(&state, dec!(1000), dec!(10)).await;
    let order = state
        .orders
        .create(order_payload(dec!(5000), Decimal::ZERO))
        .await
        .expect("order create failed");

    let usage = state
        .print_usage
        .create(usage_payload(order.id, filament_id, dec!(2.5)))
        .await
        .expect("usage create failed");

    assert_eq!(usage.cost_consumed, dec!(2500.00));
    assert_eq!(usage.print_status, "success");

    let filament = state.filaments.get(filament_id).await.expect("get failed");
    assert_eq!(filament.current_stock_kg, dec!(7.5));

    // later price changes must not rewrite the snapshot
    let patch = FilamentPayload {
        cost_per_kg: Some(dec!(9999)),
        ..Default::default()
    };
    state
        .filaments
        .update(filament_id, patch)
        .await
        .expect("update failed");
    let reread = state.print_usage.get(usage.id).await.expect("get failed");
    assert_eq!(reread.cost_consumed, dec!(2500.00));
}

#[tokio::test]
async fn insufficient_stock_rejects_and_writes_nothing() {
    let state = setup().await;
    let filament_id = seed_filament_with_stock(&state, dec!(1000), dec!(2)).await;
    let order = state
        .orders
        .create(order_payload(dec!(5000), Decimal::ZERO))
        .await
        .expect("order create failed");

    let err = state
        .print_usage
        .create(usage_payload(order.id, filament_id, dec!(6)))
        .await
        .expect_err("expected InsufficientStock");
    assert_matches!(err, ServiceError::InsufficientStock(_));
    assert_eq!(
        err.response_message(),
        "Insufficient stock. Available: 2 kg"
    );

    let filament = state.filaments.get(filament_id).await.expect("get failed");
    assert_eq!(filament.current_stock_kg, dec!(2));
    let rows = state.print_usage.list().await.expect("list failed");
    assert!(rows.is_empty());
}

#[tokio::test]
async fn removing_usage_restores_stock_then_deletes_row() {
    let state = setup().await;
    let filament_id = seed_filament_with_stock(&state, dec!(1000), dec!(10)).await;
    let order = state
        .orders
        .create(order_payload(dec!(5000), Decimal::ZERO))
        .await
        .expect("order create failed");

    let usage = state
        .print_usage
        .create(usage_payload(order.id, filament_id, dec!(4)))
        .await
        .expect("usage create failed");
    state
        .print_usage
        .remove(usage.id)
        .await
        .expect("remove failed");

    let filament = state.filaments.get(filament_id).await.expect("get failed");
    assert_eq!(filament.current_stock_kg, dec!(10));
    let err = state
        .print_usage
        .get(usage.id)
        .await
        .expect_err("row should be gone");
    assert_matches!(err, ServiceError::NotFound(_));
}

#[tokio::test]
async fn competing_consumptions_cannot_both_win() {
    let state = setup().await;
    let filament_id = seed_filament_with_stock(&state, dec!(1000), dec!(10)).await;
    let order = state
        .orders
        .create(order_payload(dec!(5000), Decimal::ZERO))
        .await
        .expect("order create failed");

    // Two 6 kg consumptions against 10 kg of stock: the stock check holds a
    // row lock in the same transaction as the decrement, so exactly one can
    // succeed.
    let first = state
        .print_usage
        .create(usage_payload(order.id, filament_id, dec!(6)))
        .await;
    let second = state
        .print_usage
        .create(usage_payload(order.id, filament_id, dec!(6)))
        .await;

    let successes = [&first, &second].iter().filter(|r| r.is_ok()).count();
    assert_eq!(successes, 1);
    let loser = if first.is_ok() { second } else { first };
    assert_matches!(loser, Err(ServiceError::InsufficientStock(_)));

    let filament = state.filaments.get(filament_id).await.expect("get failed");
    assert_eq!(filament.current_stock_kg, dec!(4));
}

#[tokio::test]
async fn stock_adjustment_accumulates_and_rejects_unknown_filament() {
    let state = setup().await;
    let filament_id = seed_filament_with_stock(&state, dec!(1200), dec!(4)).await;

    let adjustment = state
        .filaments
        .adjust_stock(&*state.db, filament_id, dec!(-1.5))
        .await
        .expect("adjust failed");
    assert_eq!(adjustment.new_stock_kg, dec!(2.5));

    let err = state
        .filaments
        .adjust_stock(&*state.db, 4242, dec!(1))
        .await
        .expect_err("expected NotFound");
    assert_matches!(err, ServiceError::NotFound(_));
}

#[tokio::test]
async fn usage_history_for_order_reads_oldest_first() {
    let state = setup().await;
    let filament_id = seed_filament_with_stock(&state, dec!(1000), dec!(10)).await;
    let order = state
        .orders
        .create(order_payload(dec!(5000), Decimal::ZERO))
        .await
        .expect("order create failed");

    let first = state
        .print_usage
        .create(usage_payload(order.id, filament_id, dec!(1)))
        .await
        .expect("usage create failed");
    let second = state
        .print_usage
        .create(usage_payload(order.id, filament_id, dec!(2)))
        .await
        .expect("usage create failed");

    let rows = state
        .print_usage
        .by_order(order.id)
        .await
        .expect("by_order failed");
    let ids: Vec<i64> = rows.iter().map(|r| r.usage.id).collect();
    assert_eq!(ids, vec![first.id, second.id]);
}

#[tokio::test]
async fn stock_events_fire_only_after_committed_consumption() {
    let (state, mut events) = setup_with_events().await;
    let filament_id = seed_filament_with_stock(&state, dec!(1000), dec!(5)).await;
    let order = state
        .orders
        .create(order_payload(dec!(500), Decimal::ZERO))
        .await
        .expect("order create failed");
    while events.try_recv().is_ok() {}

    let rejected = state
        .print_usage
        .create(usage_payload(order.id, filament_id, dec!(9)))
        .await;
    assert_matches!(rejected, Err(ServiceError::InsufficientStock(_)));
    assert!(
        events.try_recv().is_err(),
        "rejected usage must publish nothing"
    );

    state
        .print_usage
        .create(usage_payload(order.id, filament_id, dec!(2)))
        .await
        .expect("usage create failed");

    let mut saw_adjustment = false;
    let mut saw_usage = false;
    while let Ok(event) = events.try_recv() {
        match event {
            Event::StockAdjusted {
                filament_id: id,
                new_stock_kg,
                ..
            } => {
                assert_eq!(id, filament_id);
                assert_eq!(new_stock_kg, dec!(3));
                saw_adjustment = true;
            }
            Event::PrintUsageRecorded { .. } => saw_usage = true,
            _ => {}
        }
    }
    assert!(saw_adjustment && saw_usage);
}

#[tokio::test]
async fn inventory_value_and_stock_by_type_aggregate() {
    let state = setup().await;
    seed_filament_with_stock(&state, dec!(1000), dec!(2)).await;

    let mut petg = filament_payload(dec!(1500));
    petg.filament_type = Some("petg".to_string());
    let petg = state.filaments.create(petg).await.expect("create failed");
    state
        .filaments
        .adjust_stock(&*state.db, petg.id, dec!(3))
        .await
        .expect("adjust failed");

    let value = state
        .filaments
        .inventory_value()
        .await
        .expect("value failed");
    assert_eq!(value, dec!(6500));

    let by_type = state
        .filaments
        .stock_by_type()
        .await
        .expect("by_type failed");
    assert_eq!(by_type.len(), 2);
    let petg_total = by_type
        .iter()
        .find(|s| s.filament_type == "petg")
        .expect("petg bucket missing");
    assert_eq!(petg_total.total_kg, dec!(3));
}

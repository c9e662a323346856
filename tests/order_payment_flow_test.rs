mod common;

use assert_matches::assert_matches;
use printdesk_api::{dto::OrderPayload, errors::ServiceError, events::Event};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use common::{order_payload, payment_payload, setup, setup_with_events};

#[tokio::test]
async fn order_create_seeds_derived_fields_and_forces_in_progress() {
    let state = setup().await;

    let mut payload = order_payload(dec!(1100), dec!(50));
    payload.status = Some("pending".to_string());
    payload.discount_percentage = Some(dec!(10));
    payload.gst_percentage = Some(dec!(18));

    let order = state.orders.create(payload).await.expect("create failed");

    assert_eq!(order.advance_amount, dec!(550.00));
    assert_eq!(order.balance_amount, dec!(550.00));
    assert_eq!(order.payment_status, "partially_paid");
    // status from the payload is ignored on create
    assert_eq!(order.status, "in_progress");
    assert_eq!(order.discount_amount, dec!(110.00));
    assert_eq!(order.gst_amount, dec!(178.20));
}

#[tokio::test]
async fn full_advance_creates_fully_paid_order() {
    let state = setup().await;
    let order = state
        .orders
        .create(order_payload(dec!(800), dec!(100)))
        .await
        .expect("create failed");

    assert_eq!(order.advance_amount, dec!(800));
    assert_eq!(order.balance_amount, dec!(0));
    assert_eq!(order.payment_status, "fully_paid");
}

#[tokio::test]
async fn payment_sequence_drives_order_payment_status() {
    let state = setup().await;
    let order = state
        .orders
        .create(order_payload(dec!(1000), Decimal::ZERO))
        .await
        .expect("create failed");
    assert_eq!(order.payment_status, "pending");

    // 600 paid: partially paid, advance overwritten with the paid total
    state
        .payments
        .create(payment_payload(order.id, dec!(600)))
        .await
        .expect("first payment failed");
    let after_first = state.orders.get(order.id).await.expect("get failed");
    assert_eq!(after_first.payment_status, "partially_paid");
    assert_eq!(after_first.advance_amount, dec!(600));
    assert_eq!(after_first.balance_amount, dec!(400));

    // +500 overpays: fully paid, balance goes negative
    let second = state
        .payments
        .create(payment_payload(order.id, dec!(500)))
        .await
        .expect("second payment failed");
    let after_second = state.orders.get(order.id).await.expect("get failed");
    assert_eq!(after_second.payment_status, "fully_paid");
    assert_eq!(after_second.advance_amount, dec!(1100));
    assert_eq!(after_second.balance_amount, dec!(-100));

    // deleting the 500 drops it back to partially paid
    state
        .payments
        .remove(second.id)
        .await
        .expect("payment delete failed");
    let after_delete = state.orders.get(order.id).await.expect("get failed");
    assert_eq!(after_delete.payment_status, "partially_paid");
    assert_eq!(after_delete.advance_amount, dec!(600));
    assert_eq!(after_delete.balance_amount, dec!(400));
}

#[tokio::test]
async fn payment_for_missing_order_is_not_found_and_writes_nothing() {
    let state = setup().await;
    let err = state
        .payments
        .create(payment_payload(9999, dec!(100)))
        .await
        .expect_err("expected NotFound");
    assert_matches!(err, ServiceError::NotFound(_));

    let payments = state.payments.list().await.expect("list failed");
    assert!(payments.is_empty());
}

#[tokio::test]
async fn payment_events_fire_only_after_commit() {
    let (state, mut events) = setup_with_events().await;
    let order = state
        .orders
        .create(order_payload(dec!(1000), Decimal::ZERO))
        .await
        .expect("create failed");
    while events.try_recv().is_ok() {}

    let rejected = state.payments.create(payment_payload(9999, dec!(100))).await;
    assert_matches!(rejected, Err(ServiceError::NotFound(_)));
    assert!(
        events.try_recv().is_err(),
        "failed payment must publish nothing"
    );

    state
        .payments
        .create(payment_payload(order.id, dec!(400)))
        .await
        .expect("payment failed");

    let mut saw_payment = false;
    let mut saw_status = false;
    while let Ok(event) = events.try_recv() {
        match event {
            Event::PaymentRecorded {
                order_id, amount, ..
            } => {
                assert_eq!(order_id, order.id);
                assert_eq!(amount, dec!(400));
                saw_payment = true;
            }
            Event::PaymentStatusChanged {
                order_id,
                new_status,
            } => {
                assert_eq!(order_id, order.id);
                assert_eq!(new_status, "partially_paid");
                saw_status = true;
            }
            _ => {}
        }
    }
    assert!(saw_payment && saw_status);
}

#[tokio::test]
async fn update_without_both_money_fields_preserves_derived_values() {
    let state = setup().await;
    let order = state
        .orders
        .create(order_payload(dec!(1000), dec!(40)))
        .await
        .expect("create failed");
    assert_eq!(order.advance_amount, dec!(400.00));

    // Only total changes: advance/balance/payment_status survive untouched
    let patch = OrderPayload {
        total_amount: Some(dec!(2000)),
        ..Default::default()
    };
    let updated = state.orders.update(order.id, patch).await.expect("update failed");
    assert_eq!(updated.total_amount, dec!(2000));
    assert_eq!(updated.advance_amount, dec!(400.00));
    assert_eq!(updated.balance_amount, dec!(600.00));
    assert_eq!(updated.payment_status, "partially_paid");
}

#[tokio::test]
async fn update_with_total_and_advance_reseeds_derived_values() {
    let state = setup().await;
    let order = state
        .orders
        .create(order_payload(dec!(1000), dec!(40)))
        .await
        .expect("create failed");

    let patch = OrderPayload {
        total_amount: Some(dec!(2000)),
        advance_percentage: Some(dec!(25)),
        ..Default::default()
    };
    let updated = state.orders.update(order.id, patch).await.expect("update failed");
    assert_eq!(updated.advance_amount, dec!(500.00));
    assert_eq!(updated.balance_amount, dec!(1500.00));
    assert_eq!(updated.payment_status, "partially_paid");
}

#[tokio::test]
async fn active_orders_excludes_delivered_and_cancelled() {
    let state = setup().await;
    let keep = state
        .orders
        .create(order_payload(dec!(100), Decimal::ZERO))
        .await
        .expect("create failed");

    let drop = state
        .orders
        .create(order_payload(dec!(200), Decimal::ZERO))
        .await
        .expect("create failed");
    let patch = OrderPayload {
        status: Some("delivered".to_string()),
        ..Default::default()
    };
    state.orders.update(drop.id, patch).await.expect("update failed");

    let active = state.orders.active().await.expect("active failed");
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].id, keep.id);
}

#[tokio::test]
async fn pending_receivables_sums_unpaid_balances() {
    let state = setup().await;
    state
        .orders
        .create(order_payload(dec!(1000), dec!(40)))
        .await
        .expect("create failed");
    state
        .orders
        .create(order_payload(dec!(500), dec!(100)))
        .await
        .expect("create failed");

    let receivables = state
        .payments
        .pending_receivables()
        .await
        .expect("receivables failed");
    // only the partially paid order counts
    assert_eq!(receivables.orders.len(), 1);
    assert_eq!(receivables.total_receivable, dec!(600.00));
}

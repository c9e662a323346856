use std::sync::Arc;

use chrono::Utc;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, ConnectionTrait, DatabaseConnection,
    EntityTrait, QueryFilter, QueryOrder,
};
use serde::Serialize;
use tracing::{info, instrument};

use crate::{
    dto::OrderPayload,
    entities::{
        order::{self, Entity as OrderEntity},
        payment::{self, Entity as PaymentEntity},
    },
    errors::ServiceError,
    events::{Event, EventSender},
    services::required,
};

const STATUS_IN_PROGRESS: &str = "in_progress";
const STATUS_COMPLETED: &str = "completed";

const PAYMENT_PENDING: &str = "pending";
const PAYMENT_PARTIAL: &str = "partially_paid";
const PAYMENT_FULL: &str = "fully_paid";

/// Result of re-deriving an order's payment state from its recorded payments.
#[derive(Debug, Clone, Serialize)]
pub struct PaymentStatusSummary {
    pub order_id: i64,
    pub total_paid: Decimal,
    pub balance_amount: Decimal,
    pub payment_status: String,
}

/// Money fields derived from the order totals and percentages.
struct DerivedAmounts {
    discount_amount: Decimal,
    gst_amount: Decimal,
    advance_amount: Decimal,
    balance_amount: Decimal,
    payment_status: String,
}

fn payment_status_for(paid: Decimal, total: Decimal) -> String {
    if paid >= total && total > Decimal::ZERO {
        PAYMENT_FULL.to_string()
    } else if paid > Decimal::ZERO {
        PAYMENT_PARTIAL.to_string()
    } else {
        PAYMENT_PENDING.to_string()
    }
}

fn derive_amounts(
    total: Decimal,
    advance_pct: Decimal,
    discount_pct: Decimal,
    gst_pct: Decimal,
) -> DerivedAmounts {
    let hundred = dec!(100);
    let discount_amount = (total * discount_pct / hundred).round_dp(2);
    let gst_amount = ((total - discount_amount) * gst_pct / hundred).round_dp(2);
    let advance_amount = (total * advance_pct / hundred).round_dp(2);
    let balance_amount = total - advance_amount;
    let payment_status = payment_status_for(advance_amount, total);

    DerivedAmounts {
        discount_amount,
        gst_amount,
        advance_amount,
        balance_amount,
        payment_status,
    }
}

#[derive(Clone)]
pub struct OrderService {
    db: Arc<DatabaseConnection>,
    events: Option<EventSender>,
}

impl OrderService {
    pub fn new(db: Arc<DatabaseConnection>, events: Option<EventSender>) -> Self {
        Self { db, events }
    }

    async fn emit(&self, event: Event) {
        if let Some(events) = &self.events {
            events.send(event).await;
        }
    }

    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<order::Model>, ServiceError> {
        let orders = OrderEntity::find()
            .order_by_desc(order::Column::CreatedAt)
            .all(&*self.db)
            .await?;
        Ok(orders)
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: i64) -> Result<order::Model, ServiceError> {
        OrderEntity::find_by_id(id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::not_found(format!("Order {}", id)))
    }

    /// Creates an order. The advance/balance/payment_status trio is seeded
    /// from `advance_percentage`; `status` is always `in_progress` on entry,
    /// whatever the payload says.
    #[instrument(skip(self, payload))]
    pub async fn create(&self, payload: OrderPayload) -> Result<order::Model, ServiceError> {
        let total_amount = required(payload.total_amount, "total_amount")?;
        let advance_pct = payload.advance_percentage.unwrap_or(Decimal::ZERO);
        let discount_pct = payload.discount_percentage.unwrap_or(Decimal::ZERO);
        let gst_pct = payload.gst_percentage.unwrap_or(Decimal::ZERO);
        let derived = derive_amounts(total_amount, advance_pct, discount_pct, gst_pct);

        let model = order::ActiveModel {
            customer_name: Set(required(payload.customer_name, "customer_name")?),
            customer_email: Set(payload.customer_email),
            contact_number: Set(payload.contact_number),
            delivery_address: Set(payload.delivery_address),
            order_description: Set(payload.order_description),
            print_type: Set(payload.print_type),
            filament_type: Set(payload.filament_type),
            filament_color: Set(payload.filament_color),
            estimated_quantity_units: Set(payload.estimated_quantity_units),
            estimated_filament_usage_kg: Set(payload.estimated_filament_usage_kg),
            order_date: Set(required(payload.order_date, "order_date")?),
            eta_delivery: Set(payload.eta_delivery),
            final_delivery_date: Set(payload.final_delivery_date),
            total_amount: Set(total_amount),
            advance_percentage: Set(advance_pct),
            discount_percentage: Set(discount_pct),
            discount_amount: Set(derived.discount_amount),
            gst_percentage: Set(gst_pct),
            gst_amount: Set(derived.gst_amount),
            advance_amount: Set(derived.advance_amount),
            balance_amount: Set(derived.balance_amount),
            payment_status: Set(derived.payment_status),
            priority: Set(payload.priority.unwrap_or_else(|| "normal".to_string())),
            status: Set(STATUS_IN_PROGRESS.to_string()),
            notes: Set(payload.notes),
            created_at: Set(Utc::now().into()),
            ..Default::default()
        };

        let order = model.insert(&*self.db).await?;
        info!(order_id = order.id, "Order created");
        self.emit(Event::OrderCreated(order.id)).await;
        Ok(order)
    }

    /// Updates an order. The percentage formula reseeds advance, balance and
    /// payment_status only when the patch carries BOTH `total_amount` and
    /// `advance_percentage`; otherwise the stored derived values survive.
    #[instrument(skip(self, payload))]
    pub async fn update(
        &self,
        id: i64,
        payload: OrderPayload,
    ) -> Result<order::Model, ServiceError> {
        let existing = self.get(id).await?;

        let effective_total = payload.total_amount.unwrap_or(existing.total_amount);
        let effective_discount_pct = payload
            .discount_percentage
            .unwrap_or(existing.discount_percentage);
        let effective_gst_pct = payload.gst_percentage.unwrap_or(existing.gst_percentage);

        let reseed = payload.total_amount.is_some() && payload.advance_percentage.is_some();
        let money_changed = payload.total_amount.is_some()
            || payload.discount_percentage.is_some()
            || payload.gst_percentage.is_some();

        let mut model: order::ActiveModel = existing.into();

        if let Some(customer_name) = payload.customer_name {
            model.customer_name = Set(customer_name);
        }
        if payload.customer_email.is_some() {
            model.customer_email = Set(payload.customer_email);
        }
        if payload.contact_number.is_some() {
            model.contact_number = Set(payload.contact_number);
        }
        if payload.delivery_address.is_some() {
            model.delivery_address = Set(payload.delivery_address);
        }
        if payload.order_description.is_some() {
            model.order_description = Set(payload.order_description);
        }
        if payload.print_type.is_some() {
            model.print_type = Set(payload.print_type);
        }
        if payload.filament_type.is_some() {
            model.filament_type = Set(payload.filament_type);
        }
        if payload.filament_color.is_some() {
            model.filament_color = Set(payload.filament_color);
        }
        if payload.estimated_quantity_units.is_some() {
            model.estimated_quantity_units = Set(payload.estimated_quantity_units);
        }
        if payload.estimated_filament_usage_kg.is_some() {
            model.estimated_filament_usage_kg = Set(payload.estimated_filament_usage_kg);
        }
        if let Some(order_date) = payload.order_date {
            model.order_date = Set(order_date);
        }
        if payload.eta_delivery.is_some() {
            model.eta_delivery = Set(payload.eta_delivery);
        }
        if payload.final_delivery_date.is_some() {
            model.final_delivery_date = Set(payload.final_delivery_date);
        }
        if let Some(total_amount) = payload.total_amount {
            model.total_amount = Set(total_amount);
        }
        if let Some(discount_pct) = payload.discount_percentage {
            model.discount_percentage = Set(discount_pct);
        }
        if let Some(gst_pct) = payload.gst_percentage {
            model.gst_percentage = Set(gst_pct);
        }
        if let Some(priority) = payload.priority {
            model.priority = Set(priority);
        }
        if let Some(status) = payload.status {
            model.status = Set(status);
        }
        if payload.notes.is_some() {
            model.notes = Set(payload.notes);
        }

        if money_changed {
            let hundred = dec!(100);
            let discount_amount = (effective_total * effective_discount_pct / hundred).round_dp(2);
            model.discount_amount = Set(discount_amount);
            model.gst_amount =
                Set(((effective_total - discount_amount) * effective_gst_pct / hundred).round_dp(2));
        }

        if reseed {
            let advance_pct = payload
                .advance_percentage
                .unwrap_or(Decimal::ZERO);
            let derived = derive_amounts(
                effective_total,
                advance_pct,
                effective_discount_pct,
                effective_gst_pct,
            );
            model.advance_percentage = Set(advance_pct);
            model.advance_amount = Set(derived.advance_amount);
            model.balance_amount = Set(derived.balance_amount);
            model.payment_status = Set(derived.payment_status);
        } else if let Some(advance_pct) = payload.advance_percentage {
            model.advance_percentage = Set(advance_pct);
        }

        let order = model.update(&*self.db).await?;
        info!(order_id = order.id, "Order updated");
        self.emit(Event::OrderUpdated(order.id)).await;
        Ok(order)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: i64) -> Result<(), ServiceError> {
        let existing = self.get(id).await?;
        OrderEntity::delete_by_id(existing.id).exec(&*self.db).await?;
        info!(order_id = id, "Order deleted");
        self.emit(Event::OrderDeleted(id)).await;
        Ok(())
    }

    /// Orders currently being worked or awaiting delivery, newest first.
    #[instrument(skip(self))]
    pub async fn active(&self) -> Result<Vec<order::Model>, ServiceError> {
        let orders = OrderEntity::find()
            .filter(order::Column::Status.is_in([STATUS_IN_PROGRESS, STATUS_COMPLETED]))
            .order_by_desc(order::Column::CreatedAt)
            .all(&*self.db)
            .await?;
        Ok(orders)
    }

    /// Re-derives an order's payment state from the payments actually
    /// recorded against it. `advance_amount` is overwritten with the paid
    /// total, so after the first payment it no longer reflects the
    /// percentage-based seed.
    #[instrument(skip(self, conn))]
    pub async fn recompute_payment_status<C: ConnectionTrait>(
        &self,
        conn: &C,
        order_id: i64,
    ) -> Result<PaymentStatusSummary, ServiceError> {
        let order = OrderEntity::find_by_id(order_id)
            .one(conn)
            .await?
            .ok_or_else(|| ServiceError::not_found(format!("Order {}", order_id)))?;

        let payments = PaymentEntity::find()
            .filter(payment::Column::OrderId.eq(order_id))
            .all(conn)
            .await?;
        let total_paid: Decimal = payments.iter().map(|p| p.amount).sum();

        let balance_amount = order.total_amount - total_paid;
        let payment_status = payment_status_for(total_paid, order.total_amount);

        let mut model: order::ActiveModel = order.into();
        model.advance_amount = Set(total_paid);
        model.balance_amount = Set(balance_amount);
        model.payment_status = Set(payment_status.clone());
        model.update(conn).await?;

        Ok(PaymentStatusSummary {
            order_id,
            total_paid,
            balance_amount,
            payment_status,
        })
    }
}

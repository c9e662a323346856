use std::sync::Arc;

use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait,
    ModelTrait, QueryFilter, QueryOrder, TransactionTrait,
};
use serde::Serialize;
use tracing::{info, instrument};

use crate::{
    dto::PaymentPayload,
    entities::{
        order::{self, Entity as OrderEntity},
        payment::{self, Entity as PaymentEntity},
    },
    errors::ServiceError,
    events::{Event, EventSender},
    services::{orders::OrderService, required},
};

/// A payment joined with display fields from its order.
#[derive(Debug, Serialize)]
pub struct PaymentRow {
    #[serde(flatten)]
    pub payment: payment::Model,
    pub customer_name: Option<String>,
    pub order_total: Option<Decimal>,
}

/// Orders still carrying a balance, with the outstanding total.
#[derive(Debug, Serialize)]
pub struct Receivables {
    pub total_receivable: Decimal,
    pub orders: Vec<order::Model>,
}

#[derive(Clone)]
pub struct PaymentService {
    db: Arc<DatabaseConnection>,
    orders: Arc<OrderService>,
    events: Option<EventSender>,
}

impl PaymentService {
    pub fn new(
        db: Arc<DatabaseConnection>,
        orders: Arc<OrderService>,
        events: Option<EventSender>,
    ) -> Self {
        Self { db, orders, events }
    }

    async fn emit(&self, event: Event) {
        if let Some(events) = &self.events {
            events.send(event).await;
        }
    }

    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<PaymentRow>, ServiceError> {
        let rows = PaymentEntity::find()
            .find_also_related(OrderEntity)
            .order_by_desc(payment::Column::PaymentDate)
            .all(&*self.db)
            .await?;

        Ok(rows
            .into_iter()
            .map(|(payment, order)| PaymentRow {
                customer_name: order.as_ref().map(|o| o.customer_name.clone()),
                order_total: order.as_ref().map(|o| o.total_amount),
                payment,
            })
            .collect())
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: i64) -> Result<payment::Model, ServiceError> {
        PaymentEntity::find_by_id(id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::not_found(format!("Payment {}", id)))
    }

    #[instrument(skip(self))]
    pub async fn by_order(&self, order_id: i64) -> Result<Vec<payment::Model>, ServiceError> {
        let payments = PaymentEntity::find()
            .filter(payment::Column::OrderId.eq(order_id))
            .order_by_desc(payment::Column::PaymentDate)
            .all(&*self.db)
            .await?;
        Ok(payments)
    }

    /// Records a payment and re-derives the owning order's payment state in
    /// the same transaction.
    #[instrument(skip(self, payload))]
    pub async fn create(&self, payload: PaymentPayload) -> Result<payment::Model, ServiceError> {
        let order_id = required(payload.order_id, "order_id")?;
        let amount = required(payload.amount, "amount")?;

        let txn = self.db.begin().await?;

        // Surfaces NotFound before any write when the order id is bogus.
        OrderEntity::find_by_id(order_id)
            .one(&txn)
            .await?
            .ok_or_else(|| ServiceError::not_found(format!("Order {}", order_id)))?;

        let model = payment::ActiveModel {
            order_id: Set(order_id),
            amount: Set(amount),
            payment_type: Set(required(payload.payment_type, "payment_type")?),
            payment_method: Set(payload.payment_method),
            payment_date: Set(required(payload.payment_date, "payment_date")?),
            transaction_ref: Set(payload.transaction_ref),
            notes: Set(payload.notes),
            created_at: Set(Utc::now().into()),
            ..Default::default()
        };

        let payment = model.insert(&txn).await?;
        let summary = self.orders.recompute_payment_status(&txn, order_id).await?;
        txn.commit().await?;

        info!(payment_id = payment.id, order_id, %amount, "Payment recorded");
        self.emit(Event::PaymentRecorded {
            payment_id: payment.id,
            order_id,
            amount,
        })
        .await;
        self.emit(Event::PaymentStatusChanged {
            order_id,
            new_status: summary.payment_status,
        })
        .await;
        Ok(payment)
    }

    /// Deletes a payment and re-derives the order's payment state in the same
    /// transaction.
    #[instrument(skip(self))]
    pub async fn remove(&self, id: i64) -> Result<(), ServiceError> {
        let payment = self.get(id).await?;
        let order_id = payment.order_id;

        let txn = self.db.begin().await?;
        payment.delete(&txn).await?;
        let summary = self.orders.recompute_payment_status(&txn, order_id).await?;
        txn.commit().await?;

        info!(payment_id = id, order_id, "Payment deleted");
        self.emit(Event::PaymentDeleted {
            payment_id: id,
            order_id,
        })
        .await;
        self.emit(Event::PaymentStatusChanged {
            order_id,
            new_status: summary.payment_status,
        })
        .await;
        Ok(())
    }

    /// Orders not yet fully paid and the sum of their outstanding balances.
    #[instrument(skip(self))]
    pub async fn pending_receivables(&self) -> Result<Receivables, ServiceError> {
        let orders = OrderEntity::find()
            .filter(order::Column::PaymentStatus.ne("fully_paid"))
            .order_by_desc(order::Column::CreatedAt)
            .all(&*self.db)
            .await?;

        let total_receivable = orders.iter().map(|o| o.balance_amount).sum();
        Ok(Receivables {
            total_receivable,
            orders,
        })
    }

    /// Total money actually collected (Σ payments).
    #[instrument(skip(self))]
    pub async fn total_revenue(&self) -> Result<Decimal, ServiceError> {
        let payments = PaymentEntity::find().all(&*self.db).await?;
        Ok(payments.iter().map(|p| p.amount).sum())
    }
}

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait,
    QueryFilter, QueryOrder, QuerySelect, TransactionTrait,
};
use serde::Serialize;
use tracing::{info, instrument, warn};

use crate::{
    dto::PrintUsagePayload,
    entities::{
        filament::Entity as FilamentEntity,
        order::Entity as OrderEntity,
        print_usage::{self, Entity as PrintUsageEntity},
    },
    errors::ServiceError,
    events::{Event, EventSender},
    services::{filaments::FilamentService, required},
};

/// A usage row joined with order and filament display fields.
#[derive(Debug, Serialize)]
pub struct PrintUsageRow {
    #[serde(flatten)]
    pub usage: print_usage::Model,
    pub customer_name: Option<String>,
    pub filament_type: Option<String>,
    pub filament_color: Option<String>,
}

#[derive(Clone)]
pub struct PrintUsageService {
    db: Arc<DatabaseConnection>,
    filaments: Arc<FilamentService>,
    events: Option<EventSender>,
}

impl PrintUsageService {
    pub fn new(
        db: Arc<DatabaseConnection>,
        filaments: Arc<FilamentService>,
        events: Option<EventSender>,
    ) -> Self {
        Self {
            db,
            filaments,
            events,
        }
    }

    async fn emit(&self, event: Event) {
        if let Some(events) = &self.events {
            events.send(event).await;
        }
    }

    async fn join_display_fields(
        &self,
        rows: Vec<print_usage::Model>,
    ) -> Result<Vec<PrintUsageRow>, ServiceError> {
        let orders: HashMap<i64, String> = OrderEntity::find()
            .all(&*self.db)
            .await?
            .into_iter()
            .map(|o| (o.id, o.customer_name))
            .collect();
        let filaments: HashMap<i64, (String, String)> = FilamentEntity::find()
            .all(&*self.db)
            .await?
            .into_iter()
            .map(|f| (f.id, (f.filament_type, f.color)))
            .collect();

        Ok(rows
            .into_iter()
            .map(|u| {
                let filament = filaments.get(&u.filament_id);
                PrintUsageRow {
                    customer_name: orders.get(&u.order_id).cloned(),
                    filament_type: filament.map(|f| f.0.clone()),
                    filament_color: filament.map(|f| f.1.clone()),
                    usage: u,
                }
            })
            .collect())
    }

    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<PrintUsageRow>, ServiceError> {
        let rows = PrintUsageEntity::find()
            .order_by_desc(print_usage::Column::CreatedAt)
            .all(&*self.db)
            .await?;
        self.join_display_fields(rows).await
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: i64) -> Result<print_usage::Model, ServiceError> {
        PrintUsageEntity::find_by_id(id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::not_found(format!("Print usage {}", id)))
    }

    #[instrument(skip(self))]
    pub async fn by_order(&self, order_id: i64) -> Result<Vec<PrintUsageRow>, ServiceError> {
        let rows = PrintUsageEntity::find()
            .filter(print_usage::Column::OrderId.eq(order_id))
            .order_by_asc(print_usage::Column::Id)
            .all(&*self.db)
            .await?;
        self.join_display_fields(rows).await
    }

    /// Records filament consumption against an order. Stock check, cost
    /// snapshot, row insert and stock decrement all commit atomically; an
    /// insufficient balance leaves nothing written.
    #[instrument(skip(self, payload))]
    pub async fn create(
        &self,
        payload: PrintUsagePayload,
    ) -> Result<print_usage::Model, ServiceError> {
        let order_id = required(payload.order_id, "order_id")?;
        let filament_id = required(payload.filament_id, "filament_id")?;
        let quantity_used_kg = required(payload.quantity_used_kg, "quantity_used_kg")?;

        let txn = self.db.begin().await?;

        OrderEntity::find_by_id(order_id)
            .one(&txn)
            .await?
            .ok_or_else(|| ServiceError::not_found(format!("Order {}", order_id)))?;

        // The row lock keeps a concurrent consumption from passing the
        // sufficiency check on the same stale balance.
        let filament = FilamentEntity::find_by_id(filament_id)
            .lock_exclusive()
            .one(&txn)
            .await?
            .ok_or_else(|| ServiceError::not_found(format!("Filament {}", filament_id)))?;

        if filament.current_stock_kg < quantity_used_kg {
            warn!(
                filament_id,
                available = %filament.current_stock_kg,
                requested = %quantity_used_kg,
                "Rejecting print usage, insufficient stock"
            );
            return Err(ServiceError::InsufficientStock(format!(
                "Insufficient stock. Available: {} kg",
                filament.current_stock_kg
            )));
        }

        // Snapshot of the cost at consumption time; later price changes must
        // not rewrite history.
        let cost_consumed = (quantity_used_kg * filament.cost_per_kg).round_dp(2);

        let model = print_usage::ActiveModel {
            order_id: Set(order_id),
            filament_id: Set(filament_id),
            quantity_used_kg: Set(quantity_used_kg),
            cost_consumed: Set(cost_consumed),
            print_date: Set(Some(
                payload.print_date.unwrap_or_else(|| Utc::now().date_naive()),
            )),
            print_duration_mins: Set(payload.print_duration_mins),
            print_status: Set(payload
                .print_status
                .unwrap_or_else(|| "success".to_string())),
            failure_reason: Set(payload.failure_reason),
            notes: Set(payload.notes),
            created_at: Set(Utc::now().into()),
            ..Default::default()
        };

        let usage = model.insert(&txn).await?;
        let adjustment = self
            .filaments
            .adjust_stock(&txn, filament_id, -quantity_used_kg)
            .await?;
        txn.commit().await?;

        info!(usage_id = usage.id, order_id, filament_id, "Print usage recorded");
        self.emit(Event::StockAdjusted {
            filament_id,
            delta_kg: adjustment.delta_kg,
            new_stock_kg: adjustment.new_stock_kg,
        })
        .await;
        self.emit(Event::PrintUsageRecorded {
            usage_id: usage.id,
            order_id,
            filament_id,
            quantity_kg: quantity_used_kg,
        })
        .await;
        Ok(usage)
    }

    /// Deletes a usage record, restoring the consumed quantity to stock
    /// before the row goes away. Both writes commit atomically.
    #[instrument(skip(self))]
    pub async fn remove(&self, id: i64) -> Result<(), ServiceError> {
        let usage = self.get(id).await?;
        let filament_id = usage.filament_id;
        let quantity = usage.quantity_used_kg;

        let txn = self.db.begin().await?;
        let adjustment = self
            .filaments
            .adjust_stock(&txn, filament_id, quantity)
            .await?;
        usage.delete(&txn).await?;
        txn.commit().await?;

        info!(usage_id = id, filament_id, "Print usage deleted, stock restored");
        self.emit(Event::StockAdjusted {
            filament_id,
            delta_kg: adjustment.delta_kg,
            new_stock_kg: adjustment.new_stock_kg,
        })
        .await;
        self.emit(Event::PrintUsageDeleted {
            usage_id: id,
            filament_id,
        })
        .await;
        Ok(())
    }
}

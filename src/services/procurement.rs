use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, Condition, DatabaseConnection, EntityTrait,
    QueryFilter, QueryOrder, TransactionTrait,
};
use serde::Serialize;
use tracing::{info, instrument};

use crate::{
    dto::ProcurementPayload,
    entities::{
        filament::Entity as FilamentEntity,
        procurement::{self, Entity as ProcurementEntity},
        vendor::Entity as VendorEntity,
    },
    errors::ServiceError,
    events::{Event, EventSender},
    services::{filaments::FilamentService, required},
};

const STATUS_PENDING: &str = "pending";
const STATUS_DELIVERED: &str = "delivered";
const STATUS_DELAYED: &str = "delayed";

/// A procurement row joined with vendor and filament display fields.
#[derive(Debug, Serialize)]
pub struct ProcurementRow {
    #[serde(flatten)]
    pub procurement: procurement::Model,
    pub vendor_name: Option<String>,
    pub filament_type: Option<String>,
    pub filament_brand: Option<String>,
    pub filament_color: Option<String>,
}

#[derive(Clone)]
pub struct ProcurementService {
    db: Arc<DatabaseConnection>,
    filaments: Arc<FilamentService>,
    events: Option<EventSender>,
}

impl ProcurementService {
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
        rows: Vec<procurement::Model>,
    ) -> Result<Vec<ProcurementRow>, ServiceError> {
        let vendors: HashMap<i64, String> = VendorEntity::find()
            .all(&*self.db)
            .await?
            .into_iter()
            .map(|v| (v.id, v.name))
            .collect();
        let filaments: HashMap<i64, (String, String, String)> = FilamentEntity::find()
            .all(&*self.db)
            .await?
            .into_iter()
            .map(|f| (f.id, (f.filament_type, f.brand, f.color)))
            .collect();

        Ok(rows
            .into_iter()
            .map(|p| {
                let filament = filaments.get(&p.filament_id);
                ProcurementRow {
                    vendor_name: vendors.get(&p.vendor_id).cloned(),
                    filament_type: filament.map(|f| f.0.clone()),
                    filament_brand: filament.map(|f| f.1.clone()),
                    filament_color: filament.map(|f| f.2.clone()),
                    procurement: p,
                }
            })
            .collect())
    }

    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<ProcurementRow>, ServiceError> {
        let rows = ProcurementEntity::find()
            .order_by_desc(procurement::Column::CreatedAt)
            .all(&*self.db)
            .await?;
        self.join_display_fields(rows).await
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: i64) -> Result<procurement::Model, ServiceError> {
        ProcurementEntity::find_by_id(id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::not_found(format!("Procurement {}", id)))
    }

    /// Creates a purchase order. Total is derived from quantity and unit
    /// cost; status always starts as `pending`.
    #[instrument(skip(self, payload))]
    pub async fn create(
        &self,
        payload: ProcurementPayload,
    ) -> Result<procurement::Model, ServiceError> {
        let vendor_id = required(payload.vendor_id, "vendor_id")?;
        let filament_id = required(payload.filament_id, "filament_id")?;
        let quantity_kg = required(payload.quantity_kg, "quantity_kg")?;
        let cost_per_kg = required(payload.cost_per_kg, "cost_per_kg")?;

        VendorEntity::find_by_id(vendor_id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::not_found(format!("Vendor {}", vendor_id)))?;
        FilamentEntity::find_by_id(filament_id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::not_found(format!("Filament {}", filament_id)))?;

        let model = procurement::ActiveModel {
            vendor_id: Set(vendor_id),
            filament_id: Set(filament_id),
            quantity_kg: Set(quantity_kg),
            cost_per_kg: Set(cost_per_kg),
            total_amount: Set((quantity_kg * cost_per_kg).round_dp(2)),
            order_date: Set(payload.order_date),
            eta_delivery: Set(payload.eta_delivery),
            final_delivery_date: Set(None),
            invoice_number: Set(payload.invoice_number),
            tracking_number: Set(payload.tracking_number),
            payment_status: Set(payload
                .payment_status
                .unwrap_or_else(|| STATUS_PENDING.to_string())),
            status: Set(STATUS_PENDING.to_string()),
            notes: Set(payload.notes),
            created_at: Set(Utc::now().into()),
            ..Default::default()
        };

        let row = model.insert(&*self.db).await?;
        info!(procurement_id = row.id, "Procurement created");
        self.emit(Event::ProcurementCreated(row.id)).await;
        Ok(row)
    }

    /// Updates a purchase order. Setting `final_delivery_date` derives the
    /// status (`delayed` when past the stored ETA, `delivered` otherwise) and,
    /// only on the first NULL-to-date transition, receipts the stored quantity
    /// into the filament's stock. Patch and stock receipt commit atomically so
    /// a re-save of an already-delivered row never double-increments.
    #[instrument(skip(self, payload))]
    pub async fn update(
        &self,
        id: i64,
        payload: ProcurementPayload,
    ) -> Result<procurement::Model, ServiceError> {
        let existing = self.get(id).await?;
        let first_delivery = existing.final_delivery_date.is_none();
        let stored_eta = existing.eta_delivery;
        let stored_quantity = existing.quantity_kg;
        let stored_cost = existing.cost_per_kg;
        let stored_filament_id = existing.filament_id;

        let txn = self.db.begin().await?;

        let mut model: procurement::ActiveModel = existing.into();

        if let Some(vendor_id) = payload.vendor_id {
            model.vendor_id = Set(vendor_id);
        }
        if let Some(filament_id) = payload.filament_id {
            model.filament_id = Set(filament_id);
        }
        if let Some(quantity_kg) = payload.quantity_kg {
            model.quantity_kg = Set(quantity_kg);
        }
        if let Some(cost_per_kg) = payload.cost_per_kg {
            model.cost_per_kg = Set(cost_per_kg);
        }
        // Total tracks the effective quantity and unit cost, whichever of the
        // two the patch carries.
        if payload.quantity_kg.is_some() || payload.cost_per_kg.is_some() {
            let quantity_kg = payload.quantity_kg.unwrap_or(stored_quantity);
            let cost_per_kg = payload.cost_per_kg.unwrap_or(stored_cost);
            model.total_amount = Set((quantity_kg * cost_per_kg).round_dp(2));
        }
        if payload.order_date.is_some() {
            model.order_date = Set(payload.order_date);
        }
        if payload.eta_delivery.is_some() {
            model.eta_delivery = Set(payload.eta_delivery);
        }
        if payload.invoice_number.is_some() {
            model.invoice_number = Set(payload.invoice_number);
        }
        if payload.tracking_number.is_some() {
            model.tracking_number = Set(payload.tracking_number);
        }
        if let Some(payment_status) = payload.payment_status {
            model.payment_status = Set(payment_status);
        }
        if let Some(status) = payload.status {
            model.status = Set(status);
        }
        if payload.notes.is_some() {
            model.notes = Set(payload.notes);
        }

        let mut receipt = None;
        if let Some(final_date) = payload.final_delivery_date {
            model.final_delivery_date = Set(Some(final_date));
            let derived_status = match stored_eta {
                Some(eta) if final_date > eta => STATUS_DELAYED,
                _ => STATUS_DELIVERED,
            };
            model.status = Set(derived_status.to_string());

            if first_delivery {
                receipt = Some(
                    self.filaments
                        .adjust_stock(&txn, stored_filament_id, stored_quantity)
                        .await?,
                );
            }
        }

        let row = model.update(&txn).await?;
        txn.commit().await?;

        info!(procurement_id = row.id, "Procurement updated");
        if let Some(adjustment) = receipt {
            self.emit(Event::StockAdjusted {
                filament_id: stored_filament_id,
                delta_kg: adjustment.delta_kg,
                new_stock_kg: adjustment.new_stock_kg,
            })
            .await;
            self.emit(Event::ProcurementDelivered {
                procurement_id: row.id,
                filament_id: stored_filament_id,
                quantity_kg: stored_quantity,
            })
            .await;
        }
        self.emit(Event::ProcurementUpdated(row.id)).await;
        Ok(row)
    }

    /// Plain row delete. Stock already receipted from a delivered purchase is
    /// deliberately left untouched.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: i64) -> Result<(), ServiceError> {
        let existing = self.get(id).await?;
        ProcurementEntity::delete_by_id(existing.id)
            .exec(&*self.db)
            .await?;
        info!(procurement_id = id, "Procurement deleted");
        self.emit(Event::ProcurementDeleted(id)).await;
        Ok(())
    }

    /// Purchases still awaiting delivery, soonest ETA first.
    #[instrument(skip(self))]
    pub async fn pending(&self) -> Result<Vec<ProcurementRow>, ServiceError> {
        let rows = ProcurementEntity::find()
            .filter(
                Condition::any()
                    .add(procurement::Column::Status.eq(STATUS_PENDING))
                    .add(procurement::Column::FinalDeliveryDate.is_null()),
            )
            .order_by_asc(procurement::Column::EtaDelivery)
            .all(&*self.db)
            .await?;
        self.join_display_fields(rows).await
    }
}

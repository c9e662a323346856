use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::Utc;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ActiveValue::Set, ColumnTrait, ConnectionTrait,
    DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
};
use serde::Serialize;
use tracing::{info, instrument};

use crate::{
    dto::FilamentPayload,
    entities::filament::{self, Entity as FilamentEntity},
    errors::ServiceError,
    events::{Event, EventSender},
    services::required,
};

/// Threshold applied when a filament has no explicit low-stock alert level.
const DEFAULT_MIN_STOCK_KG: Decimal = dec!(1);

/// A filament row joined with its vendor's display name.
#[derive(Debug, Serialize)]
pub struct FilamentRow {
    #[serde(flatten)]
    pub filament: filament::Model,
    pub vendor_name: Option<String>,
}

/// Result of a signed stock adjustment.
#[derive(Debug, Clone, Serialize)]
pub struct StockAdjustment {
    pub id: i64,
    pub delta_kg: Decimal,
    pub new_stock_kg: Decimal,
}

/// Aggregate stock per filament type.
#[derive(Debug, Clone, Serialize)]
pub struct StockByType {
    pub filament_type: String,
    pub total_kg: Decimal,
}

#[derive(Clone)]
pub struct FilamentService {
    db: Arc<DatabaseConnection>,
    events: Option<EventSender>,
}

impl FilamentService {
    pub fn new(db: Arc<DatabaseConnection>, events: Option<EventSender>) -> Self {
        Self { db, events }
    }

    async fn emit(&self, event: Event) {
        if let Some(events) = &self.events {
            events.send(event).await;
        }
    }

    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<FilamentRow>, ServiceError> {
        let rows = FilamentEntity::find()
            .find_also_related(crate::entities::vendor::Entity)
            .order_by_desc(filament::Column::CreatedAt)
            .all(&*self.db)
            .await?;

        Ok(rows
            .into_iter()
            .map(|(filament, vendor)| FilamentRow {
                filament,
                vendor_name: vendor.map(|v| v.name),
            })
            .collect())
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: i64) -> Result<filament::Model, ServiceError> {
        FilamentEntity::find_by_id(id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::not_found(format!("Filament {}", id)))
    }

    /// Creates a filament. Stock always starts at zero; it only moves through
    /// procurement receipts and print-usage consumption.
    #[instrument(skip(self, payload))]
    pub async fn create(&self, payload: FilamentPayload) -> Result<filament::Model, ServiceError> {
        let model = filament::ActiveModel {
            filament_type: Set(required(payload.filament_type, "filament_type")?),
            brand: Set(required(payload.brand, "brand")?),
            color: Set(required(payload.color, "color")?),
            diameter_mm: Set(payload.diameter_mm),
            weight_per_spool_kg: Set(payload.weight_per_spool_kg),
            cost_per_kg: Set(required(payload.cost_per_kg, "cost_per_kg")?),
            vendor_id: Set(payload.vendor_id),
            current_stock_kg: Set(Decimal::ZERO),
            min_stock_alert_kg: Set(payload.min_stock_alert_kg),
            print_temp_min: Set(payload.print_temp_min),
            print_temp_max: Set(payload.print_temp_max),
            bed_temp: Set(payload.bed_temp),
            quality_grade: Set(payload.quality_grade),
            is_active: Set(payload.is_active.unwrap_or(true)),
            created_at: Set(Utc::now().into()),
            ..Default::default()
        };

        let filament = model.insert(&*self.db).await?;
        info!(filament_id = filament.id, "Filament created");
        self.emit(Event::FilamentCreated(filament.id)).await;
        Ok(filament)
    }

    /// Updates descriptive fields. The payload carries no stock field, so
    /// `current_stock_kg` cannot be overwritten through this path.
    #[instrument(skip(self, payload))]
    pub async fn update(
        &self,
        id: i64,
        payload: FilamentPayload,
    ) -> Result<filament::Model, ServiceError> {
        let existing = self.get(id).await?;
        let mut model: filament::ActiveModel = existing.into();

        if let Some(filament_type) = payload.filament_type {
            model.filament_type = Set(filament_type);
        }
        if let Some(brand) = payload.brand {
            model.brand = Set(brand);
        }
        if let Some(color) = payload.color {
            model.color = Set(color);
        }
        if payload.diameter_mm.is_some() {
            model.diameter_mm = Set(payload.diameter_mm);
        }
        if payload.weight_per_spool_kg.is_some() {
            model.weight_per_spool_kg = Set(payload.weight_per_spool_kg);
        }
        if let Some(cost_per_kg) = payload.cost_per_kg {
            model.cost_per_kg = Set(cost_per_kg);
        }
        if payload.vendor_id.is_some() {
            model.vendor_id = Set(payload.vendor_id);
        }
        if payload.min_stock_alert_kg.is_some() {
            model.min_stock_alert_kg = Set(payload.min_stock_alert_kg);
        }
        if payload.print_temp_min.is_some() {
            model.print_temp_min = Set(payload.print_temp_min);
        }
        if payload.print_temp_max.is_some() {
            model.print_temp_max = Set(payload.print_temp_max);
        }
        if payload.bed_temp.is_some() {
            model.bed_temp = Set(payload.bed_temp);
        }
        if payload.quality_grade.is_some() {
            model.quality_grade = Set(payload.quality_grade);
        }
        if let Some(is_active) = payload.is_active {
            model.is_active = Set(is_active);
        }

        let filament = model.update(&*self.db).await?;
        info!(filament_id = filament.id, "Filament updated");
        self.emit(Event::FilamentUpdated(filament.id)).await;
        Ok(filament)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: i64) -> Result<(), ServiceError> {
        let existing = self.get(id).await?;
        FilamentEntity::delete_by_id(existing.id)
            .exec(&*self.db)
            .await?;
        info!(filament_id = id, "Filament deleted");
        self.emit(Event::FilamentDeleted(id)).await;
        Ok(())
    }

    /// Applies a signed stock delta and returns the new balance. The delta is
    /// a single column-expression update, so the increment itself can never
    /// lose a concurrent write. No floor check here: callers that must not go
    /// negative verify sufficiency first, under a row lock in the same
    /// transaction they pass in.
    #[instrument(skip(self, conn))]
    pub async fn adjust_stock<C: ConnectionTrait>(
        &self,
        conn: &C,
        id: i64,
        delta_kg: Decimal,
    ) -> Result<StockAdjustment, ServiceError> {
        let result = FilamentEntity::update_many()
            .col_expr(
                filament::Column::CurrentStockKg,
                Expr::col(filament::Column::CurrentStockKg).add(delta_kg),
            )
            .filter(filament::Column::Id.eq(id))
            .exec(conn)
            .await?;
        if result.rows_affected == 0 {
            return Err(ServiceError::not_found(format!("Filament {}", id)));
        }

        let filament = FilamentEntity::find_by_id(id)
            .one(conn)
            .await?
            .ok_or_else(|| ServiceError::not_found(format!("Filament {}", id)))?;
        let new_stock_kg = filament.current_stock_kg;

        info!(
            filament_id = id,
            %delta_kg,
            %new_stock_kg,
            "Stock adjusted"
        );

        Ok(StockAdjustment {
            id,
            delta_kg,
            new_stock_kg,
        })
    }

    /// Active filaments at or below their alert threshold (1 kg when unset).
    #[instrument(skip(self))]
    pub async fn low_stock_alerts(&self) -> Result<Vec<filament::Model>, ServiceError> {
        let filaments = FilamentEntity::find()
            .order_by_asc(filament::Column::CurrentStockKg)
            .all(&*self.db)
            .await?;

        Ok(filaments
            .into_iter()
            .filter(|f| {
                f.is_active
                    && f.current_stock_kg <= f.min_stock_alert_kg.unwrap_or(DEFAULT_MIN_STOCK_KG)
            })
            .collect())
    }

    /// Total value of stock on hand (Σ stock × cost).
    #[instrument(skip(self))]
    pub async fn inventory_value(&self) -> Result<Decimal, ServiceError> {
        let filaments = FilamentEntity::find().all(&*self.db).await?;
        Ok(filaments
            .iter()
            .map(|f| f.current_stock_kg * f.cost_per_kg)
            .sum())
    }

    /// Stock on hand grouped by filament type.
    #[instrument(skip(self))]
    pub async fn stock_by_type(&self) -> Result<Vec<StockByType>, ServiceError> {
        let filaments = FilamentEntity::find().all(&*self.db).await?;

        let mut totals: BTreeMap<String, Decimal> = BTreeMap::new();
        for f in filaments {
            *totals.entry(f.filament_type).or_insert(Decimal::ZERO) += f.current_stock_kg;
        }

        Ok(totals
            .into_iter()
            .map(|(filament_type, total_kg)| StockByType {
                filament_type,
                total_kg,
            })
            .collect())
    }
}

use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A filament spool SKU. `current_stock_kg` is a running ledger balance:
/// procurement receipts add to it, print usage consumes it, and the generic
/// update path never writes it.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "filaments")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub filament_type: String,
    pub brand: String,
    pub color: String,
    #[sea_orm(column_type = "Decimal(Some((6, 2)))")]
    pub diameter_mm: Option<Decimal>,
    #[sea_orm(column_type = "Decimal(Some((10, 3)))")]
    pub weight_per_spool_kg: Option<Decimal>,
    #[sea_orm(column_type = "Decimal(Some((12, 2)))")]
    pub cost_per_kg: Decimal,
    pub vendor_id: Option<i64>,
    #[sea_orm(column_type = "Decimal(Some((10, 3)))")]
    pub current_stock_kg: Decimal,
    #[sea_orm(column_type = "Decimal(Some((10, 3)))")]
    pub min_stock_alert_kg: Option<Decimal>,
    pub print_temp_min: Option<i32>,
    pub print_temp_max: Option<i32>,
    pub bed_temp: Option<i32>,
    pub quality_grade: Option<String>,
    pub is_active: bool,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::vendor::Entity",
        from = "Column::VendorId",
        to = "super::vendor::Column::Id"
    )]
    Vendor,
    #[sea_orm(has_many = "super::procurement::Entity")]
    Procurement,
    #[sea_orm(has_many = "super::print_usage::Entity")]
    PrintUsage,
}

impl Related<super::vendor::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Vendor.def()
    }
}

impl Related<super::procurement::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Procurement.def()
    }
}

impl Related<super::print_usage::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PrintUsage.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

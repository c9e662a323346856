use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A purchase order placed with a vendor for raw filament. The first
/// transition of `final_delivery_date` from NULL to a date is the sole
/// trigger that receipts `quantity_kg` into the filament stock ledger.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "procurement")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub vendor_id: i64,
    pub filament_id: i64,
    #[sea_orm(column_type = "Decimal(Some((10, 3)))")]
    pub quantity_kg: Decimal,
    #[sea_orm(column_type = "Decimal(Some((12, 2)))")]
    pub cost_per_kg: Decimal,
    #[sea_orm(column_type = "Decimal(Some((12, 2)))")]
    pub total_amount: Decimal,
    pub order_date: Option<Date>,
    pub eta_delivery: Option<Date>,
    pub final_delivery_date: Option<Date>,
    pub invoice_number: Option<String>,
    pub tracking_number: Option<String>,
    pub payment_status: String,
    pub status: String,
    pub notes: Option<String>,
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
    #[sea_orm(
        belongs_to = "super::filament::Entity",
        from = "Column::FilamentId",
        to = "super::filament::Column::Id"
    )]
    Filament,
}

impl Related<super::vendor::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Vendor.def()
    }
}

impl Related<super::filament::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Filament.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

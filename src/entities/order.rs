use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A customer print order. `advance_amount`, `balance_amount` and
/// `payment_status` are derived fields: seeded from the advance percentage at
/// create/edit time, then overwritten from actual paid totals whenever a
/// payment against the order is created or removed.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "orders")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub customer_name: String,
    pub customer_email: Option<String>,
    pub contact_number: Option<String>,
    pub delivery_address: Option<String>,
    pub order_description: Option<String>,
    pub print_type: Option<String>,
    // Free-text display fields, deliberately not foreign keys.
    pub filament_type: Option<String>,
    pub filament_color: Option<String>,
    pub estimated_quantity_units: Option<i32>,
    #[sea_orm(column_type = "Decimal(Some((10, 3)))")]
    pub estimated_filament_usage_kg: Option<Decimal>,
    pub order_date: Date,
    pub eta_delivery: Option<Date>,
    pub final_delivery_date: Option<Date>,
    #[sea_orm(column_type = "Decimal(Some((12, 2)))")]
    pub total_amount: Decimal,
    #[sea_orm(column_type = "Decimal(Some((5, 2)))")]
    pub advance_percentage: Decimal,
    #[sea_orm(column_type = "Decimal(Some((5, 2)))")]
    pub discount_percentage: Decimal,
    #[sea_orm(column_type = "Decimal(Some((12, 2)))")]
    pub discount_amount: Decimal,
    #[sea_orm(column_type = "Decimal(Some((5, 2)))")]
    pub gst_percentage: Decimal,
    #[sea_orm(column_type = "Decimal(Some((12, 2)))")]
    pub gst_amount: Decimal,
    #[sea_orm(column_type = "Decimal(Some((12, 2)))")]
    pub advance_amount: Decimal,
    #[sea_orm(column_type = "Decimal(Some((12, 2)))")]
    pub balance_amount: Decimal,
    pub payment_status: String,
    pub priority: String,
    pub status: String,
    pub notes: Option<String>,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::payment::Entity")]
    Payment,
    #[sea_orm(has_many = "super::print_usage::Entity")]
    PrintUsage,
}

impl Related<super::payment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Payment.def()
    }
}

impl Related<super::print_usage::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PrintUsage.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A record of filament consumed while fulfilling an order. `cost_consumed`
/// snapshots `quantity_used_kg * filament.cost_per_kg` at creation time and is
/// never recomputed when the filament's cost changes later.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "print_usage")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub order_id: i64,
    pub filament_id: i64,
    #[sea_orm(column_type = "Decimal(Some((10, 3)))")]
    pub quantity_used_kg: Decimal,
    #[sea_orm(column_type = "Decimal(Some((12, 2)))")]
    pub cost_consumed: Decimal,
    pub print_date: Option<Date>,
    pub print_duration_mins: Option<i32>,
    pub print_status: String,
    pub failure_reason: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::order::Entity",
        from = "Column::OrderId",
        to = "super::order::Column::Id"
    )]
    Order,
    #[sea_orm(
        belongs_to = "super::filament::Entity",
        from = "Column::FilamentId",
        to = "super::filament::Column::Id"
    )]
    Filament,
}

impl Related<super::order::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Order.def()
    }
}

impl Related<super::filament::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Filament.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

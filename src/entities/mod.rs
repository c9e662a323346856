//! SeaORM entities, one per table.

pub mod filament;
pub mod order;
pub mod payment;
pub mod print_usage;
pub mod procurement;
pub mod vendor;

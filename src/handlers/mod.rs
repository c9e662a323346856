//! axum handlers, one module per resource. Handlers validate payloads,
//! delegate to the services and shape HTTP responses; no business rules here.

pub mod common;
pub mod dashboard;
pub mod health;
pub mod inventory;
pub mod orders;
pub mod payments;
pub mod print_usage;
pub mod procurement;
pub mod vendors;

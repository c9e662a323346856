//! Domain services. Each service holds a shared [`DatabaseConnection`] and an
//! optional [`EventSender`]; cross-entity consistency rules (payment
//! recompute, delivery stock receipt, usage stock consumption) live here, not
//! in the handlers.

pub mod dashboard;
pub mod filaments;
pub mod orders;
pub mod payments;
pub mod print_usage;
pub mod procurement;

pub use dashboard::DashboardService;
pub use filaments::FilamentService;
pub use orders::OrderService;
pub use payments::PaymentService;
pub use print_usage::PrintUsageService;
pub use procurement::ProcurementService;

pub mod vendors;
pub use vendors::VendorService;

use crate::errors::ServiceError;

/// Unwraps a payload field that validation guarantees to be present. Returns
/// `InvalidInput` instead of panicking if a caller skipped validation.
pub(crate) fn required<T>(value: Option<T>, field: &str) -> Result<T, ServiceError> {
    value.ok_or_else(|| ServiceError::InvalidInput(format!("{} is required", field)))
}

//! Pure input validation, one function per entity.
//!
//! Each validator returns a list of [`FieldError`]s (empty list = valid) and
//! never fails; the calling handler decides whether to reject. The `is_update`
//! flag skips required-field checks while keeping format, range and enum
//! checks active. No I/O happens here.

use std::fmt::Display;
use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};

use crate::dto::{
    FilamentPayload, OrderPayload, PaymentPayload, PrintUsagePayload, ProcurementPayload,
    VendorPayload,
};
use crate::errors::FieldError;

// Closed enum domains. Stored in rows as their snake_case string form.

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, Display, EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum PaymentTerms {
    Advance,
    Cod,
    #[strum(serialize = "net15")]
    Net15,
    #[strum(serialize = "net30")]
    Net30,
    #[strum(serialize = "net60")]
    Net60,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, Display, EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum OrderPriority {
    Normal,
    Urgent,
    Express,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, Display, EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum OrderStatus {
    Pending,
    InProgress,
    Completed,
    Delivered,
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, Display, EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum PaymentStatus {
    Pending,
    PartiallyPaid,
    FullyPaid,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, Display, EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum PaymentType {
    Advance,
    Balance,
    Refund,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, Display, EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum PaymentMethod {
    Cash,
    Upi,
    BankTransfer,
    Card,
    Cheque,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, Display, EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum ProcurementStatus {
    Pending,
    Shipped,
    Delivered,
    Delayed,
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, Display, EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum ProcurementPaymentStatus {
    Pending,
    Paid,
    Partial,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, Display, EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum FilamentType {
    Pla,
    Abs,
    Petg,
    Tpu,
    Asa,
    Nylon,
    Pc,
    Pva,
    Hips,
    Wood,
    Metal,
    Carbon,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, Display, EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum QualityGrade {
    Standard,
    Premium,
    Industrial,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, Display, EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum PrintStatus {
    Success,
    Failed,
    Partial,
    Cancelled,
}

/// Comma-separated list of a domain's allowed values, for error messages.
pub fn allowed_values<T: IntoEnumIterator + Display>() -> String {
    T::iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Case-insensitive membership test against a closed enum domain.
fn in_domain<T: FromStr + IntoEnumIterator + Display>(value: &str) -> bool {
    T::from_str(value.to_lowercase().as_str()).is_ok()
}

fn check_enum<T: FromStr + IntoEnumIterator + Display>(
    errors: &mut Vec<FieldError>,
    value: Option<&String>,
    field: &str,
    label: &str,
) {
    if let Some(v) = value {
        if !in_domain::<T>(v) {
            errors.push(FieldError::new(
                field,
                format!("{} must be one of: {}", label, allowed_values::<T>()),
            ));
        }
    }
}

// Format helpers.

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());
static GST_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[0-9]{2}[A-Z]{5}[0-9]{4}[A-Z][1-9A-Z]Z[0-9A-Z]$").unwrap()
});
static PINCODE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[1-9][0-9]{5}$").unwrap());
static PHONE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{10,15}$").unwrap());

fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// 10-15 digits, spaces and dashes ignored.
fn is_valid_phone(phone: &str) -> bool {
    let digits: String = phone.chars().filter(|c| !c.is_whitespace() && *c != '-').collect();
    PHONE_RE.is_match(&digits)
}

/// Indian GST identification number, 15 characters.
fn is_valid_gst(gst: &str) -> bool {
    GST_RE.is_match(&gst.to_uppercase())
}

fn is_valid_pincode(pincode: &str) -> bool {
    PINCODE_RE.is_match(pincode)
}

fn is_positive(value: Decimal) -> bool {
    value > Decimal::ZERO
}

fn in_range(value: Decimal, min: Decimal, max: Decimal) -> bool {
    value >= min && value <= max
}

fn valid_length(value: &str, min: usize, max: usize) -> bool {
    let len = value.chars().count();
    len >= min && len <= max
}

fn valid_temperature(temp: i32) -> bool {
    (150..=400).contains(&temp)
}

fn is_blank(value: Option<&String>) -> bool {
    value.map_or(true, |v| v.trim().is_empty())
}

// Entity validators.

pub fn validate_vendor(data: &VendorPayload, is_update: bool) -> Vec<FieldError> {
    let mut errors = Vec::new();

    if !is_update && is_blank(data.name.as_ref()) {
        errors.push(FieldError::new("name", "Vendor name is required"));
    }
    if let Some(name) = &data.name {
        if !valid_length(name, 2, 255) {
            errors.push(FieldError::new("name", "Name must be 2-255 characters"));
        }
    }
    if let Some(email) = &data.email {
        if !is_valid_email(email) {
            errors.push(FieldError::new("email", "Invalid email format"));
        }
    }
    if let Some(contact) = &data.contact {
        if !is_valid_phone(contact) {
            errors.push(FieldError::new("contact", "Contact must be 10-15 digits"));
        }
    }
    if let Some(gst) = &data.gst_number {
        if !is_valid_gst(gst) {
            errors.push(FieldError::new("gst_number", "Invalid GST format (15 characters)"));
        }
    }
    if let Some(pincode) = &data.pincode {
        if !is_valid_pincode(pincode) {
            errors.push(FieldError::new("pincode", "Invalid pincode (6 digits)"));
        }
    }
    check_enum::<PaymentTerms>(
        &mut errors,
        data.payment_terms.as_ref(),
        "payment_terms",
        "Payment terms",
    );

    errors
}

pub fn validate_filament(data: &FilamentPayload, is_update: bool) -> Vec<FieldError> {
    let mut errors = Vec::new();

    if !is_update {
        if is_blank(data.filament_type.as_ref()) {
            errors.push(FieldError::new("filament_type", "Filament type is required"));
        }
        if is_blank(data.brand.as_ref()) {
            errors.push(FieldError::new("brand", "Brand is required"));
        }
        if is_blank(data.color.as_ref()) {
            errors.push(FieldError::new("color", "Color is required"));
        }
        if data.cost_per_kg.is_none() {
            errors.push(FieldError::new("cost_per_kg", "Cost per kg is required"));
        }
    }

    check_enum::<FilamentType>(&mut errors, data.filament_type.as_ref(), "filament_type", "Type");

    if let Some(cost) = data.cost_per_kg {
        if !is_positive(cost) {
            errors.push(FieldError::new("cost_per_kg", "Cost per kg must be greater than 0"));
        }
    }
    if let Some(temp) = data.print_temp_min {
        if !valid_temperature(temp) {
            errors.push(FieldError::new("print_temp_min", "Print temp must be 150-400 C"));
        }
    }
    if let Some(temp) = data.print_temp_max {
        if !valid_temperature(temp) {
            errors.push(FieldError::new("print_temp_max", "Print temp must be 150-400 C"));
        }
    }
    if let (Some(min), Some(max)) = (data.print_temp_min, data.print_temp_max) {
        if min > max {
            errors.push(FieldError::new("print_temp_max", "Max temp must be >= min temp"));
        }
    }
    check_enum::<QualityGrade>(
        &mut errors,
        data.quality_grade.as_ref(),
        "quality_grade",
        "Quality grade",
    );

    errors
}

pub fn validate_order(data: &OrderPayload, is_update: bool) -> Vec<FieldError> {
    let mut errors = Vec::new();

    if !is_update {
        if is_blank(data.customer_name.as_ref()) {
            errors.push(FieldError::new("customer_name", "Customer name is required"));
        }
        if data.order_date.is_none() {
            errors.push(FieldError::new("order_date", "Order date is required"));
        }
        if data.total_amount.is_none() {
            errors.push(FieldError::new("total_amount", "Total amount is required"));
        }
    }

    if let Some(name) = &data.customer_name {
        if !valid_length(name, 2, 255) {
            errors.push(FieldError::new(
                "customer_name",
                "Customer name must be 2-255 characters",
            ));
        }
    }
    if let Some(email) = &data.customer_email {
        if !is_valid_email(email) {
            errors.push(FieldError::new("customer_email", "Invalid email format"));
        }
    }
    if let Some(contact) = &data.contact_number {
        if !is_valid_phone(contact) {
            errors.push(FieldError::new("contact_number", "Contact must be 10-15 digits"));
        }
    }
    if let Some(total) = data.total_amount {
        if !is_positive(total) {
            errors.push(FieldError::new("total_amount", "Total amount must be greater than 0"));
        }
    }
    if let Some(advance) = data.advance_percentage {
        if !in_range(advance, dec!(0), dec!(100)) {
            errors.push(FieldError::new(
                "advance_percentage",
                "Advance percentage must be 0-100",
            ));
        }
    }
    if let Some(discount) = data.discount_percentage {
        if !in_range(discount, dec!(0), dec!(100)) {
            errors.push(FieldError::new(
                "discount_percentage",
                "Discount percentage must be 0-100",
            ));
        }
    }
    if let Some(gst) = data.gst_percentage {
        if !in_range(gst, dec!(0), dec!(28)) {
            errors.push(FieldError::new("gst_percentage", "GST percentage must be 0-28"));
        }
    }
    if let (Some(order_date), Some(eta)) = (data.order_date, data.eta_delivery) {
        if eta < order_date {
            errors.push(FieldError::new("eta_delivery", "ETA must be on or after order date"));
        }
    }
    check_enum::<OrderPriority>(&mut errors, data.priority.as_ref(), "priority", "Priority");
    check_enum::<OrderStatus>(&mut errors, data.status.as_ref(), "status", "Status");

    errors
}

pub fn validate_payment(data: &PaymentPayload) -> Vec<FieldError> {
    let mut errors = Vec::new();

    if data.order_id.is_none() {
        errors.push(FieldError::new("order_id", "Order ID is required"));
    }
    if data.amount.is_none() {
        errors.push(FieldError::new("amount", "Amount is required"));
    }
    if is_blank(data.payment_type.as_ref()) {
        errors.push(FieldError::new("payment_type", "Payment type is required"));
    }
    if data.payment_date.is_none() {
        errors.push(FieldError::new("payment_date", "Payment date is required"));
    }

    if let Some(amount) = data.amount {
        if !is_positive(amount) {
            errors.push(FieldError::new("amount", "Amount must be greater than 0"));
        }
    }
    check_enum::<PaymentType>(&mut errors, data.payment_type.as_ref(), "payment_type", "Payment type");
    check_enum::<PaymentMethod>(
        &mut errors,
        data.payment_method.as_ref(),
        "payment_method",
        "Payment method",
    );

    errors
}

pub fn validate_procurement(data: &ProcurementPayload, is_update: bool) -> Vec<FieldError> {
    let mut errors = Vec::new();

    if !is_update {
        if data.vendor_id.is_none() {
            errors.push(FieldError::new("vendor_id", "Vendor is required"));
        }
        if data.filament_id.is_none() {
            errors.push(FieldError::new("filament_id", "Filament is required"));
        }
        if data.quantity_kg.is_none() {
            errors.push(FieldError::new("quantity_kg", "Quantity is required"));
        }
        if data.cost_per_kg.is_none() {
            errors.push(FieldError::new("cost_per_kg", "Cost per kg is required"));
        }
    }

    if let Some(qty) = data.quantity_kg {
        if !is_positive(qty) {
            errors.push(FieldError::new("quantity_kg", "Quantity must be greater than 0"));
        }
    }
    if let Some(cost) = data.cost_per_kg {
        if !is_positive(cost) {
            errors.push(FieldError::new("cost_per_kg", "Cost per kg must be greater than 0"));
        }
    }
    check_enum::<ProcurementStatus>(&mut errors, data.status.as_ref(), "status", "Status");
    check_enum::<ProcurementPaymentStatus>(
        &mut errors,
        data.payment_status.as_ref(),
        "payment_status",
        "Payment status",
    );

    errors
}

pub fn validate_print_usage(data: &PrintUsagePayload) -> Vec<FieldError> {
    let mut errors = Vec::new();

    if data.order_id.is_none() {
        errors.push(FieldError::new("order_id", "Order is required"));
    }
    if data.filament_id.is_none() {
        errors.push(FieldError::new("filament_id", "Filament is required"));
    }
    if data.quantity_used_kg.is_none() {
        errors.push(FieldError::new("quantity_used_kg", "Quantity used is required"));
    }

    if let Some(qty) = data.quantity_used_kg {
        if !is_positive(qty) {
            errors.push(FieldError::new("quantity_used_kg", "Quantity must be greater than 0"));
        }
    }
    check_enum::<PrintStatus>(&mut errors, data.print_status.as_ref(), "print_status", "Print status");

    // failure_reason is mandatory when the print failed
    if data.print_status.as_deref() == Some("failed") && is_blank(data.failure_reason.as_ref()) {
        errors.push(FieldError::new(
            "failure_reason",
            "Failure reason is required when print failed",
        ));
    }

    errors
}

//! Request payloads shared by the HTTP handlers, the validation layer and the
//! services. One payload type per entity, used for both create and update;
//! which fields are mandatory depends on the mode and is enforced by
//! [`crate::validation`], not by serde.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct VendorPayload {
    pub name: Option<String>,
    pub contact: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub state: Option<String>,
    pub pincode: Option<String>,
    pub gst_number: Option<String>,
    pub payment_terms: Option<String>,
    pub is_active: Option<bool>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FilamentPayload {
    pub filament_type: Option<String>,
    pub brand: Option<String>,
    pub color: Option<String>,
    pub diameter_mm: Option<Decimal>,
    pub weight_per_spool_kg: Option<Decimal>,
    pub cost_per_kg: Option<Decimal>,
    pub vendor_id: Option<i64>,
    pub min_stock_alert_kg: Option<Decimal>,
    pub print_temp_min: Option<i32>,
    pub print_temp_max: Option<i32>,
    pub bed_temp: Option<i32>,
    pub quality_grade: Option<String>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OrderPayload {
    pub customer_name: Option<String>,
    pub customer_email: Option<String>,
    pub contact_number: Option<String>,
    pub delivery_address: Option<String>,
    pub order_description: Option<String>,
    pub print_type: Option<String>,
    pub filament_type: Option<String>,
    pub filament_color: Option<String>,
    pub estimated_quantity_units: Option<i32>,
    pub estimated_filament_usage_kg: Option<Decimal>,
    pub order_date: Option<NaiveDate>,
    pub eta_delivery: Option<NaiveDate>,
    pub final_delivery_date: Option<NaiveDate>,
    pub total_amount: Option<Decimal>,
    pub advance_percentage: Option<Decimal>,
    pub discount_percentage: Option<Decimal>,
    pub gst_percentage: Option<Decimal>,
    pub priority: Option<String>,
    pub status: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PaymentPayload {
    pub order_id: Option<i64>,
    pub amount: Option<Decimal>,
    pub payment_type: Option<String>,
    pub payment_method: Option<String>,
    pub payment_date: Option<NaiveDate>,
    pub transaction_ref: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProcurementPayload {
    pub vendor_id: Option<i64>,
    pub filament_id: Option<i64>,
    pub quantity_kg: Option<Decimal>,
    pub cost_per_kg: Option<Decimal>,
    pub order_date: Option<NaiveDate>,
    pub eta_delivery: Option<NaiveDate>,
    pub final_delivery_date: Option<NaiveDate>,
    pub invoice_number: Option<String>,
    pub tracking_number: Option<String>,
    pub payment_status: Option<String>,
    pub status: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PrintUsagePayload {
    pub order_id: Option<i64>,
    pub filament_id: Option<i64>,
    pub quantity_used_kg: Option<Decimal>,
    pub print_date: Option<NaiveDate>,
    pub print_duration_mins: Option<i32>,
    pub print_status: Option<String>,
    pub failure_reason: Option<String>,
    pub notes: Option<String>,
}

//! Price quotations issued against enquiries

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::impl_wire_enum_conversions;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QuotationStatus {
    Draft,
    Sent,
    Approved,
    Rejected,
}

impl_wire_enum_conversions!(QuotationStatus {
    Draft => "DRAFT",
    Sent => "SENT",
    Approved => "APPROVED",
    Rejected => "REJECTED",
});

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quotation {
    pub id: String,
    #[serde(default)]
    pub quotation_number: Option<String>,
    #[serde(default)]
    pub enquiry_id: Option<String>,
    #[serde(default)]
    pub customer_name: String,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub variant: Option<String>,
    #[serde(default)]
    pub ex_showroom_price: f64,
    #[serde(default)]
    pub insurance: f64,
    #[serde(default)]
    pub accessories: f64,
    #[serde(default)]
    pub discount: f64,
    #[serde(default)]
    pub total_amount: f64,
    pub status: QuotationStatus,
    #[serde(default)]
    pub valid_until: Option<NaiveDate>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuotationFilters {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<QuotationStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enquiry_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateQuotationRequest {
    pub enquiry_id: String,
    pub model: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variant: Option<String>,
    pub ex_showroom_price: f64,
    #[serde(default)]
    pub insurance: f64,
    #[serde(default)]
    pub accessories: f64,
    #[serde(default)]
    pub discount: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub valid_until: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateQuotationRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variant: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ex_showroom_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub insurance: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accessories: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub valid_until: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RejectQuotationRequest {
    pub reason: String,
}

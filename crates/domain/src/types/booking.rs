//! Booking types, including the spreadsheet import workflow

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::remark::Remark;
use super::user::UserRef;
use crate::impl_wire_enum_conversions;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookingStatus {
    Pending,
    Assigned,
    InProgress,
    Confirmed,
    Delivered,
    Cancelled,
    Closed,
}

impl_wire_enum_conversions!(BookingStatus {
    Pending => "PENDING",
    Assigned => "ASSIGNED",
    InProgress => "IN_PROGRESS",
    Confirmed => "CONFIRMED",
    Delivered => "DELIVERED",
    Cancelled => "CANCELLED",
    Closed => "CLOSED",
});

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: String,
    #[serde(default)]
    pub booking_number: Option<String>,
    pub customer_name: String,
    #[serde(default)]
    pub customer_phone: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub variant: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
    pub status: BookingStatus,
    #[serde(default)]
    pub advisor: Option<UserRef>,
    #[serde(default)]
    pub dealership_id: Option<String>,
    #[serde(default)]
    pub booking_date: Option<NaiveDate>,
    #[serde(default)]
    pub expected_delivery_date: Option<NaiveDate>,
    #[serde(default)]
    pub remarks: Vec<Remark>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// List filters; absent fields are omitted from the query string
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingFilters {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<BookingStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub advisor_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dealership_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingRequest {
    pub customer_name: String,
    pub customer_phone: String,
    pub model: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variant: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enquiry_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dealership_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub booking_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected_delivery_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBookingRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variant: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected_delivery_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBookingStatusRequest {
    pub status: BookingStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignBookingRequest {
    pub advisor_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportRowError {
    pub row: u32,
    pub message: String,
}

/// Dry-run result of a booking spreadsheet upload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportPreview {
    #[serde(default)]
    pub total_rows: u32,
    #[serde(default)]
    pub valid_rows: u32,
    #[serde(default)]
    pub errors: Vec<ImportRowError>,
    #[serde(default)]
    pub sample: Vec<serde_json::Value>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ImportStatus {
    Pending,
    Processing,
    Completed,
    Failed,
}

impl_wire_enum_conversions!(ImportStatus {
    Pending => "PENDING",
    Processing => "PROCESSING",
    Completed => "COMPLETED",
    Failed => "FAILED",
});

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportJob {
    pub id: String,
    pub status: ImportStatus,
    #[serde(default)]
    pub total: u32,
    #[serde(default)]
    pub processed: u32,
    #[serde(default)]
    pub failed: u32,
    #[serde(default)]
    pub errors: Vec<ImportRowError>,
}

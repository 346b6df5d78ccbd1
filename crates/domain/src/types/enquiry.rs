//! Enquiry (sales lead) types

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::remark::Remark;
use super::user::UserRef;
use crate::impl_wire_enum_conversions;

/// Lead temperature; `Lost` and `Booked` are terminal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EnquiryCategory {
    Hot,
    Lost,
    Booked,
}

impl_wire_enum_conversions!(EnquiryCategory {
    Hot => "HOT",
    Lost => "LOST",
    Booked => "BOOKED",
});

impl EnquiryCategory {
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Lost | Self::Booked)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EnquiryStatus {
    Open,
    InProgress,
    Closed,
}

impl_wire_enum_conversions!(EnquiryStatus {
    Open => "OPEN",
    InProgress => "IN_PROGRESS",
    Closed => "CLOSED",
});

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Enquiry {
    pub id: String,
    pub customer_name: String,
    #[serde(default)]
    pub customer_contact: Option<String>,
    #[serde(default)]
    pub customer_email: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub variant: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
    pub category: EnquiryCategory,
    pub status: EnquiryStatus,
    #[serde(default)]
    pub dealership_id: Option<String>,
    #[serde(default)]
    pub assigned_to: Option<UserRef>,
    #[serde(default)]
    pub lost_reason: Option<String>,
    #[serde(default)]
    pub expected_booking_date: Option<NaiveDate>,
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
pub struct EnquiryFilters {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<EnquiryCategory>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<EnquiryStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dealership_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEnquiryRequest {
    pub customer_name: String,
    pub customer_contact: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variant: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<EnquiryCategory>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected_booking_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dealership_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEnquiryRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_contact: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variant: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<EnquiryCategory>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<EnquiryStatus>,
    /// Mandatory server-side when `category` is `LOST`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lost_reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected_booking_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignEnquiryRequest {
    pub advisor_id: String,
}

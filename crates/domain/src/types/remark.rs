//! Free-text remarks attached to enquiries and bookings

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::session::Role;
use crate::impl_wire_enum_conversions;

/// Parent entity kind of a remark
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RemarkType {
    Enquiry,
    Booking,
}

impl_wire_enum_conversions!(RemarkType {
    Enquiry => "enquiry",
    Booking => "booking",
});

/// Author snapshot stored on the remark
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemarkAuthor {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub role: Role,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Remark {
    pub id: String,
    pub remark: String,
    pub remark_type: RemarkType,
    pub created_at: DateTime<Utc>,
    pub created_by: RemarkAuthor,
    /// Terminal once set
    #[serde(default)]
    pub cancelled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cancellation_reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cancelled_at: Option<DateTime<Utc>>,
}

impl Remark {
    pub fn is_active(&self) -> bool {
        !self.cancelled
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddRemarkRequest {
    pub remark: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CancelRemarkRequest {
    pub reason: String,
}

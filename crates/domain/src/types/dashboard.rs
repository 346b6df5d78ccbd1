//! Dashboard counters

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DashboardStats {
    pub total_enquiries: u64,
    pub hot_enquiries: u64,
    pub lost_enquiries: u64,
    pub booked_enquiries: u64,
    pub total_bookings: u64,
    pub pending_bookings: u64,
    pub delivered_bookings: u64,
    pub total_quotations: u64,
    pub available_stock: u64,
}

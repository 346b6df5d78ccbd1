//! Shared test helpers for `dealerdesk-core` integration tests.
//!
//! In-memory fakes for the core ports so service tests can count calls and
//! script server rejections without HTTP.

#![allow(dead_code)]

pub mod gateways;

use dealerdesk_domain::{Booking, Enquiry, EnquiryCategory, EnquiryStatus};

/// Enquiry fixture with the given category and status
pub fn enquiry(id: &str, category: EnquiryCategory, status: EnquiryStatus) -> Enquiry {
    serde_json::from_value(serde_json::json!({
        "id": id,
        "customerName": "Meera Nair",
        "customerContact": "9800000000",
        "category": category,
        "status": status,
    }))
    .expect("enquiry fixture")
}

/// Booking fixture with the given status string
pub fn booking(id: &str, status: &str) -> Booking {
    serde_json::from_value(serde_json::json!({
        "id": id,
        "customerName": "Kabir Shah",
        "status": status,
    }))
    .expect("booking fixture")
}

//! Category transition gate
//!
//! Moving an enquiry to LOST needs a reason, and BOOKED/LOST are final.

use dealerdesk_domain::{Enquiry, EnquiryCategory, UpdateEnquiryRequest};

use super::lock::LockState;
use crate::violation::RuleViolation;

/// A validated category change ready to send
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryChange {
    pub enquiry_id: String,
    pub target: EnquiryCategory,
    pub reason: Option<String>,
}

impl CategoryChange {
    /// Check a requested transition against the current enquiry.
    ///
    /// The reason is trimmed; a whitespace-only reason counts as missing.
    pub fn validate(
        enquiry: &Enquiry,
        target: EnquiryCategory,
        reason: Option<&str>,
    ) -> Result<Self, RuleViolation> {
        LockState::for_enquiry(enquiry).ensure_mutable()?;

        let reason = reason.map(str::trim).filter(|r| !r.is_empty()).map(str::to_string);
        if target == EnquiryCategory::Lost && reason.is_none() {
            return Err(RuleViolation::LostReasonRequired);
        }

        Ok(Self { enquiry_id: enquiry.id.clone(), target, reason })
    }

    /// Categories a user may still pick for this enquiry
    pub fn offered(enquiry: &Enquiry) -> Vec<EnquiryCategory> {
        if LockState::for_enquiry(enquiry).allows_mutation() {
            vec![EnquiryCategory::Hot, EnquiryCategory::Lost, EnquiryCategory::Booked]
        } else {
            Vec::new()
        }
    }

    pub fn to_request(&self) -> UpdateEnquiryRequest {
        UpdateEnquiryRequest {
            category: Some(self.target),
            lost_reason: if self.target == EnquiryCategory::Lost {
                self.reason.clone()
            } else {
                None
            },
            ..Default::default()
        }
    }
}

//! Enquiry category changes with the transition gate applied

use std::sync::Arc;

use dealerdesk_domain::{Enquiry, EnquiryCategory, Result};
use tracing::{debug, info};

use super::category::CategoryChange;
use super::ports::EnquiryGateway;

pub struct EnquiryService {
    gateway: Arc<dyn EnquiryGateway>,
}

impl EnquiryService {
    pub fn new(gateway: Arc<dyn EnquiryGateway>) -> Self {
        Self { gateway }
    }

    /// Change an enquiry's category.
    ///
    /// Locked enquiries and LOST without a reason are rejected before any
    /// request is sent.
    pub async fn change_category(
        &self,
        enquiry: &Enquiry,
        target: EnquiryCategory,
        reason: Option<&str>,
    ) -> Result<Enquiry> {
        let change = CategoryChange::validate(enquiry, target, reason)?;
        debug!(enquiry_id = %change.enquiry_id, target = %change.target, "Changing enquiry category");

        let updated = self.gateway.update_enquiry(&change.enquiry_id, &change.to_request()).await?;

        info!(enquiry_id = %updated.id, category = %updated.category, "Enquiry category changed");
        Ok(updated)
    }
}

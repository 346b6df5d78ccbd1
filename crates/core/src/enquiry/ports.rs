//! Port interfaces for enquiry mutations

use async_trait::async_trait;
use dealerdesk_domain::{Enquiry, Result, UpdateEnquiryRequest};

/// Trait for sending enquiry updates to the backend
#[async_trait]
pub trait EnquiryGateway: Send + Sync {
    /// Apply a partial update and return the server's copy
    async fn update_enquiry(&self, id: &str, update: &UpdateEnquiryRequest) -> Result<Enquiry>;
}

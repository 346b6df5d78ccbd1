//! Port interfaces for remark persistence

use async_trait::async_trait;
use dealerdesk_domain::{Remark, RemarkType, Result};

/// Trait for the backend's remark endpoints
#[async_trait]
pub trait RemarkGateway: Send + Sync {
    /// Attach a remark to an enquiry or booking
    async fn add_remark(&self, parent: RemarkType, parent_id: &str, text: &str) -> Result<Remark>;

    /// Cancel a remark with a mandatory reason.
    ///
    /// `None` when the backend confirms without echoing the remark.
    async fn cancel_remark(&self, remark_id: &str, reason: &str) -> Result<Option<Remark>>;
}

//! `/remarks` endpoints
//!
//! The count cap, the mandatory reason and the author-or-elevated rule are
//! enforced by `dealerdesk_core::RemarkService` before these are called; the
//! server enforces them again.

use std::sync::Arc;

use async_trait::async_trait;
use dealerdesk_core::RemarkGateway;
use dealerdesk_domain::{AddRemarkRequest, CancelRemarkRequest, CrmError, Remark, RemarkType};
use tracing::{info, instrument};

use super::segment;
use crate::api::client::ApiClient;
use crate::api::errors::ApiError;

pub struct RemarksClient {
    client: Arc<ApiClient>,
}

impl RemarksClient {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    #[instrument(skip(self, text), fields(parent = %parent, parent_id = %parent_id))]
    pub async fn add(&self, parent: RemarkType, parent_id: &str, text: &str) -> Result<Remark, ApiError> {
        let path = format!("/remarks/{}/{}/remarks", parent.as_str(), segment(parent_id));
        let request = AddRemarkRequest { remark: text.to_string() };

        let remark: Remark = self.client.post(&path, &request).await?.entity("remark")?;
        info!(remark_id = %remark.id, "Remark added");
        Ok(remark)
    }

    /// `None` when the server confirms with a bare `{success, message}`
    #[instrument(skip(self, reason), fields(remark_id = %remark_id))]
    pub async fn cancel(&self, remark_id: &str, reason: &str) -> Result<Option<Remark>, ApiError> {
        let path = format!("/remarks/remarks/{}/cancel", segment(remark_id));
        let request = CancelRemarkRequest { reason: reason.to_string() };

        let remark: Option<Remark> =
            self.client.post(&path, &request).await?.entity_opt("remark")?;
        info!(%remark_id, echoed = remark.is_some(), "Remark cancelled");
        Ok(remark)
    }
}

#[async_trait]
impl RemarkGateway for RemarksClient {
    async fn add_remark(
        &self,
        parent: RemarkType,
        parent_id: &str,
        text: &str,
    ) -> dealerdesk_domain::Result<Remark> {
        self.add(parent, parent_id, text).await.map_err(CrmError::from)
    }

    async fn cancel_remark(
        &self,
        remark_id: &str,
        reason: &str,
    ) -> dealerdesk_domain::Result<Option<Remark>> {
        self.cancel(remark_id, reason).await.map_err(CrmError::from)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::api::client::ApiClientConfig;
    use crate::session::AnonymousSessions;

    fn remarks(server: &MockServer) -> RemarksClient {
        let config = ApiClientConfig { base_url: server.uri(), ..Default::default() };
        let client = ApiClient::new(config, Arc::new(AnonymousSessions)).unwrap();
        RemarksClient::new(Arc::new(client))
    }

    fn remark_json(cancelled: bool) -> serde_json::Value {
        json!({
            "id": "R1",
            "remark": "Customer confirmed test drive",
            "remarkType": "booking",
            "createdAt": "2026-10-01T09:30:00Z",
            "createdBy": { "id": "u1", "name": "Priya", "role": "CUSTOMER_ADVISOR" },
            "cancelled": cancelled
        })
    }

    #[tokio::test]
    async fn add_posts_to_parent_path() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/remarks/booking/B1/remarks"))
            .and(body_json(json!({ "remark": "Customer confirmed test drive" })))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "success": true, "message": "Remark added", "data": remark_json(false)
            })))
            .expect(1)
            .mount(&server)
            .await;

        let remark = remarks(&server)
            .add_remark(RemarkType::Booking, "B1", "Customer confirmed test drive")
            .await
            .unwrap();

        assert_eq!(remark.remark, "Customer confirmed test drive");
        assert!(remark.is_active());
    }

    #[tokio::test]
    async fn cancel_forbidden_maps_to_permission_denied() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/remarks/remarks/R1/cancel"))
            .respond_with(
                ResponseTemplate::new(403)
                    .set_body_json(json!({ "success": false, "message": "Not allowed" })),
            )
            .mount(&server)
            .await;

        let err = remarks(&server).cancel_remark("R1", "duplicate entry").await.unwrap_err();
        assert!(matches!(err, CrmError::PermissionDenied(_)));
    }

    #[tokio::test]
    async fn cancel_without_data_is_confirmed() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/remarks/remarks/R1/cancel"))
            .and(body_json(json!({ "reason": "duplicate entry" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true, "message": "Remark cancelled successfully"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let echoed = remarks(&server).cancel("R1", "duplicate entry").await.unwrap();
        assert!(echoed.is_none());
    }

    #[tokio::test]
    async fn limit_rejection_surfaces_server_message() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/remarks/enquiry/E1/remarks"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "success": false,
                "message": "Maximum remark limit of 20 reached"
            })))
            .mount(&server)
            .await;

        let err = remarks(&server).add_remark(RemarkType::Enquiry, "E1", "one more").await.unwrap_err();
        assert_eq!(err, CrmError::Validation("Maximum remark limit of 20 reached".into()));
    }
}

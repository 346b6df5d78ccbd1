//! `/quotations` endpoints

use std::sync::Arc;

use dealerdesk_domain::{
    CreateQuotationRequest, Paginated, Quotation, QuotationFilters, RejectQuotationRequest,
    UpdateQuotationRequest,
};
use tracing::{debug, instrument};

use super::segment;
use crate::api::client::ApiClient;
use crate::api::errors::ApiError;

pub struct QuotationsClient {
    client: Arc<ApiClient>,
}

impl QuotationsClient {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    #[instrument(skip(self, filters))]
    pub async fn list(&self, filters: &QuotationFilters) -> Result<Paginated<Quotation>, ApiError> {
        self.client.get_query("/quotations", filters).await?.page("quotations")
    }

    #[instrument(skip(self), fields(quotation_id = %id))]
    pub async fn get(&self, id: &str) -> Result<Quotation, ApiError> {
        let path = format!("/quotations/{}", segment(id));
        self.client.get(&path).await?.entity("quotation")
    }

    #[instrument(skip(self, request), fields(enquiry_id = %request.enquiry_id))]
    pub async fn create(&self, request: &CreateQuotationRequest) -> Result<Quotation, ApiError> {
        let quotation: Quotation =
            self.client.post("/quotations", request).await?.entity("quotation")?;
        debug!(quotation_id = %quotation.id, "Quotation created");
        Ok(quotation)
    }

    #[instrument(skip(self, request), fields(quotation_id = %id))]
    pub async fn update(
        &self,
        id: &str,
        request: &UpdateQuotationRequest,
    ) -> Result<Quotation, ApiError> {
        let path = format!("/quotations/{}", segment(id));
        self.client.put(&path, request).await?.entity("quotation")
    }

    #[instrument(skip(self), fields(quotation_id = %id))]
    pub async fn delete(&self, id: &str) -> Result<(), ApiError> {
        let path = format!("/quotations/{}", segment(id));
        self.client.delete(&path).await?;
        Ok(())
    }

    /// Email the quotation to the customer.
    ///
    /// The status transitions return `None` when the server confirms
    /// without echoing the quotation.
    #[instrument(skip(self), fields(quotation_id = %id))]
    pub async fn send(&self, id: &str) -> Result<Option<Quotation>, ApiError> {
        self.transition(id, "send").await
    }

    #[instrument(skip(self), fields(quotation_id = %id))]
    pub async fn approve(&self, id: &str) -> Result<Option<Quotation>, ApiError> {
        self.transition(id, "approve").await
    }

    #[instrument(skip(self, request), fields(quotation_id = %id))]
    pub async fn reject(
        &self,
        id: &str,
        request: &RejectQuotationRequest,
    ) -> Result<Option<Quotation>, ApiError> {
        let path = format!("/quotations/{}/reject", segment(id));
        self.client.post(&path, request).await?.entity_opt("quotation")
    }

    async fn transition(&self, id: &str, action: &str) -> Result<Option<Quotation>, ApiError> {
        let path = format!("/quotations/{}/{action}", segment(id));
        self.client.post_empty(&path).await?.entity_opt("quotation")
    }
}

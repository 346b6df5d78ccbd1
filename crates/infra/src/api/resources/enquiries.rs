//! `/enquiries` endpoints

use std::sync::Arc;

use async_trait::async_trait;
use dealerdesk_core::EnquiryGateway;
use dealerdesk_domain::{
    AssignEnquiryRequest, CreateEnquiryRequest, CrmError, Enquiry, EnquiryFilters, ExportFile,
    Paginated, UpdateEnquiryRequest,
};
use tracing::{debug, instrument};

use super::segment;
use crate::api::client::{ApiClient, ApiRequest};
use crate::api::errors::ApiError;

pub struct EnquiriesClient {
    client: Arc<ApiClient>,
}

impl EnquiriesClient {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    /// List enquiries matching `filters`
    #[instrument(skip(self, filters))]
    pub async fn list(&self, filters: &EnquiryFilters) -> Result<Paginated<Enquiry>, ApiError> {
        let page = self.client.get_query("/enquiries", filters).await?.page("enquiries")?;
        debug!(count = page.items.len(), "Enquiries listed");
        Ok(page)
    }

    #[instrument(skip(self), fields(enquiry_id = %id))]
    pub async fn get(&self, id: &str) -> Result<Enquiry, ApiError> {
        let path = format!("/enquiries/{}", segment(id));
        self.client.get(&path).await?.entity("enquiry")
    }

    #[instrument(skip(self, request))]
    pub async fn create(&self, request: &CreateEnquiryRequest) -> Result<Enquiry, ApiError> {
        let enquiry: Enquiry = self.client.post("/enquiries", request).await?.entity("enquiry")?;
        debug!(enquiry_id = %enquiry.id, "Enquiry created");
        Ok(enquiry)
    }

    #[instrument(skip(self, request), fields(enquiry_id = %id))]
    pub async fn update(&self, id: &str, request: &UpdateEnquiryRequest) -> Result<Enquiry, ApiError> {
        let path = format!("/enquiries/{}", segment(id));
        self.client.put(&path, request).await?.entity("enquiry")
    }

    #[instrument(skip(self), fields(enquiry_id = %id))]
    pub async fn delete(&self, id: &str) -> Result<(), ApiError> {
        let path = format!("/enquiries/{}", segment(id));
        self.client.delete(&path).await?;
        Ok(())
    }

    /// Hand the enquiry to another advisor
    #[instrument(skip(self, request), fields(enquiry_id = %id))]
    pub async fn assign(&self, id: &str, request: &AssignEnquiryRequest) -> Result<Enquiry, ApiError> {
        let path = format!("/enquiries/{}/assign", segment(id));
        self.client.post(&path, request).await?.entity("enquiry")
    }

    /// CSV export of the filtered list
    #[instrument(skip(self, filters))]
    pub async fn export_csv(&self, filters: &EnquiryFilters) -> Result<ExportFile, ApiError> {
        self.client.send_blob(ApiRequest::get("/enquiries/export/csv").with_query(filters)?).await
    }
}

#[async_trait]
impl EnquiryGateway for EnquiriesClient {
    async fn update_enquiry(
        &self,
        id: &str,
        update: &UpdateEnquiryRequest,
    ) -> dealerdesk_domain::Result<Enquiry> {
        self.update(id, update).await.map_err(CrmError::from)
    }
}

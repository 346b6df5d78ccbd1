//! Binary endpoints: exports, downloads and generated PDFs
//!
//! Responses bypass the JSON envelope and come back as [`ExportFile`].

use std::sync::Arc;

use dealerdesk_domain::ExportFile;
use tracing::{debug, instrument};

use super::segment;
use crate::api::client::ApiClient;
use crate::api::errors::ApiError;

/// Exportable resource collections
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportKind {
    Enquiries,
    Bookings,
    Quotations,
    Stock,
}

impl ExportKind {
    fn collection(self) -> &'static str {
        match self {
            Self::Enquiries => "enquiries",
            Self::Bookings => "bookings",
            Self::Quotations => "quotations",
            Self::Stock => "stock",
        }
    }
}

pub struct FilesClient {
    client: Arc<ApiClient>,
}

impl FilesClient {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    /// `GET /<collection>/export/csv`
    #[instrument(skip(self))]
    pub async fn export_csv(&self, kind: ExportKind) -> Result<ExportFile, ApiError> {
        let path = format!("/{}/export/csv", kind.collection());
        let file = self.client.get_blob(&path).await?;
        debug!(size = file.len(), "Export downloaded");
        Ok(file)
    }

    /// `GET /files/:id/download`
    #[instrument(skip(self), fields(file_id = %file_id))]
    pub async fn download(&self, file_id: &str) -> Result<ExportFile, ApiError> {
        let path = format!("/files/{}/download", segment(file_id));
        self.client.get_blob(&path).await
    }

    /// `GET /quotations/:id/pdf`
    #[instrument(skip(self), fields(quotation_id = %quotation_id))]
    pub async fn quotation_pdf(&self, quotation_id: &str) -> Result<ExportFile, ApiError> {
        let path = format!("/quotations/{}/pdf", segment(quotation_id));
        self.client.get_blob(&path).await
    }

    /// Import template for the booking spreadsheet upload
    #[instrument(skip(self))]
    pub async fn booking_import_template(&self) -> Result<ExportFile, ApiError> {
        self.client.get_blob("/bookings/import/template/download").await
    }
}

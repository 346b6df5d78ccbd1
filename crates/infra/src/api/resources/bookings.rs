//! `/bookings` endpoints, including the spreadsheet import workflow

use std::sync::Arc;

use dealerdesk_domain::{
    AssignBookingRequest, Booking, BookingFilters, CreateBookingRequest, ExportFile, ImportJob,
    ImportPreview, Paginated, UpdateBookingRequest, UpdateBookingStatusRequest,
};
use tracing::{debug, info, instrument};

use super::segment;
use crate::api::client::{ApiClient, ApiRequest, UploadFile};
use crate::api::errors::ApiError;

pub struct BookingsClient {
    client: Arc<ApiClient>,
}

impl BookingsClient {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    #[instrument(skip(self, filters))]
    pub async fn list(&self, filters: &BookingFilters) -> Result<Paginated<Booking>, ApiError> {
        let page = self.client.get_query("/bookings", filters).await?.page("bookings")?;
        debug!(count = page.items.len(), "Bookings listed");
        Ok(page)
    }

    /// Bookings assigned to the signed-in advisor
    #[instrument(skip(self, filters))]
    pub async fn my_bookings(&self, filters: &BookingFilters) -> Result<Paginated<Booking>, ApiError> {
        self.client.get_query("/bookings/advisor/my-bookings", filters).await?.page("bookings")
    }

    #[instrument(skip(self), fields(booking_id = %id))]
    pub async fn get(&self, id: &str) -> Result<Booking, ApiError> {
        let path = format!("/bookings/{}", segment(id));
        self.client.get(&path).await?.entity("booking")
    }

    #[instrument(skip(self, request))]
    pub async fn create(&self, request: &CreateBookingRequest) -> Result<Booking, ApiError> {
        let booking: Booking = self.client.post("/bookings", request).await?.entity("booking")?;
        debug!(booking_id = %booking.id, "Booking created");
        Ok(booking)
    }

    #[instrument(skip(self, request), fields(booking_id = %id))]
    pub async fn update(&self, id: &str, request: &UpdateBookingRequest) -> Result<Booking, ApiError> {
        let path = format!("/bookings/{}", segment(id));
        self.client.put(&path, request).await?.entity("booking")
    }

    #[instrument(skip(self, request), fields(booking_id = %id, status = %request.status))]
    pub async fn update_status(
        &self,
        id: &str,
        request: &UpdateBookingStatusRequest,
    ) -> Result<Booking, ApiError> {
        let path = format!("/bookings/{}/update-status", segment(id));
        self.client.put(&path, request).await?.entity("booking")
    }

    #[instrument(skip(self, request), fields(booking_id = %id))]
    pub async fn assign(&self, id: &str, request: &AssignBookingRequest) -> Result<Booking, ApiError> {
        let path = format!("/bookings/{}/assign", segment(id));
        self.client.patch(&path, request).await?.entity("booking")
    }

    #[instrument(skip(self, filters))]
    pub async fn export_csv(&self, filters: &BookingFilters) -> Result<ExportFile, ApiError> {
        self.client.send_blob(ApiRequest::get("/bookings/export/csv").with_query(filters)?).await
    }

    /// Dry-run a spreadsheet without creating bookings
    #[instrument(skip(self, file), fields(file_name = %file.file_name))]
    pub async fn preview_import(&self, file: UploadFile) -> Result<ImportPreview, ApiError> {
        self.client.upload("/bookings/import/preview", file, Vec::new()).await?.entity("preview")
    }

    /// Start an import job; poll it with [`Self::import_status`]
    #[instrument(skip(self, file), fields(file_name = %file.file_name))]
    pub async fn upload_import(&self, file: UploadFile) -> Result<ImportJob, ApiError> {
        let job: ImportJob =
            self.client.upload("/bookings/import/upload", file, Vec::new()).await?.entity("job")?;
        info!(job_id = %job.id, status = %job.status, "Booking import started");
        Ok(job)
    }

    #[instrument(skip(self), fields(job_id = %job_id))]
    pub async fn import_status(&self, job_id: &str) -> Result<ImportJob, ApiError> {
        let path = format!("/bookings/import/status/{}", segment(job_id));
        self.client.get(&path).await?.entity("job")
    }
}

//! `/dashboard/stats`

use std::sync::Arc;

use dealerdesk_domain::DashboardStats;
use tracing::instrument;

use crate::api::client::ApiClient;
use crate::api::errors::ApiError;

pub struct DashboardClient {
    client: Arc<ApiClient>,
}

impl DashboardClient {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    /// Headline counters; all zero when the server sends no data
    #[instrument(skip(self))]
    pub async fn stats(&self) -> Result<DashboardStats, ApiError> {
        self.client.get("/dashboard/stats").await?.data_or_default()
    }
}

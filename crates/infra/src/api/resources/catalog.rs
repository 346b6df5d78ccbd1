//! Lookup lists used by the enquiry form (`/enquiries/models|variants|colors|sources`)

use std::sync::Arc;

use serde::Serialize;
use tracing::instrument;

use crate::api::client::ApiClient;
use crate::api::errors::ApiError;

#[derive(Serialize)]
struct OptionQuery<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    model: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    variant: Option<&'a str>,
}

pub struct CatalogClient {
    client: Arc<ApiClient>,
}

impl CatalogClient {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    #[instrument(skip(self))]
    pub async fn models(&self) -> Result<Vec<String>, ApiError> {
        self.client.get("/enquiries/models").await?.list("models")
    }

    #[instrument(skip(self))]
    pub async fn variants(&self, model: &str) -> Result<Vec<String>, ApiError> {
        let query = OptionQuery { model: Some(model), variant: None };
        self.client.get_query("/enquiries/variants", &query).await?.list("variants")
    }

    #[instrument(skip(self))]
    pub async fn colors(&self, model: &str, variant: Option<&str>) -> Result<Vec<String>, ApiError> {
        let query = OptionQuery { model: Some(model), variant };
        self.client.get_query("/enquiries/colors", &query).await?.list("colors")
    }

    /// Lead sources (walk-in, website, referral, ...)
    #[instrument(skip(self))]
    pub async fn sources(&self) -> Result<Vec<String>, ApiError> {
        self.client.get("/enquiries/sources").await?.list("sources")
    }
}

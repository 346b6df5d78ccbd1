//! `/dealerships` endpoints and per-dealership vehicle catalogs

use std::sync::Arc;

use dealerdesk_domain::{CatalogEntry, CreateDealershipRequest, Dealership};
use tracing::{debug, instrument};

use super::segment;
use crate::api::client::ApiClient;
use crate::api::errors::ApiError;

pub struct DealershipsClient {
    client: Arc<ApiClient>,
}

impl DealershipsClient {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<Dealership>, ApiError> {
        let dealerships: Vec<Dealership> =
            self.client.get("/dealerships").await?.list("dealerships")?;
        debug!(count = dealerships.len(), "Dealerships listed");
        Ok(dealerships)
    }

    #[instrument(skip(self), fields(dealership_id = %id))]
    pub async fn get(&self, id: &str) -> Result<Dealership, ApiError> {
        let path = format!("/dealerships/{}", segment(id));
        self.client.get(&path).await?.entity("dealership")
    }

    #[instrument(skip(self, request), fields(name = %request.name))]
    pub async fn create(&self, request: &CreateDealershipRequest) -> Result<Dealership, ApiError> {
        self.client.post("/dealerships", request).await?.entity("dealership")
    }

    /// Models, variants and colors the dealership sells
    #[instrument(skip(self), fields(dealership_id = %id))]
    pub async fn catalog(&self, id: &str) -> Result<Vec<CatalogEntry>, ApiError> {
        let path = format!("/dealerships/{}/catalog", segment(id));
        self.client.get(&path).await?.list("catalog")
    }

    #[instrument(skip(self, entry), fields(dealership_id = %id, model = %entry.model))]
    pub async fn add_catalog_entry(
        &self,
        id: &str,
        entry: &CatalogEntry,
    ) -> Result<CatalogEntry, ApiError> {
        let path = format!("/dealerships/{}/catalog", segment(id));
        self.client.post(&path, entry).await?.entity("entry")
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::api::client::ApiClientConfig;
    use crate::session::AnonymousSessions;

    #[tokio::test]
    async fn catalog_reads_nested_list() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/dealerships/D1/catalog"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "message": "",
                "data": { "catalog": [
                    { "model": "Nexon", "variants": [{ "name": "XZ+", "colors": ["Red", "White"] }] }
                ] }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let config = ApiClientConfig { base_url: server.uri(), ..Default::default() };
        let client = ApiClient::new(config, Arc::new(AnonymousSessions)).unwrap();
        let catalog = DealershipsClient::new(Arc::new(client)).catalog("D1").await.unwrap();

        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog[0].variants[0].colors, vec!["Red", "White"]);
    }
}

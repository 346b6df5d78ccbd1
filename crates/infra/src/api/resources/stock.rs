//! `/stock` endpoints

use std::sync::Arc;

use dealerdesk_domain::{CreateStockRequest, Paginated, StockFilters, StockItem, UpdateStockRequest};
use tracing::instrument;

use super::segment;
use crate::api::client::ApiClient;
use crate::api::errors::ApiError;

pub struct StockClient {
    client: Arc<ApiClient>,
}

impl StockClient {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    #[instrument(skip(self, filters))]
    pub async fn list(&self, filters: &StockFilters) -> Result<Paginated<StockItem>, ApiError> {
        self.client.get_query("/stock", filters).await?.page("stock")
    }

    #[instrument(skip(self), fields(stock_id = %id))]
    pub async fn get(&self, id: &str) -> Result<StockItem, ApiError> {
        let path = format!("/stock/{}", segment(id));
        self.client.get(&path).await?.entity("stock")
    }

    #[instrument(skip(self, request), fields(model = %request.model))]
    pub async fn create(&self, request: &CreateStockRequest) -> Result<StockItem, ApiError> {
        self.client.post("/stock", request).await?.entity("stock")
    }

    #[instrument(skip(self, request), fields(stock_id = %id))]
    pub async fn update(&self, id: &str, request: &UpdateStockRequest) -> Result<StockItem, ApiError> {
        let path = format!("/stock/{}", segment(id));
        self.client.put(&path, request).await?.entity("stock")
    }

    #[instrument(skip(self), fields(stock_id = %id))]
    pub async fn delete(&self, id: &str) -> Result<(), ApiError> {
        let path = format!("/stock/{}", segment(id));
        self.client.delete(&path).await?;
        Ok(())
    }
}

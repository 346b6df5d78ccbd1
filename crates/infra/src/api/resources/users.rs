//! `/auth` endpoints: the caller's profile and staff administration

use std::sync::Arc;

use dealerdesk_domain::{CreateUserRequest, UpdateUserRequest, UserProfile};
use tracing::{debug, instrument};

use super::segment;
use crate::api::client::ApiClient;
use crate::api::errors::ApiError;

pub struct UsersClient {
    client: Arc<ApiClient>,
}

impl UsersClient {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    /// Backend profile of the signed-in user (role, dealership)
    #[instrument(skip(self))]
    pub async fn profile(&self) -> Result<UserProfile, ApiError> {
        let profile: UserProfile = self.client.get("/auth/profile").await?.entity("user")?;
        debug!(user_id = %profile.id, role = %profile.role, "Profile loaded");
        Ok(profile)
    }

    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<UserProfile>, ApiError> {
        self.client.get("/auth/users").await?.list("users")
    }

    #[instrument(skip(self, request), fields(email = %request.email, role = %request.role))]
    pub async fn create(&self, request: &CreateUserRequest) -> Result<UserProfile, ApiError> {
        self.client.post("/auth/users", request).await?.entity("user")
    }

    #[instrument(skip(self, request), fields(uid = %uid))]
    pub async fn update(&self, uid: &str, request: &UpdateUserRequest) -> Result<UserProfile, ApiError> {
        let path = format!("/auth/users/{}", segment(uid));
        self.client.put(&path, request).await?.entity("user")
    }

    #[instrument(skip(self), fields(uid = %uid))]
    pub async fn delete(&self, uid: &str) -> Result<(), ApiError> {
        let path = format!("/auth/users/{}", segment(uid));
        self.client.delete(&path).await?;
        Ok(())
    }
}

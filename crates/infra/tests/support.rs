//! Shared helpers for `dealerdesk-infra` integration tests.
//!
//! One `MockServer` plays both the identity provider (`/v1/...`) and the
//! CRM backend (`/api/...`).

#![allow(dead_code)]

use std::sync::Arc;

use chrono::{Duration, Utc};
use dealerdesk_core::SessionStore;
use dealerdesk_domain::{IdentityConfig, Role, SessionRecord, SessionUser};
use dealerdesk_infra::session::MemorySessionStore;
use dealerdesk_infra::{ApiClient, ApiClientConfig, FirebaseTokenProvider};
use serde_json::{json, Value};
use wiremock::MockServer;

pub const API_KEY: &str = "test-web-key";

pub fn identity_config(server: &MockServer) -> IdentityConfig {
    IdentityConfig {
        api_key: API_KEY.to_string(),
        token_url: format!("{}/v1/token", server.uri()),
        sign_in_url: format!("{}/v1/accounts:signInWithPassword", server.uri()),
    }
}

pub fn api_config(server: &MockServer) -> ApiClientConfig {
    ApiClientConfig { base_url: format!("{}/api", server.uri()), ..Default::default() }
}

/// Persisted session for `user_id` whose id token expires in `expires_in`
/// seconds
pub fn session_record(user_id: &str, role: Role, expires_in: i64) -> SessionRecord {
    SessionRecord {
        id_token: format!("id-{user_id}-1"),
        refresh_token: format!("refresh-{user_id}"),
        expires_at: Utc::now() + Duration::seconds(expires_in),
        user: SessionUser {
            id: user_id.to_string(),
            name: Some("Test User".into()),
            email: Some(format!("{user_id}@example.com")),
            role,
            dealership_id: Some("D1".into()),
        },
    }
}

/// Token provider restored from an in-memory store seeded with `record`
pub async fn signed_in_provider(
    server: &MockServer,
    record: Option<SessionRecord>,
) -> (Arc<FirebaseTokenProvider>, Arc<MemorySessionStore>) {
    let store = Arc::new(MemorySessionStore::default());
    if let Some(record) = record {
        store.save(&record).await.expect("seed session store");
    }

    let provider = FirebaseTokenProvider::new(identity_config(server), store.clone())
        .expect("token provider");
    provider.restore().await.expect("restore session");

    (Arc::new(provider), store)
}

pub fn api_client(server: &MockServer, provider: Arc<FirebaseTokenProvider>) -> Arc<ApiClient> {
    Arc::new(ApiClient::new(api_config(server), provider).expect("api client"))
}

/// Successful `{success, message, data}` envelope
pub fn envelope(data: Value) -> Value {
    json!({ "success": true, "message": "OK", "data": data })
}

pub fn refresh_response(id_token: &str, refresh_token: &str) -> Value {
    json!({
        "id_token": id_token,
        "refresh_token": refresh_token,
        "expires_in": "3600",
        "token_type": "Bearer",
        "user_id": "uid-1"
    })
}

pub fn remark_json(id: &str, author_id: &str, role: &str, minutes_ago: i64) -> Value {
    json!({
        "id": id,
        "remark": format!("note {id}"),
        "remarkType": "enquiry",
        "createdAt": (Utc::now() - Duration::minutes(minutes_ago)).to_rfc3339(),
        "createdBy": { "id": author_id, "name": "Author", "role": role },
        "cancelled": false
    })
}

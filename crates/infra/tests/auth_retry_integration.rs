//! Integration tests for the 401 refresh-and-replay path
//!
//! **Coverage:**
//! - 401 → one forced refresh → replay with the new token → success
//! - Refresh rejected → local session cleared → "session expired"
//! - Second 401 after a successful refresh is terminal (no loop)
//! - No response at all → network error, session kept
//!
//! **Infrastructure:**
//! - WireMock server standing in for both the identity provider and the CRM
//! - Real `FirebaseTokenProvider` + `MemorySessionStore` + `ApiClient`

#[path = "support.rs"]
mod support;

use std::sync::Arc;

use dealerdesk_core::{SessionProvider, SessionStore};
use dealerdesk_domain::constants::{MSG_NETWORK_ERROR, MSG_SESSION_EXPIRED};
use dealerdesk_domain::{CrmError, Role};
use dealerdesk_infra::api::EnquiriesClient;
use dealerdesk_infra::{ApiClient, ApiClientConfig};
use serde_json::json;
use support::{api_client, envelope, refresh_response, session_record, signed_in_provider};
use wiremock::matchers::{bearer_token, body_string_contains, header_exists, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn enquiry_body() -> serde_json::Value {
    envelope(json!({ "enquiry": {
        "id": "E1",
        "customerName": "Meera Nair",
        "category": "HOT",
        "status": "OPEN"
    } }))
}

#[tokio::test]
async fn expired_token_is_refreshed_once_and_request_replayed() {
    let server = MockServer::start().await;
    let (provider, store) =
        signed_in_provider(&server, Some(session_record("uid-1", Role::TeamLead, 3600))).await;

    Mock::given(method("GET"))
        .and(path("/api/enquiries/E1"))
        .and(bearer_token("id-uid-1-1"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "success": false, "message": "Token expired"
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/v1/token"))
        .and(body_string_contains("refresh_token=refresh-uid-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(refresh_response("id-2", "refresh-2")))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/enquiries/E1"))
        .and(bearer_token("id-2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(enquiry_body()))
        .expect(1)
        .mount(&server)
        .await;

    let enquiries = EnquiriesClient::new(api_client(&server, provider.clone()));
    let enquiry = enquiries.get("E1").await.expect("replayed request succeeds");

    assert_eq!(enquiry.id, "E1");
    assert_eq!(provider.current_session().await.map(|s| s.bearer_token), Some("id-2".into()));

    let stored = store.load().await.unwrap().expect("session still persisted");
    assert_eq!(stored.id_token, "id-2");
    assert_eq!(stored.refresh_token, "refresh-2");
}

#[tokio::test]
async fn failed_refresh_clears_session_and_reports_expiry() {
    let server = MockServer::start().await;
    let (provider, store) =
        signed_in_provider(&server, Some(session_record("uid-1", Role::CustomerAdvisor, 3600)))
            .await;

    Mock::given(method("GET"))
        .and(path("/api/enquiries/E1"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/v1/token"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": { "code": 400, "message": "TOKEN_EXPIRED" }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let enquiries = EnquiriesClient::new(api_client(&server, provider.clone()));
    let err = enquiries.get("E1").await.unwrap_err();

    assert!(err.is_session_expired());
    assert_eq!(err.user_message(), MSG_SESSION_EXPIRED);
    assert_eq!(CrmError::from(err), CrmError::SessionExpired(MSG_SESSION_EXPIRED.into()));

    assert!(provider.current_session().await.is_none());
    assert!(store.load().await.unwrap().is_none());
}

#[tokio::test]
async fn second_unauthorized_response_is_terminal() {
    let server = MockServer::start().await;
    let (provider, _store) =
        signed_in_provider(&server, Some(session_record("uid-1", Role::Admin, 3600))).await;

    Mock::given(method("GET"))
        .and(path("/api/enquiries/E1"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "success": false, "message": "Not allowed for this dealership"
        })))
        .expect(2)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/v1/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(refresh_response("id-2", "refresh-2")))
        .expect(1)
        .mount(&server)
        .await;

    let enquiries = EnquiriesClient::new(api_client(&server, provider));
    let err = enquiries.get("E1").await.unwrap_err();

    assert_eq!(err.status(), Some(401));
    assert!(CrmError::from(err).requires_sign_in());
}

#[tokio::test]
async fn anonymous_request_gets_session_expired_on_401() {
    let server = MockServer::start().await;
    let (provider, _store) = signed_in_provider(&server, None).await;

    Mock::given(method("GET"))
        .and(path("/api/enquiries/E1"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/v1/token"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let enquiries = EnquiriesClient::new(api_client(&server, provider));
    let err = enquiries.get("E1").await.unwrap_err();
    assert!(err.is_session_expired());

    let requests = server.received_requests().await.unwrap();
    let api_request = requests.iter().find(|r| r.url.path() == "/api/enquiries/E1").unwrap();
    assert!(!api_request.headers.contains_key("authorization"));
}

#[tokio::test]
async fn unreachable_backend_is_network_error_and_keeps_session() {
    let identity = MockServer::start().await;
    let (provider, store) =
        signed_in_provider(&identity, Some(session_record("uid-1", Role::TeamLead, 3600))).await;

    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let config = ApiClientConfig { base_url: format!("http://{addr}/api"), ..Default::default() };
    let client = Arc::new(ApiClient::new(config, provider.clone()).unwrap());

    let err = EnquiriesClient::new(client).get("E1").await.unwrap_err();
    assert_eq!(CrmError::from(err), CrmError::Network(MSG_NETWORK_ERROR.into()));

    assert!(provider.current_session().await.is_some());
    assert!(store.load().await.unwrap().is_some());
}

#[tokio::test]
async fn bearer_header_is_attached_when_signed_in() {
    let server = MockServer::start().await;
    let (provider, _store) =
        signed_in_provider(&server, Some(session_record("uid-1", Role::SalesManager, 3600))).await;

    Mock::given(method("GET"))
        .and(path("/api/enquiries/E1"))
        .and(header_exists("authorization"))
        .and(bearer_token("id-uid-1-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(enquiry_body()))
        .expect(1)
        .mount(&server)
        .await;

    let enquiries = EnquiriesClient::new(api_client(&server, provider));
    assert_eq!(enquiries.get("E1").await.unwrap().customer_name, "Meera Nair");
}

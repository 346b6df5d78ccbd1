//! API client with envelope unwrapping and the single 401 retry
//!
//! Every resource client goes through [`ApiClient`]. It attaches the bearer
//! token from the injected [`SessionProvider`], maps non-accepted responses
//! to [`ApiError`], checks `Envelope.success`, and on a first 401 forces one
//! token refresh and replays the identical request.

use std::sync::Arc;
use std::time::Duration;

use dealerdesk_core::SessionProvider;
use dealerdesk_domain::constants::{DEFAULT_TIMEOUT_SECS, HEALTH_CHECK_TIMEOUT_SECS};
use dealerdesk_domain::{Config, Environment, ExportFile, Paginated};
use reqwest::header::{ACCEPT, CONTENT_DISPOSITION, CONTENT_TYPE};
use reqwest::multipart::{Form, Part};
use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info, instrument, warn};

use super::envelope::{decode, decode_page, normalize_payload, Envelope};
use super::errors::ApiError;
use super::retry::{Attempt, AuthRetryPolicy, RetryDecision};
use crate::http::HttpClient;

/// Configuration for API client
#[derive(Debug, Clone)]
pub struct ApiClientConfig {
    /// Base URL for API (e.g., "https://crm.example.com/api")
    pub base_url: String,
    /// Timeout for API requests
    pub timeout: Duration,
    /// Development builds log requests sent without a session
    pub environment: Environment,
}

impl Default for ApiClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000/api".to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            environment: Environment::Development,
        }
    }
}

impl From<&Config> for ApiClientConfig {
    fn from(config: &Config) -> Self {
        Self {
            base_url: config.api.base_url.clone(),
            timeout: Duration::from_secs(config.api.timeout_secs),
            environment: config.environment,
        }
    }
}

/// File part of a multipart upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFile {
    /// Form field name, e.g. `file`
    pub field: String,
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq)]
enum RequestBody {
    Empty,
    Json(Value),
    Multipart { file: UploadFile, fields: Vec<(String, String)> },
}

/// A fully described outbound request.
///
/// Immutable once built so the auth retry can replay it verbatim.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    method: Method,
    path: String,
    query: Option<String>,
    body: RequestBody,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self { method, path: path.into(), query: None, body: RequestBody::Empty }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(Method::PATCH, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    /// Serialize `query` into the query string; `None` fields are omitted.
    pub fn with_query<Q: Serialize + ?Sized>(mut self, query: &Q) -> Result<Self, ApiError> {
        let encoded = serde_urlencoded::to_string(query)
            .map_err(|err| ApiError::Request(format!("Failed to encode query: {err}")))?;
        self.query = (!encoded.is_empty()).then_some(encoded);
        Ok(self)
    }

    pub fn with_json<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self, ApiError> {
        let value = serde_json::to_value(body)
            .map_err(|err| ApiError::Request(format!("Failed to serialize body: {err}")))?;
        self.body = RequestBody::Json(value);
        Ok(self)
    }

    pub fn with_upload(mut self, file: UploadFile, fields: Vec<(String, String)>) -> Self {
        self.body = RequestBody::Multipart { file, fields };
        self
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }
}

/// Unwrapped `data` of a successful envelope
#[derive(Debug, Clone, PartialEq)]
pub struct Payload {
    message: String,
    data: Option<Value>,
}

impl Payload {
    /// Envelope `message` (often a confirmation like "Booking updated")
    pub fn message(&self) -> &str {
        &self.message
    }

    /// No `data`, or an explicit `null`
    pub fn is_empty(&self) -> bool {
        self.data.as_ref().map_or(true, Value::is_null)
    }

    /// Decode `data` itself
    pub fn data<T: DeserializeOwned>(self) -> Result<T, ApiError> {
        decode(normalize_payload(self.data, None))
    }

    /// Decode `data[key]`, or `data` when the key is absent
    pub fn entity<T: DeserializeOwned>(self, key: &str) -> Result<T, ApiError> {
        decode(normalize_payload(self.data, Some(key)))
    }

    /// Like [`Payload::entity`], but a success with no `data` is `None`.
    ///
    /// For mutations whose confirmation may be just `{success, message}`.
    pub fn entity_opt<T: DeserializeOwned>(self, key: &str) -> Result<Option<T>, ApiError> {
        if self.is_empty() {
            return Ok(None);
        }
        self.entity(key).map(Some)
    }

    /// A list endpoint's items and pagination; absent data is an empty page
    pub fn page<T: DeserializeOwned>(self, key: &str) -> Result<Paginated<T>, ApiError> {
        decode_page(self.data, key)
    }

    /// Just the items of a list payload
    pub fn list<T: DeserializeOwned>(self, key: &str) -> Result<Vec<T>, ApiError> {
        Ok(self.page(key)?.items)
    }

    /// Decode `data`, falling back to `T::default()` when absent
    pub fn data_or_default<T: DeserializeOwned + Default>(self) -> Result<T, ApiError> {
        super::envelope::decode_or_default(normalize_payload(self.data, None))
    }
}

/// HTTP client for the CRM backend
pub struct ApiClient {
    http: HttpClient,
    sessions: Arc<dyn SessionProvider>,
    config: ApiClientConfig,
    policy: AuthRetryPolicy,
}

impl ApiClient {
    /// Create a new API client
    ///
    /// # Errors
    ///
    /// Returns error if the underlying HTTP client cannot be created
    pub fn new(
        config: ApiClientConfig,
        sessions: Arc<dyn SessionProvider>,
    ) -> Result<Self, ApiError> {
        let http = HttpClient::builder()
            .timeout(config.timeout)
            .user_agent(concat!("dealerdesk/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { http, sessions, config, policy: AuthRetryPolicy })
    }

    /// Create a builder for fluent configuration
    pub fn builder() -> ApiClientBuilder {
        ApiClientBuilder::default()
    }

    pub fn config(&self) -> &ApiClientConfig {
        &self.config
    }

    /// Send a request and unwrap its envelope.
    ///
    /// # Errors
    ///
    /// Network failures, non-accepted statuses, `success=false` envelopes,
    /// and [`ApiError::SessionExpired`] when the 401 refresh fails.
    pub async fn send(&self, request: ApiRequest) -> Result<Payload, ApiError> {
        let response = self.execute(&request).await?;
        let response = self.check_status(response).await?;

        let body = response.bytes().await.map_err(ApiError::from)?;
        let envelope = Envelope::parse(&body)?;
        let message = envelope.message.clone();

        match envelope.into_data() {
            Ok(data) => Ok(Payload { message, data }),
            Err(err) => {
                debug!(path = %request.path, error = %err, "envelope reported failure");
                Err(err)
            }
        }
    }

    /// Execute a GET request
    pub async fn get(&self, path: &str) -> Result<Payload, ApiError> {
        self.send(ApiRequest::get(path)).await
    }

    /// Execute a GET request with `query` serialized to the query string
    pub async fn get_query<Q: Serialize + ?Sized>(
        &self,
        path: &str,
        query: &Q,
    ) -> Result<Payload, ApiError> {
        self.send(ApiRequest::get(path).with_query(query)?).await
    }

    /// Execute a POST request with a JSON body
    pub async fn post<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<Payload, ApiError> {
        self.send(ApiRequest::post(path).with_json(body)?).await
    }

    /// Execute a POST request without a body
    pub async fn post_empty(&self, path: &str) -> Result<Payload, ApiError> {
        self.send(ApiRequest::post(path)).await
    }

    /// Execute a PUT request with a JSON body
    pub async fn put<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<Payload, ApiError> {
        self.send(ApiRequest::put(path).with_json(body)?).await
    }

    /// Execute a PATCH request with a JSON body
    pub async fn patch<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<Payload, ApiError> {
        self.send(ApiRequest::patch(path).with_json(body)?).await
    }

    /// Execute a DELETE request
    pub async fn delete(&self, path: &str) -> Result<Payload, ApiError> {
        self.send(ApiRequest::delete(path)).await
    }

    /// Upload one file as `multipart/form-data` plus extra text fields
    pub async fn upload(
        &self,
        path: &str,
        file: UploadFile,
        fields: Vec<(String, String)>,
    ) -> Result<Payload, ApiError> {
        self.send(ApiRequest::post(path).with_upload(file, fields)).await
    }

    /// GET a binary body (CSV/XLSX export, download, PDF); no envelope
    pub async fn get_blob(&self, path: &str) -> Result<ExportFile, ApiError> {
        self.send_blob(ApiRequest::get(path)).await
    }

    /// POST a JSON body and receive a binary body
    pub async fn post_blob<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<ExportFile, ApiError> {
        self.send_blob(ApiRequest::post(path).with_json(body)?).await
    }

    /// Send any request whose successful body is a raw file
    pub async fn send_blob(&self, request: ApiRequest) -> Result<ExportFile, ApiError> {
        let response = self.execute(&request).await?;
        let response = self.check_status(response).await?;

        let headers = response.headers();
        let content_type =
            headers.get(CONTENT_TYPE).and_then(|v| v.to_str().ok()).map(str::to_string);
        let file_name = headers
            .get(CONTENT_DISPOSITION)
            .and_then(|v| v.to_str().ok())
            .and_then(file_name_from_disposition);

        let bytes = response.bytes().await.map_err(ApiError::from)?.to_vec();
        debug!(path = %request.path, size = bytes.len(), "received binary body");

        Ok(ExportFile { bytes, content_type, file_name })
    }

    /// Health check for API
    ///
    /// Unauthenticated, with its own short timeout.
    ///
    /// # Returns
    ///
    /// `true` if API is reachable and healthy, `false` on a non-2xx status
    #[instrument(skip(self))]
    pub async fn health_check(&self) -> Result<bool, ApiError> {
        let url = self.url(&ApiRequest::get("/health"));
        let timeout = Duration::from_secs(HEALTH_CHECK_TIMEOUT_SECS);

        debug!(url = %url, "Health check");

        let request = self.http.request(Method::GET, &url);
        let response = tokio::time::timeout(timeout, self.http.send(request)).await.map_err(|_| {
            warn!("Health check timeout");
            ApiError::Timeout(timeout)
        })?;

        match response {
            Ok(resp) if resp.status().is_success() => {
                info!("API is healthy");
                Ok(true)
            }
            Ok(resp) => {
                warn!(status = %resp.status(), "API returned non-success status");
                Ok(false)
            }
            Err(e) => {
                warn!(error = %e, "Health check failed");
                Err(e)
            }
        }
    }

    /// Send `request`, applying the auth-retry policy to the response.
    #[instrument(skip(self, request), fields(method = %request.method, path = %request.path))]
    async fn execute(&self, request: &ApiRequest) -> Result<Response, ApiError> {
        let token = match self.sessions.access_token().await {
            Ok(token) => token,
            Err(err) if err.requires_sign_in() => return Err(self.expire_session().await),
            Err(err) => return Err(ApiError::from(err)),
        };

        if token.is_none() && !self.config.environment.is_production() {
            warn!(path = %request.path, "no active session; sending request without Authorization");
        }

        let response = self.send_attempt(request, token.as_deref(), Attempt::Initial).await?;

        match self.policy.decide(Attempt::Initial, response.status()) {
            RetryDecision::Deliver => Ok(response),
            RetryDecision::RefreshAndRetry(next) => {
                debug!("received 401; forcing token refresh");
                let fresh = match self.sessions.force_refresh().await {
                    Ok(token) => token,
                    Err(err) => {
                        warn!(error = %err, "token refresh failed");
                        return Err(self.expire_session().await);
                    }
                };
                self.send_attempt(request, Some(&fresh), next).await
            }
        }
    }

    async fn send_attempt(
        &self,
        request: &ApiRequest,
        token: Option<&str>,
        attempt: Attempt,
    ) -> Result<Response, ApiError> {
        let url = self.url(request);
        debug!(attempt = attempt.number(), url = %url, "API request");

        let mut builder =
            self.http.request(request.method.clone(), &url).header(ACCEPT, "application/json");
        if let Some(token) = token {
            builder = builder.bearer_auth(token);
        }

        let builder = attach_body(builder, &request.body)?;
        self.http.send(builder).await
    }

    async fn check_status(&self, response: Response) -> Result<Response, ApiError> {
        let status = response.status();
        if self.http.accepts(status) {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let err = ApiError::from_response(status.as_u16(), &body);
        warn!(status = status.as_u16(), message = %err, "API request failed");
        Err(err)
    }

    /// Drop every local session artifact and produce the session-expired error
    async fn expire_session(&self) -> ApiError {
        if let Err(err) = self.sessions.clear_session().await {
            warn!(error = %err, "failed to clear session after refresh failure");
        }
        ApiError::session_expired()
    }

    fn url(&self, request: &ApiRequest) -> String {
        let base = self.config.base_url.trim_end_matches('/');
        match request.query() {
            Some(query) => format!("{base}{}?{query}", request.path),
            None => format!("{base}{}", request.path),
        }
    }
}

fn attach_body(builder: RequestBuilder, body: &RequestBody) -> Result<RequestBuilder, ApiError> {
    match body {
        RequestBody::Empty => Ok(builder),
        RequestBody::Json(value) => Ok(builder.json(value)),
        RequestBody::Multipart { file, fields } => {
            let mut part = Part::bytes(file.bytes.clone()).file_name(file.file_name.clone());
            if let Some(content_type) = &file.content_type {
                part = part
                    .mime_str(content_type)
                    .map_err(|err| ApiError::Request(format!("Invalid content type: {err}")))?;
            }

            let mut form = Form::new();
            for (name, value) in fields {
                form = form.text(name.clone(), value.clone());
            }
            Ok(builder.multipart(form.part(file.field.clone(), part)))
        }
    }
}

/// Extract the file name from a `Content-Disposition` header value.
///
/// Prefers the RFC 5987 `filename*=UTF-8''...` form.
fn file_name_from_disposition(header: &str) -> Option<String> {
    let mut plain = None;

    for param in header.split(';').map(str::trim) {
        if let Some(encoded) = param.strip_prefix("filename*=") {
            let encoded = encoded.split("''").nth(1).unwrap_or(encoded);
            if let Ok(decoded) = urlencoding::decode(encoded.trim_matches('"')) {
                return Some(decoded.into_owned());
            }
        } else if let Some(name) = param.strip_prefix("filename=") {
            plain = Some(name.trim_matches('"').to_string());
        }
    }

    plain.filter(|name| !name.is_empty())
}

/// Builder for API client
#[derive(Default)]
pub struct ApiClientBuilder {
    config: Option<ApiClientConfig>,
    sessions: Option<Arc<dyn SessionProvider>>,
}

impl ApiClientBuilder {
    /// Set the API configuration
    pub fn config(mut self, config: ApiClientConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Set the session provider
    pub fn sessions(mut self, sessions: Arc<dyn SessionProvider>) -> Self {
        self.sessions = Some(sessions);
        self
    }

    /// Build the API client
    ///
    /// # Errors
    ///
    /// Returns error if required fields are missing or client creation fails
    pub fn build(self) -> Result<ApiClient, ApiError> {
        let config = self.config.unwrap_or_default();
        let sessions = self
            .sessions
            .ok_or_else(|| ApiError::Config("Session provider not set".to_string()))?;

        ApiClient::new(config, sessions)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use dealerdesk_domain::{CrmError, Result as CrmResult, Role, Session};
    use serde_json::json;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    /// Provider with a fixed token that refreshes to `refreshed`
    struct MockSessions {
        token: Option<String>,
        refreshed: Option<String>,
        refreshes: AtomicUsize,
        clears: AtomicUsize,
    }

    impl MockSessions {
        fn new(token: Option<&str>, refreshed: Option<&str>) -> Arc<Self> {
            Arc::new(Self {
                token: token.map(str::to_string),
                refreshed: refreshed.map(str::to_string),
                refreshes: AtomicUsize::new(0),
                clears: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait]
    impl SessionProvider for MockSessions {
        async fn current_session(&self) -> Option<Session> {
            self.token.as_ref().map(|token| Session {
                bearer_token: token.clone(),
                user_id: "u1".into(),
                role: Role::CustomerAdvisor,
            })
        }

        async fn access_token(&self) -> CrmResult<Option<String>> {
            Ok(self.token.clone())
        }

        async fn force_refresh(&self) -> CrmResult<String> {
            self.refreshes.fetch_add(1, Ordering::SeqCst);
            self.refreshed
                .clone()
                .ok_or_else(|| CrmError::SessionExpired("refresh token revoked".into()))
        }

        async fn clear_session(&self) -> CrmResult<()> {
            self.clears.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    fn client(server: &MockServer, sessions: Arc<MockSessions>) -> ApiClient {
        let config = ApiClientConfig { base_url: server.uri(), ..Default::default() };
        ApiClient::new(config, sessions).unwrap()
    }

    #[tokio::test]
    async fn test_health_check_success() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/health"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&mock_server)
            .await;

        let client = client(&mock_server, MockSessions::new(None, None));

        let result = client.health_check().await;
        assert!(result.unwrap());
    }

    #[tokio::test]
    async fn test_health_check_failure() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/health"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&mock_server)
            .await;

        let client = client(&mock_server, MockSessions::new(None, None));

        let result = client.health_check().await;
        assert!(!result.unwrap()); // Unhealthy but no error
    }

    #[tokio::test]
    async fn test_builder_missing_sessions() {
        let result = ApiClient::builder().build();
        assert!(matches!(result, Err(ApiError::Config(_))));
    }

    #[tokio::test]
    async fn attaches_bearer_token_and_unwraps_data() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/enquiries/E1"))
            .and(header("Authorization", "Bearer test-token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "message": "ok",
                "data": { "enquiry": { "id": "E1" } }
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = client(&mock_server, MockSessions::new(Some("test-token"), None));

        let value: Value = client.get("/enquiries/E1").await.unwrap().entity("enquiry").unwrap();
        assert_eq!(value, json!({ "id": "E1" }));
    }

    #[tokio::test]
    async fn request_without_session_is_sent_unauthenticated() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/dealerships"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true, "message": "", "data": []
            })))
            .mount(&mock_server)
            .await;

        let client = client(&mock_server, MockSessions::new(None, None));
        client.get("/dealerships").await.unwrap();

        let requests = mock_server.received_requests().await.unwrap();
        assert!(!requests[0].headers.contains_key("authorization"));
    }

    #[tokio::test]
    async fn query_omits_absent_fields() {
        #[derive(Serialize)]
        struct Filters {
            page: u32,
            #[serde(skip_serializing_if = "Option::is_none")]
            status: Option<String>,
        }

        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/bookings"))
            .and(query_param("page", "2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true, "message": "", "data": { "bookings": [] }
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = client(&mock_server, MockSessions::new(Some("t"), None));
        client.get_query("/bookings", &Filters { page: 2, status: None }).await.unwrap();

        let requests = mock_server.received_requests().await.unwrap();
        assert_eq!(requests[0].url.query(), Some("page=2"));
    }

    #[tokio::test]
    async fn envelope_failure_is_rejected_with_message() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/enquiries"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": false,
                "message": "Mobile number already exists",
                "data": { "id": "E9" }
            })))
            .mount(&mock_server)
            .await;

        let client = client(&mock_server, MockSessions::new(Some("t"), None));
        let err = client.post("/enquiries", &json!({ "name": "A" })).await.unwrap_err();

        assert!(matches!(err, ApiError::Rejected(ref m) if m == "Mobile number already exists"));
    }

    #[tokio::test]
    async fn error_status_uses_body_message() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/stock/S1"))
            .respond_with(
                ResponseTemplate::new(404).set_body_json(json!({ "message": "Vehicle not found" })),
            )
            .mount(&mock_server)
            .await;

        let client = client(&mock_server, MockSessions::new(Some("t"), None));
        let err = client.get("/stock/S1").await.unwrap_err();

        assert_eq!(err.status(), Some(404));
        assert_eq!(err.user_message(), "Vehicle not found");
    }

    #[tokio::test]
    async fn test_token_refresh_on_retry() {
        let mock_server = MockServer::start().await;

        // First call with old token fails
        Mock::given(method("GET"))
            .and(path("/data"))
            .and(header("Authorization", "Bearer old-token"))
            .respond_with(ResponseTemplate::new(401))
            .expect(1)
            .mount(&mock_server)
            .await;

        // Second call with new token succeeds
        Mock::given(method("GET"))
            .and(path("/data"))
            .and(header("Authorization", "Bearer new-token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true, "message": "", "data": { "message": "success" }
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let sessions = MockSessions::new(Some("old-token"), Some("new-token"));
        let client = client(&mock_server, sessions.clone());

        let value: Value = client.get("/data").await.unwrap().data().unwrap();
        assert_eq!(value, json!({ "message": "success" }));
        assert_eq!(sessions.refreshes.load(Ordering::SeqCst), 1);
        assert_eq!(sessions.clears.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn second_401_is_terminal() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/data"))
            .respond_with(ResponseTemplate::new(401))
            .expect(2)
            .mount(&mock_server)
            .await;

        let sessions = MockSessions::new(Some("old-token"), Some("new-token"));
        let client = client(&mock_server, sessions.clone());

        let err = client.get("/data").await.unwrap_err();
        assert_eq!(err.status(), Some(401));
        assert!(!err.is_session_expired());
        assert_eq!(sessions.refreshes.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn failed_refresh_clears_session() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/data"))
            .respond_with(ResponseTemplate::new(401))
            .expect(1)
            .mount(&mock_server)
            .await;

        let sessions = MockSessions::new(Some("old-token"), None);
        let client = client(&mock_server, sessions.clone());

        let err = client.get("/data").await.unwrap_err();
        assert!(err.is_session_expired());
        assert_eq!(sessions.clears.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn blob_bypasses_envelope() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/bookings/export/csv"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("Content-Type", "text/csv")
                    .insert_header("Content-Disposition", "attachment; filename=\"bookings.csv\"")
                    .set_body_bytes(b"id,status\nB1,PENDING\n".to_vec()),
            )
            .mount(&mock_server)
            .await;

        let client = client(&mock_server, MockSessions::new(Some("t"), None));
        let file = client.get_blob("/bookings/export/csv").await.unwrap();

        assert_eq!(file.content_type.as_deref(), Some("text/csv"));
        assert_eq!(file.file_name.as_deref(), Some("bookings.csv"));
        assert!(file.bytes.starts_with(b"id,status"));
    }

    #[test]
    fn disposition_prefers_encoded_name() {
        assert_eq!(
            file_name_from_disposition("attachment; filename=\"a.pdf\"; filename*=UTF-8''Quote%20Q1.pdf"),
            Some("Quote Q1.pdf".to_string())
        );
        assert_eq!(file_name_from_disposition("attachment"), None);
    }
}

use std::time::Duration;

use reqwest::{Client as ReqwestClient, Method, RequestBuilder, Response, StatusCode};
use tracing::debug;

use crate::api::errors::ApiError;

/// Decides whether a status counts as transport-level success
pub type StatusPredicate = fn(StatusCode) -> bool;

/// Default acceptance rule: any 2xx, plus 304 Not Modified.
pub fn default_accepts(status: StatusCode) -> bool {
    status.is_success() || status == StatusCode::NOT_MODIFIED
}

/// Single-attempt HTTP transport with a fixed timeout.
///
/// Failed requests are never retried here; the only replay in this crate is
/// the 401 refresh path in [`crate::api::ApiClient`].
#[derive(Clone)]
pub struct HttpClient {
    client: ReqwestClient,
    accepts: StatusPredicate,
}

impl HttpClient {
    /// Start building a new HTTP client.
    pub fn builder() -> HttpClientBuilder {
        HttpClientBuilder::default()
    }

    /// Convenience constructor with default configuration.
    pub fn new() -> Result<Self, ApiError> {
        Self::builder().build()
    }

    /// Whether `status` is a transport-level success for this client.
    pub fn accepts(&self, status: StatusCode) -> bool {
        (self.accepts)(status)
    }

    /// Create a request builder using the underlying reqwest client.
    pub fn request<U>(&self, method: Method, url: U) -> RequestBuilder
    where
        U: reqwest::IntoUrl,
    {
        self.client.request(method, url)
    }

    /// Execute the request once.
    ///
    /// Any response, whatever its status, is returned as `Ok`; only a
    /// failure to obtain a response is an error.
    pub async fn send(&self, builder: RequestBuilder) -> Result<Response, ApiError> {
        let request = builder.build().map_err(ApiError::from)?;

        let method = request.method().clone();
        let url = request.url().clone();
        debug!(%method, %url, "sending HTTP request");

        match self.client.execute(request).await {
            Ok(response) => {
                let status = response.status();
                debug!(%method, %url, %status, "received HTTP response");
                Ok(response)
            }
            Err(err) => {
                debug!(%method, %url, error = %err, "HTTP request failed");
                Err(ApiError::from(err))
            }
        }
    }
}

/// Builder for [`HttpClient`].
#[derive(Debug)]
pub struct HttpClientBuilder {
    timeout: Duration,
    accepts: StatusPredicate,
    user_agent: Option<String>,
}

impl Default for HttpClientBuilder {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(dealerdesk_domain::constants::DEFAULT_TIMEOUT_SECS),
            accepts: default_accepts,
            user_agent: None,
        }
    }
}

impl HttpClientBuilder {
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Override the transport-level success rule.
    pub fn accept_status(mut self, accepts: StatusPredicate) -> Self {
        self.accepts = accepts;
        self
    }

    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    pub fn build(self) -> Result<HttpClient, ApiError> {
        let mut builder = ReqwestClient::builder().timeout(self.timeout).no_proxy();

        if let Some(agent) = self.user_agent {
            builder = builder.user_agent(agent);
        }

        let client = builder
            .build()
            .map_err(|err| ApiError::Config(format!("Failed to build HTTP client: {err}")))?;

        Ok(HttpClient { client, accepts: self.accepts })
    }
}

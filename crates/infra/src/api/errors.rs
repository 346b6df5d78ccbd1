//! API-specific error types
//!
//! Every transport-level failure is normalized into [`ApiError`] with a
//! single human-readable message; `From<ApiError> for CrmError` lives in
//! `crate::errors::conversions`.

use std::time::Duration;

use dealerdesk_domain::constants::{MSG_NETWORK_ERROR, MSG_SESSION_EXPIRED};
use serde_json::Value;
use thiserror::Error;

/// Categories of API errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorCategory {
    /// 401 after the single retry, or an unrecoverable session
    Authentication,
    /// 403
    Authorization,
    /// 429
    RateLimit,
    /// 5xx
    Server,
    /// 4xx other than the above, or `success=false`
    Client,
    /// No response was received
    Network,
    /// Client misconfiguration or an undecodable response
    Config,
}

/// API operation errors
#[derive(Debug, Error)]
pub enum ApiError {
    /// No response was received
    #[error("{message}")]
    Network { message: String, detail: String },

    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    /// The token could not be refreshed and local session state was cleared
    #[error("{0}")]
    SessionExpired(String),

    /// Non-accepted HTTP status; `message` is already derived
    #[error("{message}")]
    Http { status: u16, message: String },

    /// Transport success but the envelope said `success=false`
    #[error("{0}")]
    Rejected(String),

    #[error("Failed to decode response: {0}")]
    Decode(String),

    #[error("Failed to build request: {0}")]
    Request(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl ApiError {
    /// Network failure carrying the fixed user-facing message
    pub fn network(detail: impl Into<String>) -> Self {
        Self::Network { message: MSG_NETWORK_ERROR.to_string(), detail: detail.into() }
    }

    pub fn session_expired() -> Self {
        Self::SessionExpired(MSG_SESSION_EXPIRED.to_string())
    }

    /// Build the error for a non-accepted response from its status and body
    pub fn from_response(status: u16, body: &str) -> Self {
        Self::Http { status, message: derive_message(status, body) }
    }

    /// Get the error category for this error
    pub fn category(&self) -> ApiErrorCategory {
        match self {
            Self::Network { .. } | Self::Timeout(_) => ApiErrorCategory::Network,
            Self::SessionExpired(_) => ApiErrorCategory::Authentication,
            Self::Http { status, .. } => match *status {
                401 => ApiErrorCategory::Authentication,
                403 => ApiErrorCategory::Authorization,
                429 => ApiErrorCategory::RateLimit,
                s if s >= 500 => ApiErrorCategory::Server,
                _ => ApiErrorCategory::Client,
            },
            Self::Rejected(_) => ApiErrorCategory::Client,
            Self::Decode(_) | Self::Request(_) | Self::Config(_) => ApiErrorCategory::Config,
        }
    }

    /// HTTP status, when a response was received
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_session_expired(&self) -> bool {
        matches!(self, Self::SessionExpired(_))
    }

    /// Message suitable for showing to the user as-is
    pub fn user_message(&self) -> String {
        match self {
            Self::Network { message, .. } => message.clone(),
            Self::Timeout(_) => MSG_NETWORK_ERROR.to_string(),
            Self::SessionExpired(message)
            | Self::Http { message, .. }
            | Self::Rejected(message) => message.clone(),
            Self::Decode(_) | Self::Request(_) | Self::Config(_) => {
                fallback_message(0).to_string()
            }
        }
    }
}

/// Static per-status message used when the body carries nothing better.
pub fn fallback_message(status: u16) -> &'static str {
    match status {
        400 => "Invalid request. Please check your input.",
        401 => "Authentication required. Please log in.",
        403 => "Access denied. You do not have permission to perform this action.",
        404 => "The requested resource was not found.",
        409 => "Conflict. The resource already exists or was modified.",
        422 => "Validation failed. Please check your input.",
        429 => "Too many requests. Please try again later.",
        500 => "Server error. Please try again later.",
        503 => "Service unavailable. Please try again later.",
        _ => "An unexpected error occurred.",
    }
}

/// Pick the most specific message a failed response offers.
///
/// Order: body `message`, body `error`, body `detail`, a raw string body,
/// then [`fallback_message`]. Blank strings are skipped; HTML error pages
/// are not treated as a raw message.
pub fn derive_message(status: u16, body: &str) -> String {
    let trimmed = body.trim();

    match serde_json::from_str::<Value>(trimmed) {
        Ok(Value::Object(map)) => {
            for key in ["message", "error", "detail"] {
                if let Some(text) = map.get(key).and_then(non_blank) {
                    return text.to_string();
                }
            }
        }
        Ok(Value::String(text)) if !text.trim().is_empty() => return text.trim().to_string(),
        Ok(_) => {}
        Err(_) if !trimmed.is_empty() && !trimmed.starts_with('<') => {
            return trimmed.to_string();
        }
        Err(_) => {}
    }

    fallback_message(status).to_string()
}

fn non_blank(value: &Value) -> Option<&str> {
    value.as_str().map(str::trim).filter(|s| !s.is_empty())
}

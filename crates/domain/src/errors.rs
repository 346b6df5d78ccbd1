//! Error types used throughout the application

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error taxonomy presented to UI-level callers.
///
/// Each category maps to one user-facing recovery path: network failures
/// offer a retry, auth failures route to sign-in, validation and
/// precondition failures show their message verbatim, and server failures
/// show a generic "try again later" notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// No response was received
    Network,
    /// Session missing, expired, or not permitted
    Auth,
    /// 4xx or `success=false` with a server-supplied message
    Validation,
    /// 5xx
    Server,
    /// Rejected before any network call
    Precondition,
    /// Configuration, storage, or decoding problems
    Internal,
}

/// Main error type for DealerDesk
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum CrmError {
    #[error("Network error: {0}")]
    Network(String),

    /// The session could not be refreshed; the caller should re-authenticate.
    #[error("Session expired: {0}")]
    SessionExpired(String),

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Server error: {0}")]
    Server(String),

    /// Client-side precondition (remark limit, empty reason, locked entity)
    #[error("{0}")]
    Precondition(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CrmError {
    /// Taxonomy bucket for this error
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Network(_) => ErrorCategory::Network,
            Self::SessionExpired(_) | Self::PermissionDenied(_) => ErrorCategory::Auth,
            Self::Validation(_) | Self::NotFound(_) => ErrorCategory::Validation,
            Self::Server(_) => ErrorCategory::Server,
            Self::Precondition(_) => ErrorCategory::Precondition,
            Self::Config(_) | Self::Storage(_) | Self::Internal(_) => ErrorCategory::Internal,
        }
    }

    /// The bare message without the variant prefix
    pub fn message(&self) -> &str {
        match self {
            Self::Network(m)
            | Self::SessionExpired(m)
            | Self::PermissionDenied(m)
            | Self::Validation(m)
            | Self::NotFound(m)
            | Self::Server(m)
            | Self::Precondition(m)
            | Self::Config(m)
            | Self::Storage(m)
            | Self::Internal(m) => m,
        }
    }

    /// Whether the UI should route to re-authentication
    pub fn requires_sign_in(&self) -> bool {
        matches!(self, Self::SessionExpired(_))
    }

    /// Whether a user-initiated retry is worth offering
    pub fn is_retryable(&self) -> bool {
        matches!(self.category(), ErrorCategory::Network | ErrorCategory::Server)
    }
}

/// Result type alias for DealerDesk operations
pub type Result<T> = std::result::Result<T, CrmError>;

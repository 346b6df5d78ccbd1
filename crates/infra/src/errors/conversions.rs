//! Conversions between infrastructure errors, [`ApiError`] and the domain
//! [`CrmError`].

use dealerdesk_domain::constants::MSG_SESSION_EXPIRED;
use dealerdesk_domain::CrmError;
use keyring::Error as KeyringError;
use reqwest::Error as HttpError;

use crate::api::errors::ApiError;

/* -------------------------------------------------------------------------- */
/* reqwest::Error → ApiError */
/* -------------------------------------------------------------------------- */

impl From<HttpError> for ApiError {
    fn from(err: HttpError) -> Self {
        if err.is_builder() {
            return Self::Request(err.to_string());
        }

        if err.is_decode() {
            return Self::Decode(err.to_string());
        }

        if err.is_timeout() {
            return Self::network(format!("HTTP request timed out: {err}"));
        }

        #[cfg(not(target_arch = "wasm32"))]
        if err.is_connect() {
            return Self::network(format!("HTTP connection failure: {err}"));
        }

        Self::network(err.to_string())
    }
}

/* -------------------------------------------------------------------------- */
/* ApiError → CrmError */
/* -------------------------------------------------------------------------- */

impl From<ApiError> for CrmError {
    fn from(err: ApiError) -> Self {
        let message = err.user_message();

        match err {
            ApiError::Network { .. } | ApiError::Timeout(_) => Self::Network(message),
            ApiError::SessionExpired(_) => Self::SessionExpired(message),
            ApiError::Http { status, .. } => match status {
                // Still 401 after the refresh-and-replay; only a fresh sign-in helps
                401 => Self::SessionExpired(message),
                403 => Self::PermissionDenied(message),
                404 => Self::NotFound(message),
                s if s >= 500 => Self::Server(message),
                _ => Self::Validation(message),
            },
            ApiError::Rejected(_) => Self::Validation(message),
            ApiError::Decode(detail) => Self::Internal(format!("Unexpected response: {detail}")),
            ApiError::Request(detail) => Self::Internal(detail),
            ApiError::Config(detail) => Self::Config(detail),
        }
    }
}

/* -------------------------------------------------------------------------- */
/* CrmError → ApiError (session provider failures inside a request) */
/* -------------------------------------------------------------------------- */

impl From<CrmError> for ApiError {
    fn from(err: CrmError) -> Self {
        match err {
            CrmError::Network(detail) => Self::network(detail),
            CrmError::SessionExpired(_) => Self::SessionExpired(MSG_SESSION_EXPIRED.to_string()),
            CrmError::Config(detail) => Self::Config(detail),
            other => Self::Request(other.to_string()),
        }
    }
}

/* -------------------------------------------------------------------------- */
/* keyring::Error → CrmError */
/* -------------------------------------------------------------------------- */

/// Map a keychain failure into the domain error.
///
/// `NoEntry` is handled by the callers (it means "nothing stored"), so it
/// only reaches here from unexpected paths.
pub fn keyring_error(err: KeyringError) -> CrmError {
    use KeyringError::{
        Ambiguous, BadEncoding, Invalid, NoEntry, NoStorageAccess, PlatformFailure, TooLong,
    };

    let description = err.to_string();

    match err {
        NoEntry => CrmError::NotFound("keychain entry not found".into()),
        BadEncoding(_) => CrmError::Storage("credential in keychain is not valid UTF-8".into()),
        TooLong(name, limit) => CrmError::Storage(format!(
            "keychain attribute '{name}' exceeds platform limit ({limit})"
        )),
        Invalid(attr, reason) => {
            CrmError::Storage(format!("keychain attribute '{attr}' is invalid: {reason}"))
        }
        Ambiguous(entries) => CrmError::Storage(format!(
            "multiple keychain entries matched request ({} results)",
            entries.len()
        )),
        PlatformFailure(err) => CrmError::Storage(format!("keychain platform error: {err}")),
        NoStorageAccess(err) => {
            CrmError::Storage(format!("unable to access secure storage: {err}"))
        }
        _ => CrmError::Storage(description),
    }
}

/* -------------------------------------------------------------------------- */
/* std::io::Error / serde_json::Error → CrmError */
/* -------------------------------------------------------------------------- */

pub fn io_error(err: std::io::Error, context: &str) -> CrmError {
    CrmError::Storage(format!("{context}: {err}"))
}

pub fn json_error(err: serde_json::Error, context: &str) -> CrmError {
    CrmError::Storage(format!("{context}: {err}"))
}

/* -------------------------------------------------------------------------- */
/* Tests */
/* -------------------------------------------------------------------------- */

//! Identity-provider token client
//!
//! Signs in with email/password against the provider's REST surface and
//! keeps the short-lived id token fresh using the long-lived refresh token.
//! The current [`SessionRecord`] lives in memory and is mirrored to a
//! [`SessionStore`] after every change.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Duration as ChronoDuration, Utc};
use dealerdesk_core::{SessionProvider, SessionStore};
use dealerdesk_domain::constants::{
    DEFAULT_TIMEOUT_SECS, MSG_SESSION_EXPIRED, TOKEN_REFRESH_SKEW_SECS,
};
use dealerdesk_domain::{
    CrmError, IdentityConfig, Result, Role, Session, SessionRecord, SessionUser, UserProfile,
};
use reqwest::header::ACCEPT;
use reqwest::{Method, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::{debug, info, instrument, warn};
use url::Url;

use crate::api::errors::ApiError;
use crate::http::HttpClient;

/// Lifetime assumed when the provider omits or garbles `expiresIn`
const FALLBACK_EXPIRES_IN_SECS: i64 = 3600;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SignInRequest<'a> {
    email: &'a str,
    password: &'a str,
    return_secure_token: bool,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SignInResponse {
    id_token: String,
    refresh_token: String,
    #[serde(default)]
    expires_in: Option<String>,
    local_id: String,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    display_name: Option<String>,
}

#[derive(Serialize)]
struct RefreshRequest<'a> {
    grant_type: &'static str,
    refresh_token: &'a str,
}

#[derive(Deserialize)]
struct RefreshResponse {
    id_token: String,
    refresh_token: String,
    #[serde(default)]
    expires_in: Option<String>,
    #[serde(default)]
    user_id: Option<String>,
}

#[derive(Deserialize)]
struct ProviderErrorBody {
    error: ProviderError,
}

#[derive(Deserialize)]
struct ProviderError {
    #[serde(default)]
    message: String,
}

/// [`SessionProvider`] backed by the identity provider's token endpoints
pub struct FirebaseTokenProvider {
    http: HttpClient,
    config: IdentityConfig,
    store: Arc<dyn SessionStore>,
    state: RwLock<Option<SessionRecord>>,
}

impl FirebaseTokenProvider {
    pub fn new(config: IdentityConfig, store: Arc<dyn SessionStore>) -> Result<Self> {
        let http = HttpClient::builder()
            .timeout(std::time::Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .map_err(CrmError::from)?;

        Ok(Self { http, config, store, state: RwLock::new(None) })
    }

    /// Load a previously persisted session into memory.
    ///
    /// The token is not validated here; an expired one is refreshed on first
    /// use.
    pub async fn restore(&self) -> Result<Option<Session>> {
        let record = self.store.load().await?;
        let session = record.as_ref().map(SessionRecord::session);

        if let Some(record) = &record {
            debug!(user_id = %record.user.id, "Session restored from store");
        }

        *self.state.write().await = record;
        Ok(session)
    }

    #[instrument(skip(self, password), fields(email = %email))]
    pub async fn sign_in_with_password(&self, email: &str, password: &str) -> Result<Session> {
        let url = self.endpoint(&self.config.sign_in_url)?;
        let body = SignInRequest { email, password, return_secure_token: true };

        let builder = self
            .http
            .request(Method::POST, url)
            .header(ACCEPT, "application/json")
            .json(&body);
        let response = self.http.send(builder).await.map_err(CrmError::from)?;

        let signed_in: SignInResponse = match read_json(response).await? {
            Ok(body) => body,
            Err(code) => return Err(sign_in_error(&code)),
        };

        let record = SessionRecord {
            id_token: signed_in.id_token,
            refresh_token: signed_in.refresh_token,
            expires_at: expiry_from(signed_in.expires_in.as_deref()),
            user: SessionUser {
                id: signed_in.local_id,
                name: signed_in.display_name.filter(|n| !n.trim().is_empty()),
                email: signed_in.email.or_else(|| Some(email.to_string())),
                role: Role::Unknown,
                dealership_id: None,
            },
        };

        let session = record.session();
        self.replace(record).await?;
        info!(user_id = %session.user_id, "Signed in");
        Ok(session)
    }

    /// The id token, refreshed first when `force` is set or when it is within
    /// the refresh skew of expiry. `Ok(None)` when nobody is signed in and
    /// no refresh was demanded.
    pub async fn bearer_token(&self, force: bool) -> Result<Option<String>> {
        {
            let state = self.state.read().await;
            match state.as_ref() {
                None if force => return Err(CrmError::SessionExpired(MSG_SESSION_EXPIRED.into())),
                None => return Ok(None),
                Some(record)
                    if !force && !record.expires_within(Utc::now(), TOKEN_REFRESH_SKEW_SECS) =>
                {
                    return Ok(Some(record.id_token.clone()));
                }
                Some(_) => {}
            }
        }

        self.refresh().await.map(Some)
    }

    /// Fill in the role and display details once `/auth/profile` resolves
    pub async fn attach_profile(&self, profile: &UserProfile) -> Result<()> {
        let record = {
            let mut state = self.state.write().await;
            let Some(record) = state.as_mut() else {
                return Err(CrmError::SessionExpired(MSG_SESSION_EXPIRED.into()));
            };

            if record.user.id != profile.id {
                warn!(
                    session_user = %record.user.id,
                    profile_user = %profile.id,
                    "Profile belongs to a different user than the session"
                );
            }

            record.user = SessionUser { id: record.user.id.clone(), ..profile.session_user() };
            record.clone()
        };

        self.store.save(&record).await?;
        debug!(user_id = %record.user.id, role = %record.user.role, "Profile attached to session");
        Ok(())
    }

    /// Forget the session in memory and in the store
    pub async fn sign_out(&self) -> Result<()> {
        self.state.write().await.take();
        self.store.clear().await?;
        info!("Signed out");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn refresh(&self) -> Result<String> {
        let (refresh_token, user_id) = {
            let state = self.state.read().await;
            match state.as_ref() {
                Some(record) => (record.refresh_token.clone(), record.user.id.clone()),
                None => return Err(CrmError::SessionExpired(MSG_SESSION_EXPIRED.into())),
            }
        };

        let url = self.endpoint(&self.config.token_url)?;
        let form = RefreshRequest { grant_type: "refresh_token", refresh_token: &refresh_token };
        let builder = self
            .http
            .request(Method::POST, url)
            .header(ACCEPT, "application/json")
            .form(&form);
        let response = self.http.send(builder).await.map_err(CrmError::from)?;

        let status = response.status();
        let refreshed: RefreshResponse = match read_json(response).await? {
            Ok(body) => body,
            Err(code) if status.is_server_error() => {
                warn!(status = status.as_u16(), code = %code, "Token endpoint unavailable");
                return Err(CrmError::Server(code));
            }
            Err(code) => {
                warn!(status = status.as_u16(), code = %code, "Token refresh rejected");
                return Err(CrmError::SessionExpired(MSG_SESSION_EXPIRED.into()));
            }
        };

        let token = refreshed.id_token.clone();
        let record = {
            let mut state = self.state.write().await;
            let Some(record) = state.as_mut() else {
                // Signed out while the refresh was in flight
                return Err(CrmError::SessionExpired(MSG_SESSION_EXPIRED.into()));
            };

            if refreshed.user_id.as_deref().is_some_and(|id| id != user_id) {
                warn!(user_id = %user_id, "Refresh response names a different user");
            }

            record.id_token = refreshed.id_token;
            record.refresh_token = refreshed.refresh_token;
            record.expires_at = expiry_from(refreshed.expires_in.as_deref());
            record.clone()
        };

        self.store.save(&record).await?;
        debug!(user_id = %record.user.id, expires_at = %record.expires_at, "Token refreshed");
        Ok(token)
    }

    async fn replace(&self, record: SessionRecord) -> Result<()> {
        self.store.save(&record).await?;
        *self.state.write().await = Some(record);
        Ok(())
    }

    fn endpoint(&self, base: &str) -> Result<Url> {
        if self.config.api_key.trim().is_empty() {
            return Err(CrmError::Config("Identity API key is not configured".into()));
        }

        let mut url = Url::parse(base)
            .map_err(|err| CrmError::Config(format!("Invalid identity endpoint '{base}': {err}")))?;
        url.query_pairs_mut().append_pair("key", &self.config.api_key);
        Ok(url)
    }
}

#[async_trait]
impl SessionProvider for FirebaseTokenProvider {
    async fn current_session(&self) -> Option<Session> {
        self.state.read().await.as_ref().map(SessionRecord::session)
    }

    async fn access_token(&self) -> Result<Option<String>> {
        self.bearer_token(false).await
    }

    async fn force_refresh(&self) -> Result<String> {
        self.bearer_token(true)
            .await?
            .ok_or_else(|| CrmError::SessionExpired(MSG_SESSION_EXPIRED.into()))
    }

    async fn clear_session(&self) -> Result<()> {
        self.sign_out().await
    }
}

/// Decode a success body, or return the provider's error code on failure
async fn read_json<T: DeserializeOwned>(response: Response) -> Result<std::result::Result<T, String>> {
    let status = response.status();
    let body = response.bytes().await.map_err(|err| CrmError::from(ApiError::from(err)))?;

    if status.is_success() {
        return serde_json::from_slice(&body)
            .map(Ok)
            .map_err(|err| CrmError::Internal(format!("Unexpected identity response: {err}")));
    }

    let code = serde_json::from_slice::<ProviderErrorBody>(&body)
        .map(|b| b.error.message)
        .ok()
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| status.canonical_reason().unwrap_or("UNKNOWN").to_string());
    Ok(Err(code))
}

/// Provider error codes may carry a trailing explanation (`CODE : detail`)
fn sign_in_error(code: &str) -> CrmError {
    let code = code.split(':').next().unwrap_or(code).trim();
    match code {
        "EMAIL_NOT_FOUND" | "INVALID_PASSWORD" | "INVALID_LOGIN_CREDENTIALS" | "INVALID_EMAIL" => {
            CrmError::Validation("Invalid email or password.".into())
        }
        "USER_DISABLED" => CrmError::PermissionDenied("This account has been disabled.".into()),
        "TOO_MANY_ATTEMPTS_TRY_LATER" => {
            CrmError::Validation("Too many failed attempts. Please try again later.".into())
        }
        other => CrmError::Validation(format!("Sign-in failed: {other}")),
    }
}

/// Absent, non-positive or out-of-range lifetimes fall back to an hour
fn expiry_from(expires_in: Option<&str>) -> chrono::DateTime<Utc> {
    let now = Utc::now();
    expires_in
        .and_then(|raw| raw.trim().parse::<i64>().ok())
        .filter(|secs| *secs > 0)
        .and_then(ChronoDuration::try_seconds)
        .and_then(|lifetime| now.checked_add_signed(lifetime))
        .unwrap_or_else(|| now + ChronoDuration::seconds(FALLBACK_EXPIRES_IN_SECS))
}

//! Port interfaces for session access
//!
//! The HTTP layer receives a [`SessionProvider`] at construction time
//! instead of reading an ambient current-user singleton.

use async_trait::async_trait;
use dealerdesk_domain::{Result, Session, SessionRecord};

/// Supplies bearer tokens for outbound requests
#[async_trait]
pub trait SessionProvider: Send + Sync {
    /// The signed-in user, if any
    async fn current_session(&self) -> Option<Session>;

    /// A usable bearer token, refreshing it first when it is close to
    /// expiry. `Ok(None)` means nobody is signed in.
    async fn access_token(&self) -> Result<Option<String>>;

    /// Refresh the token unconditionally.
    ///
    /// Returns `CrmError::SessionExpired` when there is no session to
    /// refresh.
    async fn force_refresh(&self) -> Result<String>;

    /// Drop the in-memory session and every locally persisted artifact
    async fn clear_session(&self) -> Result<()>;
}

/// Key-value persistence for the session token and minimal user record
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Load the persisted record; `None` if nothing is stored
    async fn load(&self) -> Result<Option<SessionRecord>>;

    /// Persist the record, replacing any previous one
    async fn save(&self, record: &SessionRecord) -> Result<()>;

    /// Remove the persisted record; succeeds if nothing was stored
    async fn clear(&self) -> Result<()>;
}

//! Session providers and local session stores

pub mod firebase;
pub mod store;

use async_trait::async_trait;
use dealerdesk_core::SessionProvider;
use dealerdesk_domain::constants::MSG_SESSION_EXPIRED;
use dealerdesk_domain::{CrmError, Result, Session};

pub use firebase::FirebaseTokenProvider;
pub use store::{build_session_store, FileSessionStore, KeychainSessionStore, MemorySessionStore};

/// Provider for callers that never sign in (health probes, public lookups)
#[derive(Debug, Clone, Copy, Default)]
pub struct AnonymousSessions;

#[async_trait]
impl SessionProvider for AnonymousSessions {
    async fn current_session(&self) -> Option<Session> {
        None
    }

    async fn access_token(&self) -> Result<Option<String>> {
        Ok(None)
    }

    async fn force_refresh(&self) -> Result<String> {
        Err(CrmError::SessionExpired(MSG_SESSION_EXPIRED.into()))
    }

    async fn clear_session(&self) -> Result<()> {
        Ok(())
    }
}

//! Local persistence for the session token and minimal user record
//!
//! Three backends implement [`SessionStore`]: process memory, a JSON file,
//! and the OS keychain. [`build_session_store`] picks one from
//! [`SessionConfig`].

use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use dealerdesk_core::SessionStore;
use dealerdesk_domain::{Result, SessionConfig, SessionRecord};
use keyring::Entry;
use tokio::sync::Mutex;
use tracing::debug;

use crate::errors::{io_error, json_error, keyring_error};

/// Build the store described by the configuration
pub fn build_session_store(config: &SessionConfig) -> Result<Arc<dyn SessionStore>> {
    let store: Arc<dyn SessionStore> = match config {
        SessionConfig::Memory => Arc::new(MemorySessionStore::default()),
        SessionConfig::File { path } => Arc::new(FileSessionStore::new(path)),
        SessionConfig::Keychain { service, account } => {
            Arc::new(KeychainSessionStore::new(service, account)?)
        }
    };
    debug!(backend = backend_name(config), "Session store selected");
    Ok(store)
}

/* -------------------------------------------------------------------------- */
/* Memory */
/* -------------------------------------------------------------------------- */

/// Nothing survives a restart
#[derive(Default)]
pub struct MemorySessionStore {
    record: Mutex<Option<SessionRecord>>,
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn load(&self) -> Result<Option<SessionRecord>> {
        Ok(self.record.lock().await.clone())
    }

    async fn save(&self, record: &SessionRecord) -> Result<()> {
        *self.record.lock().await = Some(record.clone());
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        self.record.lock().await.take();
        Ok(())
    }
}

/* -------------------------------------------------------------------------- */
/* File */
/* -------------------------------------------------------------------------- */

/// JSON file holding one [`SessionRecord`]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl SessionStore for FileSessionStore {
    async fn load(&self) -> Result<Option<SessionRecord>> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(io_error(err, "Failed to read session file")),
        };

        let record = serde_json::from_slice(&bytes)
            .map_err(|err| json_error(err, "Session file is corrupt"))?;
        Ok(Some(record))
    }

    async fn save(&self, record: &SessionRecord) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|err| io_error(err, "Failed to create session directory"))?;
        }

        let bytes = serde_json::to_vec_pretty(record)
            .map_err(|err| json_error(err, "Failed to serialize session"))?;
        tokio::fs::write(&self.path, bytes)
            .await
            .map_err(|err| io_error(err, "Failed to write session file"))?;

        debug!(path = %self.path.display(), "Session persisted");
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(io_error(err, "Failed to remove session file")),
        }
    }
}

/* -------------------------------------------------------------------------- */
/* Keychain */
/* -------------------------------------------------------------------------- */

/// Platform keychain entry holding the record as JSON
pub struct KeychainSessionStore {
    entry: Entry,
}

impl KeychainSessionStore {
    pub fn new(service: &str, account: &str) -> Result<Self> {
        let entry = Entry::new(service, account).map_err(keyring_error)?;
        Ok(Self { entry })
    }
}

#[async_trait]
impl SessionStore for KeychainSessionStore {
    async fn load(&self) -> Result<Option<SessionRecord>> {
        let secret = match self.entry.get_password() {
            Ok(secret) => secret,
            Err(keyring::Error::NoEntry) => return Ok(None),
            Err(err) => return Err(keyring_error(err)),
        };

        serde_json::from_str(&secret)
            .map(Some)
            .map_err(|err| json_error(err, "Keychain session is corrupt"))
    }

    async fn save(&self, record: &SessionRecord) -> Result<()> {
        let secret = serde_json::to_string(record)
            .map_err(|err| json_error(err, "Failed to serialize session"))?;
        self.entry.set_password(&secret).map_err(keyring_error)
    }

    async fn clear(&self) -> Result<()> {
        match self.entry.delete_credential() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(err) => Err(keyring_error(err)),
        }
    }
}

impl std::fmt::Debug for KeychainSessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeychainSessionStore").finish_non_exhaustive()
    }
}

fn backend_name(config: &SessionConfig) -> &'static str {
    match config {
        SessionConfig::Memory => "memory",
        SessionConfig::File { .. } => "file",
        SessionConfig::Keychain { .. } => "keychain",
    }
}

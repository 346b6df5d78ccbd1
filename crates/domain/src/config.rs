//! Configuration structures
//!
//! Loaded by `dealerdesk_infra::config` from environment variables or a
//! JSON/TOML file.

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_TIMEOUT_SECS;

/// Root configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    pub api: ApiConfig,
    #[serde(default)]
    pub identity: IdentityConfig,
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub environment: Environment,
}

/// Backend REST API settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL, e.g. `https://crm.example.com/api`
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self { base_url: "http://localhost:5000/api".to_string(), timeout_secs: DEFAULT_TIMEOUT_SECS }
    }
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

/// Identity provider (bearer token issuer) settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityConfig {
    /// Public web API key passed as `?key=`
    #[serde(default)]
    pub api_key: String,
    /// Token refresh endpoint (`grant_type=refresh_token`)
    #[serde(default = "default_token_url")]
    pub token_url: String,
    /// Email/password sign-in endpoint
    #[serde(default = "default_sign_in_url")]
    pub sign_in_url: String,
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            token_url: default_token_url(),
            sign_in_url: default_sign_in_url(),
        }
    }
}

fn default_token_url() -> String {
    "https://securetoken.googleapis.com/v1/token".to_string()
}

fn default_sign_in_url() -> String {
    "https://identitytoolkit.googleapis.com/v1/accounts:signInWithPassword".to_string()
}

/// Where locally cached session artifacts live
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SessionConfig {
    /// Nothing persisted across restarts
    #[default]
    Memory,
    /// JSON file at `path`
    File { path: String },
    /// OS keychain entry
    Keychain { service: String, account: String },
}

/// Tracing subscriber settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: default_log_level(), json: false }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Build environment; diagnostics are only emitted in development
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Environment {
    #[default]
    Development,
    Production,
}

impl Environment {
    pub fn is_production(self) -> bool {
        matches!(self, Self::Production)
    }
}

impl std::str::FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(Self::Development),
            "production" | "prod" => Ok(Self::Production),
            other => Err(format!("Invalid environment: {other}")),
        }
    }
}

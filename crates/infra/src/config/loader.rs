//! Configuration loader
//!
//! Loads application configuration from environment variables or files.
//!
//! ## Loading Strategy
//! 1. Reads a `.env` file into the process environment, if one exists
//! 2. Attempts to load from environment variables
//! 3. If `DEALERDESK_API_BASE_URL` is missing, falls back to a config file
//! 4. Probes multiple paths for config files (JSON or TOML)
//!
//! ## Environment Variables
//! - `DEALERDESK_API_BASE_URL`: Backend base URL (required)
//! - `DEALERDESK_API_TIMEOUT_SECS`: Request timeout in seconds
//! - `DEALERDESK_IDENTITY_API_KEY`: Identity provider web API key
//! - `DEALERDESK_IDENTITY_TOKEN_URL`: Token refresh endpoint override
//! - `DEALERDESK_IDENTITY_SIGN_IN_URL`: Password sign-in endpoint override
//! - `DEALERDESK_SESSION_PATH`: Persist the session to this JSON file
//! - `DEALERDESK_ENVIRONMENT`: `development` or `production`
//! - `DEALERDESK_LOG_LEVEL`: Default tracing level
//! - `DEALERDESK_LOG_JSON`: Emit JSON logs (true/false)
//!
//! ## File Locations
//! The loader probes the following paths (in order):
//! 1. `./dealerdesk.{json,toml}` or `./config.{json,toml}`
//! 2. The same names one and two directories up
//! 3. The same names next to the executable

use std::path::{Path, PathBuf};

use dealerdesk_domain::{
    ApiConfig, Config, CrmError, Environment, IdentityConfig, LoggingConfig, Result, SessionConfig,
};

const CONFIG_FILE_NAMES: [&str; 4] =
    ["dealerdesk.json", "dealerdesk.toml", "config.json", "config.toml"];

/// Load configuration with automatic fallback strategy
///
/// # Errors
/// Returns `CrmError::Config` if neither the environment nor any config file
/// yields a valid configuration.
pub fn load() -> Result<Config> {
    match dotenvy::dotenv() {
        Ok(path) => tracing::debug!(path = %path.display(), "Loaded .env file"),
        Err(err) if err.not_found() => {}
        Err(err) => tracing::warn!(error = %err, "Ignoring unreadable .env file"),
    }

    match load_from_env() {
        Ok(config) => {
            tracing::info!("Configuration loaded from environment variables");
            Ok(config)
        }
        Err(e) => {
            tracing::debug!(error = ?e, "Failed to load from environment, trying file");
            load_from_file(None)
        }
    }
}

/// Load configuration from environment variables
///
/// Only the base URL is required; everything else falls back to the
/// defaults in [`Config`].
///
/// # Errors
/// Returns `CrmError::Config` if the base URL is missing or a value is
/// malformed.
pub fn load_from_env() -> Result<Config> {
    let base_url = env_var("DEALERDESK_API_BASE_URL")?;
    let timeout_secs = match optional_env("DEALERDESK_API_TIMEOUT_SECS") {
        Some(raw) => raw
            .parse::<u64>()
            .map_err(|e| CrmError::Config(format!("Invalid API timeout: {e}")))?,
        None => ApiConfig::default().timeout_secs,
    };

    let defaults = IdentityConfig::default();
    let identity = IdentityConfig {
        api_key: optional_env("DEALERDESK_IDENTITY_API_KEY").unwrap_or_default(),
        token_url: optional_env("DEALERDESK_IDENTITY_TOKEN_URL").unwrap_or(defaults.token_url),
        sign_in_url: optional_env("DEALERDESK_IDENTITY_SIGN_IN_URL")
            .unwrap_or(defaults.sign_in_url),
    };

    let session = optional_env("DEALERDESK_SESSION_PATH")
        .map_or(SessionConfig::Memory, |path| SessionConfig::File { path });

    let environment = match optional_env("DEALERDESK_ENVIRONMENT") {
        Some(raw) => raw.parse::<Environment>().map_err(CrmError::Config)?,
        None => Environment::default(),
    };

    let logging = LoggingConfig {
        level: optional_env("DEALERDESK_LOG_LEVEL").unwrap_or_else(|| LoggingConfig::default().level),
        json: env_bool("DEALERDESK_LOG_JSON", false),
    };

    let config = Config {
        api: ApiConfig { base_url, timeout_secs },
        identity,
        session,
        logging,
        environment,
    };
    validate(&config)?;
    Ok(config)
}

/// Load configuration from a file
///
/// If `path` is `None`, probes the standard locations via
/// [`probe_config_paths`]. Format is chosen by extension.
///
/// # Errors
/// Returns `CrmError::Config` if the file is missing, unreadable or invalid.
pub fn load_from_file(path: Option<PathBuf>) -> Result<Config> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(CrmError::Config(format!("Config file not found: {}", p.display())));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            CrmError::Config("No config file found in any of the standard locations".to_string())
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| CrmError::Config(format!("Failed to read config file: {e}")))?;

    let config = parse_config(&contents, &config_path)?;
    validate(&config)?;
    Ok(config)
}

fn parse_config(contents: &str, path: &Path) -> Result<Config> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| CrmError::Config(format!("Invalid TOML format: {e}"))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| CrmError::Config(format!("Invalid JSON format: {e}"))),
        _ => Err(CrmError::Config(format!("Unsupported config format: {extension}"))),
    }
}

fn validate(config: &Config) -> Result<()> {
    url::Url::parse(&config.api.base_url).map_err(|e| {
        CrmError::Config(format!("Invalid API base URL '{}': {e}", config.api.base_url))
    })?;

    if config.api.timeout_secs == 0 {
        return Err(CrmError::Config("API timeout must be greater than zero".to_string()));
    }

    Ok(())
}

/// Probe multiple paths for configuration files
///
/// # Returns
/// The first config file found, or `None` if no file exists.
pub fn probe_config_paths() -> Option<PathBuf> {
    let mut roots = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        roots.extend([cwd.clone(), cwd.join(".."), cwd.join("../..")]);
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            roots.extend([exe_dir.to_path_buf(), exe_dir.join(".."), exe_dir.join("../..")]);
        }
    }

    roots
        .iter()
        .flat_map(|root| CONFIG_FILE_NAMES.iter().map(move |name| root.join(name)))
        .find(|path| path.exists())
}

fn env_var(key: &str) -> Result<String> {
    optional_env(key).ok_or_else(|| {
        CrmError::Config(format!("Missing required environment variable: {key}"))
    })
}

/// Set and non-blank
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

/// Accepts: `1`/`0`, `true`/`false`, `yes`/`no`, `on`/`off` (case-insensitive)
fn env_bool(key: &str, default: bool) -> bool {
    std::env::var(key)
        .ok()
        .map(|s| matches!(s.to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"))
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::sync::Mutex;

    use once_cell::sync::Lazy;
    use tempfile::NamedTempFile;

    use super::*;

    static ENV_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));

    const ALL_VARS: [&str; 9] = [
        "DEALERDESK_API_BASE_URL",
        "DEALERDESK_API_TIMEOUT_SECS",
        "DEALERDESK_IDENTITY_API_KEY",
        "DEALERDESK_IDENTITY_TOKEN_URL",
        "DEALERDESK_IDENTITY_SIGN_IN_URL",
        "DEALERDESK_SESSION_PATH",
        "DEALERDESK_ENVIRONMENT",
        "DEALERDESK_LOG_LEVEL",
        "DEALERDESK_LOG_JSON",
    ];

    fn clear_env() {
        for key in ALL_VARS {
            std::env::remove_var(key);
        }
    }

    fn temp_config(contents: &str, extension: &str) -> PathBuf {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(contents.as_bytes()).unwrap();
        let path = temp_file.path().with_extension(extension);
        std::fs::copy(temp_file.path(), &path).unwrap();
        path
    }

    #[test]
    fn env_bool_parsing() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");

        std::env::set_var("DD_TEST_BOOL_YES", "YES");
        std::env::set_var("DD_TEST_BOOL_OFF", "off");

        assert!(env_bool("DD_TEST_BOOL_YES", false));
        assert!(!env_bool("DD_TEST_BOOL_OFF", true));

        std::env::remove_var("DD_TEST_BOOL_MISSING");
        assert!(env_bool("DD_TEST_BOOL_MISSING", true));

        std::env::remove_var("DD_TEST_BOOL_YES");
        std::env::remove_var("DD_TEST_BOOL_OFF");
    }

    #[test]
    fn load_from_env_all_vars_set() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_env();

        std::env::set_var("DEALERDESK_API_BASE_URL", "https://crm.example.com/api");
        std::env::set_var("DEALERDESK_API_TIMEOUT_SECS", "12");
        std::env::set_var("DEALERDESK_IDENTITY_API_KEY", "web-key");
        std::env::set_var("DEALERDESK_SESSION_PATH", "/tmp/dealerdesk/session.json");
        std::env::set_var("DEALERDESK_ENVIRONMENT", "prod");
        std::env::set_var("DEALERDESK_LOG_LEVEL", "debug");
        std::env::set_var("DEALERDESK_LOG_JSON", "true");

        let config = load_from_env().unwrap();
        clear_env();

        assert_eq!(config.api.base_url, "https://crm.example.com/api");
        assert_eq!(config.api.timeout_secs, 12);
        assert_eq!(config.identity.api_key, "web-key");
        assert_eq!(config.identity.token_url, IdentityConfig::default().token_url);
        assert_eq!(
            config.session,
            SessionConfig::File { path: "/tmp/dealerdesk/session.json".into() }
        );
        assert!(config.environment.is_production());
        assert_eq!(config.logging.level, "debug");
        assert!(config.logging.json);
    }

    #[test]
    fn load_from_env_defaults() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_env();

        std::env::set_var("DEALERDESK_API_BASE_URL", "http://localhost:5000/api");
        let config = load_from_env().unwrap();
        clear_env();

        assert_eq!(config.api.timeout_secs, 30);
        assert_eq!(config.session, SessionConfig::Memory);
        assert_eq!(config.environment, Environment::Development);
        assert_eq!(config.logging, LoggingConfig::default());
    }

    #[test]
    fn load_from_env_missing_base_url() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_env();

        let err = load_from_env().unwrap_err();
        assert!(matches!(err, CrmError::Config(msg) if msg.contains("DEALERDESK_API_BASE_URL")));
    }

    #[test]
    fn load_from_env_invalid_values() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_env();

        std::env::set_var("DEALERDESK_API_BASE_URL", "http://localhost:5000/api");
        std::env::set_var("DEALERDESK_API_TIMEOUT_SECS", "soon");
        assert!(matches!(load_from_env(), Err(CrmError::Config(_))));

        std::env::set_var("DEALERDESK_API_TIMEOUT_SECS", "10");
        std::env::set_var("DEALERDESK_ENVIRONMENT", "staging");
        assert!(matches!(load_from_env(), Err(CrmError::Config(_))));

        std::env::remove_var("DEALERDESK_ENVIRONMENT");
        std::env::set_var("DEALERDESK_API_BASE_URL", "not a url");
        assert!(matches!(load_from_env(), Err(CrmError::Config(_))));

        clear_env();
    }

    #[test]
    fn load_from_file_json() {
        let path = temp_config(
            r#"{
                "api": { "base_url": "https://crm.example.com/api" },
                "identity": { "api_key": "web-key" },
                "session": { "kind": "keychain", "service": "dealerdesk", "account": "default" },
                "environment": "production"
            }"#,
            "json",
        );

        let config = load_from_file(Some(path.clone())).unwrap();
        std::fs::remove_file(path).ok();

        assert_eq!(config.api.timeout_secs, 30);
        assert_eq!(config.identity.api_key, "web-key");
        assert_eq!(
            config.session,
            SessionConfig::Keychain { service: "dealerdesk".into(), account: "default".into() }
        );
        assert!(config.environment.is_production());
    }

    #[test]
    fn load_from_file_toml() {
        let path = temp_config(
            r#"
environment = "development"

[api]
base_url = "http://10.0.2.2:5000/api"
timeout_secs = 45

[session]
kind = "file"
path = "session.json"

[logging]
level = "trace"
json = true
"#,
            "toml",
        );

        let config = load_from_file(Some(path.clone())).unwrap();
        std::fs::remove_file(path).ok();

        assert_eq!(config.api.timeout_secs, 45);
        assert_eq!(config.session, SessionConfig::File { path: "session.json".into() });
        assert_eq!(config.logging.level, "trace");
        assert!(config.logging.json);
    }

    #[test]
    fn load_from_file_not_found() {
        let err = load_from_file(Some(PathBuf::from("/nonexistent/dealerdesk.json"))).unwrap_err();
        assert!(matches!(err, CrmError::Config(_)));
    }

    #[test]
    fn load_from_file_invalid_json() {
        let path = temp_config(r#"{ "api": { "base_url": "#, "json");
        let result = load_from_file(Some(path.clone()));
        std::fs::remove_file(path).ok();

        assert!(matches!(result, Err(CrmError::Config(msg)) if msg.starts_with("Invalid JSON")));
    }

    #[test]
    fn parse_config_unsupported_format() {
        let result = parse_config("api: {}", &PathBuf::from("dealerdesk.yaml"));
        assert!(result.is_err());
    }
}

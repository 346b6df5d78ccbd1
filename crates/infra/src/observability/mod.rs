//! Tracing subscriber setup

use dealerdesk_domain::{CrmError, LoggingConfig, Result};
use tracing_subscriber::EnvFilter;

/// Install the global tracing subscriber.
///
/// `RUST_LOG` wins when set; otherwise the configured level applies to the
/// DealerDesk crates and everything else logs at `warn`.
///
/// # Errors
/// Returns `CrmError::Config` if the level is not a valid filter or a
/// subscriber is already installed.
pub fn init_tracing(config: &LoggingConfig) -> Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => default_filter(&config.level)?,
    };

    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_target(true);

    let installed = if config.json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };

    installed.map_err(|e| CrmError::Config(format!("Failed to install tracing subscriber: {e}")))
}

fn default_filter(level: &str) -> Result<EnvFilter> {
    let directives = format!(
        "dealerdesk_domain={level},dealerdesk_core={level},dealerdesk_infra={level},warn"
    );
    EnvFilter::try_new(directives)
        .map_err(|e| CrmError::Config(format!("Invalid log level '{level}': {e}")))
}

//! Logging setup
//!
//! Trellis logs through `tracing`. Applications that don't bring their own
//! subscriber can install a formatted one here; `RUST_LOG` overrides the
//! level picked from the configuration.

use tracing_subscriber::EnvFilter;

use crate::config::TrellisConfig;

/// Default filter directive for a configuration
pub fn default_directive(config: &TrellisConfig) -> &'static str {
    if config.debug {
        "debug"
    } else {
        "info"
    }
}

/// Install a global fmt subscriber.
///
/// Returns `false` if a global subscriber was already installed.
pub fn init(config: &TrellisConfig) -> bool {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(config)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init()
        .is_ok()
}

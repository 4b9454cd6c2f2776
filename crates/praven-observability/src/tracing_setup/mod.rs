//! Tracing initialization.

pub mod events;
pub mod spans;

use std::sync::Once;

use praven_core::config::ObservabilityConfig;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Environment variable holding the log filter, e.g. `PRAVEN_LOG=praven_geographic=debug,info`.
pub const LOG_ENV_VAR: &str = "PRAVEN_LOG";

static INIT: Once = Once::new();

/// Install the global subscriber.
///
/// `PRAVEN_LOG` wins over `config.log_level`. Idempotent: only the first
/// call installs anything, and an already-installed global subscriber is
/// left in place.
pub fn init_tracing(config: &ObservabilityConfig) {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
            .unwrap_or_else(|_| EnvFilter::new(&config.log_level));
        install(filter, config.json);
    });
}

/// Install the global subscriber with an explicit filter (for tests and embedding).
pub fn init_tracing_with_filter(filter: &str) {
    INIT.call_once(|| install(EnvFilter::new(filter), false));
}

fn install(filter: EnvFilter, json: bool) {
    let registry = tracing_subscriber::registry().with(filter);
    let result = if json {
        registry
            .with(
                fmt::layer()
                    .json()
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_current_span(true),
            )
            .try_init()
    } else {
        registry
            .with(fmt::layer().with_target(true).with_thread_ids(true))
            .try_init()
    };
    if result.is_err() {
        tracing::debug!("global subscriber already installed");
    }
}

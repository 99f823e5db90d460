//! Logging setup
//!
//! Diagnostics go through `tracing` to stderr; stdout belongs to the
//! console. The filter comes from `HBNB_LOG` when set, otherwise from the
//! configured level, otherwise `warn`.

use tracing_subscriber::EnvFilter;

/// Environment variable holding a `tracing` filter directive
pub const LOG_ENV: &str = "HBNB_LOG";

/// Level used when neither the environment nor the config sets one
pub const DEFAULT_LEVEL: &str = "warn";

/// Picks the filter directive: environment, then config, then default.
pub fn filter_directive(env_value: Option<String>, configured: Option<&str>) -> String {
    env_value
        .filter(|v| !v.trim().is_empty())
        .or_else(|| configured.map(str::to_string))
        .unwrap_or_else(|| DEFAULT_LEVEL.to_string())
}

/// Installs the global subscriber. Calling it twice is a no-op.
pub fn init(configured: Option<&str>) {
    let directive = filter_directive(std::env::var(LOG_ENV).ok(), configured);
    let filter = EnvFilter::try_new(&directive).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LEVEL));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

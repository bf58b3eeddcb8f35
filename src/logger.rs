//! Logging setup shared by the binaries.

use tracing_subscriber::EnvFilter;

/// Initialize the global tracing subscriber.
///
/// `RUST_LOG` takes precedence when set; otherwise the given crate name and
/// `tower_http` log at `default_level`.
pub fn setup_logger(crate_name: &str, default_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "{crate_name}={default_level},tower_http={default_level}"
        ))
    });

    tracing_subscriber::fmt().with_env_filter(filter).init();
}

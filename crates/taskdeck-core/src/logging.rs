//! Structured logging setup.
//!
//! All crates log through `tracing` macros. The binary installs a single
//! stderr subscriber at startup with [`init_subscriber`].

use tracing_subscriber::EnvFilter;

/// Default level for one-shot client commands.
pub const DEFAULT_CLIENT_LEVEL: &str = "warn";

/// Default level for the long-running server.
pub const DEFAULT_SERVER_LEVEL: &str = "info";

/// Initialize the global tracing subscriber with stderr output.
///
/// `RUST_LOG` wins over `level` when set. Call once at startup; later calls
/// are no-ops.
pub fn init_subscriber(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .compact();

    // try_init fails if a global subscriber is already installed
    let _ = subscriber.try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_subscriber_is_idempotent() {
        init_subscriber(DEFAULT_CLIENT_LEVEL);
        init_subscriber("debug");
    }

    #[test]
    fn default_levels_parse_as_filters() {
        assert!(EnvFilter::try_new(DEFAULT_CLIENT_LEVEL).is_ok());
        assert!(EnvFilter::try_new(DEFAULT_SERVER_LEVEL).is_ok());
    }
}

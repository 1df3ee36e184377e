//! Logging configuration for the sentiment service.

use log::info;
use tracing_subscriber::EnvFilter;

/// Initialize the logging system.
///
/// `FXSENTIMENT_LOG` (or `RUST_LOG`) wins over `level` when set, so operators can
/// raise verbosity for a single module without touching the config file.
pub fn init_logging(level: &str) {
    let filter = std::env::var("FXSENTIMENT_LOG")
        .or_else(|_| std::env::var("RUST_LOG"))
        .map(EnvFilter::new)
        .unwrap_or_else(|_| EnvFilter::new(level));

    // `log` records from the library are bridged through tracing-log.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init();

    info!("Logging initialized at level: {}", level);
}

/// Initialize test logging (for use in tests)
#[cfg(test)]
pub fn init_test_logging() {
    let _ = env_logger::builder()
        .is_test(true)
        .filter_level(log::LevelFilter::Debug)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use log::{debug, warn};

    #[test]
    fn test_logging() {
        // Visual check: run with `cargo test -- --nocapture`
        init_logging("debug");
        init_logging("info");
        warn!("This is a warning message");
    }

    #[test]
    fn test_test_logging() {
        init_test_logging();
        debug!("This debug message should only appear in test output with --nocapture");
    }
}

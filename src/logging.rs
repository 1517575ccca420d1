//! Diagnostic logging.
//!
//! Logging is off unless `DEPRECHECK_LOG` (or `RUST_LOG`) is set, and always
//! goes to stderr so stdout only carries the banner and warnings.
//!
//! ```bash
//! DEPRECHECK_LOG=debug deprecheck -s app.snapshot.json
//! ```

use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter.
pub const LOG_ENV: &str = "DEPRECHECK_LOG";

/// Initialise the global tracing subscriber.
pub fn init() {
    let filter = match std::env::var(LOG_ENV) {
        Ok(val) => EnvFilter::builder().parse_lossy(val),
        Err(_) if std::env::var("RUST_LOG").is_ok() => EnvFilter::from_default_env(),
        Err(_) => return,
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

//! Logging initialization
//!
//! Logs go to stderr; stdout carries command output only.

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Level used when neither `RUST_LOG` nor `--verbose` says otherwise
pub const DEFAULT_LEVEL: &str = "warn";

/// Install the stderr subscriber
///
/// `RUST_LOG` wins over `verbose`, which selects `debug`. Calling this twice
/// is harmless; the second call is ignored.
pub fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { DEFAULT_LEVEL };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .try_init();
}

//! Tracing initialization and configuration.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

static INIT: Once = Once::new();

/// Environment variable holding the log filter directive.
pub const LOG_ENV_VAR: &str = "SLPROB_LOG";

/// Initialize the slprob tracing/logging system.
///
/// Reads `SLPROB_LOG` for per-module log levels.
/// Format: `SLPROB_LOG=slprob_algebra::pipeline=debug,slprob_algebra::opinion=trace`
///
/// Falls back to `slprob=info` if `SLPROB_LOG` is not set or is invalid.
///
/// Safe to call more than once; only the first call installs a subscriber.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
            .unwrap_or_else(|_| EnvFilter::new("slprob=info"));

        // A host application may already own the global subscriber.
        let _ = tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_file(true)
                    .with_line_number(true),
            )
            .with(filter)
            .try_init();
    });
}

//! Diagnostic logging setup.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Environment variable holding a tracing filter, e.g. `storage_report=debug`
pub const LOG_ENV: &str = "STORAGE_REPORT_LOG";

static INIT: Once = Once::new();

/// Filter used when `STORAGE_REPORT_LOG` is unset or invalid
pub fn default_filter(verbose: bool) -> &'static str {
    if verbose {
        "storage_report=debug"
    } else {
        "warn"
    }
}

/// Initialize the tracing subscriber.
///
/// Output goes through the stderr buffer so log lines are held back while
/// the TUI owns the terminal. Safe to call more than once.
pub fn init_tracing(verbose: bool) {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env(LOG_ENV)
            .unwrap_or_else(|_| EnvFilter::new(default_filter(verbose)));

        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_ansi(false)
                    .with_writer(crate::stderr_buffer::Writer::default),
            )
            .with(filter)
            .init();
    });
}

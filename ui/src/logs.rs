//! Logging to the javascript console.

use tracing_subscriber::{EnvFilter, prelude::*};
use tracing_web::MakeWebConsoleWriter;

/// Default filter: state transitions from the hook and its controller.
pub const DEFAULT_FILTER: &str = "error,use_async=debug,async_state=debug";

/// Initialize console logging with [`DEFAULT_FILTER`].
pub fn init_logging() {
    init_logging_with(DEFAULT_FILTER);
}

/// Initialize console logging with a custom filter directive. Later calls
/// are ignored.
pub fn init_logging_with(filter: &str) {
    let env_filter = EnvFilter::new(filter);

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_line_number(true)
        .with_ansi(false) // Only partially supported across browsers
        .without_time() // std::time is not available in browsers
        .with_writer(MakeWebConsoleWriter::new().with_pretty_level())
        .with_level(false);

    if tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .is_ok()
    {
        tracing::info!("Initialized logs");
    }
}

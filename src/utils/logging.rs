use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter, Registry};

/// Initializes the global tracing subscriber. `RUST_LOG` controls the
/// filter; defaults to `info` for the dispatcher and `warn` elsewhere.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,dispatcher=info"));

    let fmt_layer = fmt::layer().with_target(true).with_line_number(false);

    Registry::default().with(filter).with(fmt_layer).init();
}

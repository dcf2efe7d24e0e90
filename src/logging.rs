//! Logging setup
//!
//! `RUST_LOG` takes precedence; otherwise the filter is built from the
//! configured level (raised to `debug` in debug mode). Log lines go to
//! stderr so that command output on stdout stays machine-readable.

use tracing::Dispatch;
use tracing_subscriber::{fmt::MakeWriter, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::LoggingConfig;

/// Default filter directive for a level
pub fn default_filter(level: &str, debug: bool) -> String {
    let level = if debug { "debug" } else { level };
    format!("wildfire_dashboard={},tower_http={}", level, level)
}

/// Build a subscriber writing formatted events to `writer`
pub fn subscriber<W>(config: &LoggingConfig, debug: bool, writer: W) -> Dispatch
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_filter(&config.level, debug).into());

    let registry = tracing_subscriber::registry().with(filter);

    if config.format.eq_ignore_ascii_case("json") {
        let layer = tracing_subscriber::fmt::layer().json().with_writer(writer);
        Dispatch::new(registry.with(layer))
    } else {
        let layer = tracing_subscriber::fmt::layer().with_writer(writer);
        Dispatch::new(registry.with(layer))
    }
}

/// Install the global tracing subscriber, logging to stderr
pub fn init(config: &LoggingConfig, debug: bool) {
    subscriber(config, debug, std::io::stderr).init();
}

//! Tracing setup with a reloadable filter, so the shell can change the log
//! level while running.

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Registry, fmt, reload};

/// Handle for swapping the active filter at runtime.
pub type LogHandle = reload::Handle<EnvFilter, Registry>;

/// Filter directive for a `-v` count.
pub fn verbosity_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Install the global subscriber. `RUST_LOG` wins over `-v`.
pub fn init(verbosity: u8) -> LogHandle {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(verbosity_directive(verbosity)));
    let (filter, handle) = reload::Layer::new(filter);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .init();

    handle
}

/// Replace the active filter with `directive` (e.g. `debug`).
pub fn set_level(handle: &LogHandle, directive: &str) -> Result<(), reload::Error> {
    handle.reload(EnvFilter::new(directive))
}

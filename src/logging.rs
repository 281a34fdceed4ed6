//! Diagnostic logging through `tracing`.
//!
//! Progress lines that are part of the tool's output go to stdout with
//! `println!`; everything here goes to stderr and is silent below `warn`
//! unless `RUST_LOG` asks for more. Clinical values are never logged.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

pub const DEFAULT_FILTER: &str = "warn";

fn build_env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

pub fn init_logging() {
    let layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact();

    // A second initialization (tests, embedding) keeps the first subscriber.
    let _ = tracing_subscriber::registry()
        .with(build_env_filter())
        .with(layer)
        .try_init();
}

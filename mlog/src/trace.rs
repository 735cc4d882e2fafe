//! Diagnostic tracing.
//!
//! Console records go to stdout through [`crate::logger`]. Diagnostics about the logger itself
//! and the tools built on it go through `tracing` to stderr so the two never mix.

use tracing::Level;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize the tracing library, filtered by `RUST_LOG` and defaulting to `warn`.
pub fn initialize() {
    let env_filter = EnvFilter::builder()
        .with_default_directive(Level::WARN.into())
        .from_env_lossy();

    let registry = tracing_subscriber::registry().with(env_filter).with(
        fmt::Layer::new()
            .compact()
            .without_time()
            .with_line_number(true)
            .with_writer(std::io::stderr),
    );

    if let Err(err) = registry.try_init() {
        eprintln!("setting tracing default failed: {err}");
    }
}

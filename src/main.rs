//! nerdbar — sysfs-backed status widgets for i3bar/swaybar-compatible panels.
//!
//! Run with:  `RUST_LOG=info nerdbar`

use anyhow::Result;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Structured logging on stderr; stdout carries the status protocol.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    tracing::info!("nerdbar v{} starting", env!("CARGO_PKG_VERSION"));

    nerdbar_host::run().map_err(Into::into)
}

//! Logging setup utilities shared by the server and client binaries.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Crates enabled by the default filter.
const WORKSPACE_CRATES: [&str; 3] = [
    "flashtrack_shared",
    "flashtrack_server",
    "flashtrack_client",
];

/// Initialize the tracing subscriber with the specified default log level.
///
/// The default filter covers the workspace crates and the calling binary;
/// `RUST_LOG` overrides it entirely.
///
/// # Arguments
///
/// * `binary_name` - The name of the binary (e.g., "flashtrack-server")
/// * `default_level` - The default log level (e.g., "debug", "info")
pub fn setup_logger(binary_name: &str, default_level: &str) {
    let default_filter = WORKSPACE_CRATES
        .iter()
        .copied()
        .map(str::to_string)
        .chain(std::iter::once(binary_name.replace('-', "_")))
        .map(|target| format!("{target}={default_level}"))
        .collect::<Vec<_>>()
        .join(",");

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

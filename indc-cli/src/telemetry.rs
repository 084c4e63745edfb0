use anyhow::{anyhow, Result};
use tracing_subscriber::EnvFilter;

/// Filter used before the configured level is known.
const BOOTSTRAP_LEVEL: &str = "warn";

/// Installs the global subscriber, writing to stderr.
///
/// `RUST_LOG` wins over `level` when it is set.
pub fn init_tracing(level: &str, json: bool) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .map_err(|err| anyhow!("invalid log level '{level}': {err}"))?;
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);
    let installed = if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    installed.map_err(|err| anyhow!("failed to install tracing subscriber: {err}"))
}

/// Runs `f` with a temporary stderr subscriber driven by `RUST_LOG`.
///
/// Covers the configuration load, which happens before the configured level
/// is known and the global subscriber is installed.
pub fn with_bootstrap_logging<T>(json: bool, f: impl FnOnce() -> T) -> T {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(BOOTSTRAP_LEVEL));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);
    if json {
        tracing::subscriber::with_default(builder.json().finish(), f)
    } else {
        tracing::subscriber::with_default(builder.finish(), f)
    }
}

use anyhow::{Context, Result};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Attach the kernel's metrics to a host-owned Prometheus registry.
pub fn register_metrics(registry: &prometheus::Registry) {
    spotlight_registry::metrics::register_metrics(registry);
}

/// Install a process-wide tracing subscriber for embedders that do not bring
/// their own. `RUST_LOG` wins over the supplied level.
pub fn init_logging(level: &str) -> Result<()> {
    let level: tracing::Level = level.parse().context("invalid log level")?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level.to_string())),
        )
        .with(tracing_subscriber::fmt::layer())
        .try_init()
        .context("tracing subscriber already installed")?;

    Ok(())
}

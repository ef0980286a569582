//! Subscriber construction.
//!
//! Builds a `Dispatch` the host hands to the router instead of installing a
//! process-wide subscriber. `init_global` exists for binaries that want one.

use tracing::Dispatch;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::{layer::SubscriberExt, EnvFilter, Layer};

use crate::{TelemetryConfig, TelemetryError};

/// Builds a dispatch writing to stdout.
pub fn build_dispatch(config: &TelemetryConfig) -> Result<Dispatch, TelemetryError> {
    build_dispatch_with_writer(config, std::io::stdout)
}

/// Builds a dispatch writing to `writer`.
pub fn build_dispatch_with_writer<W>(
    config: &TelemetryConfig,
    writer: W,
) -> Result<Dispatch, TelemetryError>
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let env_filter = EnvFilter::try_new(&config.log_level)
        .map_err(|e| TelemetryError::Filter(e.to_string()))?;

    let fmt_layer = if config.json_logs {
        // JSON output for log shipping
        tracing_subscriber::fmt::layer()
            .json()
            .with_target(true)
            .with_current_span(true)
            .with_writer(writer)
            .boxed()
    } else {
        tracing_subscriber::fmt::layer()
            .with_target(true)
            .with_ansi(config.ansi)
            .with_writer(writer)
            .boxed()
    };

    let subscriber = tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer);

    Ok(Dispatch::new(subscriber))
}

/// Installs `config` as the process-wide default subscriber.
pub fn init_global(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    let dispatch = build_dispatch(config)?;
    tracing::dispatcher::set_global_default(dispatch)
        .map_err(|e| TelemetryError::AlreadyInstalled(e.to_string()))?;

    tracing::info!(
        service = %config.service_name,
        log_level = %config.log_level,
        json = config.json_logs,
        "Tracing initialized"
    );
    Ok(())
}

/// Dispatch that drops every span and event.
#[must_use]
pub fn noop_dispatch() -> Dispatch {
    Dispatch::none()
}

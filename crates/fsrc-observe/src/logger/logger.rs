use tracing_subscriber::{Layer, Registry, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::logger::{
    config::LoggerConfig,
    error::{LoggerError, LoggerResult},
    object::{LoggerFormat, LoggerRfc3339},
};

type OutputLayer = Box<dyn Layer<Registry> + Send + Sync + 'static>;

/// Install the global subscriber: one output layer under the level filter.
pub(crate) fn install(cfg: &LoggerConfig) -> LoggerResult<()> {
    let timer = LoggerRfc3339::new(cfg.tz);
    let output: OutputLayer = match cfg.format {
        LoggerFormat::Text => fmt::layer()
            .with_ansi(cfg.use_color())
            .with_target(false)
            .with_timer(timer)
            .boxed(),
        LoggerFormat::Json => fmt::layer().json().with_timer(timer).boxed(),
        LoggerFormat::Journald => journald_layer()?,
    };

    tracing_subscriber::registry()
        .with(output)
        .with(cfg.level.to_env_filter())
        .try_init()
        .map_err(|_| LoggerError::AlreadyInitialized)
}

#[cfg(target_os = "linux")]
fn journald_layer() -> LoggerResult<OutputLayer> {
    let layer =
        tracing_journald::layer().map_err(|e| LoggerError::JournaldInitFailed(e.to_string()))?;
    Ok(layer.boxed())
}

#[cfg(not(target_os = "linux"))]
fn journald_layer() -> LoggerResult<OutputLayer> {
    Err(LoggerError::JournaldNotSupported)
}

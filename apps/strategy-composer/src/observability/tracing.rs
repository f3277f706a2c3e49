//! Structured logging setup.
//!
//! Hosts call [`init_tracing`] once at startup; the library itself only
//! emits `tracing` events and never installs a subscriber.
//!
//! # Example
//!
//! ```ignore
//! use strategy_composer::config::LoggingConfig;
//! use strategy_composer::observability::init_tracing;
//!
//! init_tracing(&LoggingConfig::default()).expect("Failed to initialize tracing");
//! ```

use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::config::{LogFormat, LoggingConfig};

/// Error type for tracing operations.
#[derive(Debug, thiserror::Error)]
pub enum TracingError {
    /// The level directive could not be parsed.
    #[error("invalid log filter '{directive}': {message}")]
    InvalidFilter {
        /// Offending directive.
        directive: String,
        /// Parser message.
        message: String,
    },
    /// Failed to initialize tracing subscriber.
    #[error("failed to initialize tracing subscriber: {0}")]
    SubscriberError(String),
}

/// Build the event filter: `RUST_LOG` when set, otherwise `config.level`.
pub fn env_filter(config: &LoggingConfig) -> Result<EnvFilter, TracingError> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }
    EnvFilter::try_new(&config.level).map_err(|e| TracingError::InvalidFilter {
        directive: config.level.clone(),
        message: e.to_string(),
    })
}

/// Install the global subscriber.
///
/// This sets up:
/// - an `EnvFilter` from `RUST_LOG` or the configured level
/// - a `fmt` layer in JSON or pretty format
///
/// # Errors
///
/// Returns an error if the filter is invalid or a global subscriber is
/// already installed.
pub fn init_tracing(config: &LoggingConfig) -> Result<(), TracingError> {
    let filter = env_filter(config)?;
    let registry = tracing_subscriber::registry().with(filter);

    let result = match config.format {
        LogFormat::Json => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_current_span(config.include_spans)
                    .with_span_list(config.include_spans),
            )
            .try_init(),
        LogFormat::Pretty => registry
            .with(tracing_subscriber::fmt::layer().pretty())
            .try_init(),
    };
    result.map_err(|e| TracingError::SubscriberError(e.to_string()))?;

    tracing::debug!(
        level = %config.level,
        format = ?config.format,
        "Tracing initialized"
    );
    Ok(())
}

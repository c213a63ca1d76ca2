#![forbid(unsafe_code)]

//! Logging setup.
//!
//! Library code only emits `tracing` events. Binaries and test drivers that
//! want to see them install a subscriber with [`init`], available when the
//! `tracing-json` feature is enabled. `RUST_LOG` takes precedence over
//! [`LogConfig::default_filter`].

use std::fmt;

/// Output format of the installed subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable, multi-field lines.
    #[default]
    Pretty,
    /// One JSON object per event.
    Json,
}

/// Subscriber configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    pub format: LogFormat,
    /// Filter directive used when `RUST_LOG` is unset, e.g. `"folio=debug"`.
    pub default_filter: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            format: LogFormat::Pretty,
            default_filter: "info".to_owned(),
        }
    }
}

impl LogConfig {
    #[must_use]
    pub fn json() -> Self {
        Self {
            format: LogFormat::Json,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.default_filter = filter.into();
        self
    }
}

/// A global subscriber could not be installed.
#[derive(Debug)]
pub struct LogInitError(String);

impl fmt::Display for LogInitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to install tracing subscriber: {}", self.0)
    }
}

impl std::error::Error for LogInitError {}

/// Install the global `tracing` subscriber.
///
/// Fails instead of panicking when a subscriber is already installed, so
/// tests can call it repeatedly.
#[cfg(feature = "tracing-json")]
pub fn init(config: &LogConfig) -> Result<(), LogInitError> {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.default_filter))
        .map_err(|e| LogInitError(e.to_string()))?;

    let result = match config.format {
        LogFormat::Pretty => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .try_init(),
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_current_span(false)
            .try_init(),
    };
    result.map_err(|e| LogInitError(e.to_string()))
}

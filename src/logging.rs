use std::fmt;

use serde::{Deserialize, Serialize};
use tracing_subscriber::{fmt as tfmt, prelude::*, EnvFilter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl Default for LogLevel {
    fn default() -> Self {
        LogLevel::Warn
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogLevel::Trace => write!(f, "trace"),
            LogLevel::Debug => write!(f, "debug"),
            LogLevel::Info => write!(f, "info"),
            LogLevel::Warn => write!(f, "warn"),
            LogLevel::Error => write!(f, "error"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Json,
    Pretty,
    Compact,
}

impl Default for LogFormat {
    fn default() -> Self {
        LogFormat::Compact
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    pub level: LogLevel,
    pub format: LogFormat,
    // Directive string such as "farfield_lib=trace"; overrides `level` when it parses.
    pub filter: Option<String>,
}

impl LogConfig {
    pub fn verbose() -> Self {
        LogConfig {
            level: LogLevel::Debug,
            ..Default::default()
        }
    }
}

// Installs the global subscriber, writing to stderr so stdout stays free for data.
// RUST_LOG wins over the configured level when no explicit filter is given.
// Only the first call has any effect.
pub fn init_logging(config: &LogConfig) {
    let filter = match config.filter {
        Some(ref custom) => {
            EnvFilter::try_new(custom).unwrap_or_else(|_| EnvFilter::new(config.level.to_string()))
        }
        None => EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(config.level.to_string())),
    };

    let registry = tracing_subscriber::registry().with(filter);
    let result = match config.format {
        LogFormat::Json => registry
            .with(tfmt::layer().json().with_writer(std::io::stderr))
            .try_init(),
        LogFormat::Pretty => registry
            .with(tfmt::layer().pretty().with_writer(std::io::stderr))
            .try_init(),
        LogFormat::Compact => registry
            .with(tfmt::layer().compact().with_writer(std::io::stderr))
            .try_init(),
    };

    // Already initialised
    let _ = result;
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn level_display() {
        assert_eq!(LogLevel::Debug.to_string(), "debug");
        assert_eq!(LogLevel::Warn.to_string(), "warn");
    }

    #[test]
    fn config_from_json() {
        let config: LogConfig = serde_json::from_str(r#"{"level":"trace"}"#).unwrap();
        assert_eq!(config.level, LogLevel::Trace);
        assert_eq!(config.format, LogFormat::Compact);
        assert!(config.filter.is_none());
    }

    #[test]
    fn init_twice_is_harmless() {
        init_logging(&LogConfig::verbose());
        init_logging(&LogConfig::default());
        tracing::debug!("logging initialised");
    }
}

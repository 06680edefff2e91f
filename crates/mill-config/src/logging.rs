//! Centralized logging initialization with environment variable support

use crate::{LogFormat, LoggingConfig};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize tracing subscriber with environment variable support
///
/// Environment variables (in priority order):
/// - `RUST_LOG`: Standard Rust log filter (takes precedence over all)
/// - `LOG_FORMAT`: Override format (json, pretty)
///
/// # Examples
///
/// ```bash
/// # Trace every resolution decision
/// RUST_LOG=mill_dequalify=trace dequalify --dry-run
///
/// # CI with JSON logs
/// LOG_FORMAT=json dequalify --check
/// ```
pub fn initialize(config: &LoggingConfig) {
    let log_level: tracing::Level = config.level.parse().unwrap_or(tracing::Level::INFO);

    // RUST_LOG takes precedence over config
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level.as_str()));

    let format = format_override(std::env::var("LOG_FORMAT").ok().as_deref())
        .unwrap_or_else(|| config.format.clone());

    // Always write to stderr; stdout carries the per-file report
    match format {
        LogFormat::Json => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().json().with_writer(std::io::stderr))
                .init();
        }
        LogFormat::Pretty => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().pretty().with_writer(std::io::stderr))
                .init();
        }
    }
}

fn format_override(value: Option<&str>) -> Option<LogFormat> {
    match value?.to_lowercase().as_str() {
        "json" => Some(LogFormat::Json),
        "pretty" | "human" => Some(LogFormat::Pretty),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_override() {
        assert_eq!(format_override(Some("JSON")), Some(LogFormat::Json));
        assert_eq!(format_override(Some("human")), Some(LogFormat::Pretty));
        assert_eq!(format_override(Some("xml")), None);
        assert_eq!(format_override(None), None);
    }
}

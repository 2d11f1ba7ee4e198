//! Tracing setup for the service binary. `RUST_LOG` always wins over the
//! configured level so operators can raise verbosity without touching
//! config.

use crate::config::TelemetryConfig;
use tracing_subscriber::filter::ParseError;
use tracing_subscriber::EnvFilter;

#[derive(Debug, thiserror::Error)]
pub enum TelemetryError {
    #[error("invalid log filter '{value}'")]
    Filter { value: String, source: ParseError },
    #[error("tracing subscriber install failed: {0}")]
    Install(Box<dyn std::error::Error + Send + Sync>),
}

/// Install the global subscriber: compact single-line format, no ANSI, no
/// target column.
pub fn init(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => configured_filter(config)?,
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .with_ansi(false)
        .try_init()
        .map_err(TelemetryError::Install)
}

fn configured_filter(config: &TelemetryConfig) -> Result<EnvFilter, TelemetryError> {
    EnvFilter::try_new(&config.log_level).map_err(|source| TelemetryError::Filter {
        value: config.log_level.clone(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_and_directive_filters_build() {
        let plain = TelemetryConfig {
            log_level: "debug".to_string(),
        };
        assert!(configured_filter(&plain).is_ok());

        let scoped = TelemetryConfig {
            log_level: "info,groundgame=trace".to_string(),
        };
        assert!(configured_filter(&scoped).is_ok());
    }

    #[test]
    fn malformed_filter_reports_the_offending_value() {
        let bad = TelemetryConfig {
            log_level: "info=debug=trace".to_string(),
        };
        match configured_filter(&bad) {
            Err(TelemetryError::Filter { value, .. }) => {
                assert_eq!(value, "info=debug=trace");
            }
            other => panic!("expected a filter error, got {other:?}"),
        }
    }
}

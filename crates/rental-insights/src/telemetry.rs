use crate::config::TelemetryConfig;
use tracing_subscriber::filter::ParseError;
use tracing_subscriber::EnvFilter;

/// Failure while installing the log subscriber.
#[derive(Debug, thiserror::Error)]
pub enum TelemetryError {
    #[error("log filter '{value}' is not a valid level or directive list")]
    LogFilter {
        value: String,
        #[source]
        source: ParseError,
    },
    #[error("log subscriber could not be installed: {0}")]
    Subscriber(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Installs the global subscriber. Logs go to stderr; stdout is reserved for results.
pub fn init(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    let env_filter = build_filter(config)?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .with_ansi(false)
        .try_init()
        .map_err(TelemetryError::Subscriber)
}

fn build_filter(config: &TelemetryConfig) -> Result<EnvFilter, TelemetryError> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => EnvFilter::try_new(&config.log_level).map_err(|source| {
            TelemetryError::LogFilter {
                value: config.log_level.clone(),
                source,
            }
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configured_level_builds_filter() {
        let config = TelemetryConfig {
            log_level: "rental_insights=debug,warn".to_string(),
        };
        assert!(build_filter(&config).is_ok());
    }

    #[test]
    fn errors_name_the_failing_piece_and_keep_their_source() {
        use std::error::Error as _;

        let parse_error = EnvFilter::try_new("rental_insights=loud")
            .expect_err("unknown level is rejected");
        let error = TelemetryError::LogFilter {
            value: "rental_insights=loud".to_string(),
            source: parse_error,
        };
        assert_eq!(
            error.to_string(),
            "log filter 'rental_insights=loud' is not a valid level or directive list"
        );
        assert!(error.source().is_some());

        let installed = std::io::Error::new(std::io::ErrorKind::Other, "already set");
        let error = TelemetryError::Subscriber(Box::new(installed));
        assert_eq!(
            error.to_string(),
            "log subscriber could not be installed: already set"
        );
        assert_eq!(error.source().map(ToString::to_string).as_deref(), Some("already set"));
    }
}

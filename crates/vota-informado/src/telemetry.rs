//! Log setup for the `vota` tool. Output goes to stderr so that reports and
//! JSON on stdout stay clean.

use crate::config::TelemetryConfig;
use tracing_subscriber::filter::{Directive, ParseError};
use tracing_subscriber::EnvFilter;

/// HTTP stack crates that only speak up on warnings unless `RUST_LOG` says otherwise.
const QUIET_DEPENDENCIES: [&str; 3] = ["hyper=warn", "reqwest=warn", "rustls=warn"];

#[derive(Debug, thiserror::Error)]
pub enum TelemetryError {
    #[error("invalid log filter '{value}'")]
    Filter {
        value: String,
        #[source]
        source: ParseError,
    },
    #[error("failed to install log subscriber: {0}")]
    Subscriber(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Filter from the configured level with the HTTP stack quietened.
pub fn level_filter(log_level: &str) -> Result<EnvFilter, TelemetryError> {
    let invalid = |source: ParseError| TelemetryError::Filter {
        value: log_level.to_string(),
        source,
    };

    let mut filter = EnvFilter::try_new(log_level).map_err(invalid)?;
    for raw in QUIET_DEPENDENCIES {
        let directive: Directive = raw.parse().map_err(invalid)?;
        filter = filter.add_directive(directive);
    }
    Ok(filter)
}

/// `RUST_LOG` wins over the configured level when it parses.
pub fn init(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => level_filter(&config.log_level)?,
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_ansi(false)
        .compact()
        .try_init()
        .map_err(TelemetryError::Subscriber)
}

//! Core error types for Market Pulse.
//!
//! Per-symbol failures are not errors at this level: they are recorded as
//! omissions in a batch report and the symbol is left out of the snapshot.
//! Only a total upstream outage or a bad configuration surfaces here.

use thiserror::Error;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the aggregation engine.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Aggregation failed: {0}")]
    Aggregation(#[from] AggregationError),

    #[error("Market data unavailable: {0}")]
    DataUnavailable(String),

    #[error("Invalid configuration value: {0}")]
    InvalidConfigValue(String),
}

/// Errors raised by a full aggregation or live-quote pass.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AggregationError {
    /// No index and no watchlist symbol could be resolved.
    #[error("No symbols resolved ({omitted} omitted)")]
    NoData {
        /// Number of symbols that were attempted and omitted
        omitted: usize,
    },
}

/// Reported, never thrown: the snapshot carries an empty news list instead.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum NewsFeedError {
    #[error("News feed unreachable: {0}")]
    Transport(String),

    #[error("News feed contained no item blocks")]
    NoItems,

    #[error("Invalid news pattern: {0}")]
    Pattern(String),
}

impl Error {
    /// True when the error reflects an upstream outage rather than a bug or
    /// misconfiguration. Callers keep serving the last good snapshot.
    pub fn is_outage(&self) -> bool {
        matches!(
            self,
            Error::Aggregation(AggregationError::NoData { .. }) | Error::DataUnavailable(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_data_is_outage() {
        let error: Error = AggregationError::NoData { omitted: 42 }.into();
        assert!(error.is_outage());
        assert_eq!(
            format!("{}", error),
            "Aggregation failed: No symbols resolved (42 omitted)"
        );
    }

    #[test]
    fn test_config_error_is_not_outage() {
        let error = Error::InvalidConfigValue("batch_size must be positive".to_string());
        assert!(!error.is_outage());
    }
}

//! Error types for the market data crate.
//!
//! This module provides:
//! - [`MarketDataError`]: errors raised while talking to an upstream provider
//! - [`ParseError`]: errors raised while turning a provider payload into a series
//! - [`OmissionClass`]: how an aggregation pass should account for a failed symbol

mod omission;

pub use omission::OmissionClass;

use thiserror::Error;

/// Errors that can occur while fetching from a market data provider.
///
/// Each variant is classified into an [`OmissionClass`] via
/// [`omission_class`](Self::omission_class). None of them are fatal to an
/// aggregation pass; the symbol is simply left out of the result.
#[derive(Error, Debug)]
pub enum MarketDataError {
    /// The provider could not be reached or the request was rejected.
    #[error("Transport error: {provider} - {message}")]
    Transport {
        /// The provider that failed
        provider: String,
        /// Description of the failure
        message: String,
    },

    /// The provider answered with a non-success HTTP status.
    #[error("Unexpected status {status} from {provider} for {symbol}")]
    Status {
        /// The provider that answered
        provider: String,
        /// The requested symbol (or feed)
        symbol: String,
        /// The HTTP status code
        status: u16,
    },

    /// The request to the provider timed out.
    #[error("Timeout: {provider}")]
    Timeout {
        /// The provider that timed out
        provider: String,
    },

    /// The payload was received but could not be turned into a series.
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    /// A network error occurred while communicating with a provider.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl MarketDataError {
    /// Returns how an aggregation pass should record this failure.
    ///
    /// ```
    /// use marketpulse_market_data::errors::{MarketDataError, OmissionClass, ParseError};
    ///
    /// let error = MarketDataError::Timeout { provider: "YAHOO".to_string() };
    /// assert_eq!(error.omission_class(), OmissionClass::Transport);
    ///
    /// let error = MarketDataError::Parse(ParseError::InsufficientHistory { valid: 1 });
    /// assert_eq!(error.omission_class(), OmissionClass::Parse);
    /// ```
    pub fn omission_class(&self) -> OmissionClass {
        match self {
            Self::Transport { .. } | Self::Status { .. } | Self::Timeout { .. } | Self::Network(_) => {
                OmissionClass::Transport
            }
            Self::Parse(_) => OmissionClass::Parse,
        }
    }

    /// True when the upstream could not be reached or refused the request.
    pub fn is_transport(&self) -> bool {
        self.omission_class() == OmissionClass::Transport
    }
}

/// Errors produced by the time-series parser.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    /// The payload is not valid JSON for the chart shape.
    #[error("Malformed payload: {0}")]
    Malformed(String),

    /// The payload has no recognizable result set.
    #[error("Payload has no chart result")]
    MissingResult,

    /// Fewer than two usable closing prices.
    #[error("Insufficient history: {valid} valid closes")]
    InsufficientHistory {
        /// Number of valid closes found
        valid: usize,
    },

    /// The quote metadata lacks a live price or a previous close.
    #[error("Quote metadata is missing price or previous close")]
    MissingQuoteFields,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_is_transport() {
        let error = MarketDataError::Status {
            provider: "YAHOO".to_string(),
            symbol: "NVDA".to_string(),
            status: 404,
        };
        assert!(error.is_transport());
        assert_eq!(error.omission_class(), OmissionClass::Transport);
    }

    #[test]
    fn test_parse_is_not_transport() {
        let error: MarketDataError = ParseError::MissingResult.into();
        assert!(!error.is_transport());
        assert_eq!(error.omission_class(), OmissionClass::Parse);
    }

    #[test]
    fn test_error_display() {
        let error = MarketDataError::Status {
            provider: "YAHOO".to_string(),
            symbol: "^GSPC".to_string(),
            status: 502,
        };
        assert_eq!(
            format!("{}", error),
            "Unexpected status 502 from YAHOO for ^GSPC"
        );

        let error = ParseError::InsufficientHistory { valid: 1 };
        assert_eq!(format!("{}", error), "Insufficient history: 1 valid closes");
    }
}

//! Time-series parser.
//!
//! Turns one raw chart payload into a canonical [`PriceSeries`] plus the
//! latest/previous price pair. The parser never retries and never talks to
//! the network; callers decide what to do with a [`ParseError`].

use crate::errors::ParseError;
use crate::models::{ChartMeta, ChartResponse, ParsedChart, PriceSeries, QuoteMeta};

/// Minimum number of valid closes needed to derive a daily change.
pub const MIN_VALID_CLOSES: usize = 2;

/// Parse a chart payload from its JSON text.
pub fn parse_chart_json(body: &str) -> Result<ParsedChart, ParseError> {
    let response: ChartResponse =
        serde_json::from_str(body).map_err(|e| ParseError::Malformed(e.to_string()))?;
    parse_chart(&response)
}

/// Parse a deserialized chart payload.
///
/// `latest` prefers the provider's live price and falls back to the last valid
/// close; `previous` prefers the provider's previous close and falls back to
/// the second-to-last valid close.
pub fn parse_chart(response: &ChartResponse) -> Result<ParsedChart, ParseError> {
    let result = response.first_result().ok_or(ParseError::MissingResult)?;
    let closes = result
        .indicators
        .as_ref()
        .and_then(|i| i.quote.first())
        .map(|q| &q.close)
        .ok_or(ParseError::MissingResult)?;
    let timestamps = result.timestamp.as_ref().ok_or(ParseError::MissingResult)?;

    let series = PriceSeries::from_raw(timestamps.iter().copied().zip(closes.iter().copied()));
    if series.len() < MIN_VALID_CLOSES {
        return Err(ParseError::InsufficientHistory {
            valid: series.len(),
        });
    }

    let meta = result.meta.as_ref();
    let latest = meta
        .and_then(|m| usable(m.regular_market_price))
        .or_else(|| series.last().map(|p| p.close))
        .ok_or(ParseError::InsufficientHistory { valid: 0 })?;
    let previous = meta
        .and_then(|m| usable(m.chart_previous_close))
        .or_else(|| series.nth_from_end(1).map(|p| p.close))
        .ok_or(ParseError::InsufficientHistory { valid: 1 })?;

    Ok(ParsedChart {
        series,
        latest,
        previous,
    })
}

/// Extract the live price pair from chart metadata, ignoring the series.
///
/// Both the live price and the previous close must be present and non-zero.
pub fn parse_quote_meta(response: &ChartResponse) -> Result<QuoteMeta, ParseError> {
    let meta: &ChartMeta = response
        .first_result()
        .and_then(|r| r.meta.as_ref())
        .ok_or(ParseError::MissingResult)?;

    match (usable(meta.regular_market_price), usable(meta.chart_previous_close)) {
        (Some(latest), Some(previous)) => Ok(QuoteMeta { latest, previous }),
        _ => Err(ParseError::MissingQuoteFields),
    }
}

fn usable(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite() && *v != 0.0)
}

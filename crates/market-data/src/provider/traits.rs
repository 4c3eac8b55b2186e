//! Market data provider trait definitions.
//!
//! This module defines the two seams the aggregation engine depends on:
//! [`ChartProvider`] for per-symbol chart payloads and [`HeadlineProvider`]
//! for the raw news feed.

use async_trait::async_trait;

use crate::errors::MarketDataError;
use crate::models::ChartResponse;

/// Range and interval of a chart request.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum ChartRange {
    /// One year of daily bars, enough for a 200-day moving average.
    OneYear,
    /// Five days of daily bars, used for cheap quote refreshes.
    FiveDays,
}

impl ChartRange {
    /// The `range` query parameter value.
    pub fn as_range(&self) -> &'static str {
        match self {
            Self::OneYear => "1y",
            Self::FiveDays => "5d",
        }
    }

    /// The `interval` query parameter value.
    pub fn as_interval(&self) -> &'static str {
        "1d"
    }
}

/// Trait for chart data providers.
///
/// Implement this trait to add support for a new upstream source, or to
/// stub the upstream in tests.
///
/// # Example
///
/// ```ignore
/// use async_trait::async_trait;
/// use marketpulse_market_data::{ChartProvider, ChartRange, ChartResponse, MarketDataError};
///
/// struct FixtureProvider;
///
/// #[async_trait]
/// impl ChartProvider for FixtureProvider {
///     fn id(&self) -> &'static str {
///         "FIXTURE"
///     }
///
///     async fn fetch_chart(
///         &self,
///         symbol: &str,
///         range: ChartRange,
///     ) -> Result<ChartResponse, MarketDataError> {
///         Ok(ChartResponse::default())
///     }
/// }
/// ```
#[async_trait]
pub trait ChartProvider: Send + Sync {
    /// Unique identifier for this provider, used in logs and errors.
    fn id(&self) -> &'static str;

    /// Fetch the chart payload for one symbol.
    ///
    /// # Arguments
    ///
    /// * `symbol` - Provider symbol (e.g. "NVDA", "^GSPC", "BTC-USD")
    /// * `range` - Requested range; the interval is always daily
    ///
    /// # Returns
    ///
    /// The deserialized payload, or a `MarketDataError` when the upstream is
    /// unreachable, answers with a non-success status, or sends something that
    /// is not JSON.
    async fn fetch_chart(
        &self,
        symbol: &str,
        range: ChartRange,
    ) -> Result<ChartResponse, MarketDataError>;
}

/// Trait for headline feed providers.
#[async_trait]
pub trait HeadlineProvider: Send + Sync {
    /// Unique identifier for this provider.
    fn id(&self) -> &'static str;

    /// Fetch the raw feed text covering the given symbols.
    async fn fetch_headlines(&self, symbols: &[String]) -> Result<String, MarketDataError>;
}

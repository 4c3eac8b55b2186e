//! Yahoo Finance market data provider.
//!
//! This provider talks to two public Yahoo Finance endpoints:
//! - the v8 chart API for daily bars and live price metadata
//!   (equities, indices such as `^GSPC`, crypto pairs such as `BTC-USD`)
//! - the headline RSS feed for news on a list of symbols

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header;
use tracing::{debug, warn};
use urlencoding::encode;

use crate::errors::{MarketDataError, ParseError};
use crate::models::ChartResponse;
use crate::provider::{ChartProvider, ChartRange, HeadlineProvider};

const PROVIDER_ID: &str = "YAHOO";

const CHART_BASE_URL: &str = "https://query1.finance.yahoo.com/v8/finance/chart";

const HEADLINE_URL: &str = "https://finance.yahoo.com/rss/headline";

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

/// Default per-request timeout.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

// ============================================================================
// Yahoo Provider
// ============================================================================

/// Yahoo Finance chart and headline provider.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Clone)]
pub struct YahooProvider {
    client: reqwest::Client,
    chart_base_url: String,
    headline_url: String,
}

impl YahooProvider {
    /// Create a provider with the given per-request timeout.
    pub fn new(timeout: Duration) -> Result<Self, MarketDataError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| MarketDataError::Transport {
                provider: PROVIDER_ID.to_string(),
                message: format!("Failed to initialize HTTP client: {}", e),
            })?;
        Ok(Self {
            client,
            chart_base_url: CHART_BASE_URL.to_string(),
            headline_url: HEADLINE_URL.to_string(),
        })
    }

    /// Point the provider at different endpoints (e.g. a local proxy).
    pub fn with_base_urls(
        mut self,
        chart_base_url: impl Into<String>,
        headline_url: impl Into<String>,
    ) -> Self {
        self.chart_base_url = chart_base_url.into();
        self.headline_url = headline_url.into();
        self
    }

    fn chart_url(&self, symbol: &str, range: ChartRange) -> String {
        format!(
            "{}/{}?interval={}&range={}",
            self.chart_base_url,
            encode(symbol),
            range.as_interval(),
            range.as_range()
        )
    }

    fn headline_feed_url(&self, symbols: &[String]) -> String {
        format!("{}?s={}", self.headline_url, encode(&symbols.join(",")))
    }

    async fn get_text(&self, url: &str, subject: &str) -> Result<String, MarketDataError> {
        let response = self
            .client
            .get(url)
            .header(header::ACCEPT, "*/*")
            .send()
            .await
            .map_err(|e| map_request_error(e, subject))?;

        let status = response.status();
        if !status.is_success() {
            return Err(MarketDataError::Status {
                provider: PROVIDER_ID.to_string(),
                symbol: subject.to_string(),
                status: status.as_u16(),
            });
        }

        response
            .text()
            .await
            .map_err(|e| map_request_error(e, subject))
    }
}

/// Classify a reqwest failure into the crate's error taxonomy.
fn map_request_error(error: reqwest::Error, subject: &str) -> MarketDataError {
    if error.is_timeout() {
        warn!("Request for {} timed out", subject);
        MarketDataError::Timeout {
            provider: PROVIDER_ID.to_string(),
        }
    } else if error.is_connect() || error.is_request() {
        MarketDataError::Transport {
            provider: PROVIDER_ID.to_string(),
            message: format!("{}: {}", subject, error),
        }
    } else {
        MarketDataError::Network(error)
    }
}

// ============================================================================
// Provider Implementations
// ============================================================================

#[async_trait]
impl ChartProvider for YahooProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    async fn fetch_chart(
        &self,
        symbol: &str,
        range: ChartRange,
    ) -> Result<ChartResponse, MarketDataError> {
        let url = self.chart_url(symbol, range);
        debug!("Fetching {} chart for {} from Yahoo", range.as_range(), symbol);

        let body = self.get_text(&url, symbol).await?;
        serde_json::from_str(&body)
            .map_err(|e| MarketDataError::Parse(ParseError::Malformed(e.to_string())))
    }
}

#[async_trait]
impl HeadlineProvider for YahooProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    async fn fetch_headlines(&self, symbols: &[String]) -> Result<String, MarketDataError> {
        let url = self.headline_feed_url(symbols);
        debug!("Fetching headlines for {} symbols from Yahoo", symbols.len());
        self.get_text(&url, "headlines").await
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn provider() -> YahooProvider {
        YahooProvider::new(DEFAULT_REQUEST_TIMEOUT).unwrap()
    }

    #[test]
    fn test_chart_url_encodes_index_symbols() {
        let url = provider().chart_url("^GSPC", ChartRange::OneYear);
        assert_eq!(
            url,
            "https://query1.finance.yahoo.com/v8/finance/chart/%5EGSPC?interval=1d&range=1y"
        );
    }

    #[test]
    fn test_chart_url_five_day_range() {
        let url = provider().chart_url("BTC-USD", ChartRange::FiveDays);
        assert!(url.ends_with("/BTC-USD?interval=1d&range=5d"));
    }

    #[test]
    fn test_headline_url_joins_symbols() {
        let url = provider()
            .headline_feed_url(&["AMD".to_string(), "NVDA".to_string()]);
        assert_eq!(url, "https://finance.yahoo.com/rss/headline?s=AMD%2CNVDA");
    }

    #[test]
    fn test_with_base_urls() {
        let provider = provider().with_base_urls("http://localhost:9000/chart", "http://localhost:9000/rss");
        assert_eq!(
            provider.chart_url("MU", ChartRange::FiveDays),
            "http://localhost:9000/chart/MU?interval=1d&range=5d"
        );
    }

    #[test]
    fn test_provider_id() {
        assert_eq!(ChartProvider::id(&provider()), "YAHOO");
        assert_eq!(HeadlineProvider::id(&provider()), "YAHOO");
    }
}

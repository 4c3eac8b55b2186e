//! Market universe and engine configuration.
//!
//! The watchlist, indices and sector grouping are external configuration:
//! the engine only reads them. [`MarketConfig::default`] carries the stock
//! dashboard universe.

use std::collections::HashSet;
use std::time::Duration;

use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::errors::{Error, Result};

/// An index tracked in the header bar.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexConfig {
    /// Provider symbol, e.g. `^GSPC`.
    pub symbol: String,
    /// Human-readable name, e.g. `S&P 500`.
    pub name: String,
}

impl IndexConfig {
    pub fn new(symbol: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            name: name.into(),
        }
    }

    /// Key used in snapshots: the provider symbol without a leading `^`.
    pub fn display_symbol(&self) -> String {
        display_symbol(&self.symbol)
    }
}

/// Strips the provider's index marker (`^GSPC` -> `GSPC`).
pub fn display_symbol(symbol: &str) -> String {
    symbol.replace('^', "")
}

/// A named group of watchlist symbols.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectorConfig {
    pub name: String,
    pub tickers: Vec<String>,
}

impl SectorConfig {
    pub fn new<S: Into<String>>(name: impl Into<String>, tickers: impl IntoIterator<Item = S>) -> Self {
        Self {
            name: name.into(),
            tickers: tickers.into_iter().map(Into::into).collect(),
        }
    }
}

/// Everything the aggregator needs to know about the tracked universe.
#[derive(Clone, Debug)]
pub struct MarketConfig {
    pub watchlist: Vec<String>,
    pub indices: Vec<IndexConfig>,
    pub sectors: Vec<SectorConfig>,
    pub sma_periods: Vec<usize>,
    pub batch_size: usize,
    pub market_tz: Tz,
}

impl Default for MarketConfig {
    fn default() -> Self {
        Self {
            watchlist: DEFAULT_WATCHLIST.iter().map(|s| s.to_string()).collect(),
            indices: DEFAULT_INDICES
                .iter()
                .map(|(symbol, name)| IndexConfig::new(*symbol, *name))
                .collect(),
            sectors: DEFAULT_SECTORS
                .iter()
                .map(|(name, tickers)| SectorConfig::new(*name, tickers.iter().copied()))
                .collect(),
            sma_periods: DEFAULT_SMA_PERIODS.to_vec(),
            batch_size: DEFAULT_BATCH_SIZE,
            market_tz: DEFAULT_MARKET_TZ,
        }
    }
}

impl MarketConfig {
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    pub fn with_market_tz(mut self, market_tz: Tz) -> Self {
        self.market_tz = market_tz;
        self
    }

    /// Indices followed by watchlist symbols, in configuration order, without duplicates.
    pub fn all_symbols(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        self.indices
            .iter()
            .map(|i| i.symbol.as_str())
            .chain(self.watchlist.iter().map(String::as_str))
            .filter(|s| seen.insert(*s))
            .map(str::to_string)
            .collect()
    }

    /// Checks the invariants the aggregator relies on.
    pub fn validate(&self) -> Result<()> {
        if self.watchlist.is_empty() && self.indices.is_empty() {
            return Err(Error::InvalidConfigValue(
                "at least one index or watchlist symbol is required".to_string(),
            ));
        }
        if self.batch_size == 0 {
            return Err(Error::InvalidConfigValue(
                "batch_size must be positive".to_string(),
            ));
        }
        if self.sma_periods.iter().any(|p| *p == 0) {
            return Err(Error::InvalidConfigValue(
                "SMA periods must be positive".to_string(),
            ));
        }
        let watchlist: HashSet<&str> = self.watchlist.iter().map(String::as_str).collect();
        for sector in &self.sectors {
            if let Some(unknown) = sector.tickers.iter().find(|t| !watchlist.contains(t.as_str())) {
                return Err(Error::InvalidConfigValue(format!(
                    "sector {} references {} which is not in the watchlist",
                    sector.name, unknown
                )));
            }
        }
        Ok(())
    }
}

/// Freshness of the two cache tiers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CacheConfig {
    pub full_ttl: Duration,
    pub live_ttl: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            full_ttl: DEFAULT_FULL_SNAPSHOT_TTL,
            live_ttl: DEFAULT_LIVE_QUOTES_TTL,
        }
    }
}

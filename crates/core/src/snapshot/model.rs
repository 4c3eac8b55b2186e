//! Snapshot domain models.
//!
//! These are the shapes served to consumers. A snapshot produced by a full
//! aggregation and one produced by merging a quote patch are
//! indistinguishable by shape.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Moving averages keyed by `SMA{period}`; `None` when history is too short.
pub type SmaMap = BTreeMap<String, Option<f64>>;

/// Map key for a moving-average period.
pub fn sma_key(period: usize) -> String {
    format!("SMA{}", period)
}

/// Full indicator set for one watchlist symbol.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TickerSnapshot {
    pub price: f64,
    pub change: f64,
    pub change_pct: f64,
    pub ret_1w: f64,
    pub ret_1m: f64,
    pub ret_ytd: f64,
    pub smas: SmaMap,
}

impl TickerSnapshot {
    /// Moving average for `period`, if it was computed and defined.
    pub fn sma(&self, period: usize) -> Option<f64> {
        self.smas.get(&sma_key(period)).copied().flatten()
    }

    /// Replaces the live price fields, leaving returns and averages untouched.
    pub fn apply_patch(&mut self, patch: &QuotePatch) {
        self.price = patch.price;
        self.change = patch.change;
        self.change_pct = patch.change_pct;
    }
}

/// Price line for one index.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexSnapshot {
    pub name: String,
    pub price: f64,
    pub change: f64,
    pub change_pct: f64,
}

impl IndexSnapshot {
    pub fn apply_patch(&mut self, patch: &QuotePatch) {
        self.price = patch.price;
        self.change = patch.change;
        self.change_pct = patch.change_pct;
    }
}

/// Cheap live update for one symbol.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuotePatch {
    pub price: f64,
    pub change: f64,
    pub change_pct: f64,
}

/// A batch of live updates, keyed like [`MarketSnapshot`].
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LiveQuotes {
    #[serde(rename = "timestamp")]
    pub generated_at: DateTime<Utc>,
    pub indices: BTreeMap<String, QuotePatch>,
    pub watchlist: BTreeMap<String, QuotePatch>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
}

impl Direction {
    pub fn from_change(change_pct: f64) -> Self {
        if change_pct > 0.0 {
            Direction::Up
        } else {
            Direction::Down
        }
    }
}

/// A watchlist symbol with an outsized daily move.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoverEntry {
    pub symbol: String,
    pub price: f64,
    pub change_pct: f64,
    pub direction: Direction,
}

/// Daily performance of one configured sector.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectorAggregate {
    pub name: String,
    pub avg_change_pct: f64,
    pub best_name: String,
    pub best_change_pct: f64,
    pub worst_name: String,
    pub worst_change_pct: f64,
}

impl SectorAggregate {
    /// Placeholder for a sector none of whose members resolved.
    pub fn empty(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            avg_change_pct: 0.0,
            best_name: String::new(),
            best_change_pct: 0.0,
            worst_name: String::new(),
            worst_change_pct: 0.0,
        }
    }
}

/// A recent headline.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NewsItem {
    pub title: String,
    pub link: String,
    #[serde(rename = "pubDate")]
    pub published_at: DateTime<Utc>,
    pub tickers: Vec<String>,
}

/// The full artifact served to consumers.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketSnapshot {
    #[serde(rename = "timestamp")]
    pub generated_at: DateTime<Utc>,
    pub indices: BTreeMap<String, IndexSnapshot>,
    pub watchlist: BTreeMap<String, TickerSnapshot>,
    pub movers: Vec<MoverEntry>,
    #[serde(rename = "sectorPerformance")]
    pub sectors: Vec<SectorAggregate>,
    pub news: Vec<NewsItem>,
}

impl MarketSnapshot {
    /// Number of symbols that made it into the snapshot.
    pub fn resolved_count(&self) -> usize {
        self.indices.len() + self.watchlist.len()
    }
}

//! Market Pulse Core - snapshot aggregation, indicators and caching.
//!
//! This crate turns per-symbol chart data from a
//! [`ChartProvider`](marketpulse_market_data::ChartProvider) into market
//! snapshots, and serves them through a slow full-snapshot tier and a fast
//! live-quote tier that is merged into the full snapshot on read.

pub mod aggregator;
pub mod cache;
pub mod clock;
pub mod config;
pub mod constants;
pub mod errors;
pub mod indicators;
pub mod news;
pub mod snapshot;
pub mod utils;

pub use aggregator::SnapshotAggregator;
pub use cache::MarketDataService;
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{CacheConfig, IndexConfig, MarketConfig, SectorConfig};
pub use snapshot::{LiveQuotes, MarketSnapshot};

// Re-export error types
pub use errors::Error;
pub use errors::Result;

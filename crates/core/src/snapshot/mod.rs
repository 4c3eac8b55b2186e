//! Market snapshot module.
//!
//! - [`model`] - Snapshot, patch and aggregate shapes
//! - [`aggregates`] - Movers and sector performance (shared by every path)
//! - [`merge`] - Applying a live quote patch to a full snapshot
//! - [`commentary`] - Leading/lagging sector summary

pub mod aggregates;
pub mod commentary;
pub mod merge;
pub mod model;

pub use aggregates::{compute_movers, compute_sector_performance, derive_aggregates, DerivedAggregates};
pub use commentary::{summarize_sectors, MarketCommentary, SectorMove, Standout};
pub use merge::merge_quote_patch;
pub use model::{
    sma_key, Direction, IndexSnapshot, LiveQuotes, MarketSnapshot, MoverEntry, NewsItem,
    QuotePatch, SectorAggregate, SmaMap, TickerSnapshot,
};

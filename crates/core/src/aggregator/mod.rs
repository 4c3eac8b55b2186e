//! Snapshot aggregator.
//!
//! - [`batch`] - Batched fan-out with tagged per-symbol outcomes
//! - [`snapshot_aggregator`] - Full snapshot and live quote passes

pub mod batch;
mod snapshot_aggregator;

pub use batch::{fetch_in_batches, BatchReport, FetchOutcome, OmissionReason};
pub use snapshot_aggregator::SnapshotAggregator;

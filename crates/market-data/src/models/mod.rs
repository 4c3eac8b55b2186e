//! Market data models
//!
//! This module contains the data types exchanged with providers:
//! - `types` - Type aliases (EpochSeconds)
//! - `chart` - Raw chart API payload (ChartResponse and its nested blocks)
//! - `series` - Canonical closing-price series and parser outputs

mod chart;
mod series;
mod types;

pub use chart::{
    ChartEnvelope, ChartError, ChartIndicators, ChartMeta, ChartQuoteBlock, ChartResponse,
    ChartResult,
};
pub use series::{ParsedChart, PricePoint, PriceSeries, QuoteMeta};
pub use types::EpochSeconds;

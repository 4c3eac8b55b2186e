//! Market Pulse Market Data Crate
//!
//! This crate fetches raw chart and headline data from an upstream provider
//! and turns chart payloads into canonical closing-price series.
//!
//! # Architecture
//!
//! ```text
//! +------------------+     +------------------+
//! |  ChartProvider   | --> |  ChartResponse   |  (raw payload)
//! +------------------+     +------------------+
//!                                  |
//!                                  v
//!                          +------------------+
//!                          |     parser       |  (validation + fallbacks)
//!                          +------------------+
//!                                  |
//!                                  v
//!                          +------------------+
//!                          |   ParsedChart    |  (PriceSeries, latest, previous)
//!                          +------------------+
//! ```
//!
//! # Core Types
//!
//! - [`ChartProvider`] / [`HeadlineProvider`] - Upstream seams
//! - [`YahooProvider`] - Yahoo Finance implementation of both
//! - [`PriceSeries`] - Gap-free, strictly increasing daily closes
//! - [`ParsedChart`] - Parser output for one symbol
//! - [`QuoteMeta`] - Live price pair for cheap refreshes

pub mod errors;
pub mod models;
pub mod parser;
pub mod provider;

pub use errors::{MarketDataError, OmissionClass, ParseError};

pub use models::{
    ChartMeta, ChartResponse, ChartResult, EpochSeconds, ParsedChart, PricePoint, PriceSeries,
    QuoteMeta,
};

pub use parser::{parse_chart, parse_chart_json, parse_quote_meta};

pub use provider::yahoo::YahooProvider;
pub use provider::{ChartProvider, ChartRange, HeadlineProvider};

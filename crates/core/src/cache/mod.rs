//! Tiered cache.
//!
//! - [`ttl_cache`] - Single-slot TTL cache with coalesced refresh
//! - [`service`] - Full snapshot and live quote tiers behind one read API

mod service;
pub mod ttl_cache;

pub use service::MarketDataService;
pub use ttl_cache::{CacheEntry, TtlCache};

//! Market data provider abstractions and implementations.
//!
//! This module contains:
//! - The `ChartProvider` and `HeadlineProvider` traits the core depends on
//! - The Yahoo Finance implementation of both
//!
//! # Architecture
//!
//! Providers only move bytes: they return the deserialized chart payload or
//! the raw feed text. Turning a payload into a series is the job of
//! [`crate::parser`], so the same parsing rules apply to every provider.

mod traits;

pub mod yahoo;

// Re-exports
pub use traits::{ChartProvider, ChartRange, HeadlineProvider};

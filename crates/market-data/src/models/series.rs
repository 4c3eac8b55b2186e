//! Canonical closing-price series.

use serde::{Deserialize, Serialize};

use super::types::EpochSeconds;

/// A single valid daily close.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub timestamp: EpochSeconds,
    pub close: f64,
}

impl PricePoint {
    pub fn new(timestamp: EpochSeconds, close: f64) -> Self {
        Self { timestamp, close }
    }
}

/// Ordered closing prices, ascending by timestamp.
///
/// Gaps reported by the provider are dropped when the series is built and are
/// never interpolated. Timestamps are strictly increasing.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceSeries {
    points: Vec<PricePoint>,
}

impl PriceSeries {
    /// Build a series from raw `(timestamp, close)` pairs.
    ///
    /// Absent or non-finite closes are skipped. A point whose timestamp does
    /// not strictly increase over the last kept point is dropped.
    pub fn from_raw<I>(raw: I) -> Self
    where
        I: IntoIterator<Item = (EpochSeconds, Option<f64>)>,
    {
        let mut points: Vec<PricePoint> = Vec::new();
        for (timestamp, close) in raw {
            let Some(close) = close.filter(|c| c.is_finite()) else {
                continue;
            };
            if points.last().is_some_and(|last| timestamp <= last.timestamp) {
                continue;
            }
            points.push(PricePoint::new(timestamp, close));
        }
        Self { points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    /// Closing prices in chronological order.
    pub fn closes(&self) -> impl DoubleEndedIterator<Item = f64> + ExactSizeIterator + '_ {
        self.points.iter().map(|p| p.close)
    }

    pub fn first(&self) -> Option<&PricePoint> {
        self.points.first()
    }

    pub fn last(&self) -> Option<&PricePoint> {
        self.points.last()
    }

    /// The `n`-th close counted from the end (`0` is the most recent).
    pub fn nth_from_end(&self, n: usize) -> Option<&PricePoint> {
        self.points.iter().rev().nth(n)
    }

    /// Most recent point with `timestamp <= threshold`, scanning newest to oldest.
    pub fn latest_at_or_before(&self, threshold: EpochSeconds) -> Option<&PricePoint> {
        self.points.iter().rev().find(|p| p.timestamp <= threshold)
    }

    /// Most recent point with `timestamp < threshold`, scanning newest to oldest.
    pub fn latest_before(&self, threshold: EpochSeconds) -> Option<&PricePoint> {
        self.points.iter().rev().find(|p| p.timestamp < threshold)
    }
}

/// Output of the time-series parser for one symbol.
#[derive(Clone, Debug, PartialEq)]
pub struct ParsedChart {
    pub series: PriceSeries,
    /// Live price, or the last valid close.
    pub latest: f64,
    /// Previous session close, or the second-to-last valid close.
    pub previous: f64,
}

/// Live price pair extracted from chart metadata only.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct QuoteMeta {
    pub latest: f64,
    pub previous: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_raw_skips_gaps() {
        let series = PriceSeries::from_raw(vec![
            (10, Some(1.0)),
            (20, None),
            (30, Some(f64::NAN)),
            (40, Some(4.0)),
        ]);
        assert_eq!(series.len(), 2);
        assert_eq!(series.closes().collect::<Vec<_>>(), vec![1.0, 4.0]);
    }

    #[test]
    fn test_from_raw_drops_non_increasing_timestamps() {
        let series = PriceSeries::from_raw(vec![
            (10, Some(1.0)),
            (10, Some(2.0)),
            (5, Some(3.0)),
            (20, Some(4.0)),
        ]);
        let stamps: Vec<_> = series.points().iter().map(|p| p.timestamp).collect();
        assert_eq!(stamps, vec![10, 20]);
    }

    #[test]
    fn test_backward_scans() {
        let series = PriceSeries::from_raw(vec![
            (10, Some(1.0)),
            (20, Some(2.0)),
            (30, Some(3.0)),
        ]);
        assert_eq!(series.latest_at_or_before(20).unwrap().close, 2.0);
        assert_eq!(series.latest_before(20).unwrap().close, 1.0);
        assert_eq!(series.latest_at_or_before(25).unwrap().close, 2.0);
        assert!(series.latest_before(10).is_none());
        assert_eq!(series.nth_from_end(1).unwrap().close, 2.0);
    }
}

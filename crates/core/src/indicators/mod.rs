//! Indicator calculator.
//!
//! Turns one parsed chart into the per-symbol snapshot served to consumers.
//! Everything here is pure: the current time and market time zone are passed
//! in, and rounding happens once, as the final step.

pub mod returns;
pub mod sma;

use chrono::{DateTime, Utc};
use chrono_tz::Tz;

use marketpulse_market_data::{ParsedChart, QuoteMeta};

use crate::config::MarketConfig;
use crate::snapshot::model::{IndexSnapshot, QuotePatch, TickerSnapshot};
use crate::utils::{pct_change, round2};

pub use returns::{lookback_return, reference_close, Lookback};
pub use sma::{moving_averages, simple_moving_average};

/// Daily change and change percentage, unrounded.
pub fn daily_change(latest: f64, previous: f64) -> (f64, f64) {
    (latest - previous, pct_change(latest, previous))
}

/// Computes ticker and index snapshots for one market configuration.
#[derive(Clone, Debug)]
pub struct IndicatorCalculator {
    sma_periods: Vec<usize>,
    market_tz: Tz,
}

impl IndicatorCalculator {
    pub fn new(sma_periods: Vec<usize>, market_tz: Tz) -> Self {
        Self {
            sma_periods,
            market_tz,
        }
    }

    pub fn from_config(config: &MarketConfig) -> Self {
        Self::new(config.sma_periods.clone(), config.market_tz)
    }

    /// Full indicator set for a watchlist symbol.
    pub fn ticker_snapshot(&self, parsed: &ParsedChart, now: DateTime<Utc>) -> TickerSnapshot {
        let (change, change_pct) = daily_change(parsed.latest, parsed.previous);
        let ret = |lookback| {
            round2(lookback_return(
                &parsed.series,
                parsed.latest,
                lookback,
                now,
                self.market_tz,
            ))
        };

        TickerSnapshot {
            price: round2(parsed.latest),
            change: round2(change),
            change_pct: round2(change_pct),
            ret_1w: ret(Lookback::OneWeek),
            ret_1m: ret(Lookback::OneMonth),
            ret_ytd: ret(Lookback::YearToDate),
            smas: moving_averages(&parsed.series, &self.sma_periods),
        }
    }

    /// Price line for an index; returns and averages are not computed.
    pub fn index_snapshot(&self, parsed: &ParsedChart, name: &str) -> IndexSnapshot {
        let patch = quote_patch(parsed.latest, parsed.previous);
        IndexSnapshot {
            name: name.to_string(),
            price: patch.price,
            change: patch.change,
            change_pct: patch.change_pct,
        }
    }
}

/// Rounded live update from a latest/previous pair.
pub fn quote_patch(latest: f64, previous: f64) -> QuotePatch {
    let (change, change_pct) = daily_change(latest, previous);
    QuotePatch {
        price: round2(latest),
        change: round2(change),
        change_pct: round2(change_pct),
    }
}

impl From<QuoteMeta> for QuotePatch {
    fn from(meta: QuoteMeta) -> Self {
        quote_patch(meta.latest, meta.previous)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use chrono_tz::America::New_York;
    use marketpulse_market_data::PriceSeries;

    const DAY: i64 = 86_400;

    fn parsed(points: &[(i64, f64)], latest: f64, previous: f64) -> ParsedChart {
        ParsedChart {
            series: PriceSeries::from_raw(points.iter().map(|(t, c)| (*t, Some(*c)))),
            latest,
            previous,
        }
    }

    #[test]
    fn test_daily_change() {
        let (change, pct) = daily_change(105.0, 100.0);
        assert_eq!(change, 5.0);
        assert_eq!(pct, 5.0);
        assert_eq!(daily_change(1.0, 0.0).1, 0.0);
    }

    #[test]
    fn test_ticker_snapshot_rounds_every_field() {
        let now = Utc.with_ymd_and_hms(2026, 3, 20, 20, 0, 0).unwrap();
        let t = now.timestamp();
        let chart = parsed(
            &[
                (t - 400 * DAY, 90.0),
                (t - 10 * DAY, 95.0),
                (t - 2 * DAY, 99.0),
                (t - DAY, 100.0),
            ],
            101.234,
            100.0,
        );
        let calc = IndicatorCalculator::new(vec![2, 5], New_York);
        let snapshot = calc.ticker_snapshot(&chart, now);

        assert_eq!(snapshot.price, 101.23);
        assert_eq!(snapshot.change, 1.23);
        assert_eq!(snapshot.change_pct, 1.23);
        // 1W reference is the T-10 close.
        assert_eq!(snapshot.ret_1w, 6.56);
        // Only the earliest close predates January 1.
        assert_eq!(snapshot.ret_ytd, 12.48);
        assert_eq!(snapshot.sma(2), Some(99.5));
        assert_eq!(snapshot.sma(5), None);
        assert!(snapshot.smas.contains_key("SMA5"));
    }

    #[test]
    fn test_ticker_snapshot_with_default_periods() {
        let now = Utc.with_ymd_and_hms(2026, 3, 20, 20, 0, 0).unwrap();
        let t = now.timestamp();
        let chart = parsed(&[(t - 2 * DAY, 10.0), (t - DAY, 10.0)], 10.0, 10.0);
        let calc = IndicatorCalculator::from_config(&MarketConfig::default());
        let snapshot = calc.ticker_snapshot(&chart, now);
        assert_eq!(snapshot.smas.len(), 6);
        assert!(snapshot.smas.values().all(|v| v.is_none()));
        assert_eq!(snapshot.ret_1w, 0.0);
    }

    #[test]
    fn test_index_snapshot_subset() {
        let chart = parsed(&[(1, 5000.0), (2, 5010.0)], 5050.5, 5000.0);
        let calc = IndicatorCalculator::new(vec![5], New_York);
        let index = calc.index_snapshot(&chart, "S&P 500");
        assert_eq!(index.name, "S&P 500");
        assert_eq!(index.price, 5050.5);
        assert_eq!(index.change, 50.5);
        assert_eq!(index.change_pct, 1.01);
    }

    #[test]
    fn test_quote_patch_from_meta() {
        let patch: QuotePatch = QuoteMeta {
            latest: 97.0,
            previous: 100.0,
        }
        .into();
        assert_eq!(patch.change, -3.0);
        assert_eq!(patch.change_pct, -3.0);
    }
}

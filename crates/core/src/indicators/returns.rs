//! Calendar-relative lookback returns.
//!
//! Every lookback uses the same backward linear scan: starting from the most
//! recent close and moving toward the oldest, the first close that satisfies
//! the threshold is the reference price. This selects the latest eligible
//! close, not the one nearest to the threshold. When no close qualifies the
//! earliest close in the series is used.

use chrono::{DateTime, Duration, Utc};
use chrono_tz::Tz;

use marketpulse_market_data::PriceSeries;

use crate::utils::pct_change;
use crate::utils::time_utils::{one_month_threshold, start_of_year};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Lookback {
    /// Close at or before exactly seven days ago.
    OneWeek,
    /// Close at or before local midnight of the same day last month.
    OneMonth,
    /// Last close strictly before local midnight on January 1.
    YearToDate,
}

impl Lookback {
    /// The instant a reference close is compared against.
    pub fn threshold(&self, now: DateTime<Utc>, tz: Tz) -> DateTime<Utc> {
        match self {
            Lookback::OneWeek => now - Duration::days(7),
            Lookback::OneMonth => one_month_threshold(now, tz),
            Lookback::YearToDate => start_of_year(now, tz),
        }
    }

    /// Whether the threshold instant itself is eligible.
    fn inclusive(&self) -> bool {
        !matches!(self, Lookback::YearToDate)
    }
}

/// Reference close for a lookback, with the earliest-close fallback.
pub fn reference_close(
    series: &PriceSeries,
    lookback: Lookback,
    now: DateTime<Utc>,
    tz: Tz,
) -> Option<f64> {
    let threshold = lookback.threshold(now, tz).timestamp();
    let found = if lookback.inclusive() {
        series.latest_at_or_before(threshold)
    } else {
        series.latest_before(threshold)
    };
    found.or_else(|| series.first()).map(|p| p.close)
}

/// Unrounded percentage return from the reference close to `latest`.
///
/// An empty series yields zero.
pub fn lookback_return(
    series: &PriceSeries,
    latest: f64,
    lookback: Lookback,
    now: DateTime<Utc>,
    tz: Tz,
) -> f64 {
    reference_close(series, lookback, now, tz)
        .map(|reference| pct_change(latest, reference))
        .unwrap_or(0.0)
}

use marketpulse_market_data::PriceSeries;

use crate::snapshot::model::{sma_key, SmaMap};
use crate::utils::round2;

/// Mean of the last `period` closes, or `None` when the series is shorter.
pub fn simple_moving_average(series: &PriceSeries, period: usize) -> Option<f64> {
    if period == 0 || series.len() < period {
        return None;
    }
    let sum: f64 = series.closes().rev().take(period).sum();
    Some(sum / period as f64)
}

/// Rounded moving averages for every configured period.
///
/// Every period gets a key; an undefined average is stored as `None`.
pub fn moving_averages(series: &PriceSeries, periods: &[usize]) -> SmaMap {
    periods
        .iter()
        .map(|&period| {
            (
                sma_key(period),
                simple_moving_average(series, period).map(round2),
            )
        })
        .collect()
}

/// Rounds to two decimal places.
///
/// Applied once, when a value is produced; intermediate math stays unrounded.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Percentage change from `base` to `value`; zero when `base` is zero.
pub fn pct_change(value: f64, base: f64) -> f64 {
    if base == 0.0 {
        0.0
    } else {
        (value - base) / base * 100.0
    }
}

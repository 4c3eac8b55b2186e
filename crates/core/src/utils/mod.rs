pub mod math;
pub mod time_utils;

pub use math::{pct_change, round2};

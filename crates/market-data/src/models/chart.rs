//! Chart API response models.
//!
//! The chart endpoint answers with a result array whose first element carries
//! a metadata block and parallel timestamp / close arrays. Every level is
//! optional here so that an unexpected shape surfaces as a parse error from
//! [`crate::parser`] rather than a deserialization failure.

use serde::{Deserialize, Serialize};

use super::types::EpochSeconds;

/// Top-level chart response wrapper.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct ChartResponse {
    #[serde(default)]
    pub chart: Option<ChartEnvelope>,
}

/// Result container; `error` is set instead of `result` for unknown symbols.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct ChartEnvelope {
    #[serde(default)]
    pub result: Option<Vec<ChartResult>>,
    #[serde(default)]
    pub error: Option<ChartError>,
}

/// One symbol's chart data.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct ChartResult {
    #[serde(default)]
    pub meta: Option<ChartMeta>,
    #[serde(default)]
    pub timestamp: Option<Vec<EpochSeconds>>,
    #[serde(default)]
    pub indicators: Option<ChartIndicators>,
}

/// Live price fields. Other metadata keys are ignored.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartMeta {
    pub regular_market_price: Option<f64>,
    pub chart_previous_close: Option<f64>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct ChartIndicators {
    #[serde(default)]
    pub quote: Vec<ChartQuoteBlock>,
}

/// Close prices parallel to `ChartResult::timestamp`; `null` marks a gap.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct ChartQuoteBlock {
    #[serde(default)]
    pub close: Vec<Option<f64>>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct ChartError {
    pub code: Option<String>,
    pub description: Option<String>,
}

impl ChartResponse {
    /// First result in the envelope, if any.
    pub fn first_result(&self) -> Option<&ChartResult> {
        self.chart
            .as_ref()
            .and_then(|c| c.result.as_ref())
            .and_then(|r| r.first())
    }
}

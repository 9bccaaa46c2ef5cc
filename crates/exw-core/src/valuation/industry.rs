//! Industry valuation multiples published by the backend.

use serde::{Deserialize, Serialize};

/// Low / median / high band of a public-market multiple.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MultipleRange {
    pub low: Option<f64>,
    pub median: Option<f64>,
    pub high: Option<f64>,
}

impl MultipleRange {
    /// Median after applying a private company discount given in percent.
    #[must_use]
    pub fn discounted_median(&self, discount_pct: f64) -> Option<f64> {
        self.median.map(|median| median * (1.0 - discount_pct / 100.0))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Industry {
    pub id: i64,
    pub industry_name: String,
    #[serde(default)]
    pub industry_code: Option<String>,
    #[serde(default)]
    pub ev_ebitda: MultipleRange,
    #[serde(default)]
    pub ev_revenue: MultipleRange,
    #[serde(default)]
    pub pe: MultipleRange,
    #[serde(default)]
    pub rule_of_thumb: Option<String>,
    #[serde(default)]
    pub data_source: Option<String>,
    #[serde(default)]
    pub last_updated: Option<String>,
}

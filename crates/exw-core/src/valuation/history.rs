//! Submitted valuations and the single-period quick valuation request.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which calculator produced a history entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValuationKind {
    Simple,
    Advanced,
}

impl ValuationKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Simple => "simple",
            Self::Advanced => "advanced",
        }
    }
}

impl fmt::Display for ValuationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One row of the valuation history, newest first as returned by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValuationHistoryEntry {
    pub id: i64,
    #[serde(rename = "type")]
    pub kind: ValuationKind,
    #[serde(default)]
    pub valuation_amount: Option<f64>,
    #[serde(default)]
    pub method: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub low_range: Option<f64>,
    #[serde(default)]
    pub high_range: Option<f64>,
    #[serde(default)]
    pub years_analyzed: Option<u32>,
}

/// Calculation method of the quick (single-period) valuation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValuationMethod {
    #[default]
    Comprehensive,
    Cca,
    Dcf,
    Capitalization,
    Nav,
    Manual,
}

impl ValuationMethod {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Comprehensive => "comprehensive",
            Self::Cca => "cca",
            Self::Dcf => "dcf",
            Self::Capitalization => "capitalization",
            Self::Nav => "nav",
            Self::Manual => "manual",
        }
    }
}

impl fmt::Display for ValuationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Body of the quick valuation endpoint. Absent values use backend defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuickValuationRequest {
    #[serde(default)]
    pub method: ValuationMethod,
    #[serde(default)]
    pub revenue: f64,
    #[serde(default)]
    pub ebitda: f64,
    #[serde(default)]
    pub net_income: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cash_flow: Option<f64>,
    #[serde(default)]
    pub total_assets: f64,
    #[serde(default)]
    pub total_liabilities: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub industry_id: Option<i64>,
    /// Fraction, not percent (`0.25`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub private_company_discount: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub growth_rates: Option<Vec<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount_rate: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manual_multiple: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manual_multiple_type: Option<String>,
}

/// Response of the quick valuation endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuickValuationResult {
    pub valuation_id: i64,
    #[serde(default)]
    pub valuation_amount: Option<f64>,
    #[serde(default)]
    pub low_range: Option<f64>,
    #[serde(default)]
    pub high_range: Option<f64>,
    pub method: String,
    /// Per-method calculation details, passed through untouched.
    #[serde(default)]
    pub results: serde_json::Value,
}

//! Per-year financial ratios and trend series.
//!
//! Every ratio with a zero or negative denominator is reported as 0 rather
//! than infinity or NaN, so the output is always printable.

use serde::{Deserialize, Serialize};

use super::fields;
use super::record::FinancialRecord;

/// Ratios for a single fiscal year. Percentages are already multiplied by 100.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FinancialRatios {
    pub year: i32,
    pub gross_margin_pct: f64,
    pub ebitda_margin_pct: f64,
    pub current_ratio: f64,
    pub cash_ratio: f64,
    pub debt_to_equity: f64,
    pub debt_to_assets_pct: f64,
    pub asset_turnover: f64,
    pub return_on_assets_pct: f64,
    pub return_on_equity_pct: f64,
}

/// One point of the gross profit / EBITDA / SDE trend.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    pub year: i32,
    pub gross_profit: f64,
    pub ebitda: f64,
    pub sde: f64,
}

fn ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator > 0.0 {
        numerator / denominator
    } else {
        0.0
    }
}

fn percent(numerator: f64, denominator: f64) -> f64 {
    ratio(numerator, denominator) * 100.0
}

/// Compute the ratio set for `year`.
///
/// Liquidity ratios use short-term debt as the current-liabilities proxy;
/// returns use EBITDA as the earnings figure.
#[must_use]
pub fn ratios_for_year(record: &FinancialRecord, year: i32) -> FinancialRatios {
    let amount = |field| record.amount(field, year);

    let revenue = amount(fields::REVENUE);
    let gross_profit = amount(fields::GROSS_PROFIT);
    let ebitda = amount(fields::EBITDA);
    let cash = amount(fields::CASH);
    let current_assets = amount(fields::CURRENT_ASSETS);
    let short_term_debt = amount(fields::SHORT_TERM_DEBT);
    let total_liabilities = amount(fields::TOTAL_LIABILITIES);
    let total_assets = amount(fields::TOTAL_ASSETS);
    let equity = amount(fields::EQUITY);

    FinancialRatios {
        year,
        gross_margin_pct: percent(gross_profit, revenue),
        ebitda_margin_pct: percent(ebitda, revenue),
        current_ratio: ratio(current_assets, short_term_debt),
        cash_ratio: ratio(cash, short_term_debt),
        debt_to_equity: ratio(total_liabilities, equity),
        debt_to_assets_pct: percent(total_liabilities, total_assets),
        asset_turnover: ratio(revenue, total_assets),
        return_on_assets_pct: percent(ebitda, total_assets),
        return_on_equity_pct: percent(ebitda, equity),
    }
}

/// Ratios for every year in the record, ascending.
#[must_use]
pub fn ratios(record: &FinancialRecord) -> Vec<FinancialRatios> {
    record
        .years()
        .into_iter()
        .map(|year| ratios_for_year(record, year))
        .collect()
}

/// Gross profit, EBITDA and SDE per year, ascending.
#[must_use]
pub fn trend(record: &FinancialRecord) -> Vec<TrendPoint> {
    record
        .years()
        .into_iter()
        .map(|year| TrendPoint {
            year,
            gross_profit: record.amount(fields::GROSS_PROFIT, year),
            ebitda: record.amount(fields::EBITDA, year),
            sde: record.amount(fields::SDE, year),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::financials::recompute;
    use pretty_assertions::assert_eq;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn margins_and_returns() {
        let mut record = FinancialRecord::blank(&[2024]);
        record.set(fields::REVENUE, 2024, "1000");
        record.set(fields::GROSS_PROFIT, 2024, "400");
        record.set(fields::EBITDA, 2024, "150");
        record.set(fields::CASH, 2024, "100");
        record.set(fields::CURRENT_ASSETS, 2024, "300");
        record.set(fields::NON_CURRENT_ASSETS, 2024, "600");
        record.set(fields::SHORT_TERM_DEBT, 2024, "200");
        record.set(fields::LONG_TERM_DEBT, 2024, "300");
        record.set(fields::EQUITY, 2024, "500");
        let record = recompute(&record);

        let r = ratios_for_year(&record, 2024);
        assert!(close(r.gross_margin_pct, 40.0));
        assert!(close(r.ebitda_margin_pct, 15.0));
        assert!(close(r.current_ratio, 1.5));
        assert!(close(r.cash_ratio, 0.5));
        assert!(close(r.debt_to_equity, 1.0));
        assert!(close(r.debt_to_assets_pct, 50.0));
        assert!(close(r.asset_turnover, 1.0));
        assert!(close(r.return_on_assets_pct, 15.0));
        assert!(close(r.return_on_equity_pct, 30.0));
    }

    #[test]
    fn zero_or_negative_denominators_yield_zero() {
        let mut record = FinancialRecord::blank(&[2024]);
        record.set(fields::EBITDA, 2024, "150");
        record.set(fields::EQUITY, 2024, "-10");

        let r = ratios_for_year(&record, 2024);
        assert_eq!(r, FinancialRatios { year: 2024, ..FinancialRatios::default() });
    }

    #[test]
    fn trend_covers_every_year() {
        let mut record = FinancialRecord::blank(&[2023, 2024]);
        record.set(fields::EBITDA, 2023, "10");
        record.set("travel", 2024, "5");
        let record = recompute(&record);

        let points = trend(&record);
        assert_eq!(points.len(), 2);
        assert!(close(points[0].ebitda, 10.0));
        assert!(close(points[0].sde, 10.0));
        assert!(close(points[1].sde, 5.0));
        assert_eq!(ratios(&record).len(), 2);
    }
}

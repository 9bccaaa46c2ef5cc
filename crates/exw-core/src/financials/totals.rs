//! Derived totals of the financial record.
//!
//! Five sums keep the record internally consistent:
//!
//! ```text
//! addbacks_total           = Σ add-back fields
//! sde                      = ebitda + Σ add-back fields
//! total_assets             = cash + current_assets + non_current_assets
//! total_liabilities        = long_term_debt + short_term_debt + interest_bearing_debt
//! total_liabilities_equity = total_liabilities + equity
//! ```
//!
//! They are applied per year in that order, each seeing the results of the
//! ones before it. A derived field is only ever updated, never created: a
//! record missing the target of a formula is left alone. Add-back fields
//! missing from an older save count as 0. The balance identity
//! (`total_assets == total_liabilities_equity`) is reported by
//! [`balance_difference`] but never corrected.

use tracing::trace;

use super::amount::{format_amount, parse_amount};
use super::fields;
use super::record::FinancialRecord;

/// A derived field and the fields it sums.
#[derive(Debug, Clone, Copy)]
pub struct Formula {
    pub target: &'static str,
    /// Summed per year; a term absent from the record adds 0.
    pub terms: &'static [&'static str],
    /// Fields that must exist, besides the target, for the formula to run.
    pub required: &'static [&'static str],
}

impl Formula {
    /// Whether `record` has the target and every required field.
    #[must_use]
    pub fn applies_to(&self, record: &FinancialRecord) -> bool {
        record.has_field(self.target) && self.required.iter().all(|field| record.has_field(field))
    }

    /// The sum of the terms for `year`.
    #[must_use]
    pub fn evaluate(&self, record: &FinancialRecord, year: i32) -> f64 {
        self.terms.iter().map(|term| record.amount(term, year)).sum()
    }
}

const fn ebitda_and_addbacks() -> [&'static str; fields::ADDBACK_FIELDS.len() + 1] {
    let mut terms = [fields::EBITDA; fields::ADDBACK_FIELDS.len() + 1];
    let mut i = 0;
    while i < fields::ADDBACK_FIELDS.len() {
        terms[i + 1] = fields::ADDBACK_FIELDS[i];
        i += 1;
    }
    terms
}

const SDE_TERMS: [&str; fields::ADDBACK_FIELDS.len() + 1] = ebitda_and_addbacks();
const ASSET_SOURCES: [&str; 3] = [fields::CASH, fields::CURRENT_ASSETS, fields::NON_CURRENT_ASSETS];
const LIABILITY_SOURCES: [&str; 3] = [
    fields::LONG_TERM_DEBT,
    fields::SHORT_TERM_DEBT,
    fields::INTEREST_BEARING_DEBT,
];
const LIABILITY_EQUITY_SOURCES: [&str; 2] = [fields::TOTAL_LIABILITIES, fields::EQUITY];

/// The derived totals, in application order.
pub const FORMULAS: [Formula; 5] = [
    Formula {
        target: fields::ADDBACKS_TOTAL,
        terms: &fields::ADDBACK_FIELDS,
        required: &[],
    },
    Formula {
        target: fields::SDE,
        terms: &SDE_TERMS,
        required: &[fields::EBITDA],
    },
    Formula {
        target: fields::TOTAL_ASSETS,
        terms: &ASSET_SOURCES,
        required: &ASSET_SOURCES,
    },
    Formula {
        target: fields::TOTAL_LIABILITIES,
        terms: &LIABILITY_SOURCES,
        required: &LIABILITY_SOURCES,
    },
    Formula {
        target: fields::TOTAL_LIABILITIES_EQUITY,
        terms: &LIABILITY_EQUITY_SOURCES,
        required: &LIABILITY_EQUITY_SOURCES,
    },
];

/// Return a copy of `record` with every derived total brought up to date.
#[must_use]
pub fn recompute(record: &FinancialRecord) -> FinancialRecord {
    let mut next = record.clone();
    recompute_in_place(&mut next);
    next
}

/// Bring every derived total of `record` up to date.
///
/// A formula is skipped when its target or one of its required fields is
/// missing from the record entirely. A cell is only written when the
/// computed value differs from its current parsed value, so blank cells
/// whose sum is 0 stay blank and a consistent record is left untouched.
///
/// Returns whether any cell changed.
#[allow(clippy::float_cmp)]
pub fn recompute_in_place(record: &mut FinancialRecord) -> bool {
    let years = record.years();
    let mut changed = false;

    for year in years {
        for formula in &FORMULAS {
            if !formula.applies_to(record) {
                continue;
            }

            let computed = formula.evaluate(record, year);
            let current = record.get(formula.target, year).map_or(0.0, parse_amount);

            if computed != current {
                trace!(target_field = formula.target, year, computed, "recomputed total");
                record.set(formula.target, year, format_amount(computed));
                changed = true;
            }
        }
    }

    changed
}

/// `total_assets − total_liabilities_equity` for `year`.
///
/// Non-zero means the balance sheet does not balance. Informational only.
#[must_use]
pub fn balance_difference(record: &FinancialRecord, year: i32) -> f64 {
    record.amount(fields::TOTAL_ASSETS, year) - record.amount(fields::TOTAL_LIABILITIES_EQUITY, year)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const YEAR: i32 = 2024;

    fn blank() -> FinancialRecord {
        FinancialRecord::blank(&[2021, 2022, 2023, YEAR])
    }

    #[test]
    fn addbacks_and_sde_follow_the_worked_example() {
        let mut record = blank();
        record.set(fields::REVENUE, YEAR, "5000000");
        record.set(fields::EBITDA, YEAR, "1000000");
        record.set("owner_salary", YEAR, "200000");
        record.set("auto_expenses", YEAR, "50000");

        let record = recompute(&record);
        assert_eq!(record.get(fields::ADDBACKS_TOTAL, YEAR), Some("250000"));
        assert_eq!(record.get(fields::SDE, YEAR), Some("1250000"));
    }

    #[test]
    fn total_assets_ignore_liabilities() {
        let mut record = blank();
        record.set(fields::CASH, YEAR, "100000");
        record.set(fields::CURRENT_ASSETS, YEAR, "200000");
        record.set(fields::NON_CURRENT_ASSETS, YEAR, "300000");
        record.set(fields::LONG_TERM_DEBT, YEAR, "999");

        let record = recompute(&record);
        assert_eq!(record.get(fields::TOTAL_ASSETS, YEAR), Some("600000"));
        assert_eq!(record.get(fields::TOTAL_LIABILITIES, YEAR), Some("999"));
    }

    #[test]
    fn blank_and_garbage_addbacks_count_as_zero() {
        let mut record = blank();
        record.set("travel", YEAR, "1500");
        record.set("donations", YEAR, "lots");
        record.set("retirement", YEAR, "");

        let record = recompute(&record);
        assert_eq!(record.get(fields::ADDBACKS_TOTAL, YEAR), Some("1500"));
    }

    #[test]
    fn sde_with_blank_ebitda_equals_addbacks() {
        let mut record = blank();
        record.set("other_addbacks", YEAR, "42000");

        let record = recompute(&record);
        assert_eq!(record.get(fields::EBITDA, YEAR), Some(""));
        assert_eq!(record.get(fields::SDE, YEAR), Some("42000"));
    }

    #[test]
    fn liabilities_equity_sees_fresh_total_liabilities() {
        let mut record = blank();
        record.set(fields::SHORT_TERM_DEBT, YEAR, "10");
        record.set(fields::INTEREST_BEARING_DEBT, YEAR, "5");
        record.set(fields::EQUITY, YEAR, "100");

        let record = recompute(&record);
        assert_eq!(record.get(fields::TOTAL_LIABILITIES, YEAR), Some("15"));
        assert_eq!(record.get(fields::TOTAL_LIABILITIES_EQUITY, YEAR), Some("115"));
    }

    #[test]
    fn recompute_is_a_fixed_point() {
        let mut record = blank();
        record.set(fields::EBITDA, 2022, "300");
        record.set("travel", 2022, "12.5");
        record.set(fields::CASH, 2023, "7");
        record.set(fields::EQUITY, YEAR, "-40");

        let once = recompute(&record);
        let mut twice = once.clone();
        assert!(!recompute_in_place(&mut twice));
        assert_eq!(twice, once);
    }

    #[test]
    fn blank_record_stays_blank() {
        let mut record = blank();
        assert!(!recompute_in_place(&mut record));
        assert_eq!(record, blank());
    }

    #[test]
    fn stale_derived_values_are_overwritten() {
        let mut record = blank();
        record.set(fields::ADDBACKS_TOTAL, YEAR, "999");
        record.set(fields::SDE, YEAR, "1");

        let record = recompute(&record);
        assert_eq!(record.get(fields::ADDBACKS_TOTAL, YEAR), Some("0"));
        assert_eq!(record.get(fields::SDE, YEAR), Some("0"));
    }

    #[test]
    fn formula_is_skipped_when_a_source_field_is_absent() {
        let mut record = FinancialRecord::new();
        record.set(fields::CASH, YEAR, "100");
        record.set(fields::CURRENT_ASSETS, YEAR, "200");
        record.set(fields::TOTAL_ASSETS, YEAR, "7");
        record.set(fields::TOTAL_LIABILITIES, YEAR, "3");
        record.set(fields::TOTAL_LIABILITIES_EQUITY, YEAR, "1");

        let record = recompute(&record);
        assert_eq!(record.get(fields::TOTAL_ASSETS, YEAR), Some("7"));
        assert_eq!(record.get(fields::TOTAL_LIABILITIES_EQUITY, YEAR), Some("1"));
    }

    #[test]
    fn missing_target_is_never_created() {
        let mut record = FinancialRecord::new();
        record.set(fields::TOTAL_LIABILITIES, YEAR, "30");
        record.set(fields::EQUITY, YEAR, "70");
        record.set("travel", YEAR, "5");

        let mut record = recompute(&record);
        assert!(!record.has_field(fields::TOTAL_LIABILITIES_EQUITY));
        assert!(!record.has_field(fields::ADDBACKS_TOTAL));

        record.set(fields::TOTAL_LIABILITIES_EQUITY, YEAR, "");
        let record = recompute(&record);
        assert_eq!(record.get(fields::TOTAL_LIABILITIES_EQUITY, YEAR), Some("100"));
    }

    #[test]
    fn addbacks_missing_from_an_older_save_count_as_zero() {
        let mut record = FinancialRecord::new();
        for field in fields::ADDBACK_FIELDS.iter().filter(|f| **f != "supplier_rebates") {
            record.set(field, YEAR, "");
        }
        record.set("owner_salary", YEAR, "50");
        record.set(fields::EBITDA, YEAR, "100");
        record.set(fields::ADDBACKS_TOTAL, YEAR, "999");
        record.set(fields::SDE, YEAR, "");

        let record = recompute(&record);
        assert_eq!(record.get(fields::ADDBACKS_TOTAL, YEAR), Some("50"));
        assert_eq!(record.get(fields::SDE, YEAR), Some("150"));
    }

    #[test]
    fn sde_uses_fresh_addbacks_without_a_total_field() {
        let mut record = FinancialRecord::new();
        record.set(fields::EBITDA, YEAR, "100");
        record.set("travel", YEAR, "20");
        record.set(fields::SDE, YEAR, "1");

        let record = recompute(&record);
        assert_eq!(record.get(fields::SDE, YEAR), Some("120"));
        assert!(!record.has_field(fields::ADDBACKS_TOTAL));
    }

    #[test]
    fn unbalanced_sheet_is_reported_not_corrected() {
        let mut record = blank();
        record.set(fields::CASH, YEAR, "1000");
        record.set(fields::EQUITY, YEAR, "400");

        let record = recompute(&record);
        assert_eq!(record.get(fields::TOTAL_ASSETS, YEAR), Some("1000"));
        assert_eq!(record.get(fields::TOTAL_LIABILITIES_EQUITY, YEAR), Some("400"));
        assert!((balance_difference(&record, YEAR) - 600.0).abs() < f64::EPSILON);
    }

    #[test]
    fn years_are_independent() {
        let mut record = blank();
        record.set("travel", 2021, "10");
        record.set("travel", YEAR, "20");

        let record = recompute(&record);
        assert_eq!(record.get(fields::ADDBACKS_TOTAL, 2021), Some("10"));
        assert_eq!(record.get(fields::ADDBACKS_TOTAL, 2022), Some(""));
        assert_eq!(record.get(fields::ADDBACKS_TOTAL, YEAR), Some("20"));
    }
}

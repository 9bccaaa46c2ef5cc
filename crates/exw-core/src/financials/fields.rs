//! Field names of the multi-year financial record.
//!
//! Names match the keys the valuation backend expects in the submission
//! payload, so they are plain `snake_case` strings rather than an enum.

// ---------------------------------------------------------------------------
// Income statement
// ---------------------------------------------------------------------------

pub const REVENUE: &str = "revenue";
pub const GROSS_PROFIT: &str = "gross_profit";
pub const EBITDA: &str = "ebitda";
pub const DEPRECIATION: &str = "depreciation";
pub const EBIT: &str = "ebit";
pub const PROFIT_AFTER_TAX: &str = "profit_after_tax";
pub const SDE: &str = "sde";
pub const OWNER_COMPENSATION: &str = "owner_compensation";
pub const NON_RECURRING_EXPENSES: &str = "non_recurring_expenses";
pub const CAPITAL_EXPENDITURES: &str = "capital_expenditures";

// ---------------------------------------------------------------------------
// Balance sheet
// ---------------------------------------------------------------------------

pub const CASH: &str = "cash";
pub const CURRENT_ASSETS: &str = "current_assets";
pub const NON_CURRENT_ASSETS: &str = "non_current_assets";
pub const TOTAL_ASSETS: &str = "total_assets";
pub const LONG_TERM_DEBT: &str = "long_term_debt";
pub const SHORT_TERM_DEBT: &str = "short_term_debt";
pub const INTEREST_BEARING_DEBT: &str = "interest_bearing_debt";
pub const TOTAL_LIABILITIES: &str = "total_liabilities";
pub const EQUITY: &str = "equity";
pub const TOTAL_LIABILITIES_EQUITY: &str = "total_liabilities_equity";

// ---------------------------------------------------------------------------
// Add-backs
// ---------------------------------------------------------------------------

pub const ADDBACKS_TOTAL: &str = "addbacks_total";

/// Discretionary expenses added back to EBITDA to arrive at SDE.
pub const ADDBACK_FIELDS: [&str; 16] = [
    "owner_salary",
    "family_salaries",
    "salary_adjustments",
    "auto_expenses",
    "donations",
    "insurance_premiums",
    "inventory_adjustments",
    "meals_entertainment",
    "personal_expenses",
    "phone_internet",
    "non_business_services",
    "travel",
    "one_time_charges",
    "retirement",
    "supplier_rebates",
    "other_addbacks",
];

pub const INCOME_STATEMENT_FIELDS: [&str; 10] = [
    REVENUE,
    GROSS_PROFIT,
    EBITDA,
    DEPRECIATION,
    EBIT,
    PROFIT_AFTER_TAX,
    SDE,
    OWNER_COMPENSATION,
    NON_RECURRING_EXPENSES,
    CAPITAL_EXPENDITURES,
];

pub const BALANCE_SHEET_FIELDS: [&str; 10] = [
    CASH,
    CURRENT_ASSETS,
    NON_CURRENT_ASSETS,
    TOTAL_ASSETS,
    LONG_TERM_DEBT,
    SHORT_TERM_DEBT,
    INTEREST_BEARING_DEBT,
    TOTAL_LIABILITIES,
    EQUITY,
    TOTAL_LIABILITIES_EQUITY,
];

/// Fields whose values are always overwritten by recomputation.
pub const DERIVED_FIELDS: [&str; 5] = [
    ADDBACKS_TOTAL,
    SDE,
    TOTAL_ASSETS,
    TOTAL_LIABILITIES,
    TOTAL_LIABILITIES_EQUITY,
];

/// Every field of a complete record, in display order.
pub fn all() -> impl Iterator<Item = &'static str> {
    INCOME_STATEMENT_FIELDS
        .into_iter()
        .chain(BALANCE_SHEET_FIELDS)
        .chain(ADDBACK_FIELDS)
        .chain(std::iter::once(ADDBACKS_TOTAL))
}

/// Whether `name` is a field of the complete record.
#[must_use]
pub fn is_known(name: &str) -> bool {
    all().any(|field| field == name)
}

/// Whether `name` is computed rather than entered.
#[must_use]
pub fn is_derived(name: &str) -> bool {
    DERIVED_FIELDS.contains(&name)
}

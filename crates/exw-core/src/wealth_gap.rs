//! Wealth gap: how far the owner's net worth (outside the business) is from
//! what they need to exit.

use std::fmt;

use serde::{Deserialize, Serialize};

/// How the wealth goal is expressed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WealthGoalMethod {
    /// A lump sum.
    #[default]
    SingleNumber,
    /// A monthly income need, converted to a present value.
    MonthlyNeeds,
}

impl WealthGoalMethod {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SingleNumber => "single_number",
            Self::MonthlyNeeds => "monthly_needs",
        }
    }
}

impl fmt::Display for WealthGoalMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

const fn default_years_of_income() -> u32 {
    20
}

const fn default_inflation_rate() -> f64 {
    3.0
}

const fn default_return_rate() -> f64 {
    7.0
}

/// Inputs of the wealth gap calculation. Rates are annual percentages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WealthGap {
    #[serde(default)]
    pub wealth_goal_method: WealthGoalMethod,
    #[serde(default)]
    pub wealth_goal_amount: f64,
    #[serde(default)]
    pub monthly_cash_need: f64,
    #[serde(default = "default_years_of_income")]
    pub years_of_income: u32,
    #[serde(default = "default_inflation_rate")]
    pub annual_inflation_rate: f64,
    #[serde(default = "default_return_rate")]
    pub annual_return_rate: f64,
    /// Net worth excluding the business.
    #[serde(default)]
    pub current_net_worth: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub liquid_assets: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retirement_accounts: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub real_estate_equity: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub other_investments: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_liabilities: Option<f64>,
}

impl Default for WealthGap {
    fn default() -> Self {
        Self {
            wealth_goal_method: WealthGoalMethod::default(),
            wealth_goal_amount: 0.0,
            monthly_cash_need: 0.0,
            years_of_income: default_years_of_income(),
            annual_inflation_rate: default_inflation_rate(),
            annual_return_rate: default_return_rate(),
            current_net_worth: 0.0,
            liquid_assets: None,
            retirement_accounts: None,
            real_estate_equity: None,
            other_investments: None,
            total_liabilities: None,
        }
    }
}

/// Assets and liabilities behind the net worth figure.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct NetWorthBreakdown {
    pub liquid_assets: f64,
    pub retirement_accounts: f64,
    pub real_estate_equity: f64,
    pub other_investments: f64,
    pub total_assets: f64,
    pub total_liabilities: f64,
    pub net_worth: f64,
}

/// Goal, gap and net worth for a set of inputs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct WealthGapCalculation {
    pub wealth_goal: f64,
    pub wealth_gap: f64,
    pub current_net_worth: f64,
}

impl WealthGap {
    /// Amount needed at exit.
    ///
    /// For monthly needs this is the present value of `monthly_cash_need`
    /// paid for `years_of_income × 12` months, discounted at the real
    /// monthly rate `(return − inflation) / 100 / 12`. A zero real rate is
    /// plain multiplication.
    #[must_use]
    pub fn wealth_goal(&self) -> f64 {
        match self.wealth_goal_method {
            WealthGoalMethod::SingleNumber => self.wealth_goal_amount,
            WealthGoalMethod::MonthlyNeeds => {
                let monthly_rate = (self.annual_return_rate - self.annual_inflation_rate) / 100.0 / 12.0;
                let months = self.years_of_income * 12;
                if monthly_rate == 0.0 {
                    self.monthly_cash_need * f64::from(months)
                } else {
                    let months = i32::try_from(months).unwrap_or(i32::MAX);
                    self.monthly_cash_need * (1.0 - (1.0 + monthly_rate).powi(-months)) / monthly_rate
                }
            }
        }
    }

    /// Goal minus current net worth. Negative means a surplus.
    #[must_use]
    pub fn gap(&self) -> f64 {
        self.wealth_goal() - self.current_net_worth
    }

    /// Whether any asset or liability component was supplied.
    #[must_use]
    pub const fn has_components(&self) -> bool {
        self.liquid_assets.is_some()
            || self.retirement_accounts.is_some()
            || self.real_estate_equity.is_some()
            || self.other_investments.is_some()
            || self.total_liabilities.is_some()
    }

    #[must_use]
    pub fn net_worth_breakdown(&self) -> NetWorthBreakdown {
        let liquid_assets = self.liquid_assets.unwrap_or(0.0);
        let retirement_accounts = self.retirement_accounts.unwrap_or(0.0);
        let real_estate_equity = self.real_estate_equity.unwrap_or(0.0);
        let other_investments = self.other_investments.unwrap_or(0.0);
        let total_liabilities = self.total_liabilities.unwrap_or(0.0);
        let total_assets = liquid_assets + retirement_accounts + real_estate_equity + other_investments;
        NetWorthBreakdown {
            liquid_assets,
            retirement_accounts,
            real_estate_equity,
            other_investments,
            total_assets,
            total_liabilities,
            net_worth: total_assets - total_liabilities,
        }
    }

    /// Replace `current_net_worth` with the breakdown total when components
    /// were supplied. Returns whether it changed.
    pub fn derive_net_worth(&mut self) -> bool {
        if !self.has_components() {
            return false;
        }
        self.current_net_worth = self.net_worth_breakdown().net_worth;
        true
    }

    #[must_use]
    pub fn calculate(&self) -> WealthGapCalculation {
        WealthGapCalculation {
            wealth_goal: self.wealth_goal(),
            wealth_gap: self.gap(),
            current_net_worth: self.current_net_worth,
        }
    }
}

/// A saved wealth gap with the backend's computed figures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedWealthGap {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(flatten)]
    pub inputs: WealthGap,
    #[serde(default)]
    pub calculated_wealth_goal: Option<f64>,
    #[serde(default)]
    pub calculated_wealth_gap: Option<f64>,
    #[serde(default)]
    pub net_worth_breakdown: Option<NetWorthBreakdown>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

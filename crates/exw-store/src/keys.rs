//! Keys of the persisted client state.

/// Bearer token of the signed-in user.
pub const TOKEN: &str = "token";
/// Profile of the signed-in user as returned at login.
pub const USER: &str = "user";
/// Financial record of the in-progress valuation.
pub const ADVANCED_VALUATION_DATA: &str = "advancedValuationData";
/// Selected industry id of the in-progress valuation.
pub const ADVANCED_VALUATION_INDUSTRY: &str = "advancedValuationIndustry";
/// Private company discount (percent) of the in-progress valuation.
pub const ADVANCED_VALUATION_DISCOUNT: &str = "advancedValuationDiscount";

pub const ALL: [&str; 5] = [
    TOKEN,
    USER,
    ADVANCED_VALUATION_DATA,
    ADVANCED_VALUATION_INDUSTRY,
    ADVANCED_VALUATION_DISCOUNT,
];

/// Keys are used as file names: ASCII letters, digits, `_`, `-` and `.`,
/// not starting with a dot.
#[must_use]
pub fn is_valid(key: &str) -> bool {
    !key.is_empty()
        && !key.starts_with('.')
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'))
}

pub mod assessment;
pub mod auth;
pub mod dispatch;
pub mod profile;
pub mod quiz;
pub mod shared;
pub mod valuation;
pub mod wealth_gap;

//! # exw-core
//!
//! Domain types and client-side computation for Exitwise.
//!
//! This crate holds everything that does not talk to the network or disk:
//! - The multi-year financial record and its derived-totals recomputation
//! - Financial ratios and trend series derived from the record
//! - The valuation draft (record + industry + private company discount)
//! - Assessment questions, answers, progress, gap zones and the session
//!   state machine that drives auto-advance
//! - Business profile, wealth gap and exit quiz types
//! - Cross-cutting error types

pub mod assessment;
pub mod errors;
pub mod financials;
pub mod profile;
pub mod quiz;
pub mod valuation;
pub mod wealth_gap;

pub use errors::CoreError;

pub mod assessment;
pub mod auth;
pub mod profile;
pub mod quiz;
pub mod valuation;
pub mod wealth_gap;

pub use assessment::AssessmentCommands;
pub use auth::AuthCommands;
pub use profile::ProfileCommands;
pub use quiz::QuizCommands;
pub use valuation::ValuationCommands;
pub use wealth_gap::WealthGapCommands;

//! Fees module - tier rules, the tier table, and the fee policy.

mod fee_policy;
pub mod fee_schedule;
mod fees_errors;
mod tier_rule;

pub use fee_policy::FeePolicy;
pub use fee_schedule::{minimum_for, standard_tiers};
pub use fees_errors::{FeeError, FeeResult};
pub use tier_rule::{FeeFormula, LeadDayRange, TierRule};

use thiserror::Error;

use crate::constants::{MAX_LEAD_DAYS, MIN_LEAD_DAYS};

pub type FeeResult<T> = std::result::Result<T, FeeError>;

/// Failures raised by tier rules and the fee policy.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FeeError {
    #[error("Transfer amount must be greater than zero")]
    InvalidAmount,

    /// Amount is under the matched tier's own threshold.
    #[error("Amount is below the minimum of {minimum} required by this fee tier")]
    BelowMinimumAmount { minimum: String },

    /// A rule was invoked outside its own range. Indicates a selector bug.
    #[error("Fee rule '{rule}' does not apply to transfers in {lead_days} days")]
    InapplicableRule { rule: String, lead_days: i64 },

    #[error("Transfer denied, no percentage fee applicable for this date")]
    RuleRejectsTransfer,

    #[error(
        "Cannot calculate a fee for a transfer in {lead_days} days. Transfers are only allowed between {min} and {max} days.",
        min = MIN_LEAD_DAYS,
        max = MAX_LEAD_DAYS
    )]
    NoApplicableRule { lead_days: i64 },
}

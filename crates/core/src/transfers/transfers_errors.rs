use chrono::NaiveDate;
use thiserror::Error;

use crate::constants::{
    ACCOUNT_NUMBER_LENGTH, DISPLAY_DECIMAL_PRECISION, MAX_LEAD_DAYS, MIN_LEAD_DAYS,
};

/// Rejections raised while validating and scheduling a transfer.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransferError {
    #[error("Transfer details are required")]
    MissingPayload,

    #[error("{field} account is required")]
    MissingAccount { field: &'static str },

    #[error("{field} account must have exactly {len} digits", len = ACCOUNT_NUMBER_LENGTH)]
    InvalidAccount { field: &'static str },

    #[error("Source and destination accounts cannot be the same")]
    SameAccount,

    #[error("Transfer amount must be greater than zero")]
    InvalidAmount,

    #[error(
        "Transfer amount must have at most {places} decimal places",
        places = DISPLAY_DECIMAL_PRECISION
    )]
    AmountPrecision,

    #[error("Transfer date must be today or later")]
    InvalidDate,

    /// Amount below the minimum for the lead-time window, caught before pricing.
    #[error("{0}")]
    SchedulingRejected(String),

    #[error(
        "Transfer not allowed for {lead_days} days. Transfers are only allowed between {min} and {max} days.",
        min = MIN_LEAD_DAYS,
        max = MAX_LEAD_DAYS
    )]
    TransferNotAllowed { lead_days: i64 },

    #[error("Transfer not found with id: {0}")]
    NotFound(String),

    #[error("Invalid date range: {from} is after {to}")]
    InvalidRange { from: NaiveDate, to: NaiveDate },
}

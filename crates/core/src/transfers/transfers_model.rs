//! Transfer domain models.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::transfers_errors::TransferError;
use crate::constants::ACCOUNT_NUMBER_LENGTH;
use crate::utils::time_utils::days_between;

/// Caller-supplied request to schedule a transfer.
///
/// Amount and date are optional so that a missing value is reported by the
/// scheduling rules rather than by the deserializer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTransfer {
    #[serde(default)]
    pub source_account: String,
    #[serde(default)]
    pub destination_account: String,
    #[serde(default)]
    pub amount: Option<Decimal>,
    #[serde(default)]
    pub execution_date: Option<NaiveDate>,
}

impl NewTransfer {
    /// Checks that both account identifiers are present and well formed.
    pub fn validate_accounts(&self) -> Result<(), TransferError> {
        validate_account_number("Source", &self.source_account)?;
        validate_account_number("Destination", &self.destination_account)?;
        Ok(())
    }
}

/// Account identifiers are exactly ten ASCII digits.
pub fn validate_account_number(field: &'static str, value: &str) -> Result<(), TransferError> {
    if value.trim().is_empty() {
        return Err(TransferError::MissingAccount { field });
    }
    if value.len() != ACCOUNT_NUMBER_LENGTH || !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(TransferError::InvalidAccount { field });
    }
    Ok(())
}

/// Priced transfer ready to be persisted.
///
/// Lead days are derived from the two dates on every read, so they can never
/// disagree with them.
#[derive(Debug, Clone, PartialEq)]
pub struct NewScheduledTransfer {
    pub source_account: String,
    pub destination_account: String,
    pub amount: Decimal,
    pub fee: Decimal,
    execution_date: NaiveDate,
    scheduled_date: NaiveDate,
}

impl NewScheduledTransfer {
    pub fn new(
        source_account: String,
        destination_account: String,
        amount: Decimal,
        fee: Decimal,
        execution_date: NaiveDate,
        scheduled_date: NaiveDate,
    ) -> Self {
        Self {
            source_account,
            destination_account,
            amount,
            fee,
            execution_date,
            scheduled_date,
        }
    }

    pub fn execution_date(&self) -> NaiveDate {
        self.execution_date
    }

    pub fn scheduled_date(&self) -> NaiveDate {
        self.scheduled_date
    }

    pub fn lead_days(&self) -> i64 {
        days_between(self.scheduled_date, self.execution_date)
    }

    pub fn with_execution_date(mut self, execution_date: NaiveDate) -> Self {
        self.execution_date = execution_date;
        self
    }

    pub fn with_scheduled_date(mut self, scheduled_date: NaiveDate) -> Self {
        self.scheduled_date = scheduled_date;
        self
    }
}

/// Persisted scheduled transfer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledTransfer {
    pub id: String,
    pub source_account: String,
    pub destination_account: String,
    pub amount: Decimal,
    pub fee: Decimal,
    pub execution_date: NaiveDate,
    pub scheduled_date: NaiveDate,
    pub lead_days: i64,
    pub created_at: NaiveDateTime,
}

/// Fee computed for an amount and date without scheduling anything.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferQuote {
    pub amount: Decimal,
    pub execution_date: NaiveDate,
    pub fee: Decimal,
    pub lead_days: i64,
}

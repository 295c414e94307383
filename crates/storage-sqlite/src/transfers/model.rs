//! Database models for scheduled transfers.

use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;
use rust_decimal::Decimal;
use std::str::FromStr;

use transfer_scheduler_core::errors::{Error, Result, ValidationError};
use transfer_scheduler_core::transfers::{NewScheduledTransfer, ScheduledTransfer};

/// Database model for scheduled transfers
#[derive(Queryable, Identifiable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::scheduled_transfers)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct ScheduledTransferDB {
    pub id: String,
    pub source_account: String,
    pub destination_account: String,
    pub amount: String,
    pub fee: String,
    pub execution_date: NaiveDate,
    pub scheduled_date: NaiveDate,
    pub lead_days: i64,
    pub created_at: NaiveDateTime,
}

/// Database model for inserting a scheduled transfer
#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = crate::schema::scheduled_transfers)]
pub struct NewScheduledTransferDB {
    pub id: String,
    pub source_account: String,
    pub destination_account: String,
    pub amount: String,
    pub fee: String,
    pub execution_date: NaiveDate,
    pub scheduled_date: NaiveDate,
    pub lead_days: i64,
    pub created_at: NaiveDateTime,
}

fn parse_decimal(value: &str, field_name: &str) -> Result<Decimal> {
    Decimal::from_str(value).map_err(|e| {
        log::error!("Stored {} '{}' is not a decimal: {}", field_name, value, e);
        Error::Validation(ValidationError::DecimalParse(e))
    })
}

impl NewScheduledTransferDB {
    /// Builds the row for a new transfer. Lead days are taken from the domain
    /// model, which derives them from the two dates.
    pub fn from_domain(id: String, created_at: NaiveDateTime, domain: NewScheduledTransfer) -> Self {
        Self {
            id,
            lead_days: domain.lead_days(),
            execution_date: domain.execution_date(),
            scheduled_date: domain.scheduled_date(),
            source_account: domain.source_account,
            destination_account: domain.destination_account,
            amount: domain.amount.to_string(),
            fee: domain.fee.to_string(),
            created_at,
        }
    }
}

impl TryFrom<ScheduledTransferDB> for ScheduledTransfer {
    type Error = Error;

    fn try_from(db: ScheduledTransferDB) -> Result<Self> {
        Ok(Self {
            amount: parse_decimal(&db.amount, "amount")?,
            fee: parse_decimal(&db.fee, "fee")?,
            id: db.id,
            source_account: db.source_account,
            destination_account: db.destination_account,
            execution_date: db.execution_date,
            scheduled_date: db.scheduled_date,
            lead_days: db.lead_days,
            created_at: db.created_at,
        })
    }
}

use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use log::{info, warn};
use rust_decimal::Decimal;

use super::transfers_errors::TransferError;
use super::transfers_model::{NewScheduledTransfer, NewTransfer, ScheduledTransfer, TransferQuote};
use super::transfers_traits::{TransferRepositoryTrait, TransferServiceTrait};
use crate::constants::DISPLAY_DECIMAL_PRECISION;
use crate::errors::{DatabaseError, Error, Result};
use crate::fees::fee_schedule::{SAME_DAY, SHORT_NOTICE};
use crate::fees::{minimum_for, FeePolicy};
use crate::utils::time_utils::{days_between, Clock};

/// Amount, execution date, lead days and fee of a transfer that passed pricing.
struct PricedTransfer {
    amount: Decimal,
    execution_date: NaiveDate,
    lead_days: i64,
    fee: Decimal,
}

/// Validates transfer requests, prices them through the fee policy and
/// persists the scheduled result.
pub struct TransferService {
    repository: Arc<dyn TransferRepositoryTrait>,
    fee_policy: Arc<FeePolicy>,
    clock: Arc<dyn Clock>,
}

impl TransferService {
    pub fn new(
        repository: Arc<dyn TransferRepositoryTrait>,
        fee_policy: Arc<FeePolicy>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        TransferService {
            repository,
            fee_policy,
            clock,
        }
    }

    /// Rejects amounts under the window minimum before the policy is consulted.
    fn check_scheduling_minimum(amount: Decimal, lead_days: i64) -> Result<()> {
        let minimum = minimum_for(lead_days);
        if amount >= minimum {
            return Ok(());
        }

        let window = if SAME_DAY.contains(lead_days) {
            "same-day transfers".to_string()
        } else if SHORT_NOTICE.contains(lead_days) {
            format!(
                "transfers {} to {} days ahead",
                SHORT_NOTICE.start(),
                SHORT_NOTICE.end()
            )
        } else {
            format!("transfers {} days ahead", lead_days)
        };
        Err(TransferError::SchedulingRejected(format!(
            "Transfer amount must be greater than or equal to {:.2} for {}",
            minimum, window
        ))
        .into())
    }

    /// Amount and date checks, lead-day computation, minimums, window check
    /// and fee computation, in that order.
    fn price(
        &self,
        amount: Option<Decimal>,
        execution_date: Option<NaiveDate>,
        today: NaiveDate,
    ) -> Result<PricedTransfer> {
        let mut amount = match amount {
            Some(value) if value > Decimal::ZERO => value,
            _ => return Err(TransferError::InvalidAmount.into()),
        };
        // Trailing zeros are accepted; significant sub-cent digits are not.
        if amount.normalize().scale() > DISPLAY_DECIMAL_PRECISION {
            return Err(TransferError::AmountPrecision.into());
        }
        amount.rescale(DISPLAY_DECIMAL_PRECISION);

        let execution_date = match execution_date {
            Some(date) if date >= today => date,
            _ => return Err(TransferError::InvalidDate.into()),
        };

        let lead_days = days_between(today, execution_date);

        Self::check_scheduling_minimum(amount, lead_days)?;

        if !self.fee_policy.is_transfer_allowed(lead_days) {
            return Err(TransferError::TransferNotAllowed { lead_days }.into());
        }

        let fee = self.fee_policy.calculate_fee(amount, lead_days)?;

        Ok(PricedTransfer {
            amount,
            execution_date,
            lead_days,
            fee,
        })
    }

    fn ensure_range(from: NaiveDate, to: NaiveDate) -> Result<()> {
        if from > to {
            return Err(TransferError::InvalidRange { from, to }.into());
        }
        Ok(())
    }
}

#[async_trait]
impl TransferServiceTrait for TransferService {
    async fn schedule_transfer(&self, request: NewTransfer) -> Result<ScheduledTransfer> {
        request.validate_accounts()?;
        if request.source_account == request.destination_account {
            return Err(TransferError::SameAccount.into());
        }

        let today = self.clock.today();
        let priced = self
            .price(request.amount, request.execution_date, today)
            .inspect_err(|e| warn!("Rejected transfer from {}: {}", request.source_account, e))?;

        let new_transfer = NewScheduledTransfer::new(
            request.source_account,
            request.destination_account,
            priced.amount,
            priced.fee,
            priced.execution_date,
            today,
        );
        let created = self.repository.create(new_transfer).await?;
        info!(
            "Scheduled transfer {} for {} ({} days ahead, fee {})",
            created.id, created.execution_date, created.lead_days, created.fee
        );
        Ok(created)
    }

    fn quote_fee(
        &self,
        amount: Option<Decimal>,
        execution_date: Option<NaiveDate>,
    ) -> Result<TransferQuote> {
        let priced = self.price(amount, execution_date, self.clock.today())?;
        Ok(TransferQuote {
            amount: priced.amount,
            execution_date: priced.execution_date,
            fee: priced.fee,
            lead_days: priced.lead_days,
        })
    }

    fn get_transfer(&self, transfer_id: &str) -> Result<ScheduledTransfer> {
        self.repository
            .get_by_id(transfer_id)
            .map_err(|e| match e {
                Error::Database(DatabaseError::NotFound(_)) => {
                    TransferError::NotFound(transfer_id.to_string()).into()
                }
                other => other,
            })
    }

    fn list_transfers(&self) -> Result<Vec<ScheduledTransfer>> {
        self.repository.list_all()
    }

    fn list_by_source_account(&self, source_account: &str) -> Result<Vec<ScheduledTransfer>> {
        self.repository.list_by_source_account(source_account)
    }

    fn list_by_execution_date(&self, execution_date: NaiveDate) -> Result<Vec<ScheduledTransfer>> {
        self.repository.list_by_execution_date(execution_date)
    }

    fn list_scheduled_between(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<ScheduledTransfer>> {
        Self::ensure_range(from, to)?;
        self.repository.list_scheduled_between(from, to)
    }

    fn list_executing_between(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<ScheduledTransfer>> {
        Self::ensure_range(from, to)?;
        self.repository.list_executing_between(from, to)
    }

    fn count_by_source_account(&self, source_account: &str) -> Result<i64> {
        self.repository.count_by_source_account(source_account)
    }

    fn fee_rules(&self) -> Vec<String> {
        self.fee_policy.rule_descriptions()
    }
}

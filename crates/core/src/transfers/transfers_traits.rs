use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::transfers_model::{NewScheduledTransfer, NewTransfer, ScheduledTransfer, TransferQuote};
use crate::errors::Result;

/// Trait for scheduled transfer repository operations
#[async_trait]
pub trait TransferRepositoryTrait: Send + Sync {
    async fn create(&self, new_transfer: NewScheduledTransfer) -> Result<ScheduledTransfer>;
    fn get_by_id(&self, transfer_id: &str) -> Result<ScheduledTransfer>;
    /// All transfers, most recently scheduled first.
    fn list_all(&self) -> Result<Vec<ScheduledTransfer>>;
    fn list_by_source_account(&self, source_account: &str) -> Result<Vec<ScheduledTransfer>>;
    fn list_by_execution_date(&self, execution_date: NaiveDate) -> Result<Vec<ScheduledTransfer>>;
    /// Scheduling date within `[from, to]`, most recent first.
    fn list_scheduled_between(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<ScheduledTransfer>>;
    /// Execution date within `[from, to]`, earliest first.
    fn list_executing_between(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<ScheduledTransfer>>;
    fn count_by_source_account(&self, source_account: &str) -> Result<i64>;
}

/// Trait for transfer scheduling operations
#[async_trait]
pub trait TransferServiceTrait: Send + Sync {
    async fn schedule_transfer(&self, request: NewTransfer) -> Result<ScheduledTransfer>;
    fn quote_fee(
        &self,
        amount: Option<Decimal>,
        execution_date: Option<NaiveDate>,
    ) -> Result<TransferQuote>;
    fn get_transfer(&self, transfer_id: &str) -> Result<ScheduledTransfer>;
    fn list_transfers(&self) -> Result<Vec<ScheduledTransfer>>;
    fn list_by_source_account(&self, source_account: &str) -> Result<Vec<ScheduledTransfer>>;
    fn list_by_execution_date(&self, execution_date: NaiveDate) -> Result<Vec<ScheduledTransfer>>;
    fn list_scheduled_between(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<ScheduledTransfer>>;
    fn list_executing_between(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<ScheduledTransfer>>;
    fn count_by_source_account(&self, source_account: &str) -> Result<i64>;
    fn fee_rules(&self) -> Vec<String>;
}

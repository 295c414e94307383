use async_trait::async_trait;
use chrono::NaiveDate;
use diesel::prelude::*;
use diesel::SqliteConnection;
use log::debug;
use std::sync::Arc;
use uuid::Uuid;

use transfer_scheduler_core::transfers::{
    NewScheduledTransfer, ScheduledTransfer, TransferRepositoryTrait,
};
use transfer_scheduler_core::Result;

use super::model::{NewScheduledTransferDB, ScheduledTransferDB};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::scheduled_transfers;
use crate::schema::scheduled_transfers::dsl::*;

pub struct TransferRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl TransferRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        TransferRepository { pool, writer }
    }

    fn to_domain(rows: Vec<ScheduledTransferDB>) -> Result<Vec<ScheduledTransfer>> {
        rows.into_iter().map(ScheduledTransfer::try_from).collect()
    }
}

#[async_trait]
impl TransferRepositoryTrait for TransferRepository {
    async fn create(&self, new_transfer: NewScheduledTransfer) -> Result<ScheduledTransfer> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<ScheduledTransfer> {
                let row = NewScheduledTransferDB::from_domain(
                    Uuid::new_v4().to_string(),
                    chrono::Utc::now().naive_utc(),
                    new_transfer,
                );

                let result_db = diesel::insert_into(scheduled_transfers::table)
                    .values(&row)
                    .returning(ScheduledTransferDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                debug!("Inserted scheduled transfer {}", result_db.id);
                ScheduledTransfer::try_from(result_db)
            })
            .await
    }

    fn get_by_id(&self, transfer_id: &str) -> Result<ScheduledTransfer> {
        let mut conn = get_connection(&self.pool)?;
        let row = scheduled_transfers
            .find(transfer_id)
            .select(ScheduledTransferDB::as_select())
            .first::<ScheduledTransferDB>(&mut conn)
            .map_err(StorageError::from)?;
        ScheduledTransfer::try_from(row)
    }

    fn list_all(&self) -> Result<Vec<ScheduledTransfer>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = scheduled_transfers
            .select(ScheduledTransferDB::as_select())
            .order((scheduled_date.desc(), created_at.desc()))
            .load::<ScheduledTransferDB>(&mut conn)
            .map_err(StorageError::from)?;
        Self::to_domain(rows)
    }

    fn list_by_source_account(&self, account: &str) -> Result<Vec<ScheduledTransfer>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = scheduled_transfers
            .filter(source_account.eq(account))
            .select(ScheduledTransferDB::as_select())
            .order((scheduled_date.desc(), created_at.desc()))
            .load::<ScheduledTransferDB>(&mut conn)
            .map_err(StorageError::from)?;
        Self::to_domain(rows)
    }

    fn list_by_execution_date(&self, date: NaiveDate) -> Result<Vec<ScheduledTransfer>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = scheduled_transfers
            .filter(execution_date.eq(date))
            .select(ScheduledTransferDB::as_select())
            .order(created_at.asc())
            .load::<ScheduledTransferDB>(&mut conn)
            .map_err(StorageError::from)?;
        Self::to_domain(rows)
    }

    fn list_scheduled_between(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<ScheduledTransfer>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = scheduled_transfers
            .filter(scheduled_date.between(from, to))
            .select(ScheduledTransferDB::as_select())
            .order((scheduled_date.desc(), created_at.desc()))
            .load::<ScheduledTransferDB>(&mut conn)
            .map_err(StorageError::from)?;
        Self::to_domain(rows)
    }

    fn list_executing_between(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<ScheduledTransfer>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = scheduled_transfers
            .filter(execution_date.between(from, to))
            .select(ScheduledTransferDB::as_select())
            .order((execution_date.asc(), created_at.asc()))
            .load::<ScheduledTransferDB>(&mut conn)
            .map_err(StorageError::from)?;
        Self::to_domain(rows)
    }

    fn count_by_source_account(&self, account: &str) -> Result<i64> {
        let mut conn = get_connection(&self.pool)?;
        let total = scheduled_transfers
            .filter(source_account.eq(account))
            .count()
            .get_result::<i64>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{create_pool, run_migrations, write_actor::spawn_writer};
    use rust_decimal_macros::dec;
    use tempfile::tempdir;
    use transfer_scheduler_core::errors::{DatabaseError, Error};

    async fn create_test_repository() -> (TransferRepository, tempfile::TempDir) {
        let temp_dir = tempdir().expect("Failed to create temp directory");
        let db_path = temp_dir.path().join("test.db");
        let db_path_str = db_path.to_string_lossy().to_string();

        let pool = create_pool(&db_path_str).expect("Failed to create pool");
        run_migrations(&pool).expect("Failed to run migrations");
        let writer = spawn_writer((*pool).clone());

        (TransferRepository::new(Arc::clone(&pool), writer), temp_dir)
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn new_transfer(
        source: &str,
        scheduled: NaiveDate,
        execution: NaiveDate,
    ) -> NewScheduledTransfer {
        NewScheduledTransfer::new(
            source.to_string(),
            "0987654321".to_string(),
            dec!(1000.00),
            dec!(17.00),
            execution,
            scheduled,
        )
    }

    #[tokio::test]
    async fn test_create_and_get_by_id() {
        let (repo, _dir) = create_test_repository().await;

        let created = repo
            .create(new_transfer("1234567890", date(2025, 3, 1), date(2025, 4, 15)))
            .await
            .unwrap();

        assert!(!created.id.is_empty());
        assert_eq!(created.lead_days, 45);
        assert_eq!(created.amount, dec!(1000.00));
        assert_eq!(created.fee.to_string(), "17.00");

        let loaded = repo.get_by_id(&created.id).unwrap();
        assert_eq!(loaded, created);
    }

    #[tokio::test]
    async fn test_get_by_id_missing_is_not_found() {
        let (repo, _dir) = create_test_repository().await;

        let result = repo.get_by_id("does-not-exist");
        assert!(matches!(
            result,
            Err(Error::Database(DatabaseError::NotFound(_)))
        ));
    }

    #[tokio::test]
    async fn test_ids_are_unique() {
        let (repo, _dir) = create_test_repository().await;
        let first = repo
            .create(new_transfer("1234567890", date(2025, 3, 1), date(2025, 3, 1)))
            .await
            .unwrap();
        let second = repo
            .create(new_transfer("1234567890", date(2025, 3, 1), date(2025, 3, 1)))
            .await
            .unwrap();
        assert_ne!(first.id, second.id);
    }

    #[tokio::test]
    async fn test_listing_and_counting_by_source_account() {
        let (repo, _dir) = create_test_repository().await;
        repo.create(new_transfer("1111111111", date(2025, 3, 1), date(2025, 3, 25)))
            .await
            .unwrap();
        repo.create(new_transfer("1111111111", date(2025, 3, 5), date(2025, 4, 20)))
            .await
            .unwrap();
        repo.create(new_transfer("2222222222", date(2025, 3, 3), date(2025, 3, 3)))
            .await
            .unwrap();

        let all = repo.list_all().unwrap();
        assert_eq!(all.len(), 3);
        let scheduled: Vec<NaiveDate> = all.iter().map(|t| t.scheduled_date).collect();
        assert_eq!(
            scheduled,
            vec![date(2025, 3, 5), date(2025, 3, 3), date(2025, 3, 1)]
        );

        let by_account = repo.list_by_source_account("1111111111").unwrap();
        assert_eq!(by_account.len(), 2);
        assert_eq!(by_account[0].scheduled_date, date(2025, 3, 5));

        assert_eq!(repo.count_by_source_account("1111111111").unwrap(), 2);
        assert_eq!(repo.count_by_source_account("2222222222").unwrap(), 1);
        assert_eq!(repo.count_by_source_account("3333333333").unwrap(), 0);
    }

    #[tokio::test]
    async fn test_date_queries() {
        let (repo, _dir) = create_test_repository().await;
        repo.create(new_transfer("1111111111", date(2025, 3, 1), date(2025, 3, 25)))
            .await
            .unwrap();
        repo.create(new_transfer("1111111111", date(2025, 3, 2), date(2025, 4, 20)))
            .await
            .unwrap();
        repo.create(new_transfer("2222222222", date(2025, 3, 10), date(2025, 3, 25)))
            .await
            .unwrap();

        assert_eq!(repo.list_by_execution_date(date(2025, 3, 25)).unwrap().len(), 2);
        assert!(repo.list_by_execution_date(date(2025, 3, 26)).unwrap().is_empty());

        let scheduled = repo
            .list_scheduled_between(date(2025, 3, 1), date(2025, 3, 2))
            .unwrap();
        assert_eq!(scheduled.len(), 2);

        let executing = repo
            .list_executing_between(date(2025, 3, 1), date(2025, 4, 30))
            .unwrap();
        let execution_dates: Vec<NaiveDate> = executing.iter().map(|t| t.execution_date).collect();
        assert_eq!(
            execution_dates,
            vec![date(2025, 3, 25), date(2025, 3, 25), date(2025, 4, 20)]
        );

        let inclusive = repo
            .list_executing_between(date(2025, 4, 20), date(2025, 4, 20))
            .unwrap();
        assert_eq!(inclusive.len(), 1);
    }
}

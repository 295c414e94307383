//! SQLite storage implementation for scheduled transfers.

mod model;
mod repository;

pub use model::{NewScheduledTransferDB, ScheduledTransferDB};
pub use repository::TransferRepository;

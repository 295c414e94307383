//! SQLite storage implementation for the transfer scheduler.
//!
//! This crate provides all database-related functionality using Diesel ORM with SQLite.
//! It implements the repository traits defined in `transfer-scheduler-core` and contains:
//! - Database connection pooling and management
//! - Diesel migrations
//! - Repository implementations
//! - Database-specific model types (with Diesel derives)
//!
//! This crate is the only place in the application where Diesel dependencies exist.
//!
//! ```text
//!   core (fees, scheduling rules)
//!              │
//!              ▼
//!   storage-sqlite (this crate)
//!              │
//!              ▼
//!          SQLite DB
//! ```

pub mod db;
pub mod errors;
pub mod schema;

// Repository implementations
pub mod transfers;

// Re-export database utilities
pub use db::{
    create_pool, get_connection, init, run_migrations, DbConnection, DbPool, WriteHandle,
};

// Re-export storage errors and conversion helpers
pub use errors::{IntoCore, StorageError};

// Re-export from transfer-scheduler-core for convenience
pub use transfer_scheduler_core::errors::{DatabaseError, Error, Result};

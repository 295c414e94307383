//! Transfer Scheduler Core - fee engine, domain entities, services, and traits.
//!
//! This crate contains the business rules for scheduling future-dated
//! transfers. It is database-agnostic and defines traits that are implemented
//! by the `storage-sqlite` crate.

pub mod constants;
pub mod errors;
pub mod fees;
pub mod transfers;
pub mod utils;

// Re-export error types
pub use errors::Error;
pub use errors::Result;

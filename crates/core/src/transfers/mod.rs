//! Transfers module - domain models, scheduling service, and traits.

mod transfers_errors;
mod transfers_model;
mod transfers_service;
mod transfers_traits;


pub use transfers_errors::TransferError;
pub use transfers_model::{
    validate_account_number, NewScheduledTransfer, NewTransfer, ScheduledTransfer, TransferQuote,
};
pub use transfers_service::TransferService;
pub use transfers_traits::{TransferRepositoryTrait, TransferServiceTrait};

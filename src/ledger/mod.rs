//! Ledger & Request-Approval core
//!
//! The only part of the platform allowed to move money. Submodules:
//!
//! - [`types`] - transaction records and the status state machine
//! - [`error`] - typed failure taxonomy with API codes
//! - [`balance`] - the single code path that mutates user balances
//! - [`txdb`] - transaction row persistence with CAS transitions
//! - [`engine`] - the request lifecycle operations

pub mod balance;
pub mod engine;
pub mod error;
pub mod txdb;
pub mod types;

pub use balance::BalanceStore;
pub use engine::{LedgerEngine, TxReceipt, validate_request};
pub use error::LedgerError;
pub use txdb::TxStore;
pub use types::{Decision, Transaction, TxStatus, TxType};

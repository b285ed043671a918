//! Vaultex - Investment Platform Ledger
//!
//! The ledger & request-approval core of the Vaultex investment
//! platform: users deposit funds, commit them to time-bound plans,
//! accrue daily profit, and withdraw; admins approve or reject the
//! pending requests.
//!
//! # Modules
//!
//! - [`ledger`] - balance store, transaction ledger, request lifecycle engine
//! - [`investment`] - plans, investments, daily accrual batch
//! - [`gateway`] - axum HTTP surface
//! - [`config`] - YAML application config
//! - [`db`] - PostgreSQL pool and schema bootstrap
//! - [`logging`] - tracing setup

pub mod config;
pub mod db;
pub mod gateway;
pub mod investment;
pub mod ledger;
pub mod logging;

// Convenient re-exports at crate root
pub use config::AppConfig;
pub use db::Database;
pub use investment::{AccrualEngine, AccrualReport, Investment, InvestmentEngine, InvestmentPlan};
pub use ledger::{Decision, LedgerEngine, LedgerError, Transaction, TxStatus, TxType};

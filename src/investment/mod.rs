//! Investments & daily profit accrual
//!
//! - [`types`] - plans and investment records
//! - [`db`] - persistence, including the accrual idempotency marks
//! - [`engine`] - committing funds to a plan
//! - [`accrual`] - the daily profit batch

pub mod accrual;
pub mod db;
pub mod engine;
pub mod types;

pub use accrual::{AccrualEngine, AccrualOutcome, AccrualReport, daily_credit};
pub use db::InvestmentStore;
pub use engine::{InvestmentEngine, check_plan_amount};
pub use types::{Investment, InvestmentPlan, InvestmentStatus};

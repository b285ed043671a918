//! Shared application state

use std::sync::Arc;

use crate::db::Database;
use crate::investment::{AccrualEngine, InvestmentEngine};
use crate::ledger::LedgerEngine;

pub struct AppState {
    pub db: Arc<Database>,
    pub ledger: LedgerEngine,
    pub investments: InvestmentEngine,
    pub accrual: Arc<AccrualEngine>,
}

impl AppState {
    pub fn new(db: Arc<Database>, accrual: Arc<AccrualEngine>) -> Self {
        Self {
            ledger: LedgerEngine::new(db.clone()),
            investments: InvestmentEngine::new(db.clone()),
            accrual,
            db,
        }
    }
}

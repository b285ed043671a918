//! API envelope and request/response DTOs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::ledger::LedgerError;

/// Unified API response wrapper
///
/// - `code`: "OK" on success, a stable error code otherwise
/// - `msg`: short human-readable description
/// - `data`: payload, present only on success
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub code: &'static str,
    pub msg: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            code: "OK",
            msg: "ok".to_string(),
            data: Some(data),
        }
    }
}

impl ApiResponse<()> {
    pub fn from_error(err: &LedgerError) -> Self {
        Self {
            code: err.code(),
            msg: err.public_message(),
            data: None,
        }
    }
}

// --- Requests ---

#[derive(Debug, Deserialize)]
pub struct DepositRequest {
    pub amount: Decimal,
    pub method: String,
}

#[derive(Debug, Deserialize)]
pub struct WithdrawRequest {
    pub amount: Decimal,
    pub method: String,
    pub details: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ResolveRequest {
    /// "approved" or "rejected"
    pub decision: String,
}

#[derive(Debug, Deserialize)]
pub struct InvestRequest {
    pub plan_id: i32,
    pub amount: Decimal,
}

#[derive(Debug, Deserialize)]
pub struct AccrualRunRequest {
    /// Defaults to today when omitted.
    pub accrual_date: Option<NaiveDate>,
}

// --- Responses ---

#[derive(Debug, Serialize)]
pub struct InvestmentCreated {
    pub investment_id: Uuid,
    pub daily_profit: Decimal,
    pub days_left: i32,
    pub end_date: NaiveDate,
}

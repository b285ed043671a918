//! Ledger Error Types
//!
//! Every fund-moving operation fails with one of these before any
//! mutation is applied. Store failures are folded into an opaque
//! `Database` variant so internals never leak to callers.

use rust_decimal::Decimal;
use thiserror::Error;

/// Ledger error types
///
/// Error codes are stable strings used in API responses and logs.
#[derive(Error, Debug, Clone)]
pub enum LedgerError {
    // === Validation Errors ===
    #[error("Amount must be greater than zero")]
    InvalidAmount,

    #[error("Payment method is required")]
    MissingMethod,

    // === Precondition Errors ===
    #[error("Insufficient funds (current balance: {balance})")]
    InsufficientFunds { balance: Decimal },

    #[error("User not found")]
    UserNotFound,

    #[error("Transaction not found: {0}")]
    TransactionNotFound(String),

    #[error("Transaction has the wrong type for this operation")]
    WrongType,

    #[error("Investment plan not found or inactive")]
    PlanInactive,

    #[error("Amount out of plan range ({min} - {max})")]
    AmountOutOfRange { min: Decimal, max: Decimal },

    // === Idempotency Conflicts ===
    #[error("Transaction already resolved")]
    AlreadyResolved,

    // === System Errors ===
    #[error("Database error")]
    Database(String),
}

impl LedgerError {
    /// Stable error code for API responses and telemetry
    pub fn code(&self) -> &'static str {
        match self {
            LedgerError::InvalidAmount => "INVALID_AMOUNT",
            LedgerError::MissingMethod => "MISSING_METHOD",
            LedgerError::InsufficientFunds { .. } => "INSUFFICIENT_FUNDS",
            LedgerError::UserNotFound => "USER_NOT_FOUND",
            LedgerError::TransactionNotFound(_) => "TRANSACTION_NOT_FOUND",
            LedgerError::WrongType => "WRONG_TYPE",
            LedgerError::PlanInactive => "PLAN_INACTIVE",
            LedgerError::AmountOutOfRange { .. } => "AMOUNT_OUT_OF_RANGE",
            LedgerError::AlreadyResolved => "ALREADY_RESOLVED",
            LedgerError::Database(_) => "DATABASE_ERROR",
        }
    }

    /// HTTP status code suggestion for the gateway
    pub fn http_status(&self) -> u16 {
        match self {
            LedgerError::InvalidAmount | LedgerError::MissingMethod => 400,
            LedgerError::InsufficientFunds { .. }
            | LedgerError::PlanInactive
            | LedgerError::AmountOutOfRange { .. } => 422,
            LedgerError::UserNotFound | LedgerError::TransactionNotFound(_) => 404,
            LedgerError::WrongType => 422,
            LedgerError::AlreadyResolved => 409,
            LedgerError::Database(_) => 500,
        }
    }

    /// Caller-facing message. Database errors are reported opaquely;
    /// everything else carries its specific reason.
    pub fn public_message(&self) -> String {
        match self {
            LedgerError::Database(_) => "Service temporarily unavailable, try again".to_string(),
            other => other.to_string(),
        }
    }
}

impl From<sqlx::Error> for LedgerError {
    fn from(e: sqlx::Error) -> Self {
        LedgerError::Database(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_error_codes() {
        assert_eq!(LedgerError::InvalidAmount.code(), "INVALID_AMOUNT");
        assert_eq!(
            LedgerError::InsufficientFunds { balance: dec!(40) }.code(),
            "INSUFFICIENT_FUNDS"
        );
        assert_eq!(LedgerError::AlreadyResolved.code(), "ALREADY_RESOLVED");
    }

    #[test]
    fn test_http_status() {
        assert_eq!(LedgerError::InvalidAmount.http_status(), 400);
        assert_eq!(LedgerError::MissingMethod.http_status(), 400);
        assert_eq!(
            LedgerError::InsufficientFunds { balance: dec!(0) }.http_status(),
            422
        );
        assert_eq!(
            LedgerError::TransactionNotFound("x".into()).http_status(),
            404
        );
        assert_eq!(LedgerError::AlreadyResolved.http_status(), 409);
        assert_eq!(LedgerError::Database("boom".into()).http_status(), 500);
    }

    #[test]
    fn test_insufficient_funds_reports_balance() {
        let err = LedgerError::InsufficientFunds { balance: dec!(40.5) };
        assert!(err.to_string().contains("40.5"));
    }

    #[test]
    fn test_database_error_is_opaque() {
        let err = LedgerError::Database("connection refused to 10.0.0.3".into());
        assert!(!err.public_message().contains("10.0.0.3"));
    }
}

//! Ledger Core Types
//!
//! Transaction records and the status state machine. Status IDs are
//! stored as SMALLINT in PostgreSQL; terminal failure states are
//! negative.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

/// Transaction type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
#[repr(i16)]
pub enum TxType {
    Deposit = 1,
    Withdrawal = 2,
    Investment = 3,
    Profit = 4,
}

impl TxType {
    #[inline]
    pub fn id(&self) -> i16 {
        *self as i16
    }

    pub fn from_id(id: i16) -> Option<Self> {
        match id {
            1 => Some(TxType::Deposit),
            2 => Some(TxType::Withdrawal),
            3 => Some(TxType::Investment),
            4 => Some(TxType::Profit),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TxType::Deposit => "deposit",
            TxType::Withdrawal => "withdrawal",
            TxType::Investment => "investment",
            TxType::Profit => "profit",
        }
    }
}

impl fmt::Display for TxType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Transaction lifecycle status
///
/// The only legal transitions are PENDING -> COMPLETED and
/// PENDING -> FAILED. Terminal states never transition again; the
/// store enforces this with a CAS update keyed on the pending status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
#[repr(i16)]
pub enum TxStatus {
    Pending = 0,
    Completed = 10,
    Failed = -10,
}

impl TxStatus {
    /// Check if this is a terminal state (no more transitions possible)
    #[inline]
    pub fn is_terminal(&self) -> bool {
        matches!(self, TxStatus::Completed | TxStatus::Failed)
    }

    /// Whether `self -> next` is a legal transition
    pub fn can_transition_to(&self, next: TxStatus) -> bool {
        matches!(self, TxStatus::Pending) && next.is_terminal()
    }

    #[inline]
    pub fn id(&self) -> i16 {
        *self as i16
    }

    pub fn from_id(id: i16) -> Option<Self> {
        match id {
            0 => Some(TxStatus::Pending),
            10 => Some(TxStatus::Completed),
            -10 => Some(TxStatus::Failed),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TxStatus::Pending => "pending",
            TxStatus::Completed => "completed",
            TxStatus::Failed => "failed",
        }
    }
}

impl fmt::Display for TxStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Admin decision on a pending request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Approved,
    Rejected,
}

impl Decision {
    /// The terminal status this decision drives the transaction to
    pub fn terminal_status(&self) -> TxStatus {
        match self {
            Decision::Approved => TxStatus::Completed,
            Decision::Rejected => TxStatus::Failed,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Decision::Approved => "approved",
            Decision::Rejected => "rejected",
        }
    }
}

impl FromStr for Decision {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "approved" => Ok(Decision::Approved),
            "rejected" => Ok(Decision::Rejected),
            other => Err(format!("invalid decision: {}", other)),
        }
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One fund-moving intent, as stored in `transactions_tb`
#[derive(Debug, Clone, Serialize)]
pub struct Transaction {
    pub tx_id: Uuid,
    pub user_id: Uuid,
    pub tx_type: TxType,
    pub amount: Decimal,
    pub status: TxStatus,
    /// Opaque payment metadata, not interpreted by the ledger
    pub method: String,
    pub description: Option<String>,
    pub plan_id: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Tx[{}] {} user={} amount={} status={}",
            self.tx_id, self.tx_type, self.user_id, self.amount, self.status
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_id_roundtrip() {
        for status in [TxStatus::Pending, TxStatus::Completed, TxStatus::Failed] {
            assert_eq!(TxStatus::from_id(status.id()), Some(status));
        }
        assert_eq!(TxStatus::from_id(99), None);
        assert_eq!(TxStatus::from_id(-99), None);
    }

    #[test]
    fn test_type_id_roundtrip() {
        for tx_type in [
            TxType::Deposit,
            TxType::Withdrawal,
            TxType::Investment,
            TxType::Profit,
        ] {
            assert_eq!(TxType::from_id(tx_type.id()), Some(tx_type));
        }
        assert_eq!(TxType::from_id(0), None);
        assert_eq!(TxType::from_id(5), None);
    }

    #[test]
    fn test_terminal_states() {
        assert!(TxStatus::Completed.is_terminal());
        assert!(TxStatus::Failed.is_terminal());
        assert!(!TxStatus::Pending.is_terminal());
    }

    #[test]
    fn test_legal_transitions() {
        assert!(TxStatus::Pending.can_transition_to(TxStatus::Completed));
        assert!(TxStatus::Pending.can_transition_to(TxStatus::Failed));

        // pending -> pending is forbidden
        assert!(!TxStatus::Pending.can_transition_to(TxStatus::Pending));

        // no transitions out of a terminal state
        assert!(!TxStatus::Completed.can_transition_to(TxStatus::Failed));
        assert!(!TxStatus::Completed.can_transition_to(TxStatus::Pending));
        assert!(!TxStatus::Failed.can_transition_to(TxStatus::Completed));
    }

    #[test]
    fn test_decision_parsing() {
        assert_eq!("approved".parse::<Decision>(), Ok(Decision::Approved));
        assert_eq!("rejected".parse::<Decision>(), Ok(Decision::Rejected));
        assert!("Approved".parse::<Decision>().is_err());
        assert!("".parse::<Decision>().is_err());
    }

    #[test]
    fn test_decision_terminal_status() {
        assert_eq!(Decision::Approved.terminal_status(), TxStatus::Completed);
        assert_eq!(Decision::Rejected.terminal_status(), TxStatus::Failed);
    }
}

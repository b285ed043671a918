//! Investment Core Types

use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

/// Investment lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
#[repr(i16)]
pub enum InvestmentStatus {
    Active = 0,
    Completed = 10,
    Cancelled = -10,
}

impl InvestmentStatus {
    #[inline]
    pub fn is_terminal(&self) -> bool {
        matches!(self, InvestmentStatus::Completed | InvestmentStatus::Cancelled)
    }

    #[inline]
    pub fn id(&self) -> i16 {
        *self as i16
    }

    pub fn from_id(id: i16) -> Option<Self> {
        match id {
            0 => Some(InvestmentStatus::Active),
            10 => Some(InvestmentStatus::Completed),
            -10 => Some(InvestmentStatus::Cancelled),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            InvestmentStatus::Active => "active",
            InvestmentStatus::Completed => "completed",
            InvestmentStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for InvestmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Immutable plan reference data. The profit rate lives here as
/// `daily_percent`, a fraction of principal per day.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct InvestmentPlan {
    pub plan_id: i32,
    pub name: String,
    pub min_amount: Decimal,
    pub max_amount: Decimal,
    pub daily_percent: Decimal,
    pub duration_days: i32,
    pub is_active: bool,
}

impl InvestmentPlan {
    /// Check an investment amount against the plan range.
    pub fn amount_in_range(&self, amount: Decimal) -> bool {
        amount >= self.min_amount && amount <= self.max_amount
    }
}

/// Funds committed to a plan, as stored in `investments_tb`
#[derive(Debug, Clone, Serialize)]
pub struct Investment {
    pub investment_id: Uuid,
    pub user_id: Uuid,
    pub plan_id: i32,
    pub amount: Decimal,
    /// Snapshot of `amount * plan.daily_percent` taken at creation
    pub daily_profit: Decimal,
    pub total_profit: Decimal,
    pub days_left: i32,
    pub duration_days: i32,
    pub status: InvestmentStatus,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl Investment {
    /// Bounded payout: cumulative profit never exceeds this.
    pub fn payout_cap(&self) -> Decimal {
        self.daily_profit * Decimal::from(self.duration_days)
    }
}

impl fmt::Display for Investment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Investment[{}] user={} plan={} amount={} profit={}/{} days_left={} status={}",
            self.investment_id,
            self.user_id,
            self.plan_id,
            self.amount,
            self.total_profit,
            self.payout_cap(),
            self.days_left,
            self.status
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn plan() -> InvestmentPlan {
        InvestmentPlan {
            plan_id: 1,
            name: "Standard".to_string(),
            min_amount: dec!(100),
            max_amount: dec!(1000),
            daily_percent: dec!(0.02),
            duration_days: 30,
            is_active: true,
        }
    }

    #[test]
    fn test_status_id_roundtrip() {
        for status in [
            InvestmentStatus::Active,
            InvestmentStatus::Completed,
            InvestmentStatus::Cancelled,
        ] {
            assert_eq!(InvestmentStatus::from_id(status.id()), Some(status));
        }
        assert_eq!(InvestmentStatus::from_id(7), None);
    }

    #[test]
    fn test_amount_in_range() {
        let plan = plan();
        assert!(plan.amount_in_range(dec!(100)));
        assert!(plan.amount_in_range(dec!(1000)));
        assert!(plan.amount_in_range(dec!(550.50)));
        assert!(!plan.amount_in_range(dec!(99.99)));
        assert!(!plan.amount_in_range(dec!(1000.01)));
    }

    #[test]
    fn test_payout_cap() {
        let investment = Investment {
            investment_id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            plan_id: 1,
            amount: dec!(1000),
            daily_profit: dec!(20),
            total_profit: dec!(0),
            days_left: 30,
            duration_days: 30,
            status: InvestmentStatus::Active,
            start_date: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2026, 1, 31).unwrap(),
        };
        // 1000 x 0.02 x 30 = 600
        assert_eq!(investment.payout_cap(), dec!(600));
    }
}

//! Investment creation
//!
//! Committing funds to a plan is a single atomic unit: the balance
//! debit, the completed `investment` transaction, and the active
//! investment row land in one SQL transaction.

use std::sync::Arc;

use chrono::{Duration, Utc};
use rust_decimal::Decimal;
use tracing::info;
use uuid::Uuid;

use crate::db::Database;
use crate::ledger::{BalanceStore, LedgerError, TxStatus, TxStore, TxType};

use super::db::InvestmentStore;
use super::types::{Investment, InvestmentPlan, InvestmentStatus};

/// Validate an amount against the plan before touching any state.
pub fn check_plan_amount(plan: &InvestmentPlan, amount: Decimal) -> Result<(), LedgerError> {
    if amount <= Decimal::ZERO {
        return Err(LedgerError::InvalidAmount);
    }
    if !plan.amount_in_range(amount) {
        return Err(LedgerError::AmountOutOfRange {
            min: plan.min_amount,
            max: plan.max_amount,
        });
    }
    Ok(())
}

pub struct InvestmentEngine {
    db: Arc<Database>,
}

impl InvestmentEngine {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// Commit `amount` from the user's balance to a plan.
    pub async fn create_investment(
        &self,
        user_id: Uuid,
        plan_id: i32,
        amount: Decimal,
    ) -> Result<Investment, LedgerError> {
        let plan = InvestmentStore::get_active_plan(self.db.pool(), plan_id)
            .await?
            .ok_or(LedgerError::PlanInactive)?;
        check_plan_amount(&plan, amount)?;

        let start_date = Utc::now().date_naive();
        let end_date = start_date + Duration::days(plan.duration_days as i64);
        let investment = Investment {
            investment_id: Uuid::new_v4(),
            user_id,
            plan_id,
            amount,
            daily_profit: amount * plan.daily_percent,
            total_profit: Decimal::ZERO,
            days_left: plan.duration_days,
            duration_days: plan.duration_days,
            status: InvestmentStatus::Active,
            start_date,
            end_date,
        };

        let mut db_tx = self.db.pool().begin().await?;
        BalanceStore::debit_for_investment(&mut *db_tx, user_id, amount).await?;
        TxStore::insert(
            &mut *db_tx,
            user_id,
            TxType::Investment,
            amount,
            TxStatus::Completed,
            "balance",
            Some(&format!("Investment in plan \"{}\"", plan.name)),
            Some(plan_id),
        )
        .await?;
        InvestmentStore::insert(&mut *db_tx, &investment).await?;
        db_tx.commit().await?;

        info!(investment_id = %investment.investment_id, user_id = %user_id,
              plan_id = plan_id, amount = %amount, daily_profit = %investment.daily_profit,
              "Investment created");
        Ok(investment)
    }

    /// Active plans for the public listing.
    pub async fn active_plans(&self) -> Result<Vec<InvestmentPlan>, LedgerError> {
        InvestmentStore::active_plans(self.db.pool()).await
    }

    /// Per-user investment listing.
    pub async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<Investment>, LedgerError> {
        InvestmentStore::list_for_user(self.db.pool(), user_id, 100).await
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
    fn test_check_plan_amount_range() {
        let plan = plan();
        assert!(check_plan_amount(&plan, dec!(500)).is_ok());

        match check_plan_amount(&plan, dec!(50)) {
            Err(LedgerError::AmountOutOfRange { min, max }) => {
                assert_eq!(min, dec!(100));
                assert_eq!(max, dec!(1000));
            }
            other => panic!("Expected AmountOutOfRange, got {:?}", other),
        }

        assert!(matches!(
            check_plan_amount(&plan, dec!(1500)),
            Err(LedgerError::AmountOutOfRange { .. })
        ));
    }

    #[test]
    fn test_check_plan_amount_rejects_nonpositive() {
        let plan = plan();
        assert!(matches!(
            check_plan_amount(&plan, dec!(0)),
            Err(LedgerError::InvalidAmount)
        ));
        assert!(matches!(
            check_plan_amount(&plan, dec!(-10)),
            Err(LedgerError::InvalidAmount)
        ));
    }
}

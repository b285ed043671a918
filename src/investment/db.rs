//! Investment persistence
//!
//! Plan lookups, investment rows, and the accrual idempotency marks.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::postgres::PgRow;
use sqlx::{PgConnection, PgPool, Row};
use uuid::Uuid;

use crate::ledger::LedgerError;

use super::types::{Investment, InvestmentPlan, InvestmentStatus};

pub struct InvestmentStore;

impl InvestmentStore {
    /// Load an active plan by id.
    pub async fn get_active_plan(
        pool: &PgPool,
        plan_id: i32,
    ) -> Result<Option<InvestmentPlan>, LedgerError> {
        let plan: Option<InvestmentPlan> = sqlx::query_as(
            r#"
            SELECT plan_id, name, min_amount, max_amount, daily_percent, duration_days, is_active
            FROM investment_plans_tb
            WHERE plan_id = $1 AND is_active = TRUE
            "#,
        )
        .bind(plan_id)
        .fetch_optional(pool)
        .await?;

        Ok(plan)
    }

    /// All active plans, cheapest first.
    pub async fn active_plans(pool: &PgPool) -> Result<Vec<InvestmentPlan>, LedgerError> {
        let plans: Vec<InvestmentPlan> = sqlx::query_as(
            r#"
            SELECT plan_id, name, min_amount, max_amount, daily_percent, duration_days, is_active
            FROM investment_plans_tb
            WHERE is_active = TRUE
            ORDER BY min_amount ASC
            "#,
        )
        .fetch_all(pool)
        .await?;

        Ok(plans)
    }

    /// Insert a new active investment row.
    pub async fn insert(
        conn: &mut PgConnection,
        investment: &Investment,
    ) -> Result<(), LedgerError> {
        sqlx::query(
            r#"
            INSERT INTO investments_tb
                (investment_id, user_id, plan_id, amount, daily_profit, total_profit,
                 days_left, duration_days, status, start_date, end_date, created_at, updated_at)
            VALUES
                ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, NOW(), NOW())
            "#,
        )
        .bind(investment.investment_id)
        .bind(investment.user_id)
        .bind(investment.plan_id)
        .bind(investment.amount)
        .bind(investment.daily_profit)
        .bind(investment.total_profit)
        .bind(investment.days_left)
        .bind(investment.duration_days)
        .bind(investment.status.id())
        .bind(investment.start_date)
        .bind(investment.end_date)
        .execute(&mut *conn)
        .await?;

        Ok(())
    }

    /// Ids of all active investments (the accrual work list).
    pub async fn active_investment_ids(pool: &PgPool) -> Result<Vec<Uuid>, LedgerError> {
        let rows = sqlx::query("SELECT investment_id FROM investments_tb WHERE status = 0")
            .fetch_all(pool)
            .await?;

        Ok(rows.iter().map(|r| r.get("investment_id")).collect())
    }

    /// Fetch an investment and lock its row for the enclosing SQL
    /// transaction.
    pub async fn get_for_update(
        conn: &mut PgConnection,
        investment_id: Uuid,
    ) -> Result<Option<Investment>, LedgerError> {
        let row = sqlx::query(
            r#"
            SELECT investment_id, user_id, plan_id, amount, daily_profit, total_profit,
                   days_left, duration_days, status, start_date, end_date
            FROM investments_tb
            WHERE investment_id = $1
            FOR UPDATE
            "#,
        )
        .bind(investment_id)
        .fetch_optional(&mut *conn)
        .await?;

        row.map(|r| row_to_investment(&r)).transpose()
    }

    /// Per-user investments, newest first.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: Uuid,
        limit: i64,
    ) -> Result<Vec<Investment>, LedgerError> {
        let rows = sqlx::query(
            r#"
            SELECT investment_id, user_id, plan_id, amount, daily_profit, total_profit,
                   days_left, duration_days, status, start_date, end_date
            FROM investments_tb
            WHERE user_id = $1
            ORDER BY created_at DESC
            LIMIT $2
            "#,
        )
        .bind(user_id)
        .bind(limit)
        .fetch_all(pool)
        .await?;

        rows.iter().map(row_to_investment).collect()
    }

    /// Apply one day of accrual to the investment row: bump
    /// `total_profit`, decrement `days_left`, and flip to completed in
    /// the same statement when the last day is credited.
    pub async fn apply_accrual(
        conn: &mut PgConnection,
        investment_id: Uuid,
        credit: Decimal,
    ) -> Result<(), LedgerError> {
        sqlx::query(
            r#"
            UPDATE investments_tb
            SET total_profit = total_profit + $1,
                days_left = days_left - 1,
                status = CASE WHEN days_left - 1 <= 0 THEN 10 ELSE status END,
                updated_at = NOW()
            WHERE investment_id = $2 AND status = 0
            "#,
        )
        .bind(credit)
        .bind(investment_id)
        .execute(&mut *conn)
        .await?;

        Ok(())
    }

    /// Record the (investment, date) accrual mark. Returns false when
    /// the mark already exists, i.e. this day was already credited.
    pub async fn mark_accrued(
        conn: &mut PgConnection,
        investment_id: Uuid,
        accrual_date: NaiveDate,
        credited: Decimal,
    ) -> Result<bool, LedgerError> {
        let result = sqlx::query(
            r#"
            INSERT INTO accrual_marks_tb (investment_id, accrual_date, credited)
            VALUES ($1, $2, $3)
            ON CONFLICT (investment_id, accrual_date) DO NOTHING
            "#,
        )
        .bind(investment_id)
        .bind(accrual_date)
        .bind(credited)
        .execute(&mut *conn)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}

fn row_to_investment(row: &PgRow) -> Result<Investment, LedgerError> {
    let status_id: i16 = row.get("status");
    let status = InvestmentStatus::from_id(status_id)
        .ok_or_else(|| LedgerError::Database(format!("invalid investment status: {}", status_id)))?;

    Ok(Investment {
        investment_id: row.get("investment_id"),
        user_id: row.get("user_id"),
        plan_id: row.get("plan_id"),
        amount: row.get("amount"),
        daily_profit: row.get("daily_profit"),
        total_profit: row.get("total_profit"),
        days_left: row.get("days_left"),
        duration_days: row.get("duration_days"),
        status,
        start_date: row.get("start_date"),
        end_date: row.get("end_date"),
    })
}

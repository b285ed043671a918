//! Balance Store
//!
//! The single code path allowed to mutate `users_tb.balance`. Every
//! method is one conditional UPDATE, so the check-then-mutate sequence
//! is atomic at the store and concurrent operations on the same user
//! serialize on the row lock. Callers pass the connection of an open
//! SQL transaction so the balance effect commits or aborts together
//! with its ledger entry.

use rust_decimal::Decimal;
use sqlx::{PgConnection, Row};
use uuid::Uuid;

use super::error::LedgerError;

pub struct BalanceStore;

impl BalanceStore {
    /// Credit `amount` to the user's balance.
    pub async fn credit(
        conn: &mut PgConnection,
        user_id: Uuid,
        amount: Decimal,
    ) -> Result<(), LedgerError> {
        let result = sqlx::query(
            r#"
            UPDATE users_tb
            SET balance = balance + $1, updated_at = NOW()
            WHERE user_id = $2 AND status = 0
            "#,
        )
        .bind(amount)
        .bind(user_id)
        .execute(&mut *conn)
        .await?;

        if result.rows_affected() == 0 {
            return Err(LedgerError::UserNotFound);
        }
        Ok(())
    }

    /// Credit profit: balance and the `total_earned` audit counter move
    /// together.
    pub async fn credit_earned(
        conn: &mut PgConnection,
        user_id: Uuid,
        amount: Decimal,
    ) -> Result<(), LedgerError> {
        let result = sqlx::query(
            r#"
            UPDATE users_tb
            SET balance = balance + $1,
                total_earned = total_earned + $1,
                updated_at = NOW()
            WHERE user_id = $2 AND status = 0
            "#,
        )
        .bind(amount)
        .bind(user_id)
        .execute(&mut *conn)
        .await?;

        if result.rows_affected() == 0 {
            return Err(LedgerError::UserNotFound);
        }
        Ok(())
    }

    /// Debit `amount` only if the balance covers it.
    ///
    /// The `balance >= $1` guard in the UPDATE is the atomic
    /// read-modify-write: no interleaving can observe or produce a
    /// negative balance. On failure the current balance is reported to
    /// the caller.
    pub async fn debit_if_sufficient(
        conn: &mut PgConnection,
        user_id: Uuid,
        amount: Decimal,
    ) -> Result<(), LedgerError> {
        let result = sqlx::query(
            r#"
            UPDATE users_tb
            SET balance = balance - $1, updated_at = NOW()
            WHERE user_id = $2 AND status = 0 AND balance >= $1
            "#,
        )
        .bind(amount)
        .bind(user_id)
        .execute(&mut *conn)
        .await?;

        if result.rows_affected() == 0 {
            let balance = Self::get(conn, user_id).await?;
            return Err(LedgerError::InsufficientFunds { balance });
        }
        Ok(())
    }

    /// Conditional debit that also bumps `total_invested`.
    pub async fn debit_for_investment(
        conn: &mut PgConnection,
        user_id: Uuid,
        amount: Decimal,
    ) -> Result<(), LedgerError> {
        let result = sqlx::query(
            r#"
            UPDATE users_tb
            SET balance = balance - $1,
                total_invested = total_invested + $1,
                updated_at = NOW()
            WHERE user_id = $2 AND status = 0 AND balance >= $1
            "#,
        )
        .bind(amount)
        .bind(user_id)
        .execute(&mut *conn)
        .await?;

        if result.rows_affected() == 0 {
            let balance = Self::get(conn, user_id).await?;
            return Err(LedgerError::InsufficientFunds { balance });
        }
        Ok(())
    }

    /// Current balance for an active user.
    pub async fn get(conn: &mut PgConnection, user_id: Uuid) -> Result<Decimal, LedgerError> {
        let row = sqlx::query("SELECT balance FROM users_tb WHERE user_id = $1 AND status = 0")
            .bind(user_id)
            .fetch_optional(&mut *conn)
            .await?;

        match row {
            Some(row) => Ok(row.get("balance")),
            None => Err(LedgerError::UserNotFound),
        }
    }
}

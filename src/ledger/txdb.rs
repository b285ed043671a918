//! Transaction Ledger Store
//!
//! Append and guarded mutation of `transactions_tb` rows. Status
//! transitions go through a CAS UPDATE keyed on the pending status, so
//! a transaction leaves `pending` at most once no matter how many
//! concurrent resolutions race.

use rust_decimal::Decimal;
use sqlx::postgres::PgRow;
use sqlx::{PgConnection, PgPool, Row};
use uuid::Uuid;

use super::error::LedgerError;
use super::types::{Transaction, TxStatus, TxType};

pub struct TxStore;

impl TxStore {
    /// Insert a new transaction row and return its id.
    #[allow(clippy::too_many_arguments)]
    pub async fn insert(
        conn: &mut PgConnection,
        user_id: Uuid,
        tx_type: TxType,
        amount: Decimal,
        status: TxStatus,
        method: &str,
        description: Option<&str>,
        plan_id: Option<i32>,
    ) -> Result<Uuid, LedgerError> {
        let tx_id = Uuid::new_v4();
        sqlx::query(
            r#"
            INSERT INTO transactions_tb
                (tx_id, user_id, tx_type, amount, status, method, description, plan_id, created_at, updated_at)
            VALUES
                ($1, $2, $3, $4, $5, $6, $7, $8, NOW(), NOW())
            "#,
        )
        .bind(tx_id)
        .bind(user_id)
        .bind(tx_type.id())
        .bind(amount)
        .bind(status.id())
        .bind(method)
        .bind(description)
        .bind(plan_id)
        .execute(&mut *conn)
        .await?;

        Ok(tx_id)
    }

    /// Fetch a transaction and lock its row for the rest of the
    /// enclosing SQL transaction. Concurrent resolutions of the same
    /// transaction serialize here.
    pub async fn get_for_update(
        conn: &mut PgConnection,
        tx_id: Uuid,
    ) -> Result<Option<Transaction>, LedgerError> {
        let row = sqlx::query(
            r#"
            SELECT tx_id, user_id, tx_type, amount, status, method, description, plan_id,
                   created_at, updated_at
            FROM transactions_tb
            WHERE tx_id = $1
            FOR UPDATE
            "#,
        )
        .bind(tx_id)
        .fetch_optional(&mut *conn)
        .await?;

        row.map(|r| row_to_transaction(&r)).transpose()
    }

    /// Guarded transition: flip the status only if the row is still
    /// pending. Returns false when another resolution got there first.
    pub async fn resolve_if_pending(
        conn: &mut PgConnection,
        tx_id: Uuid,
        new_status: TxStatus,
    ) -> Result<bool, LedgerError> {
        let result = sqlx::query(
            r#"
            UPDATE transactions_tb
            SET status = $1, updated_at = NOW()
            WHERE tx_id = $2 AND status = $3
            "#,
        )
        .bind(new_status.id())
        .bind(tx_id)
        .bind(TxStatus::Pending.id())
        .execute(&mut *conn)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Per-user history, newest first.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: Uuid,
        limit: i64,
    ) -> Result<Vec<Transaction>, LedgerError> {
        let rows = sqlx::query(
            r#"
            SELECT tx_id, user_id, tx_type, amount, status, method, description, plan_id,
                   created_at, updated_at
            FROM transactions_tb
            WHERE user_id = $1
            ORDER BY created_at DESC
            LIMIT $2
            "#,
        )
        .bind(user_id)
        .bind(limit)
        .fetch_all(pool)
        .await?;

        rows.iter().map(row_to_transaction).collect()
    }

    /// Pending requests of one type, oldest first (admin review queue).
    pub async fn list_pending(
        pool: &PgPool,
        tx_type: TxType,
        limit: i64,
    ) -> Result<Vec<Transaction>, LedgerError> {
        let rows = sqlx::query(
            r#"
            SELECT tx_id, user_id, tx_type, amount, status, method, description, plan_id,
                   created_at, updated_at
            FROM transactions_tb
            WHERE tx_type = $1 AND status = $2
            ORDER BY created_at ASC
            LIMIT $3
            "#,
        )
        .bind(tx_type.id())
        .bind(TxStatus::Pending.id())
        .bind(limit)
        .fetch_all(pool)
        .await?;

        rows.iter().map(row_to_transaction).collect()
    }
}

fn row_to_transaction(row: &PgRow) -> Result<Transaction, LedgerError> {
    let type_id: i16 = row.get("tx_type");
    let tx_type = TxType::from_id(type_id)
        .ok_or_else(|| LedgerError::Database(format!("invalid tx_type id: {}", type_id)))?;

    let status_id: i16 = row.get("status");
    let status = TxStatus::from_id(status_id)
        .ok_or_else(|| LedgerError::Database(format!("invalid status id: {}", status_id)))?;

    Ok(Transaction {
        tx_id: row.get("tx_id"),
        user_id: row.get("user_id"),
        tx_type,
        amount: row.get("amount"),
        status,
        method: row.get("method"),
        description: row.get("description"),
        plan_id: row.get("plan_id"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    })
}

//! HTTP handlers for the ledger surface
//!
//! The boundary is trusted: user-initiated calls carry the
//! authenticated user id in the `X-User-Id` header (token
//! verification happens upstream), admin calls arrive through the
//! admin reverse proxy. No handler contains business rules - they
//! parse, delegate to an engine, and map typed errors to statuses.

use std::str::FromStr;
use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
};
use serde_json::{Value, json};
use uuid::Uuid;

use crate::ledger::{Decision, LedgerError, TxType};

use super::state::AppState;
use super::types::{
    AccrualRunRequest, ApiResponse, DepositRequest, InvestRequest, InvestmentCreated,
    ResolveRequest, WithdrawRequest,
};

type Rejection = (StatusCode, Json<ApiResponse<()>>);

fn reject(err: LedgerError) -> Rejection {
    let status =
        StatusCode::from_u16(err.http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(ApiResponse::from_error(&err)))
}

fn bad_request(code: &'static str, msg: &str) -> Rejection {
    (
        StatusCode::BAD_REQUEST,
        Json(ApiResponse {
            code,
            msg: msg.to_string(),
            data: None,
        }),
    )
}

/// Extract the trusted user identity supplied by the auth boundary.
fn user_id_from(headers: &HeaderMap) -> Result<Uuid, Rejection> {
    let raw = headers
        .get("x-user-id")
        .and_then(|v| v.to_str().ok())
        .ok_or((
            StatusCode::UNAUTHORIZED,
            Json(ApiResponse {
                code: "MISSING_IDENTITY",
                msg: "X-User-Id header required".to_string(),
                data: None,
            }),
        ))?;
    Uuid::parse_str(raw).map_err(|_| bad_request("INVALID_USER_ID", "Malformed user id"))
}

fn parse_decision(raw: &str) -> Result<Decision, Rejection> {
    Decision::from_str(raw)
        .map_err(|_| bad_request("INVALID_DECISION", "Decision must be approved or rejected"))
}

/// POST /api/v1/deposits
pub async fn create_deposit(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(req): Json<DepositRequest>,
) -> Result<Json<ApiResponse<crate::ledger::TxReceipt>>, Rejection> {
    let user_id = user_id_from(&headers)?;
    let receipt = state
        .ledger
        .create_deposit(user_id, req.amount, &req.method)
        .await
        .map_err(reject)?;
    Ok(Json(ApiResponse::success(receipt)))
}

/// POST /api/v1/withdrawals
pub async fn create_withdrawal(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(req): Json<WithdrawRequest>,
) -> Result<Json<ApiResponse<crate::ledger::TxReceipt>>, Rejection> {
    let user_id = user_id_from(&headers)?;
    let receipt = state
        .ledger
        .create_withdrawal(user_id, req.amount, &req.method, req.details.as_deref())
        .await
        .map_err(reject)?;
    Ok(Json(ApiResponse::success(receipt)))
}

/// PUT /api/v1/admin/deposit-requests/{id}
pub async fn resolve_deposit(
    State(state): State<Arc<AppState>>,
    Path(tx_id): Path<Uuid>,
    Json(req): Json<ResolveRequest>,
) -> Result<Json<ApiResponse<Value>>, Rejection> {
    let decision = parse_decision(&req.decision)?;
    state
        .ledger
        .resolve_deposit(tx_id, decision)
        .await
        .map_err(reject)?;
    Ok(Json(ApiResponse::success(
        json!({ "tx_id": tx_id, "decision": decision.as_str() }),
    )))
}

/// PUT /api/v1/admin/withdrawal-requests/{id}
pub async fn resolve_withdrawal(
    State(state): State<Arc<AppState>>,
    Path(tx_id): Path<Uuid>,
    Json(req): Json<ResolveRequest>,
) -> Result<Json<ApiResponse<Value>>, Rejection> {
    let decision = parse_decision(&req.decision)?;
    state
        .ledger
        .resolve_withdrawal(tx_id, decision)
        .await
        .map_err(reject)?;
    Ok(Json(ApiResponse::success(
        json!({ "tx_id": tx_id, "decision": decision.as_str() }),
    )))
}

/// POST /api/v1/investments
pub async fn create_investment(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(req): Json<InvestRequest>,
) -> Result<Json<ApiResponse<InvestmentCreated>>, Rejection> {
    let user_id = user_id_from(&headers)?;
    let investment = state
        .investments
        .create_investment(user_id, req.plan_id, req.amount)
        .await
        .map_err(reject)?;
    Ok(Json(ApiResponse::success(InvestmentCreated {
        investment_id: investment.investment_id,
        daily_profit: investment.daily_profit,
        days_left: investment.days_left,
        end_date: investment.end_date,
    })))
}

/// GET /api/v1/plans
pub async fn list_plans(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<crate::investment::InvestmentPlan>>>, Rejection> {
    let plans = state.investments.active_plans().await.map_err(reject)?;
    Ok(Json(ApiResponse::success(plans)))
}

/// GET /api/v1/users/{id}/transactions
pub async fn list_transactions(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<ApiResponse<Vec<crate::ledger::Transaction>>>, Rejection> {
    let txs = crate::ledger::TxStore::list_for_user(state.db.pool(), user_id, 100)
        .await
        .map_err(reject)?;
    Ok(Json(ApiResponse::success(txs)))
}

/// GET /api/v1/users/{id}/investments
pub async fn list_investments(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<ApiResponse<Vec<crate::investment::Investment>>>, Rejection> {
    let investments = state
        .investments
        .list_for_user(user_id)
        .await
        .map_err(reject)?;
    Ok(Json(ApiResponse::success(investments)))
}

/// GET /api/v1/admin/requests
///
/// Pending deposit and withdrawal requests for the review queue.
pub async fn list_pending_requests(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Value>>, Rejection> {
    let deposits = crate::ledger::TxStore::list_pending(state.db.pool(), TxType::Deposit, 200)
        .await
        .map_err(reject)?;
    let withdrawals =
        crate::ledger::TxStore::list_pending(state.db.pool(), TxType::Withdrawal, 200)
            .await
            .map_err(reject)?;
    Ok(Json(ApiResponse::success(json!({
        "deposits": deposits,
        "withdrawals": withdrawals,
    }))))
}

/// POST /api/v1/admin/accrual/run
pub async fn run_accrual(
    State(state): State<Arc<AppState>>,
    Json(req): Json<AccrualRunRequest>,
) -> Result<Json<ApiResponse<crate::investment::AccrualReport>>, Rejection> {
    let date = req
        .accrual_date
        .unwrap_or_else(|| chrono::Utc::now().date_naive());
    let report = state.accrual.run_for_date(date).await.map_err(reject)?;
    Ok(Json(ApiResponse::success(report)))
}

/// GET /health
pub async fn health(State(state): State<Arc<AppState>>) -> Result<Json<Value>, StatusCode> {
    match state.db.health_check().await {
        Ok(()) => Ok(Json(json!({ "status": "ok" }))),
        Err(e) => {
            tracing::error!(error = %e, "Health check failed");
            Err(StatusCode::SERVICE_UNAVAILABLE)
        }
    }
}

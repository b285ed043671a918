//! HTTP gateway
//!
//! Thin axum adapter over the ledger and investment engines. Auth and
//! content CRUD live elsewhere; this surface only exposes the
//! fund-moving calls and their listings.

pub mod handlers;
pub mod state;
pub mod types;

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post, put},
};

pub use state::AppState;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/v1/deposits", post(handlers::create_deposit))
        .route("/api/v1/withdrawals", post(handlers::create_withdrawal))
        .route(
            "/api/v1/admin/deposit-requests/{id}",
            put(handlers::resolve_deposit),
        )
        .route(
            "/api/v1/admin/withdrawal-requests/{id}",
            put(handlers::resolve_withdrawal),
        )
        .route("/api/v1/investments", post(handlers::create_investment))
        .route("/api/v1/plans", get(handlers::list_plans))
        .route(
            "/api/v1/users/{id}/transactions",
            get(handlers::list_transactions),
        )
        .route(
            "/api/v1/users/{id}/investments",
            get(handlers::list_investments),
        )
        .route("/api/v1/admin/requests", get(handlers::list_pending_requests))
        .route("/api/v1/admin/accrual/run", post(handlers::run_accrual))
        .route("/health", get(handlers::health))
        .with_state(state)
}

//! Wallet summary HTTP handlers.
//!
//! - GET /api/v1/wallet/transactions - Merged ledger of payments, withdrawals and gift cards
//! - GET /api/v1/wallet/total-balance - Platform balance and change since yesterday
//! - GET /api/v1/wallet/pending-withdrawals - Pending withdrawal totals
//! - GET /api/v1/wallet/todays-earnings - Today's payments against yesterday's
//! - GET /api/v1/wallet/platform-fees - Fee-bearing payment totals

use axum::{Json, extract::State};

use crate::{
    error::AppError,
    models::wallet::{
        PendingWithdrawalsResponse, PlatformFeesResponse, TodaysEarningsResponse,
        TotalBalanceResponse, WalletTransactionsResponse,
    },
    services::wallet_service,
    state::AppState,
};

/// Every payment, withdrawal and gift card as one ledger, newest first.
pub async fn list_transactions(
    State(state): State<AppState>,
) -> Result<Json<WalletTransactionsResponse>, AppError> {
    let transactions = wallet_service::get_all_wallet_transactions(state.store.as_ref()).await?;

    Ok(Json(WalletTransactionsResponse {
        message: format!("Found {} wallet transaction(s).", transactions.len()),
        total: transactions.len(),
        data: transactions,
    }))
}

/// Platform-wide balance.
///
/// # Response (200 OK)
///
/// ```json
/// {
///   "message": "Total wallet balance retrieved successfully.",
///   "total_balance_cents": 12000,
///   "percent_change": "4.35%"
/// }
/// ```
pub async fn get_total_balance(
    State(state): State<AppState>,
) -> Result<Json<TotalBalanceResponse>, AppError> {
    let summary =
        wallet_service::get_total_wallet_balance(state.store.as_ref(), state.clock.as_ref())
            .await?;

    Ok(Json(TotalBalanceResponse {
        message: "Total wallet balance retrieved successfully.".to_string(),
        total_balance_cents: summary.total_balance_cents,
        percent_change: summary.percent_change,
    }))
}

pub async fn get_pending_withdrawals(
    State(state): State<AppState>,
) -> Result<Json<PendingWithdrawalsResponse>, AppError> {
    let pending = wallet_service::get_pending_withdrawals(state.store.as_ref()).await?;

    Ok(Json(PendingWithdrawalsResponse {
        message: "Pending withdrawals retrieved successfully.".to_string(),
        total_pending_amount_cents: pending.total_pending_amount_cents,
        total_requests: pending.total_requests,
    }))
}

pub async fn get_todays_earnings(
    State(state): State<AppState>,
) -> Result<Json<TodaysEarningsResponse>, AppError> {
    let earnings =
        wallet_service::get_todays_earnings(state.store.as_ref(), state.clock.as_ref()).await?;

    Ok(Json(TodaysEarningsResponse {
        message: "Today's earnings retrieved successfully.".to_string(),
        today_total_cents: earnings.today_total_cents,
        percent_change: earnings.percent_change,
    }))
}

pub async fn get_platform_fees(
    State(state): State<AppState>,
) -> Result<Json<PlatformFeesResponse>, AppError> {
    let fees = wallet_service::get_platform_fees(state.store.as_ref()).await?;

    Ok(Json(PlatformFeesResponse {
        message: "Platform fees retrieved successfully.".to_string(),
        total_fee_amount_cents: fees.total_fee_amount_cents,
        avg_fee_rate: fees.avg_fee_rate,
    }))
}

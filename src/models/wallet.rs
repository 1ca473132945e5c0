//! Wallet summary response types.
//!
//! Wallet endpoints never store anything of their own; every type here is a
//! view computed from payments, withdrawals and gift cards.

use serde::Serialize;
use uuid::Uuid;

/// Uniform row of the merged wallet ledger.
///
/// # JSON Example
///
/// ```json
/// {
///   "id": "550e8400-e29b-41d4-a716-446655440000",
///   "user": "Acme Ltd",
///   "type": "Withdrawal",
///   "amount_cents": 2500,
///   "description": "Withdrawal request by Acme Ltd",
///   "status": "Pending",
///   "balance_cents": 10000,
///   "date": "2025-12-21",
///   "time": "04:05 PM"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WalletTransaction {
    pub id: Uuid,
    pub user: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub amount_cents: i64,
    pub description: String,
    pub status: String,
    pub balance_cents: i64,
    pub date: String,
    pub time: String,
}

#[derive(Debug, Serialize)]
pub struct WalletTransactionsResponse {
    pub message: String,
    pub total: usize,
    pub data: Vec<WalletTransaction>,
}

#[derive(Debug, Serialize)]
pub struct TotalBalanceResponse {
    pub message: String,
    pub total_balance_cents: i64,
    /// Change against yesterday's balance, e.g. `"12.50%"`
    pub percent_change: String,
}

#[derive(Debug, Serialize)]
pub struct PendingWithdrawalsResponse {
    pub message: String,
    pub total_pending_amount_cents: i64,
    pub total_requests: usize,
}

#[derive(Debug, Serialize)]
pub struct TodaysEarningsResponse {
    pub message: String,
    pub today_total_cents: i64,
    pub percent_change: String,
}

#[derive(Debug, Serialize)]
pub struct PlatformFeesResponse {
    pub message: String,
    pub total_fee_amount_cents: i64,
    /// Mean amount of fee-bearing payments in cents, two decimals
    pub avg_fee_rate: String,
}

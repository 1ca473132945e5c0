//! Payment and withdrawal records.
//!
//! Both tables are written by other parts of the platform; this service only
//! reads them to build wallet summaries.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// Status value marking a withdrawal that has not been paid out yet.
pub const PENDING_STATUS: &str = "Pending";

/// Represents a payment record from the `payments` table.
#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct Payment {
    pub id: Uuid,

    pub client: String,

    pub business: String,

    /// Amount in cents
    pub amount_cents: i64,

    /// Fee charged on this payment, in cents; positive marks a fee-bearing payment
    pub fee_cents: i64,

    /// Set (non-empty) when the payment is a refund
    pub refund_type: Option<String>,

    pub status: String,

    pub created_at: DateTime<Utc>,
}

impl Payment {
    pub fn is_refund(&self) -> bool {
        self.refund_type.as_deref().is_some_and(|t| !t.is_empty())
    }

    pub fn has_fee(&self) -> bool {
        self.fee_cents > 0
    }
}

/// Represents a withdrawal request from the `withdrawals` table.
#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct Withdrawal {
    pub id: Uuid,

    pub business_name: String,

    /// Amount requested, in cents
    pub amount_cents: i64,

    /// Business balance snapshot at request time, in cents
    pub current_balance_cents: i64,

    pub status: String,

    pub created_at: DateTime<Utc>,
}

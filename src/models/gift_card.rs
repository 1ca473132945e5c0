//! Gift card data models and API request/response types.
//!
//! This module defines:
//! - `GiftCard`: Database entity representing an issued gift card
//! - `GiftCardStatus`: Lifecycle state of a card
//! - Request bodies for issuing and refunding cards
//! - Response bodies returned by the gift card endpoints

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Prefix shared by every generated gift card code.
pub const CODE_PREFIX: &str = "KHS";

/// Lifecycle state of a gift card.
///
/// Cards start `ACTIVE`. The only transitions are ACTIVE → INACTIVE
/// (manual deactivation) and ACTIVE → EXPIRED (automatic expiry).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "gift_card_status", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum GiftCardStatus {
    Active,
    Inactive,
    Expired,
}

impl GiftCardStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            GiftCardStatus::Active => "ACTIVE",
            GiftCardStatus::Inactive => "INACTIVE",
            GiftCardStatus::Expired => "EXPIRED",
        }
    }
}

/// Represents a gift card record from the database.
///
/// # Database Table
///
/// Maps to the `gift_cards` table. `code` carries a unique constraint.
/// Amounts are stored in cents.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow, Serialize)]
pub struct GiftCard {
    pub id: Uuid,

    /// Human-readable code, `KHS-XXXX-XXXX-XXXX` with upper-case hex segments
    pub code: String,

    /// Value the card was issued with, in cents
    pub original_value_cents: i64,

    /// Remaining spendable value, in cents
    pub current_balance_cents: i64,

    pub status: GiftCardStatus,

    pub purchase_date: NaiveDate,

    pub expiry_date: NaiveDate,

    /// Date of the last state change caused by use (deactivation)
    pub last_used_date: Option<NaiveDate>,

    pub purchaser_name: String,

    pub recipient_name: String,

    pub created_at: DateTime<Utc>,
}

impl GiftCard {
    /// Value counted towards the wallet balance.
    ///
    /// A fully spent card (zero balance) falls back to its original value.
    pub fn wallet_value_cents(&self) -> i64 {
        if self.current_balance_cents != 0 {
            self.current_balance_cents
        } else {
            self.original_value_cents
        }
    }
}

/// Fields needed to persist a freshly issued card.
#[derive(Debug, Clone)]
pub struct NewGiftCard {
    pub code: String,
    pub original_value_cents: i64,
    pub purchase_date: NaiveDate,
    pub expiry_date: NaiveDate,
    pub purchaser_name: String,
    pub recipient_name: String,
}

/// Request body for issuing a new gift card.
///
/// # JSON Example
///
/// ```json
/// {
///   "original_value_cents": 5000,
///   "expiry_date": "2026-12-31",
///   "purchaser_name": "Ada",
///   "recipient_name": "Grace"
/// }
/// ```
#[derive(Debug, Deserialize)]
pub struct IssueGiftCardRequest {
    pub original_value_cents: i64,
    pub expiry_date: NaiveDate,
    pub purchaser_name: String,
    pub recipient_name: String,
}

/// Request body for refunding value onto a card.
#[derive(Debug, Deserialize)]
pub struct RefundRequest {
    pub amount_cents: i64,
}

#[derive(Debug, Serialize)]
pub struct GiftCardResponse {
    pub message: String,
    pub data: GiftCard,
}

#[derive(Debug, Serialize)]
pub struct GiftCardListResponse {
    pub message: String,
    pub total: usize,
    pub data: Vec<GiftCard>,
}

#[derive(Debug, Serialize)]
pub struct RefundResponse {
    pub message: String,
    pub updated_balance_cents: i64,
    pub data: GiftCard,
}

#[derive(Debug, Serialize)]
pub struct UsageHistory {
    pub last_used_date: Option<NaiveDate>,
    pub note: String,
}

#[derive(Debug, Serialize)]
pub struct UsageHistoryResponse {
    pub message: String,
    pub data: UsageHistory,
}

#[derive(Debug, Serialize)]
pub struct DeleteAllResponse {
    pub message: String,
    pub deleted: u64,
}

#[derive(Debug, Serialize)]
pub struct TotalValueResponse {
    pub message: String,
    pub total_cards: usize,
    pub total_value_cents: i64,
}

#[derive(Debug, Serialize)]
pub struct ActiveCardsResponse {
    pub message: String,
    pub total_active_cards: usize,
    pub total_active_value_cents: i64,
    pub data: Vec<GiftCard>,
}

#[derive(Debug, Serialize)]
pub struct ExpiredCardsResponse {
    pub message: String,
    pub total_expired_cards: usize,
    pub total_expired_value_cents: i64,
    pub data: Vec<GiftCard>,
}

//! Persistence interfaces.
//!
//! Services depend on these traits rather than on a connection pool so the
//! same business logic runs against PostgreSQL in production and an
//! in-memory store in tests.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

use crate::error::AppError;
use crate::models::{
    gift_card::{GiftCard, GiftCardStatus, NewGiftCard},
    ledger::{Payment, Withdrawal},
    moderation::ModerationSettings,
};

#[cfg(test)]
pub mod memory;
pub mod postgres;

pub use postgres::PgStore;

pub type StoreResult<T> = Result<T, AppError>;

/// Gift card persistence.
#[async_trait]
pub trait GiftCardStore: Send + Sync {
    /// Inserts an ACTIVE card with a full balance, or `None` when `card.code` is taken.
    async fn insert_gift_card(&self, card: &NewGiftCard) -> StoreResult<Option<GiftCard>>;
    async fn list_gift_cards(&self) -> StoreResult<Vec<GiftCard>>;
    async fn list_gift_cards_by_status(&self, status: GiftCardStatus)
    -> StoreResult<Vec<GiftCard>>;
    /// Cards created in `[start, end)`.
    async fn list_gift_cards_created_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> StoreResult<Vec<GiftCard>>;
    /// Lookup where either the id or the code matches `identifier`.
    async fn find_gift_card(&self, identifier: &str) -> StoreResult<Option<GiftCard>>;
    async fn find_gift_card_by_id(&self, id: Uuid) -> StoreResult<Option<GiftCard>>;
    /// Persists balance, status and last-used date of an existing card.
    async fn update_gift_card(&self, card: &GiftCard) -> StoreResult<GiftCard>;
    /// Marks every ACTIVE card with `expiry_date < today` as EXPIRED, returning how many changed.
    async fn expire_gift_cards_before(&self, today: NaiveDate) -> StoreResult<u64>;
    async fn delete_all_gift_cards(&self) -> StoreResult<u64>;
}

/// Read access to payments and withdrawals.
#[async_trait]
pub trait LedgerStore: Send + Sync {
    async fn list_payments(&self) -> StoreResult<Vec<Payment>>;
    /// Payments created in `[start, end)`.
    async fn list_payments_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> StoreResult<Vec<Payment>>;
    /// Payments carrying a positive fee.
    async fn list_fee_payments(&self) -> StoreResult<Vec<Payment>>;
    async fn list_withdrawals(&self) -> StoreResult<Vec<Withdrawal>>;
    /// Withdrawals created in `[start, end)`.
    async fn list_withdrawals_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> StoreResult<Vec<Withdrawal>>;
    async fn list_withdrawals_by_status(&self, status: &str) -> StoreResult<Vec<Withdrawal>>;
}

/// Singleton moderation configuration.
#[async_trait]
pub trait ModerationStore: Send + Sync {
    async fn get_moderation_settings(&self) -> StoreResult<Option<ModerationSettings>>;
    async fn save_moderation_settings(
        &self,
        settings: &ModerationSettings,
    ) -> StoreResult<ModerationSettings>;
}

/// Everything the HTTP layer needs from persistence.
#[async_trait]
pub trait AdminStore: GiftCardStore + LedgerStore + ModerationStore {
    /// Verifies the backing store is reachable.
    async fn ping(&self) -> StoreResult<()>;
}

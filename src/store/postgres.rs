//! PostgreSQL implementation of the store traits.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

use super::{AdminStore, GiftCardStore, LedgerStore, ModerationStore, StoreResult};
use crate::db::DbPool;
use crate::error::AppError;
use crate::models::{
    gift_card::{GiftCard, GiftCardStatus, NewGiftCard},
    ledger::{Payment, Withdrawal},
    moderation::ModerationSettings,
};

/// Store backed by a PostgreSQL connection pool.
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl GiftCardStore for PgStore {
    async fn insert_gift_card(&self, card: &NewGiftCard) -> StoreResult<Option<GiftCard>> {
        // current balance starts at the original value
        let card = sqlx::query_as::<_, GiftCard>(
            r#"
            INSERT INTO gift_cards (
                code,
                original_value_cents,
                current_balance_cents,
                status,
                purchase_date,
                expiry_date,
                purchaser_name,
                recipient_name
            )
            VALUES ($1, $2, $2, $3, $4, $5, $6, $7)
            ON CONFLICT (code) DO NOTHING
            RETURNING *
            "#,
        )
        .bind(&card.code)
        .bind(card.original_value_cents)
        .bind(GiftCardStatus::Active)
        .bind(card.purchase_date)
        .bind(card.expiry_date)
        .bind(&card.purchaser_name)
        .bind(&card.recipient_name)
        .fetch_optional(&self.pool)
        .await?;

        Ok(card)
    }

    async fn list_gift_cards(&self) -> StoreResult<Vec<GiftCard>> {
        let cards =
            sqlx::query_as::<_, GiftCard>("SELECT * FROM gift_cards ORDER BY created_at DESC")
                .fetch_all(&self.pool)
                .await?;

        Ok(cards)
    }

    async fn list_gift_cards_by_status(
        &self,
        status: GiftCardStatus,
    ) -> StoreResult<Vec<GiftCard>> {
        let cards = sqlx::query_as::<_, GiftCard>(
            "SELECT * FROM gift_cards WHERE status = $1 ORDER BY created_at DESC",
        )
        .bind(status)
        .fetch_all(&self.pool)
        .await?;

        Ok(cards)
    }

    async fn list_gift_cards_created_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> StoreResult<Vec<GiftCard>> {
        let cards = sqlx::query_as::<_, GiftCard>(
            "SELECT * FROM gift_cards WHERE created_at >= $1 AND created_at < $2",
        )
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await?;

        Ok(cards)
    }

    async fn find_gift_card(&self, identifier: &str) -> StoreResult<Option<GiftCard>> {
        // Codes never parse as UUIDs, so only compare ids when the input is one
        let card = match Uuid::parse_str(identifier) {
            Ok(id) => {
                sqlx::query_as::<_, GiftCard>(
                    "SELECT * FROM gift_cards WHERE id = $1 OR code = $2",
                )
                .bind(id)
                .bind(identifier)
                .fetch_optional(&self.pool)
                .await?
            }
            Err(_) => {
                sqlx::query_as::<_, GiftCard>("SELECT * FROM gift_cards WHERE code = $1")
                    .bind(identifier)
                    .fetch_optional(&self.pool)
                    .await?
            }
        };

        Ok(card)
    }

    async fn find_gift_card_by_id(&self, id: Uuid) -> StoreResult<Option<GiftCard>> {
        let card = sqlx::query_as::<_, GiftCard>("SELECT * FROM gift_cards WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(card)
    }

    async fn update_gift_card(&self, card: &GiftCard) -> StoreResult<GiftCard> {
        sqlx::query_as::<_, GiftCard>(
            r#"
            UPDATE gift_cards
            SET current_balance_cents = $2,
                status = $3,
                last_used_date = $4
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(card.id)
        .bind(card.current_balance_cents)
        .bind(card.status)
        .bind(card.last_used_date)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::GiftCardNotFound(card.id.to_string()))
    }

    async fn expire_gift_cards_before(&self, today: NaiveDate) -> StoreResult<u64> {
        let expired = sqlx::query(
            r#"
            UPDATE gift_cards
            SET status = $1
            WHERE status = $2 AND expiry_date < $3
            "#,
        )
        .bind(GiftCardStatus::Expired)
        .bind(GiftCardStatus::Active)
        .bind(today)
        .execute(&self.pool)
        .await?
        .rows_affected();

        Ok(expired)
    }

    async fn delete_all_gift_cards(&self) -> StoreResult<u64> {
        let deleted = sqlx::query("DELETE FROM gift_cards")
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(deleted)
    }
}

#[async_trait]
impl LedgerStore for PgStore {
    async fn list_payments(&self) -> StoreResult<Vec<Payment>> {
        let payments = sqlx::query_as::<_, Payment>("SELECT * FROM payments")
            .fetch_all(&self.pool)
            .await?;

        Ok(payments)
    }

    async fn list_payments_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> StoreResult<Vec<Payment>> {
        let payments = sqlx::query_as::<_, Payment>(
            "SELECT * FROM payments WHERE created_at >= $1 AND created_at < $2",
        )
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await?;

        Ok(payments)
    }

    async fn list_fee_payments(&self) -> StoreResult<Vec<Payment>> {
        let payments = sqlx::query_as::<_, Payment>("SELECT * FROM payments WHERE fee_cents > 0")
            .fetch_all(&self.pool)
            .await?;

        Ok(payments)
    }

    async fn list_withdrawals(&self) -> StoreResult<Vec<Withdrawal>> {
        let withdrawals = sqlx::query_as::<_, Withdrawal>("SELECT * FROM withdrawals")
            .fetch_all(&self.pool)
            .await?;

        Ok(withdrawals)
    }

    async fn list_withdrawals_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> StoreResult<Vec<Withdrawal>> {
        let withdrawals = sqlx::query_as::<_, Withdrawal>(
            "SELECT * FROM withdrawals WHERE created_at >= $1 AND created_at < $2",
        )
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await?;

        Ok(withdrawals)
    }

    async fn list_withdrawals_by_status(&self, status: &str) -> StoreResult<Vec<Withdrawal>> {
        let withdrawals =
            sqlx::query_as::<_, Withdrawal>("SELECT * FROM withdrawals WHERE status = $1")
                .bind(status)
                .fetch_all(&self.pool)
                .await?;

        Ok(withdrawals)
    }
}

#[async_trait]
impl ModerationStore for PgStore {
    async fn get_moderation_settings(&self) -> StoreResult<Option<ModerationSettings>> {
        let settings = sqlx::query_as::<_, ModerationSettings>(
            "SELECT * FROM moderation_settings ORDER BY updated_at DESC LIMIT 1",
        )
        .fetch_optional(&self.pool)
        .await?;

        Ok(settings)
    }

    async fn save_moderation_settings(
        &self,
        settings: &ModerationSettings,
    ) -> StoreResult<ModerationSettings> {
        if let Some(id) = settings.id {
            let updated = sqlx::query_as::<_, ModerationSettings>(
                r#"
                UPDATE moderation_settings
                SET banned_words = $2,
                    auto_flag_reviews = $3,
                    notify_admin = $4,
                    review_flag_threshold = $5,
                    updated_at = NOW()
                WHERE id = $1
                RETURNING *
                "#,
            )
            .bind(id)
            .bind(&settings.banned_words)
            .bind(settings.auto_flag_reviews)
            .bind(settings.notify_admin)
            .bind(settings.review_flag_threshold)
            .fetch_optional(&self.pool)
            .await?;

            if let Some(updated) = updated {
                return Ok(updated);
            }
        }

        let inserted = sqlx::query_as::<_, ModerationSettings>(
            r#"
            INSERT INTO moderation_settings (
                banned_words,
                auto_flag_reviews,
                notify_admin,
                review_flag_threshold
            )
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(&settings.banned_words)
        .bind(settings.auto_flag_reviews)
        .bind(settings.notify_admin)
        .bind(settings.review_flag_threshold)
        .fetch_one(&self.pool)
        .await?;

        Ok(inserted)
    }
}

#[async_trait]
impl AdminStore for PgStore {
    async fn ping(&self) -> StoreResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

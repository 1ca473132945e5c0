//! In-memory store used by tests.

use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

use super::{AdminStore, GiftCardStore, LedgerStore, ModerationStore, StoreResult};
use crate::error::AppError;
use crate::models::{
    gift_card::{GiftCard, GiftCardStatus, NewGiftCard},
    ledger::{Payment, Withdrawal},
    moderation::ModerationSettings,
};

#[derive(Debug, Default)]
struct Tables {
    gift_cards: Vec<GiftCard>,
    payments: Vec<Payment>,
    withdrawals: Vec<Withdrawal>,
    moderation: Option<ModerationSettings>,
}

#[derive(Debug)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
    /// Timestamp stamped on inserted gift cards
    created_at: DateTime<Utc>,
}

fn within(ts: DateTime<Utc>, start: DateTime<Utc>, end: DateTime<Utc>) -> bool {
    ts >= start && ts < end
}

impl MemoryStore {
    pub fn new(created_at: DateTime<Utc>) -> Self {
        Self {
            tables: Mutex::new(Tables::default()),
            created_at,
        }
    }

    fn tables(&self) -> MutexGuard<'_, Tables> {
        self.tables.lock().expect("memory store lock poisoned")
    }

    pub fn seed_gift_card(&self, card: GiftCard) {
        self.tables().gift_cards.push(card);
    }

    pub fn seed_payment(&self, payment: Payment) {
        self.tables().payments.push(payment);
    }

    pub fn seed_withdrawal(&self, withdrawal: Withdrawal) {
        self.tables().withdrawals.push(withdrawal);
    }

    pub fn gift_card(&self, id: Uuid) -> Option<GiftCard> {
        self.tables().gift_cards.iter().find(|c| c.id == id).cloned()
    }
}

#[async_trait]
impl GiftCardStore for MemoryStore {
    async fn insert_gift_card(&self, card: &NewGiftCard) -> StoreResult<Option<GiftCard>> {
        let mut tables = self.tables();
        if tables.gift_cards.iter().any(|c| c.code == card.code) {
            return Ok(None);
        }

        let card = GiftCard {
            id: Uuid::new_v4(),
            code: card.code.clone(),
            original_value_cents: card.original_value_cents,
            current_balance_cents: card.original_value_cents,
            status: GiftCardStatus::Active,
            purchase_date: card.purchase_date,
            expiry_date: card.expiry_date,
            last_used_date: None,
            purchaser_name: card.purchaser_name.clone(),
            recipient_name: card.recipient_name.clone(),
            created_at: self.created_at,
        };
        tables.gift_cards.push(card.clone());
        Ok(Some(card))
    }

    async fn list_gift_cards(&self) -> StoreResult<Vec<GiftCard>> {
        Ok(self.tables().gift_cards.clone())
    }

    async fn list_gift_cards_by_status(
        &self,
        status: GiftCardStatus,
    ) -> StoreResult<Vec<GiftCard>> {
        Ok(self
            .tables()
            .gift_cards
            .iter()
            .filter(|c| c.status == status)
            .cloned()
            .collect())
    }

    async fn list_gift_cards_created_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> StoreResult<Vec<GiftCard>> {
        Ok(self
            .tables()
            .gift_cards
            .iter()
            .filter(|c| within(c.created_at, start, end))
            .cloned()
            .collect())
    }

    async fn find_gift_card(&self, identifier: &str) -> StoreResult<Option<GiftCard>> {
        let id = Uuid::parse_str(identifier).ok();
        Ok(self
            .tables()
            .gift_cards
            .iter()
            .find(|c| Some(c.id) == id || c.code == identifier)
            .cloned())
    }

    async fn find_gift_card_by_id(&self, id: Uuid) -> StoreResult<Option<GiftCard>> {
        Ok(self.gift_card(id))
    }

    async fn update_gift_card(&self, card: &GiftCard) -> StoreResult<GiftCard> {
        let mut tables = self.tables();
        let stored = tables
            .gift_cards
            .iter_mut()
            .find(|c| c.id == card.id)
            .ok_or_else(|| AppError::GiftCardNotFound(card.id.to_string()))?;

        stored.current_balance_cents = card.current_balance_cents;
        stored.status = card.status;
        stored.last_used_date = card.last_used_date;
        Ok(stored.clone())
    }

    async fn expire_gift_cards_before(&self, today: NaiveDate) -> StoreResult<u64> {
        let mut tables = self.tables();
        let mut expired = 0;
        for card in tables.gift_cards.iter_mut() {
            // strictly before today: a card expiring today is still valid
            if card.status == GiftCardStatus::Active && card.expiry_date < today {
                card.status = GiftCardStatus::Expired;
                expired += 1;
            }
        }
        Ok(expired)
    }

    async fn delete_all_gift_cards(&self) -> StoreResult<u64> {
        let mut tables = self.tables();
        let deleted = tables.gift_cards.len() as u64;
        tables.gift_cards.clear();
        Ok(deleted)
    }
}

#[async_trait]
impl LedgerStore for MemoryStore {
    async fn list_payments(&self) -> StoreResult<Vec<Payment>> {
        Ok(self.tables().payments.clone())
    }

    async fn list_payments_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> StoreResult<Vec<Payment>> {
        Ok(self
            .tables()
            .payments
            .iter()
            .filter(|p| within(p.created_at, start, end))
            .cloned()
            .collect())
    }

    async fn list_fee_payments(&self) -> StoreResult<Vec<Payment>> {
        Ok(self
            .tables()
            .payments
            .iter()
            .filter(|p| p.has_fee())
            .cloned()
            .collect())
    }

    async fn list_withdrawals(&self) -> StoreResult<Vec<Withdrawal>> {
        Ok(self.tables().withdrawals.clone())
    }

    async fn list_withdrawals_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> StoreResult<Vec<Withdrawal>> {
        Ok(self
            .tables()
            .withdrawals
            .iter()
            .filter(|w| within(w.created_at, start, end))
            .cloned()
            .collect())
    }

    async fn list_withdrawals_by_status(&self, status: &str) -> StoreResult<Vec<Withdrawal>> {
        Ok(self
            .tables()
            .withdrawals
            .iter()
            .filter(|w| w.status == status)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl ModerationStore for MemoryStore {
    async fn get_moderation_settings(&self) -> StoreResult<Option<ModerationSettings>> {
        Ok(self.tables().moderation.clone())
    }

    async fn save_moderation_settings(
        &self,
        settings: &ModerationSettings,
    ) -> StoreResult<ModerationSettings> {
        let mut saved = settings.clone();
        saved.id = Some(settings.id.unwrap_or_else(Uuid::new_v4));
        saved.updated_at = Some(self.created_at);
        let mut tables = self.tables();
        tables.moderation = Some(saved.clone());
        Ok(saved)
    }
}

#[async_trait]
impl AdminStore for MemoryStore {
    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }
}

/// Record builders for seeding the memory store.
pub mod fixtures {
    use chrono::{DateTime, NaiveDate, Utc};
    use uuid::Uuid;

    use crate::models::{
        gift_card::{GiftCard, GiftCardStatus},
        ledger::{Payment, Withdrawal},
    };

    pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
    }

    pub fn at(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
        date(year, month, day)
            .and_hms_opt(hour, minute, 0)
            .expect("valid time")
            .and_utc()
    }

    pub fn gift_card(
        code: &str,
        status: GiftCardStatus,
        original_value_cents: i64,
        current_balance_cents: i64,
        expiry_date: NaiveDate,
        created_at: DateTime<Utc>,
    ) -> GiftCard {
        GiftCard {
            id: Uuid::new_v4(),
            code: code.to_string(),
            original_value_cents,
            current_balance_cents,
            status,
            purchase_date: created_at.date_naive(),
            expiry_date,
            last_used_date: None,
            purchaser_name: "Ada".to_string(),
            recipient_name: "Grace".to_string(),
            created_at,
        }
    }

    pub fn payment(amount_cents: i64, created_at: DateTime<Utc>) -> Payment {
        Payment {
            id: Uuid::new_v4(),
            client: "Linus".to_string(),
            business: "Acme Ltd".to_string(),
            amount_cents,
            fee_cents: 0,
            refund_type: None,
            status: "completed".to_string(),
            created_at,
        }
    }

    pub fn withdrawal(amount_cents: i64, status: &str, created_at: DateTime<Utc>) -> Withdrawal {
        Withdrawal {
            id: Uuid::new_v4(),
            business_name: "Acme Ltd".to_string(),
            amount_cents,
            current_balance_cents: 10_000,
            status: status.to_string(),
            created_at,
        }
    }
}

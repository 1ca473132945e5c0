//! Gift card service - issuance and lifecycle of gift cards.
//!
//! This service handles:
//! - Unique code generation and issuance
//! - Lookup by id or code
//! - Deactivation and refunds (ACTIVE cards only)
//! - Automatic expiry of cards past their expiry date
//! - Cohort summaries (total, active, expired)
//!
//! # Status Transitions
//!
//! ACTIVE → INACTIVE (deactivation) and ACTIVE → EXPIRED (auto-expiry) are
//! the only transitions. Nothing moves a card back to ACTIVE.

use uuid::Uuid;

use crate::{
    clock::Clock,
    error::AppError,
    models::gift_card::{
        CODE_PREFIX, GiftCard, GiftCardStatus, IssueGiftCardRequest, NewGiftCard, UsageHistory,
    },
    services::sum_cents,
    store::GiftCardStore,
};

/// Cards of one status together with their aggregate value in cents.
#[derive(Debug)]
pub struct CardCohort {
    pub cards: Vec<GiftCard>,
    pub total_value_cents: i64,
}

/// Draw a random code of the form `KHS-XXXX-XXXX-XXXX`.
///
/// Each segment is 2 random bytes, hex-encoded upper-case.
fn random_code() -> String {
    let segments: Vec<String> = (0..3)
        .map(|_| hex::encode_upper(rand::random::<[u8; 2]>()))
        .collect();
    format!("{}-{}", CODE_PREFIX, segments.join("-"))
}

/// Persist `card` under the first drawn code no stored card uses.
///
/// The unique constraint on `code` decides, so concurrent issues never share a code.
async fn insert_with_unique_code<S, F>(
    store: &S,
    mut card: NewGiftCard,
    mut draw_code: F,
) -> Result<GiftCard, AppError>
where
    S: GiftCardStore + ?Sized,
    F: FnMut() -> String,
{
    loop {
        card.code = draw_code();
        if let Some(inserted) = store.insert_gift_card(&card).await? {
            return Ok(inserted);
        }
        tracing::debug!(code = %card.code, "Gift card code collision, retrying");
    }
}

/// Issue a new gift card.
///
/// # Process
///
/// 1. Validate the original value
/// 2. Persist under a freshly drawn code, drawing again on collision
/// 3. Persist with balance = original value, status ACTIVE, purchase date = today
///
/// # Errors
///
/// - `InvalidRequest`: Original value is zero or negative
/// - `Database`: Database error occurred
pub async fn issue_gift_card<S>(
    store: &S,
    clock: &dyn Clock,
    request: IssueGiftCardRequest,
) -> Result<GiftCard, AppError>
where
    S: GiftCardStore + ?Sized,
{
    if request.original_value_cents <= 0 {
        return Err(AppError::InvalidRequest(
            "Gift card value must be positive".to_string(),
        ));
    }

    let new_card = NewGiftCard {
        code: String::new(),
        original_value_cents: request.original_value_cents,
        purchase_date: clock.today(),
        expiry_date: request.expiry_date,
        purchaser_name: request.purchaser_name,
        recipient_name: request.recipient_name,
    };
    let card = insert_with_unique_code(store, new_card, random_code).await?;

    tracing::info!(
        gift_card_id = %card.id,
        code = %card.code,
        value_cents = card.original_value_cents,
        "Gift card issued"
    );

    Ok(card)
}

/// List every gift card.
pub async fn find_all<S>(store: &S) -> Result<Vec<GiftCard>, AppError>
where
    S: GiftCardStore + ?Sized,
{
    store.list_gift_cards().await
}

/// Find a gift card by id or by code.
///
/// # Errors
///
/// - `GiftCardNotFound`: Neither an id nor a code matches `identifier`
pub async fn find_one<S>(store: &S, identifier: &str) -> Result<GiftCard, AppError>
where
    S: GiftCardStore + ?Sized,
{
    store
        .find_gift_card(identifier)
        .await?
        .ok_or_else(|| AppError::GiftCardNotFound(identifier.to_string()))
}

async fn find_by_id<S>(store: &S, id: Uuid) -> Result<GiftCard, AppError>
where
    S: GiftCardStore + ?Sized,
{
    store
        .find_gift_card_by_id(id)
        .await?
        .ok_or_else(|| AppError::GiftCardNotFound(id.to_string()))
}

/// Deactivate an ACTIVE gift card and stamp its last-used date.
///
/// # Errors
///
/// - `GiftCardNotFound`: No card with this id
/// - `InvalidGiftCardState`: Card is not ACTIVE
pub async fn deactivate_gift_card<S>(
    store: &S,
    clock: &dyn Clock,
    id: Uuid,
) -> Result<GiftCard, AppError>
where
    S: GiftCardStore + ?Sized,
{
    let mut card = find_by_id(store, id).await?;

    if card.status != GiftCardStatus::Active {
        return Err(AppError::InvalidGiftCardState(
            "Gift card is already inactive or used.".to_string(),
        ));
    }

    card.status = GiftCardStatus::Inactive;
    card.last_used_date = Some(clock.today());
    let card = store.update_gift_card(&card).await?;

    tracing::info!(gift_card_id = %card.id, code = %card.code, "Gift card deactivated");

    Ok(card)
}

/// Add `amount_cents` back onto an ACTIVE gift card.
///
/// Refunds are not capped by the original value; each one is logged.
///
/// # Errors
///
/// - `InvalidRequest`: Amount is zero or negative, or the new balance would overflow
/// - `GiftCardNotFound`: No card with this id
/// - `InvalidGiftCardState`: Card is not ACTIVE
pub async fn refund_gift_card<S>(store: &S, id: Uuid, amount_cents: i64) -> Result<GiftCard, AppError>
where
    S: GiftCardStore + ?Sized,
{
    if amount_cents <= 0 {
        return Err(AppError::InvalidRequest(
            "Refund amount must be positive".to_string(),
        ));
    }

    let mut card = find_by_id(store, id).await?;

    if card.status != GiftCardStatus::Active {
        return Err(AppError::InvalidGiftCardState(
            "Gift card is not active. Cannot refund.".to_string(),
        ));
    }

    let previous_balance_cents = card.current_balance_cents;
    card.current_balance_cents = previous_balance_cents
        .checked_add(amount_cents)
        .ok_or_else(|| {
            AppError::InvalidRequest("Refund would overflow the card balance".to_string())
        })?;
    let card = store.update_gift_card(&card).await?;

    tracing::info!(
        gift_card_id = %card.id,
        code = %card.code,
        amount_cents,
        previous_balance_cents,
        balance_cents = card.current_balance_cents,
        "Gift card refunded"
    );

    Ok(card)
}

/// Usage history of a gift card.
///
/// Only the last-used date is tracked; per-transaction history is not recorded.
pub async fn get_usage_history<S>(store: &S, id: Uuid) -> Result<(GiftCard, UsageHistory), AppError>
where
    S: GiftCardStore + ?Sized,
{
    let card = find_by_id(store, id).await?;
    let history = UsageHistory {
        last_used_date: card.last_used_date,
        note: "Transactions feature not yet implemented.".to_string(),
    };

    Ok((card, history))
}

/// Permanently remove every gift card. Returns the number deleted.
pub async fn delete_all_gift_cards<S>(store: &S) -> Result<u64, AppError>
where
    S: GiftCardStore + ?Sized,
{
    let deleted = store.delete_all_gift_cards().await?;
    tracing::warn!(deleted, "All gift cards deleted");
    Ok(deleted)
}

/// Expire every ACTIVE card whose expiry date is strictly before today.
///
/// Running it again immediately finds nothing to do.
pub async fn auto_expire_cards<S>(store: &S, clock: &dyn Clock) -> Result<u64, AppError>
where
    S: GiftCardStore + ?Sized,
{
    let expired = store.expire_gift_cards_before(clock.today()).await?;
    if expired > 0 {
        tracing::info!(expired, "Auto-expired gift card(s)");
    }
    Ok(expired)
}

/// All cards with the sum of their original values.
pub async fn get_total_value<S>(store: &S, clock: &dyn Clock) -> Result<CardCohort, AppError>
where
    S: GiftCardStore + ?Sized,
{
    auto_expire_cards(store, clock).await?;
    let cards = store.list_gift_cards().await?;
    let total_value_cents = sum_cents(
        cards.iter().map(|c| c.original_value_cents),
        "total gift card value",
    )?;

    Ok(CardCohort {
        cards,
        total_value_cents,
    })
}

/// ACTIVE cards with the sum of their remaining balances.
pub async fn get_active_cards<S>(store: &S, clock: &dyn Clock) -> Result<CardCohort, AppError>
where
    S: GiftCardStore + ?Sized,
{
    auto_expire_cards(store, clock).await?;
    let cards = store
        .list_gift_cards_by_status(GiftCardStatus::Active)
        .await?;
    let total_value_cents = sum_cents(
        cards.iter().map(|c| c.current_balance_cents),
        "active gift card value",
    )?;

    Ok(CardCohort {
        cards,
        total_value_cents,
    })
}

/// EXPIRED cards with the sum of their original values.
pub async fn get_expired_cards<S>(store: &S, clock: &dyn Clock) -> Result<CardCohort, AppError>
where
    S: GiftCardStore + ?Sized,
{
    auto_expire_cards(store, clock).await?;
    let cards = store
        .list_gift_cards_by_status(GiftCardStatus::Expired)
        .await?;
    let total_value_cents = sum_cents(
        cards.iter().map(|c| c.original_value_cents),
        "expired gift card value",
    )?;

    Ok(CardCohort {
        cards,
        total_value_cents,
    })
}

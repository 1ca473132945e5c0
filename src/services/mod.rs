//! Business logic services.
//!
//! Services contain the core logic separated from HTTP handlers. They talk
//! to persistence only through the store traits.

pub mod gift_card_service;
pub mod moderation_service;
pub mod wallet_service;

use crate::error::AppError;

/// Sum amounts in cents, failing instead of wrapping when the total leaves `i64`.
pub(crate) fn sum_cents<I>(amounts: I, what: &'static str) -> Result<i64, AppError>
where
    I: IntoIterator<Item = i64>,
{
    amounts
        .into_iter()
        .try_fold(0i64, |total, amount| total.checked_add(amount))
        .ok_or(AppError::AmountOverflow(what))
}

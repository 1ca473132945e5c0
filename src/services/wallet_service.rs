//! Wallet service - read-only financial summaries.
//!
//! Aggregates payments, withdrawals and gift cards into:
//! - a merged transaction ledger
//! - the platform-wide balance and its change since yesterday
//! - pending withdrawal totals
//! - today's earnings against yesterday's
//! - platform fee totals
//!
//! Day boundaries are UTC midnights taken from the injected clock.

use chrono::{DateTime, Days, NaiveDate, Utc};

use crate::{
    clock::Clock,
    error::AppError,
    models::{
        gift_card::GiftCard,
        ledger::{PENDING_STATUS, Payment, Withdrawal},
        wallet::WalletTransaction,
    },
    services::sum_cents,
    store::{GiftCardStore, LedgerStore},
};

#[derive(Debug, PartialEq)]
pub struct BalanceSummary {
    pub total_balance_cents: i64,
    pub percent_change: String,
}

#[derive(Debug, PartialEq)]
pub struct PendingWithdrawals {
    pub total_pending_amount_cents: i64,
    pub total_requests: usize,
}

#[derive(Debug, PartialEq)]
pub struct EarningsSummary {
    pub today_total_cents: i64,
    pub percent_change: String,
}

#[derive(Debug, PartialEq)]
pub struct FeeSummary {
    pub total_fee_amount_cents: i64,
    pub avg_fee_rate: String,
}

/// `[start, end)` covering one UTC calendar day.
fn day_bounds(day: NaiveDate) -> (DateTime<Utc>, DateTime<Utc>) {
    let start = day.and_time(chrono::NaiveTime::MIN).and_utc();
    let end = start + chrono::Duration::days(1);
    (start, end)
}

fn yesterday(clock: &dyn Clock) -> NaiveDate {
    let today = clock.today();
    today.checked_sub_days(Days::new(1)).unwrap_or(today)
}

/// Percent change of `current` against `baseline`, two decimals with a `%` suffix.
///
/// A zero or negative baseline yields `"0.00%"`.
pub fn percent_change(current: i64, baseline: i64) -> String {
    let change = if baseline > 0 {
        (current as f64 - baseline as f64) / baseline as f64 * 100.0
    } else {
        0.0
    };
    format!("{:.2}%", change)
}

/// Payments plus gift card value minus withdrawals.
///
/// # Errors
///
/// - `AmountOverflow`: A partial sum or the balance does not fit in an `i64`
pub fn wallet_balance_cents(
    payments: &[Payment],
    gift_cards: &[GiftCard],
    withdrawals: &[Withdrawal],
) -> Result<i64, AppError> {
    const WHAT: &str = "wallet balance";

    let payments = sum_cents(payments.iter().map(|p| p.amount_cents), WHAT)?;
    let gift_cards = sum_cents(gift_cards.iter().map(GiftCard::wallet_value_cents), WHAT)?;
    let withdrawals = sum_cents(withdrawals.iter().map(|w| w.amount_cents), WHAT)?;

    payments
        .checked_add(gift_cards)
        .and_then(|total| total.checked_sub(withdrawals))
        .ok_or(AppError::AmountOverflow(WHAT))
}

/// Upper-case the first character, leaving the rest untouched.
fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn date_part(ts: &DateTime<Utc>) -> String {
    ts.format("%Y-%m-%d").to_string()
}

fn time_part(ts: &DateTime<Utc>) -> String {
    ts.format("%I:%M %p").to_string()
}

fn payment_entry(p: &Payment) -> WalletTransaction {
    let (kind, description) = if p.is_refund() {
        ("Refund", format!("Refund to {}", p.client))
    } else if p.has_fee() {
        ("Fee", format!("Fee charged for {}", p.business))
    } else {
        ("Earning", format!("Payment from {}", p.client))
    };

    WalletTransaction {
        id: p.id,
        user: p.client.clone(),
        kind: kind.to_string(),
        amount_cents: p.amount_cents,
        description,
        status: capitalize(&p.status),
        balance_cents: 0,
        date: date_part(&p.created_at),
        time: time_part(&p.created_at),
    }
}

fn withdrawal_entry(w: &Withdrawal) -> WalletTransaction {
    WalletTransaction {
        id: w.id,
        user: w.business_name.clone(),
        kind: "Withdrawal".to_string(),
        amount_cents: w.amount_cents,
        description: format!("Withdrawal request by {}", w.business_name),
        status: capitalize(&w.status),
        balance_cents: w.current_balance_cents,
        date: date_part(&w.created_at),
        time: time_part(&w.created_at),
    }
}

fn gift_card_entry(g: &GiftCard) -> WalletTransaction {
    WalletTransaction {
        id: g.id,
        user: g.purchaser_name.clone(),
        kind: "Earning".to_string(),
        amount_cents: g.original_value_cents,
        description: format!("Gift card purchased for {}", g.recipient_name),
        status: capitalize(g.status.as_str()),
        balance_cents: g.current_balance_cents,
        date: date_part(&g.created_at),
        time: time_part(&g.created_at),
    }
}

/// Merge all three record kinds into one ledger.
///
/// Newest first; entries created at the same instant are ordered by type,
/// then id, so the listing is stable across calls.
pub fn merge_transactions(
    payments: &[Payment],
    withdrawals: &[Withdrawal],
    gift_cards: &[GiftCard],
) -> Vec<WalletTransaction> {
    let mut entries: Vec<(DateTime<Utc>, WalletTransaction)> = payments
        .iter()
        .map(|p| (p.created_at, payment_entry(p)))
        .chain(withdrawals.iter().map(|w| (w.created_at, withdrawal_entry(w))))
        .chain(gift_cards.iter().map(|g| (g.created_at, gift_card_entry(g))))
        .collect();

    entries.sort_by(|(a_ts, a), (b_ts, b)| {
        b_ts.cmp(a_ts)
            .then_with(|| a.kind.cmp(&b.kind))
            .then_with(|| a.id.cmp(&b.id))
    });

    entries.into_iter().map(|(_, entry)| entry).collect()
}

/// Every payment, withdrawal and gift card as a uniform ledger entry.
pub async fn get_all_wallet_transactions<S>(store: &S) -> Result<Vec<WalletTransaction>, AppError>
where
    S: GiftCardStore + LedgerStore + ?Sized,
{
    let (payments, withdrawals, gift_cards) = tokio::try_join!(
        store.list_payments(),
        store.list_withdrawals(),
        store.list_gift_cards()
    )?;

    Ok(merge_transactions(&payments, &withdrawals, &gift_cards))
}

/// Platform-wide balance and its change against yesterday's records.
///
/// The current totals and yesterday's totals are read concurrently.
pub async fn get_total_wallet_balance<S>(
    store: &S,
    clock: &dyn Clock,
) -> Result<BalanceSummary, AppError>
where
    S: GiftCardStore + LedgerStore + ?Sized,
{
    let (start, end) = day_bounds(yesterday(clock));

    let current = async {
        tokio::try_join!(
            store.list_payments(),
            store.list_withdrawals(),
            store.list_gift_cards()
        )
    };
    let previous_day = async {
        tokio::try_join!(
            store.list_payments_between(start, end),
            store.list_withdrawals_between(start, end),
            store.list_gift_cards_created_between(start, end)
        )
    };

    let ((payments, withdrawals, gift_cards), (y_payments, y_withdrawals, y_gift_cards)) =
        tokio::try_join!(current, previous_day)?;

    let total_balance_cents = wallet_balance_cents(&payments, &gift_cards, &withdrawals)?;
    let yesterday_balance_cents =
        wallet_balance_cents(&y_payments, &y_gift_cards, &y_withdrawals)?;

    Ok(BalanceSummary {
        total_balance_cents,
        percent_change: percent_change(total_balance_cents, yesterday_balance_cents),
    })
}

/// Count and total of withdrawals still awaiting payout.
pub async fn get_pending_withdrawals<S>(store: &S) -> Result<PendingWithdrawals, AppError>
where
    S: LedgerStore + ?Sized,
{
    let pending = store.list_withdrawals_by_status(PENDING_STATUS).await?;

    Ok(PendingWithdrawals {
        total_pending_amount_cents: sum_cents(
            pending.iter().map(|w| w.amount_cents),
            "pending withdrawals",
        )?,
        total_requests: pending.len(),
    })
}

/// Sum of today's payments and the change against yesterday's.
pub async fn get_todays_earnings<S>(store: &S, clock: &dyn Clock) -> Result<EarningsSummary, AppError>
where
    S: LedgerStore + ?Sized,
{
    let (today_start, today_end) = day_bounds(clock.today());
    let (yesterday_start, yesterday_end) = day_bounds(yesterday(clock));

    let today_payments = store.list_payments_between(today_start, today_end).await?;
    let yesterday_payments = store
        .list_payments_between(yesterday_start, yesterday_end)
        .await?;

    let today_total_cents = sum_cents(today_payments.iter().map(|p| p.amount_cents), "earnings")?;
    let yesterday_total_cents =
        sum_cents(yesterday_payments.iter().map(|p| p.amount_cents), "earnings")?;

    Ok(EarningsSummary {
        today_total_cents,
        percent_change: percent_change(today_total_cents, yesterday_total_cents),
    })
}

/// Totals over fee-bearing payments.
///
/// `avg_fee_rate` is the mean payment *amount* across fee-bearing payments,
/// not the mean fee.
pub async fn get_platform_fees<S>(store: &S) -> Result<FeeSummary, AppError>
where
    S: LedgerStore + ?Sized,
{
    let with_fees = store.list_fee_payments().await?;
    let total_fee_amount_cents =
        sum_cents(with_fees.iter().map(|p| p.amount_cents), "platform fees")?;
    let avg = if with_fees.is_empty() {
        0.0
    } else {
        total_fee_amount_cents as f64 / with_fees.len() as f64
    };

    Ok(FeeSummary {
        total_fee_amount_cents,
        avg_fee_rate: format!("{:.2}", avg),
    })
}

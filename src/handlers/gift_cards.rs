//! Gift card HTTP handlers.
//!
//! This module implements the gift card API endpoints:
//! - POST /api/v1/gift-cards - Issue a new card
//! - GET /api/v1/gift-cards - List all cards
//! - DELETE /api/v1/gift-cards - Delete every card
//! - GET /api/v1/gift-cards/total-value - Count and original value of all cards
//! - GET /api/v1/gift-cards/active - Active cards and their balances
//! - GET /api/v1/gift-cards/expired - Expired cards and their original value
//! - GET /api/v1/gift-cards/{id_or_code} - Get one card
//! - POST /api/v1/gift-cards/{id}/deactivate - Deactivate a card
//! - POST /api/v1/gift-cards/{id}/refund - Refund value onto a card
//! - GET /api/v1/gift-cards/{id}/usage-history - Last-used date of a card

use axum::{
    Json,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    http::StatusCode,
    response::IntoResponse,
};
use uuid::Uuid;

use crate::{
    error::AppError,
    models::gift_card::{
        ActiveCardsResponse, DeleteAllResponse, ExpiredCardsResponse, GiftCardListResponse,
        GiftCardResponse, IssueGiftCardRequest, RefundRequest, RefundResponse, TotalValueResponse,
        UsageHistoryResponse,
    },
    services::gift_card_service,
    state::AppState,
};

/// Issue a new gift card.
///
/// # Request Body
///
/// ```json
/// {
///   "original_value_cents": 5000,
///   "expiry_date": "2026-12-31",
///   "purchaser_name": "Ada",
///   "recipient_name": "Grace"
/// }
/// ```
///
/// # Response
///
/// - **Success (201 Created)**: The issued card with its generated code
/// - **Error (400)**: Non-positive value or malformed body
pub async fn issue_gift_card(
    State(state): State<AppState>,
    request: Result<Json<IssueGiftCardRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(request) = request?;
    let card =
        gift_card_service::issue_gift_card(state.store.as_ref(), state.clock.as_ref(), request)
            .await?;

    Ok((
        StatusCode::CREATED,
        Json(GiftCardResponse {
            message: "Gift card issued successfully.".to_string(),
            data: card,
        }),
    ))
}

/// List every gift card.
pub async fn list_gift_cards(
    State(state): State<AppState>,
) -> Result<Json<GiftCardListResponse>, AppError> {
    let cards = gift_card_service::find_all(state.store.as_ref()).await?;

    Ok(Json(GiftCardListResponse {
        message: format!("Found {} gift card(s).", cards.len()),
        total: cards.len(),
        data: cards,
    }))
}

/// Get a gift card by id or code.
///
/// # Response
///
/// - **Success (200 OK)**: The card
/// - **Error (404)**: No card matches the identifier
pub async fn get_gift_card(
    State(state): State<AppState>,
    identifier: Result<Path<String>, PathRejection>,
) -> Result<Json<GiftCardResponse>, AppError> {
    let Path(identifier) = identifier?;
    let card = gift_card_service::find_one(state.store.as_ref(), &identifier).await?;

    Ok(Json(GiftCardResponse {
        message: "Gift card fetched successfully.".to_string(),
        data: card,
    }))
}

/// Deactivate an active gift card.
///
/// # Response
///
/// - **Success (200 OK)**: The deactivated card
/// - **Error (400)**: Card is not active, or the id is not a UUID
/// - **Error (404)**: Card not found
pub async fn deactivate_gift_card(
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<GiftCardResponse>, AppError> {
    let Path(id) = id?;
    let card =
        gift_card_service::deactivate_gift_card(state.store.as_ref(), state.clock.as_ref(), id)
            .await?;

    Ok(Json(GiftCardResponse {
        message: format!("Gift card ({}) has been deactivated.", card.code),
        data: card,
    }))
}

/// Refund value onto an active gift card.
///
/// # Request Body
///
/// ```json
/// { "amount_cents": 1500 }
/// ```
pub async fn refund_gift_card(
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
    request: Result<Json<RefundRequest>, JsonRejection>,
) -> Result<Json<RefundResponse>, AppError> {
    let Path(id) = id?;
    let Json(request) = request?;
    let card =
        gift_card_service::refund_gift_card(state.store.as_ref(), id, request.amount_cents)
            .await?;

    Ok(Json(RefundResponse {
        message: format!(
            "Refund of {} applied successfully to card ({}).",
            request.amount_cents, card.code
        ),
        updated_balance_cents: card.current_balance_cents,
        data: card,
    }))
}

/// Usage history of a gift card.
pub async fn get_usage_history(
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<UsageHistoryResponse>, AppError> {
    let Path(id) = id?;
    let (card, history) = gift_card_service::get_usage_history(state.store.as_ref(), id).await?;

    Ok(Json(UsageHistoryResponse {
        message: format!(
            "Usage history for gift card ({}) retrieved successfully.",
            card.code
        ),
        data: history,
    }))
}

/// Permanently delete every gift card.
pub async fn delete_all_gift_cards(
    State(state): State<AppState>,
) -> Result<Json<DeleteAllResponse>, AppError> {
    let deleted = gift_card_service::delete_all_gift_cards(state.store.as_ref()).await?;

    Ok(Json(DeleteAllResponse {
        message: "All gift cards have been permanently deleted.".to_string(),
        deleted,
    }))
}

/// Count and total original value of all issued cards.
pub async fn get_total_value(
    State(state): State<AppState>,
) -> Result<Json<TotalValueResponse>, AppError> {
    let cohort =
        gift_card_service::get_total_value(state.store.as_ref(), state.clock.as_ref()).await?;

    Ok(Json(TotalValueResponse {
        message: "Total value of all issued gift cards retrieved successfully.".to_string(),
        total_cards: cohort.cards.len(),
        total_value_cents: cohort.total_value_cents,
    }))
}

/// Active cards and the sum of their balances.
pub async fn get_active_cards(
    State(state): State<AppState>,
) -> Result<Json<ActiveCardsResponse>, AppError> {
    let cohort =
        gift_card_service::get_active_cards(state.store.as_ref(), state.clock.as_ref()).await?;

    Ok(Json(ActiveCardsResponse {
        message: "Active gift cards retrieved successfully.".to_string(),
        total_active_cards: cohort.cards.len(),
        total_active_value_cents: cohort.total_value_cents,
        data: cohort.cards,
    }))
}

/// Expired cards and the sum of their original values.
pub async fn get_expired_cards(
    State(state): State<AppState>,
) -> Result<Json<ExpiredCardsResponse>, AppError> {
    let cohort =
        gift_card_service::get_expired_cards(state.store.as_ref(), state.clock.as_ref()).await?;

    Ok(Json(ExpiredCardsResponse {
        message: "Expired gift cards retrieved successfully.".to_string(),
        total_expired_cards: cohort.cards.len(),
        total_expired_value_cents: cohort.total_value_cents,
        data: cohort.cards,
    }))
}

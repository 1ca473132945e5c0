//! HTTP route table.

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::{handlers, state::AppState};

/// Build the application router.
///
/// Static segments such as `/gift-cards/active` take priority over the
/// `{id}` capture, which accepts either a card id or a code.
pub fn router(state: AppState) -> Router {
    Router::new()
        // Public routes
        .route("/health", get(handlers::health::health_check))
        // Gift card routes
        .route(
            "/api/v1/gift-cards",
            post(handlers::gift_cards::issue_gift_card)
                .get(handlers::gift_cards::list_gift_cards)
                .delete(handlers::gift_cards::delete_all_gift_cards),
        )
        .route(
            "/api/v1/gift-cards/total-value",
            get(handlers::gift_cards::get_total_value),
        )
        .route(
            "/api/v1/gift-cards/active",
            get(handlers::gift_cards::get_active_cards),
        )
        .route(
            "/api/v1/gift-cards/expired",
            get(handlers::gift_cards::get_expired_cards),
        )
        .route(
            "/api/v1/gift-cards/{id}",
            get(handlers::gift_cards::get_gift_card),
        )
        .route(
            "/api/v1/gift-cards/{id}/deactivate",
            post(handlers::gift_cards::deactivate_gift_card),
        )
        .route(
            "/api/v1/gift-cards/{id}/refund",
            post(handlers::gift_cards::refund_gift_card),
        )
        .route(
            "/api/v1/gift-cards/{id}/usage-history",
            get(handlers::gift_cards::get_usage_history),
        )
        // Wallet routes
        .route(
            "/api/v1/wallet/transactions",
            get(handlers::wallet::list_transactions),
        )
        .route(
            "/api/v1/wallet/total-balance",
            get(handlers::wallet::get_total_balance),
        )
        .route(
            "/api/v1/wallet/pending-withdrawals",
            get(handlers::wallet::get_pending_withdrawals),
        )
        .route(
            "/api/v1/wallet/todays-earnings",
            get(handlers::wallet::get_todays_earnings),
        )
        .route(
            "/api/v1/wallet/platform-fees",
            get(handlers::wallet::get_platform_fees),
        )
        // Moderation routes
        .route(
            "/api/v1/moderation/settings",
            get(handlers::moderation::get_settings).put(handlers::moderation::update_settings),
        )
        // Request spans for every route
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use super::*;
    use crate::clock::FixedClock;
    use crate::store::memory::{MemoryStore, fixtures};

    fn app() -> (Router, Arc<MemoryStore>) {
        let clock = FixedClock::on(2025, 6, 15);
        let store = Arc::new(MemoryStore::new(clock.0));
        let state = AppState::new(store.clone(), Arc::new(clock));
        (router(state), store)
    }

    async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, json)
    }

    async fn issue(app: &Router, value_cents: i64) -> Value {
        let (status, body) = send(
            app,
            "POST",
            "/api/v1/gift-cards",
            Some(json!({
                "original_value_cents": value_cents,
                "expiry_date": "2026-06-15",
                "purchaser_name": "Ada",
                "recipient_name": "Grace"
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        body["data"].clone()
    }

    #[tokio::test]
    async fn health_reports_connected() {
        let (app, _) = app();

        let (status, body) = send(&app, "GET", "/health", None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
    }

    #[tokio::test]
    async fn issue_then_fetch_by_code() {
        let (app, _) = app();
        let card = issue(&app, 5_000).await;
        assert_eq!(card["status"], "ACTIVE");
        assert_eq!(card["current_balance_cents"], 5_000);

        let code = card["code"].as_str().unwrap();
        let (status, body) = send(&app, "GET", &format!("/api/v1/gift-cards/{code}"), None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["id"], card["id"]);
        assert!(body["message"].is_string());
    }

    #[tokio::test]
    async fn unknown_card_is_404() {
        let (app, _) = app();

        let (status, body) = send(&app, "GET", "/api/v1/gift-cards/KHS-0000-0000-0000", None).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "gift_card_not_found");
    }

    #[tokio::test]
    async fn second_deactivation_is_rejected() {
        let (app, _) = app();
        let card = issue(&app, 1_000).await;
        let uri = format!("/api/v1/gift-cards/{}/deactivate", card["id"].as_str().unwrap());

        let (first, body) = send(&app, "POST", &uri, None).await;
        assert_eq!(first, StatusCode::OK);
        assert_eq!(body["data"]["status"], "INACTIVE");
        assert_eq!(body["data"]["last_used_date"], "2025-06-15");

        let (second, body) = send(&app, "POST", &uri, None).await;
        assert_eq!(second, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "invalid_state");
    }

    #[tokio::test]
    async fn refund_reports_updated_balance() {
        let (app, _) = app();
        let card = issue(&app, 1_000).await;
        let uri = format!("/api/v1/gift-cards/{}/refund", card["id"].as_str().unwrap());

        let (status, body) = send(&app, "POST", &uri, Some(json!({ "amount_cents": 250 }))).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["updated_balance_cents"], 1_250);
    }

    #[tokio::test]
    async fn oversized_refund_is_rejected() {
        let (app, store) = app();
        let card = issue(&app, 1_000).await;
        let id = card["id"].as_str().unwrap();
        let uri = format!("/api/v1/gift-cards/{id}/refund");

        let (status, body) =
            send(&app, "POST", &uri, Some(json!({ "amount_cents": i64::MAX }))).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "invalid_request");
        let stored = store.gift_card(id.parse().unwrap()).unwrap();
        assert_eq!(stored.current_balance_cents, 1_000);
    }

    #[tokio::test]
    async fn code_in_id_only_route_gets_json_error() {
        let (app, _) = app();
        let card = issue(&app, 1_000).await;
        let code = card["code"].as_str().unwrap();

        for uri in [
            format!("/api/v1/gift-cards/{code}/deactivate"),
            format!("/api/v1/gift-cards/{code}/refund"),
        ] {
            let (status, body) = send(&app, "POST", &uri, Some(json!({ "amount_cents": 1 }))).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(body["error"]["code"], "invalid_request");
        }

        let uri = format!("/api/v1/gift-cards/{code}/usage-history");
        let (status, body) = send(&app, "GET", &uri, None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "invalid_request");
    }

    #[tokio::test]
    async fn malformed_bodies_get_json_error() {
        let (app, _) = app();
        let card = issue(&app, 1_000).await;
        let uri = format!("/api/v1/gift-cards/{}/refund", card["id"].as_str().unwrap());

        let (status, body) =
            send(&app, "POST", &uri, Some(json!({ "amount_cents": "lots" }))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "invalid_request");

        let (status, body) = send(
            &app,
            "PUT",
            "/api/v1/moderation/settings",
            Some(json!({ "notify_admin": "yes" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "invalid_request");
    }

    #[tokio::test]
    async fn cohort_routes_are_not_shadowed_by_identifier_capture() {
        let (app, store) = app();
        issue(&app, 1_000).await;
        store.seed_gift_card(fixtures::gift_card(
            "KHS-0000-0000-0009",
            crate::models::gift_card::GiftCardStatus::Active,
            400,
            400,
            fixtures::date(2025, 6, 1),
            fixtures::at(2025, 1, 1, 9, 0),
        ));

        let (status, body) = send(&app, "GET", "/api/v1/gift-cards/total-value", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total_cards"], 2);
        assert_eq!(body["total_value_cents"], 1_400);

        let (_, body) = send(&app, "GET", "/api/v1/gift-cards/expired", None).await;
        assert_eq!(body["total_expired_cards"], 1);
        assert_eq!(body["total_expired_value_cents"], 400);

        let (_, body) = send(&app, "GET", "/api/v1/gift-cards/active", None).await;
        assert_eq!(body["total_active_cards"], 1);
    }

    #[tokio::test]
    async fn pending_withdrawals_empty() {
        let (app, _) = app();

        let (status, body) = send(&app, "GET", "/api/v1/wallet/pending-withdrawals", None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total_pending_amount_cents"], 0);
        assert_eq!(body["total_requests"], 0);
    }

    #[tokio::test]
    async fn wallet_transactions_use_type_field() {
        let (app, store) = app();
        store.seed_payment(fixtures::payment(100, fixtures::at(2025, 6, 15, 9, 0)));

        let (status, body) = send(&app, "GET", "/api/v1/wallet/transactions", None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total"], 1);
        assert_eq!(body["data"][0]["type"], "Earning");
        assert_eq!(body["data"][0]["time"], "09:00 AM");
    }

    #[tokio::test]
    async fn moderation_settings_round_trip() {
        let (app, _) = app();

        let (status, body) = send(
            &app,
            "PUT",
            "/api/v1/moderation/settings",
            Some(json!({ "banned_words": ["spam"], "review_flag_threshold": 2 })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["banned_words"], json!(["spam"]));

        let (_, body) = send(&app, "GET", "/api/v1/moderation/settings", None).await;
        assert_eq!(body["data"]["review_flag_threshold"], 2);
        assert_eq!(body["data"]["notify_admin"], true);
    }
}

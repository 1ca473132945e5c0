//! Moderation settings HTTP handlers.
//!
//! - GET /api/v1/moderation/settings - Current settings (defaults if never saved)
//! - PUT /api/v1/moderation/settings - Partially update the settings

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};

use crate::{
    error::AppError,
    models::moderation::{ModerationSettingsResponse, UpdateModerationSettingsRequest},
    services::moderation_service,
    state::AppState,
};

pub async fn get_settings(
    State(state): State<AppState>,
) -> Result<Json<ModerationSettingsResponse>, AppError> {
    let settings = moderation_service::get_settings(state.store.as_ref()).await?;

    Ok(Json(ModerationSettingsResponse {
        message: "Moderation settings retrieved successfully.".to_string(),
        data: settings,
    }))
}

/// Update moderation settings.
///
/// # Request Body
///
/// Every field is optional; omitted fields keep their current value.
///
/// ```json
/// {
///   "banned_words": ["spam", "scam"],
///   "auto_flag_reviews": true,
///   "notify_admin": false,
///   "review_flag_threshold": 3
/// }
/// ```
pub async fn update_settings(
    State(state): State<AppState>,
    request: Result<Json<UpdateModerationSettingsRequest>, JsonRejection>,
) -> Result<Json<ModerationSettingsResponse>, AppError> {
    let Json(request) = request?;
    let settings = moderation_service::update_settings(state.store.as_ref(), request).await?;

    Ok(Json(ModerationSettingsResponse {
        message: "Moderation settings updated successfully.".to_string(),
        data: settings,
    }))
}

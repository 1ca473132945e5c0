//! Moderation settings service.
//!
//! Reads and updates the single moderation configuration row. When nothing
//! has been saved yet the defaults are reported.

use crate::{
    error::AppError,
    models::moderation::{ModerationSettings, UpdateModerationSettingsRequest},
    store::ModerationStore,
};

/// Current moderation settings, or the defaults when none are stored.
pub async fn get_settings<S>(store: &S) -> Result<ModerationSettings, AppError>
where
    S: ModerationStore + ?Sized,
{
    Ok(store.get_moderation_settings().await?.unwrap_or_default())
}

/// Trim banned words and drop empty entries, keeping their order.
fn normalize_banned_words(words: Vec<String>) -> Vec<String> {
    words
        .into_iter()
        .map(|w| w.trim().to_string())
        .filter(|w| !w.is_empty())
        .collect()
}

/// Merge `request` onto the stored settings and persist them.
///
/// # Errors
///
/// - `InvalidRequest`: Review flag threshold is negative
pub async fn update_settings<S>(
    store: &S,
    request: UpdateModerationSettingsRequest,
) -> Result<ModerationSettings, AppError>
where
    S: ModerationStore + ?Sized,
{
    if let Some(Some(threshold)) = request.review_flag_threshold
        && threshold < 0
    {
        return Err(AppError::InvalidRequest(
            "Review flag threshold must not be negative".to_string(),
        ));
    }

    let mut settings = get_settings(store).await?;

    if let Some(words) = request.banned_words {
        settings.banned_words = normalize_banned_words(words);
    }
    if let Some(auto_flag) = request.auto_flag_reviews {
        settings.auto_flag_reviews = auto_flag;
    }
    if let Some(notify) = request.notify_admin {
        settings.notify_admin = notify;
    }
    if let Some(threshold) = request.review_flag_threshold {
        settings.review_flag_threshold = threshold;
    }

    let saved = store.save_moderation_settings(&settings).await?;

    tracing::info!(
        banned_words = saved.banned_words.len(),
        auto_flag_reviews = saved.auto_flag_reviews,
        notify_admin = saved.notify_admin,
        review_flag_threshold = ?saved.review_flag_threshold,
        "Moderation settings updated"
    );

    Ok(saved)
}

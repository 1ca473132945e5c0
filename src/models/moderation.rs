//! Moderation configuration model.
//!
//! A single row in `moderation_settings` controls automated review flagging.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Represents the moderation settings row.
///
/// `id` is `None` until the settings have been saved for the first time;
/// until then the defaults are reported.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow, Serialize)]
pub struct ModerationSettings {
    pub id: Option<Uuid>,

    /// Words that cause a review to be flagged, in configured order
    pub banned_words: Vec<String>,

    pub auto_flag_reviews: bool,

    pub notify_admin: bool,

    /// Number of reports after which a review is flagged
    pub review_flag_threshold: Option<i32>,

    pub updated_at: Option<DateTime<Utc>>,
}

impl Default for ModerationSettings {
    fn default() -> Self {
        Self {
            id: None,
            banned_words: Vec::new(),
            auto_flag_reviews: false,
            notify_admin: true,
            review_flag_threshold: None,
            updated_at: None,
        }
    }
}

/// Partial update for the moderation settings.
///
/// Omitted fields keep their stored value. `review_flag_threshold` accepts
/// `null` to clear the threshold.
///
/// # JSON Example
///
/// ```json
/// {
///   "banned_words": ["spam", "scam"],
///   "auto_flag_reviews": true,
///   "review_flag_threshold": 3
/// }
/// ```
#[derive(Debug, Default, Deserialize)]
pub struct UpdateModerationSettingsRequest {
    pub banned_words: Option<Vec<String>>,
    pub auto_flag_reviews: Option<bool>,
    pub notify_admin: Option<bool>,
    #[serde(default, with = "double_option")]
    pub review_flag_threshold: Option<Option<i32>>,
}

#[derive(Debug, Serialize)]
pub struct ModerationSettingsResponse {
    pub message: String,
    pub data: ModerationSettings,
}

/// Distinguishes an absent field (`None`) from an explicit `null` (`Some(None)`).
mod double_option {
    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Option<i32>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<i32>::deserialize(deserializer).map(Some)
    }
}

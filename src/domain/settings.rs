//! Dashboard settings and the masked API-key store.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use utoipa::ToSchema;

/// Content-generation limits.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ContentSettings {
    /// Maximum generated title length.
    pub max_title_length: u32,
    /// Maximum generated description length.
    pub max_description_length: u32,
    /// Maximum hashtags per post.
    pub hashtag_limit: u32,
    /// JPEG quality for processed images.
    pub image_quality: u32,
    /// Maximum image dimensions (width, height).
    pub max_image_size: [u32; 2],
}

/// Instagram posting limits.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InstagramSettings {
    /// Maximum caption length.
    pub max_caption_length: u32,
    /// Maximum hashtags per post.
    pub max_hashtags: u32,
    /// Story duration in seconds.
    pub story_duration: u32,
    /// Reels duration in seconds.
    pub reels_duration: u32,
}

/// YouTube posting limits.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct YoutubeSettings {
    /// Maximum video title length.
    pub max_title_length: u32,
    /// Maximum video description length.
    pub max_description_length: u32,
    /// Maximum tags per video.
    pub max_tags: u32,
    /// Shorts duration in seconds.
    pub shorts_duration: u32,
}

/// Blog posting limits.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BlogSettings {
    /// Maximum post title length.
    pub max_title_length: u32,
    /// Minimum post body length.
    pub min_content_length: u32,
    /// Maximum post body length.
    pub max_content_length: u32,
    /// Maximum tags per post.
    pub max_tags: u32,
}

/// Per-platform posting limits.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SocialMediaSettings {
    /// Instagram limits.
    pub instagram: InstagramSettings,
    /// YouTube limits.
    pub youtube: YoutubeSettings,
    /// Blog limits.
    pub blog: BlogSettings,
}

/// Which notification categories are delivered.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NotificationTypes {
    /// Notify on successful posts.
    pub post_success: bool,
    /// Notify on failed posts.
    pub post_error: bool,
    /// Notify on system-level alerts.
    pub system_alert: bool,
    /// Send the daily summary report.
    pub daily_report: bool,
}

/// Notification delivery preferences.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NotificationSettings {
    /// Deliver notifications by email.
    pub email_notifications: bool,
    /// Deliver notifications over the realtime channel.
    pub push_notifications: bool,
    /// Per-category switches.
    pub notification_types: NotificationTypes,
    /// Delivery schedule (category name → `"HH:MM"` or `"immediate"`).
    pub notification_schedule: HashMap<String, String>,
}

/// Analytics retention and reporting settings.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsSettings {
    /// Default lookback window in days.
    pub tracking_period_days: u32,
    /// Hour of day the daily report is generated.
    pub report_generation_hour: u32,
    /// Whether conversion tracking is enabled.
    pub conversion_tracking: bool,
}

/// Complete dashboard settings document.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSettings {
    /// Daily posting times (`"HH:MM"`).
    pub posting_schedule: Vec<String>,
    /// Cities the scraper targets.
    pub target_cities: Vec<String>,
    /// Content-generation limits.
    pub content_settings: ContentSettings,
    /// Per-platform posting limits.
    pub social_media_settings: SocialMediaSettings,
    /// Notification delivery preferences.
    pub notification_settings: NotificationSettings,
    /// Analytics retention and reporting.
    pub analytics_settings: AnalyticsSettings,
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self {
            posting_schedule: vec![
                "09:00".to_string(),
                "15:00".to_string(),
                "21:00".to_string(),
            ],
            target_cities: vec![
                "Seoul".to_string(),
                "Busan".to_string(),
                "Incheon".to_string(),
                "Daegu".to_string(),
                "Daejeon".to_string(),
                "Gwangju".to_string(),
                "Ulsan".to_string(),
                "Sejong".to_string(),
                "Jeju".to_string(),
            ],
            content_settings: ContentSettings {
                max_title_length: 50,
                max_description_length: 500,
                hashtag_limit: 15,
                image_quality: 95,
                max_image_size: [1080, 1080],
            },
            social_media_settings: SocialMediaSettings {
                instagram: InstagramSettings {
                    max_caption_length: 2200,
                    max_hashtags: 30,
                    story_duration: 15,
                    reels_duration: 30,
                },
                youtube: YoutubeSettings {
                    max_title_length: 100,
                    max_description_length: 5000,
                    max_tags: 15,
                    shorts_duration: 60,
                },
                blog: BlogSettings {
                    max_title_length: 100,
                    min_content_length: 500,
                    max_content_length: 5000,
                    max_tags: 10,
                },
            },
            notification_settings: NotificationSettings {
                email_notifications: true,
                push_notifications: true,
                notification_types: NotificationTypes {
                    post_success: true,
                    post_error: true,
                    system_alert: true,
                    daily_report: true,
                },
                notification_schedule: HashMap::from([
                    ("dailyReport".to_string(), "09:00".to_string()),
                    ("errorAlert".to_string(), "immediate".to_string()),
                ]),
            },
            analytics_settings: AnalyticsSettings {
                tracking_period_days: 30,
                report_generation_hour: 8,
                conversion_tracking: true,
            },
        }
    }
}

/// External services the gateway can hold credentials for.
pub const KNOWN_SERVICES: [&str; 5] = ["openai", "instagram", "youtube", "wordpress", "airbnb"];

/// In-memory settings document plus API-key credentials.
///
/// API keys are write-only through the REST surface: reads always return
/// masked values.
#[derive(Debug)]
pub struct SettingsStore {
    settings: RwLock<DashboardSettings>,
    api_keys: RwLock<HashMap<String, String>>,
}

impl Default for SettingsStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SettingsStore {
    /// Creates a store seeded with default settings and no credentials.
    #[must_use]
    pub fn new() -> Self {
        Self {
            settings: RwLock::new(DashboardSettings::default()),
            api_keys: RwLock::new(HashMap::new()),
        }
    }

    /// Returns a clone of the current settings document.
    pub async fn get(&self) -> DashboardSettings {
        self.settings.read().await.clone()
    }

    /// Replaces the settings document.
    pub async fn update(&self, settings: DashboardSettings) {
        *self.settings.write().await = settings;
    }

    /// Returns a clone of the notification subsection.
    pub async fn notification_settings(&self) -> NotificationSettings {
        self.settings.read().await.notification_settings.clone()
    }

    /// Replaces the notification subsection only.
    pub async fn update_notification_settings(&self, notification: NotificationSettings) {
        self.settings.write().await.notification_settings = notification;
    }

    /// Stores API keys, returning the names that were updated.
    pub async fn update_api_keys(&self, keys: HashMap<String, String>) -> Vec<String> {
        let mut stored = self.api_keys.write().await;
        let mut updated: Vec<String> = keys.keys().cloned().collect();
        updated.sort();
        stored.extend(keys);
        updated
    }

    /// Returns all stored key names with masked values.
    pub async fn masked_api_keys(&self) -> HashMap<String, String> {
        let stored = self.api_keys.read().await;
        stored
            .iter()
            .map(|(name, value)| (name.clone(), mask_key(value)))
            .collect()
    }
}

/// Masks a credential for display: first three characters, then `***...`.
fn mask_key(value: &str) -> String {
    let prefix: String = value.chars().take(3).collect();
    format!("{prefix}***...")
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_shipped_configuration() {
        let settings = DashboardSettings::default();
        assert_eq!(settings.posting_schedule.len(), 3);
        assert_eq!(settings.target_cities.len(), 9);
        assert_eq!(settings.content_settings.max_title_length, 50);
        assert!(settings.notification_settings.push_notifications);
    }

    #[test]
    fn settings_serialize_camel_case() {
        let json = serde_json::to_string(&DashboardSettings::default());
        let Ok(json) = json else {
            panic!("serialization failed");
        };
        assert!(json.contains("postingSchedule"));
        assert!(json.contains("socialMediaSettings"));
        assert!(json.contains("maxCaptionLength"));
    }

    #[tokio::test]
    async fn update_replaces_document() {
        let store = SettingsStore::new();
        let mut settings = store.get().await;
        settings.posting_schedule = vec!["12:00".to_string()];
        store.update(settings).await;

        assert_eq!(store.get().await.posting_schedule, vec!["12:00"]);
    }

    #[tokio::test]
    async fn api_keys_read_back_masked() {
        let store = SettingsStore::new();
        let updated = store
            .update_api_keys(HashMap::from([(
                "openai".to_string(),
                "sk-super-secret".to_string(),
            )]))
            .await;
        assert_eq!(updated, vec!["openai"]);

        let masked = store.masked_api_keys().await;
        assert_eq!(masked.get("openai").map(String::as_str), Some("sk-***..."));
    }

    #[tokio::test]
    async fn notification_subsection_updates_in_place() {
        let store = SettingsStore::new();
        let mut notification = store.notification_settings().await;
        notification.email_notifications = false;
        store.update_notification_settings(notification).await;

        assert!(!store.get().await.notification_settings.email_notifications);
        assert!(store.get().await.notification_settings.push_notifications);
    }
}

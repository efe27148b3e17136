//! Database operations for user settings

use sqlx::{PgPool, Row};
use uuid::Uuid;

use super::types::{FontSize, Theme, UserSettings, Visibility};

/// Load a user's stored settings, if any.
pub async fn get_settings(
    pool: &PgPool,
    user_id: Uuid,
) -> Result<Option<UserSettings>, sqlx::Error> {
    let row = sqlx::query(
        r#"
        SELECT theme, notifications_enabled, notification_sound, notification_preview,
               enter_is_send, media_visibility, font_size,
               last_seen_visibility, profile_photo_visibility, about_visibility
        FROM user_settings
        WHERE user_id = $1
        "#,
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(|row| {
        let defaults = UserSettings::default();
        UserSettings {
            theme: Theme::from_str(row.get::<String, _>("theme").as_str())
                .unwrap_or(defaults.theme),
            notifications_enabled: row.get("notifications_enabled"),
            notification_sound: row.get("notification_sound"),
            notification_preview: row.get("notification_preview"),
            enter_is_send: row.get("enter_is_send"),
            media_visibility: row.get("media_visibility"),
            font_size: FontSize::from_str(row.get::<String, _>("font_size").as_str())
                .unwrap_or(defaults.font_size),
            last_seen_visibility: Visibility::from_str(
                row.get::<String, _>("last_seen_visibility").as_str(),
            )
            .unwrap_or(defaults.last_seen_visibility),
            profile_photo_visibility: Visibility::from_str(
                row.get::<String, _>("profile_photo_visibility").as_str(),
            )
            .unwrap_or(defaults.profile_photo_visibility),
            about_visibility: Visibility::from_str(
                row.get::<String, _>("about_visibility").as_str(),
            )
            .unwrap_or(defaults.about_visibility),
        }
    }))
}

/// Store the full settings set for a user, replacing any existing row.
pub async fn save_settings(
    pool: &PgPool,
    user_id: Uuid,
    settings: &UserSettings,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO user_settings (user_id, theme, notifications_enabled, notification_sound,
                                   notification_preview, enter_is_send, media_visibility,
                                   font_size, last_seen_visibility, profile_photo_visibility,
                                   about_visibility)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
        ON CONFLICT (user_id) DO UPDATE
        SET theme = EXCLUDED.theme,
            notifications_enabled = EXCLUDED.notifications_enabled,
            notification_sound = EXCLUDED.notification_sound,
            notification_preview = EXCLUDED.notification_preview,
            enter_is_send = EXCLUDED.enter_is_send,
            media_visibility = EXCLUDED.media_visibility,
            font_size = EXCLUDED.font_size,
            last_seen_visibility = EXCLUDED.last_seen_visibility,
            profile_photo_visibility = EXCLUDED.profile_photo_visibility,
            about_visibility = EXCLUDED.about_visibility
        "#,
    )
    .bind(user_id)
    .bind(settings.theme.as_str())
    .bind(settings.notifications_enabled)
    .bind(settings.notification_sound)
    .bind(settings.notification_preview)
    .bind(settings.enter_is_send)
    .bind(settings.media_visibility)
    .bind(settings.font_size.as_str())
    .bind(settings.last_seen_visibility.as_str())
    .bind(settings.profile_photo_visibility.as_str())
    .bind(settings.about_visibility.as_str())
    .execute(pool)
    .await?;

    Ok(())
}

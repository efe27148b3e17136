//! User settings types

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontSize {
    Small,
    Medium,
    Large,
}

/// Who can see a piece of profile information.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    Everyone,
    Contacts,
    Nobody,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
            Theme::System => "system",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            "system" => Some(Theme::System),
            _ => None,
        }
    }
}

impl FontSize {
    pub fn as_str(&self) -> &'static str {
        match self {
            FontSize::Small => "small",
            FontSize::Medium => "medium",
            FontSize::Large => "large",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "small" => Some(FontSize::Small),
            "medium" => Some(FontSize::Medium),
            "large" => Some(FontSize::Large),
            _ => None,
        }
    }
}

impl Visibility {
    pub fn as_str(&self) -> &'static str {
        match self {
            Visibility::Everyone => "everyone",
            Visibility::Contacts => "contacts",
            Visibility::Nobody => "nobody",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "everyone" => Some(Visibility::Everyone),
            "contacts" => Some(Visibility::Contacts),
            "nobody" => Some(Visibility::Nobody),
            _ => None,
        }
    }
}

/// The full settings set. Users without a stored row get these defaults.
#[derive(Debug, Clone, Serialize)]
pub struct UserSettings {
    pub theme: Theme,
    pub notifications_enabled: bool,
    pub notification_sound: bool,
    pub notification_preview: bool,
    pub enter_is_send: bool,
    pub media_visibility: bool,
    pub font_size: FontSize,
    pub last_seen_visibility: Visibility,
    pub profile_photo_visibility: Visibility,
    pub about_visibility: Visibility,
}

impl Default for UserSettings {
    fn default() -> Self {
        UserSettings {
            theme: Theme::Light,
            notifications_enabled: true,
            notification_sound: true,
            notification_preview: true,
            enter_is_send: false,
            media_visibility: true,
            font_size: FontSize::Medium,
            last_seen_visibility: Visibility::Everyone,
            profile_photo_visibility: Visibility::Everyone,
            about_visibility: Visibility::Everyone,
        }
    }
}

impl UserSettings {
    /// Overlay the provided fields of an update onto these settings.
    pub fn merged_with(&self, update: &UpdateSettingsRequest) -> UserSettings {
        UserSettings {
            theme: update.theme.unwrap_or(self.theme),
            notifications_enabled: update
                .notifications_enabled
                .unwrap_or(self.notifications_enabled),
            notification_sound: update.notification_sound.unwrap_or(self.notification_sound),
            notification_preview: update
                .notification_preview
                .unwrap_or(self.notification_preview),
            enter_is_send: update.enter_is_send.unwrap_or(self.enter_is_send),
            media_visibility: update.media_visibility.unwrap_or(self.media_visibility),
            font_size: update.font_size.unwrap_or(self.font_size),
            last_seen_visibility: update
                .last_seen_visibility
                .unwrap_or(self.last_seen_visibility),
            profile_photo_visibility: update
                .profile_photo_visibility
                .unwrap_or(self.profile_photo_visibility),
            about_visibility: update.about_visibility.unwrap_or(self.about_visibility),
        }
    }
}

/// Partial settings update; absent fields keep their current value.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateSettingsRequest {
    pub theme: Option<Theme>,
    pub notifications_enabled: Option<bool>,
    pub notification_sound: Option<bool>,
    pub notification_preview: Option<bool>,
    pub enter_is_send: Option<bool>,
    pub media_visibility: Option<bool>,
    pub font_size: Option<FontSize>,
    pub last_seen_visibility: Option<Visibility>,
    pub profile_photo_visibility: Option<Visibility>,
    pub about_visibility: Option<Visibility>,
}

impl UpdateSettingsRequest {
    pub fn is_empty(&self) -> bool {
        self.theme.is_none()
            && self.notifications_enabled.is_none()
            && self.notification_sound.is_none()
            && self.notification_preview.is_none()
            && self.enter_is_send.is_none()
            && self.media_visibility.is_none()
            && self.font_size.is_none()
            && self.last_seen_visibility.is_none()
            && self.profile_photo_visibility.is_none()
            && self.about_visibility.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn defaults_match_fresh_account() {
        let settings = UserSettings::default();
        assert_eq!(settings.theme, Theme::Light);
        assert!(settings.notifications_enabled);
        assert!(!settings.enter_is_send);
        assert_eq!(settings.font_size, FontSize::Medium);
        assert_eq!(settings.last_seen_visibility, Visibility::Everyone);
    }

    #[test]
    fn merge_only_touches_provided_fields() {
        let current = UserSettings::default();
        let update = UpdateSettingsRequest {
            theme: Some(Theme::Dark),
            enter_is_send: Some(true),
            ..Default::default()
        };

        let merged = current.merged_with(&update);
        assert_eq!(merged.theme, Theme::Dark);
        assert!(merged.enter_is_send);
        assert_eq!(merged.font_size, FontSize::Medium);
        assert!(merged.notifications_enabled);
    }

    #[test]
    fn empty_update_is_detected() {
        let update: UpdateSettingsRequest = serde_json::from_str("{}").unwrap();
        assert!(update.is_empty());
    }
}

//! Ephemeral status update types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Text,
    Image,
    Video,
}

impl Default for MediaType {
    fn default() -> Self {
        MediaType::Text
    }
}

impl MediaType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaType::Text => "text",
            MediaType::Image => "image",
            MediaType::Video => "video",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "text" => Some(MediaType::Text),
            "image" => Some(MediaType::Image),
            "video" => Some(MediaType::Video),
            _ => None,
        }
    }
}

/// A status post as stored, including the viewer roster.
#[derive(Debug, Clone)]
pub struct StatusUpdate {
    pub id: Uuid,
    pub user_id: Uuid,
    pub contact_name: String,
    pub contact_phone: String,
    pub content: String,
    pub media_url: Option<String>,
    pub media_type: MediaType,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub viewers: Vec<Uuid>,
}

impl StatusUpdate {
    /// View of this status for a particular user.
    pub fn view_for(&self, user_id: Uuid) -> StatusView {
        StatusView {
            id: self.id,
            user_id: self.user_id,
            contact_name: self.contact_name.clone(),
            contact_phone: self.contact_phone.clone(),
            content: self.content.clone(),
            media_url: self.media_url.clone(),
            media_type: self.media_type,
            created_at: self.created_at,
            expires_at: self.expires_at,
            viewed: self.viewers.contains(&user_id),
            views_count: self.viewers.len() as i64,
        }
    }
}

/// Status as presented to a viewer: the raw viewer roster is replaced by
/// the caller's own view flag and a count.
#[derive(Debug, Clone, Serialize)]
pub struct StatusView {
    pub id: Uuid,
    pub user_id: Uuid,
    pub contact_name: String,
    pub contact_phone: String,
    pub content: String,
    pub media_url: Option<String>,
    pub media_type: MediaType,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub viewed: bool,
    pub views_count: i64,
}

#[derive(Debug, Deserialize)]
pub struct CreateStatusRequest {
    pub content: String,
    pub media_url: Option<String>,
    #[serde(default)]
    pub media_type: MediaType,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(viewers: Vec<Uuid>) -> StatusUpdate {
        StatusUpdate {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            contact_name: "Asha".to_string(),
            contact_phone: "+911234567890".to_string(),
            content: "On holiday this week".to_string(),
            media_url: None,
            media_type: MediaType::Text,
            created_at: Utc::now(),
            expires_at: Utc::now() + chrono::Duration::hours(24),
            viewers,
        }
    }

    #[test]
    fn view_reflects_whether_caller_has_seen_it() {
        let viewer = Uuid::new_v4();
        let status = sample(vec![viewer, Uuid::new_v4()]);

        let seen = status.view_for(viewer);
        assert!(seen.viewed);
        assert_eq!(seen.views_count, 2);

        let unseen = status.view_for(Uuid::new_v4());
        assert!(!unseen.viewed);
        assert_eq!(unseen.views_count, 2);
    }

    #[test]
    fn media_type_defaults_to_text() {
        let request: CreateStatusRequest =
            serde_json::from_str(r#"{"content": "hi"}"#).unwrap();
        assert_eq!(request.media_type, MediaType::Text);
    }
}

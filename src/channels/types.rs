//! Broadcast channel types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One-to-many broadcast channel. Only the creator posts; everyone else
/// follows.
#[derive(Debug, Clone, Serialize)]
pub struct Channel {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub avatar_url: Option<String>,
    pub creator_id: Uuid,
    pub followers_count: i32,
    pub verified: bool,
    pub created_at: DateTime<Utc>,
}

/// A channel annotated with the requesting user's relationship to it.
#[derive(Debug, Clone, Serialize)]
pub struct ChannelView {
    #[serde(flatten)]
    pub channel: Channel,
    pub is_following: bool,
    pub is_creator: bool,
}

#[derive(Debug, Deserialize)]
pub struct CreateChannelRequest {
    pub name: String,
    pub description: Option<String>,
    pub avatar_url: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChannelMessage {
    pub id: Uuid,
    pub channel_id: Uuid,
    pub content: String,
    pub media_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct PostChannelMessageRequest {
    pub content: String,
    pub media_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn channel_view_flattens_channel_fields() {
        let view = ChannelView {
            channel: Channel {
                id: Uuid::new_v4(),
                name: "Deals".to_string(),
                description: None,
                avatar_url: None,
                creator_id: Uuid::new_v4(),
                followers_count: 3,
                verified: false,
                created_at: Utc::now(),
            },
            is_following: true,
            is_creator: false,
        };

        let value = serde_json::to_value(&view).unwrap();
        assert_eq!(value["name"], "Deals");
        assert_eq!(value["followers_count"], 3);
        assert_eq!(value["is_following"], true);
        assert_eq!(value["is_creator"], false);
    }
}

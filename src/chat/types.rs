//! Chat models and request types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::simulation::MessageStatus;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageDirection {
    Outbound,
    Inbound,
}

impl MessageDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Outbound => "outbound",
            Self::Inbound => "inbound",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "outbound" => Some(Self::Outbound),
            "inbound" => Some(Self::Inbound),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageType {
    Text,
    Template,
    Image,
    Document,
}

impl MessageType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Template => "template",
            Self::Image => "image",
            Self::Document => "document",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "text" => Some(Self::Text),
            "template" => Some(Self::Template),
            "image" => Some(Self::Image),
            "document" => Some(Self::Document),
            _ => None,
        }
    }
}

impl Default for MessageType {
    fn default() -> Self {
        Self::Text
    }
}

/// Message row as stored in the database.
///
/// Created in `sent` status when a send is requested; mutated only by the
/// simulators (and the manual status-correction endpoint) thereafter.
#[derive(Debug, Clone, Serialize)]
pub struct Message {
    pub id: Uuid,
    pub thread_id: Uuid,
    pub direction: MessageDirection,
    pub content: String,
    #[serde(rename = "type")]
    pub message_type: MessageType,
    pub status: MessageStatus,
    pub timestamp: DateTime<Utc>,
}

/// Chat thread enriched with contact info for the thread list.
#[derive(Debug, Clone, Serialize)]
pub struct ChatThread {
    pub id: Uuid,
    pub user_id: Uuid,
    pub contact_id: Uuid,
    pub contact_name: String,
    pub contact_phone: String,
    pub last_message: Option<String>,
    pub unread_count: i32,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct SendMessageRequest {
    pub contact_id: Uuid,
    pub content: String,
    #[serde(rename = "type", default)]
    pub message_type: MessageType,
}

#[derive(Debug, Deserialize)]
pub struct SendTemplateRequest {
    pub contact_id: Uuid,
    pub template_id: String,
    #[serde(default)]
    pub parameters: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateMessageStatusRequest {
    pub status: MessageStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direction_and_type_round_trip() {
        assert_eq!(
            MessageDirection::from_str(MessageDirection::Inbound.as_str()),
            Some(MessageDirection::Inbound)
        );
        assert_eq!(
            MessageType::from_str(MessageType::Template.as_str()),
            Some(MessageType::Template)
        );
        assert_eq!(MessageType::from_str("audio"), None);
    }

    #[test]
    fn message_type_defaults_to_text() {
        let request: SendMessageRequest = serde_json::from_str(
            r#"{"contact_id": "6a2f41a3-c54c-fce8-32d2-0324e1c32e22", "content": "hi"}"#,
        )
        .unwrap();
        assert_eq!(request.message_type, MessageType::Text);
    }
}

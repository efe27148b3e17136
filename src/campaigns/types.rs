//! Campaign models and request/response types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::simulation::MessageStatus;

/// Lifecycle status of a campaign.
///
/// A campaign is created `active` with counters at zero and moves to
/// `completed` exactly once, at the end of its simulation run. `draft` and
/// `paused` exist for dashboard workflows that stage a campaign without
/// launching it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CampaignStatus {
    Draft,
    Active,
    Completed,
    Paused,
}

impl CampaignStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Active => "active",
            Self::Completed => "completed",
            Self::Paused => "paused",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "draft" => Some(Self::Draft),
            "active" => Some(Self::Active),
            "completed" => Some(Self::Completed),
            "paused" => Some(Self::Paused),
            _ => None,
        }
    }
}

/// Campaign row as stored in the database.
#[derive(Debug, Clone, Serialize)]
pub struct Campaign {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub template_id: Option<String>,
    pub status: CampaignStatus,
    pub total_contacts: i32,
    pub delivered_count: i32,
    pub read_count: i32,
    #[serde(skip_serializing)]
    pub contact_ids: Vec<Uuid>,
    #[serde(skip_serializing)]
    pub message_ids: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
}

/// Request body for creating (and launching) a campaign.
#[derive(Debug, Deserialize)]
pub struct CreateCampaignRequest {
    pub name: String,
    pub sheet_url: String,
    pub gid: Option<String>,
    pub template_id: Option<String>,
    #[serde(default)]
    pub template_parameters: Vec<String>,
}

/// Per-status message counts for a campaign.
#[derive(Debug, Serialize)]
pub struct CampaignStats {
    pub campaign_id: Uuid,
    pub total_contacts: i32,
    pub sent_count: i64,
    pub delivered_count: i64,
    pub read_count: i64,
    pub failed_count: i64,
}

/// One campaign recipient with the status of the message sent to them.
#[derive(Debug, Serialize)]
pub struct CampaignContact {
    pub contact_id: Uuid,
    pub name: String,
    pub phone: String,
    pub message_status: MessageStatus,
    pub sent_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_string_round_trip() {
        for status in [
            CampaignStatus::Draft,
            CampaignStatus::Active,
            CampaignStatus::Completed,
            CampaignStatus::Paused,
        ] {
            assert_eq!(CampaignStatus::from_str(status.as_str()), Some(status));
        }
        assert_eq!(CampaignStatus::from_str("archived"), None);
    }

    #[test]
    fn campaign_serialization_omits_id_arrays() {
        let campaign = Campaign {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            name: "Launch".to_string(),
            template_id: None,
            status: CampaignStatus::Active,
            total_contacts: 2,
            delivered_count: 0,
            read_count: 0,
            contact_ids: vec![Uuid::new_v4()],
            message_ids: vec![Uuid::new_v4()],
            created_at: Utc::now(),
        };
        let json = serde_json::to_value(&campaign).unwrap();
        assert!(json.get("contact_ids").is_none());
        assert!(json.get("message_ids").is_none());
        assert_eq!(json["status"], "active");
    }
}

//! Community and group types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Membership role within a community or group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemberRole {
    Admin,
    Member,
}

impl MemberRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            MemberRole::Admin => "admin",
            MemberRole::Member => "member",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "admin" => Some(MemberRole::Admin),
            "member" => Some(MemberRole::Member),
            _ => None,
        }
    }
}

/// A community: a bundle of groups sharing a member roster, always
/// carrying an auto-created announcement group.
#[derive(Debug, Clone, Serialize)]
pub struct Community {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub icon_url: Option<String>,
    pub creator_id: Uuid,
    pub announcement_group_id: Uuid,
    pub members_count: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Group {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub icon_url: Option<String>,
    pub community_id: Uuid,
    pub creator_id: Uuid,
    pub members_count: i32,
    pub created_at: DateTime<Utc>,
}

/// A community annotated with its groups and the caller's membership.
#[derive(Debug, Clone, Serialize)]
pub struct CommunityView {
    #[serde(flatten)]
    pub community: Community,
    pub groups: Vec<Group>,
    pub is_member: bool,
    pub is_admin: bool,
}

#[derive(Debug, Deserialize)]
pub struct CreateCommunityRequest {
    pub name: String,
    pub description: Option<String>,
    pub icon_url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateGroupRequest {
    pub name: String,
    pub description: Option<String>,
    pub icon_url: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct GroupMessage {
    pub id: Uuid,
    pub group_id: Uuid,
    pub user_id: Uuid,
    pub user_name: String,
    pub content: String,
    pub media_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct SendGroupMessageRequest {
    pub content: String,
    pub media_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_round_trip() {
        for role in [MemberRole::Admin, MemberRole::Member] {
            assert_eq!(MemberRole::from_str(role.as_str()), Some(role));
        }
        assert_eq!(MemberRole::from_str("owner"), None);
    }
}

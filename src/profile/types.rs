//! Business profile types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::users::User;

#[derive(Debug, Clone, Serialize)]
pub struct ProfileResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub business_name: Option<String>,
    pub business_address: Option<String>,
    pub website: Option<String>,
    pub business_hours: Option<String>,
    pub business_description: Option<String>,
    pub about: String,
    pub created_at: DateTime<Utc>,
}

impl From<User> for ProfileResponse {
    fn from(user: User) -> Self {
        ProfileResponse {
            id: user.id,
            name: user.name,
            email: user.email,
            phone: user.phone,
            business_name: user.business_name,
            business_address: user.business_address,
            website: user.website,
            business_hours: user.business_hours,
            business_description: user.business_description,
            about: user.about.unwrap_or_else(|| "Available".to_string()),
            created_at: user.created_at,
        }
    }
}

/// Partial profile update; absent fields are left untouched.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateProfileRequest {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub business_name: Option<String>,
    pub business_address: Option<String>,
    pub website: Option<String>,
    pub business_hours: Option<String>,
    pub business_description: Option<String>,
    pub about: Option<String>,
}

impl UpdateProfileRequest {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.phone.is_none()
            && self.business_name.is_none()
            && self.business_address.is_none()
            && self.website.is_none()
            && self.business_hours.is_none()
            && self.business_description.is_none()
            && self.about.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_update_is_detected() {
        let request: UpdateProfileRequest = serde_json::from_str("{}").unwrap();
        assert!(request.is_empty());

        let request: UpdateProfileRequest =
            serde_json::from_str(r#"{"about": "Out of office"}"#).unwrap();
        assert!(!request.is_empty());
    }

    #[test]
    fn about_defaults_to_available() {
        let user = User {
            id: Uuid::new_v4(),
            name: "Asha".to_string(),
            email: "asha@example.com".to_string(),
            password_hash: "x".to_string(),
            phone: None,
            business_name: None,
            business_address: None,
            website: None,
            business_hours: None,
            business_description: None,
            about: None,
            created_at: Utc::now(),
        };

        let profile = ProfileResponse::from(user);
        assert_eq!(profile.about, "Available");
    }
}

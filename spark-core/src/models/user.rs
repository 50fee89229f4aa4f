use serde::{Deserialize, Serialize};

/// Dating preferences shown on the profile and preference screens
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct Preferences {
    pub sexual_preference: Option<String>,
    pub sexual_role: Option<String>,
    pub sexual_position: Option<String>,
    #[serde(default)]
    pub intimacy_preferences: Vec<String>,
    pub sex_style: Option<String>,
    pub hiv_status: Option<String>,
    pub safety_practices: Option<String>,
    #[serde(default)]
    pub show_publicly: bool,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct User {
    pub id: String,
    pub username: String,
    pub age: u32,
    pub gender: String,
    /// Distance from the local user in kilometres
    pub distance: u32,
    pub bio: Option<String>,
    pub profile_picture: String,
    pub location: Option<String>,
    #[serde(default)]
    pub interests: Vec<String>,
    pub last_active: Option<String>,
    pub is_online: bool,
    #[serde(default)]
    pub preferences: Preferences,
    pub height: Option<u32>,
    pub weight: Option<u32>,
    pub body_type: Option<String>,
    pub ethnicity: Option<String>,
    pub relationship_status: Option<String>,
}

impl User {
    /// Seeded users have numeric ids; signed-up users do not.
    pub fn numeric_id(&self) -> Option<u32> {
        self.id.parse().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_id() {
        let mut user = User {
            id: "12".to_string(),
            ..Default::default()
        };
        assert_eq!(user.numeric_id(), Some(12));

        user.id = "user_1700000000".to_string();
        assert_eq!(user.numeric_id(), None);
    }

    #[test]
    fn test_missing_collections_default_to_empty() {
        let json = r#"{
            "id": "3",
            "username": "Taylor",
            "age": 30,
            "gender": "Non-binary",
            "distance": 7,
            "bio": null,
            "profile_picture": "https://randomuser.me/api/portraits/women/91.jpg",
            "location": "Uptown",
            "last_active": null,
            "is_online": false,
            "height": null,
            "weight": null,
            "body_type": null,
            "ethnicity": null,
            "relationship_status": null
        }"#;

        let user: User = serde_json::from_str(json).unwrap();
        assert!(user.interests.is_empty());
        assert_eq!(user.preferences, Preferences::default());
    }
}

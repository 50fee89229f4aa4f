use serde::{Deserialize, Serialize};

pub const DEFAULT_AVATAR: &str = "https://randomuser.me/api/portraits/men/1.jpg";

/// The signed-in account, as opposed to a discoverable profile
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct AccountUser {
    pub id: String,
    pub name: String,
    pub email: String,
    pub profile_picture: String,
    pub gender: String,
    pub sexual_preference: String,
    pub sexual_interests: Vec<String>,
}

impl AccountUser {
    pub fn new(id: impl Into<String>, name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            email: email.into(),
            profile_picture: DEFAULT_AVATAR.to_string(),
            gender: "Not specified".to_string(),
            sexual_preference: "Not specified".to_string(),
            sexual_interests: vec![
                "Dating".to_string(),
                "Hookups".to_string(),
                "Friendship".to_string(),
            ],
        }
    }
}

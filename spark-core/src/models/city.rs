use serde::{Deserialize, Serialize};

/// A city on the explore screen with its count of active users
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct City {
    pub id: String,
    pub name: String,
    pub country: String,
    pub active_users: u32,
    /// Kilometres from the local user
    pub distance: Option<u32>,
    pub image_url: Option<String>,
}

impl City {
    /// Case-insensitive substring match on name or country; `query` must
    /// already be lowercase
    pub fn matches(&self, query: &str) -> bool {
        self.name.to_lowercase().contains(query) || self.country.to_lowercase().contains(query)
    }
}

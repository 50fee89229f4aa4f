use serde::{Deserialize, Serialize};

use super::now_timestamp;

/// A two-party conversation with a rolling summary of its latest message.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Chat {
    pub id: String,
    pub participants: [String; 2],
    pub last_message: String,
    pub last_message_time: String,
    pub unread_count: u32,
    // Display fields for the chat list
    pub username: Option<String>,
    pub profile_image: Option<String>,
    pub is_online: Option<bool>,
    pub last_seen: Option<String>,
}

impl Chat {
    /// New chat with an empty summary, participants kept in the given order
    pub fn new(id: impl Into<String>, first: impl Into<String>, second: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            participants: [first.into(), second.into()],
            last_message: String::new(),
            last_message_time: now_timestamp(),
            unread_count: 0,
            username: None,
            profile_image: None,
            is_online: None,
            last_seen: None,
        }
    }

    pub fn includes(&self, user_id: &str) -> bool {
        self.participants.iter().any(|p| p == user_id)
    }

    /// Whether this chat is between exactly these two users, in either order
    pub fn is_between(&self, a: &str, b: &str) -> bool {
        self.includes(a) && self.includes(b)
    }

    /// The other participant, if `user_id` takes part in the chat
    pub fn peer_of(&self, user_id: &str) -> Option<&str> {
        match &self.participants {
            [first, second] if first == user_id => Some(second.as_str()),
            [first, second] if second == user_id => Some(first.as_str()),
            _ => None,
        }
    }
}

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::now_timestamp;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Message {
    pub id: String,
    pub chat_id: String,
    pub sender_id: String,
    pub content: String,
    pub timestamp: String,
    pub read: bool,
    #[serde(default)]
    pub delivered: bool,
}

impl Message {
    /// A freshly delivered, unread message stamped with the current time
    pub fn new(
        chat_id: impl Into<String>,
        sender_id: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            id: format!("msg_{}", Uuid::new_v4().simple()),
            chat_id: chat_id.into(),
            sender_id: sender_id.into(),
            content: content.into(),
            timestamp: now_timestamp(),
            read: false,
            delivered: true,
        }
    }
}

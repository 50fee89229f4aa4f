use serde::{Deserialize, Serialize};

use crate::models::{Chat, Message, User};

/// A single store mutation, emitted by the scheduler or the app shell and
/// applied by the store executor.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum StoreIntent {
    #[serde(rename = "create_chat")]
    CreateChat { chat: Chat },
    /// Append a message and roll its chat summary forward
    #[serde(rename = "append_message")]
    AppendMessage { message: Message, unread_delta: u32 },
    #[serde(rename = "mark_read")]
    MarkRead { chat_id: String },
    #[serde(rename = "update_user")]
    UpdateUser { user: User },
}

impl StoreIntent {
    /// Short label for logging
    pub fn kind(&self) -> &'static str {
        match self {
            StoreIntent::CreateChat { .. } => "create_chat",
            StoreIntent::AppendMessage { .. } => "append_message",
            StoreIntent::MarkRead { .. } => "mark_read",
            StoreIntent::UpdateUser { .. } => "update_user",
        }
    }
}

use spark_core::{Chat, StoreIntent};
use tracing::info;

use crate::models::input::{CreateChatInput, MarkAsReadInput, ValidateExt};
use crate::state::AppState;
use crate::utils::generate_deterministic_chat_id;
use crate::utils::validation::validate_chat_id;

/// All chats, most recent activity first
pub fn get_chats(state: &AppState) -> Vec<Chat> {
    state.store.list_chats()
}

pub fn get_chat(state: &AppState, chat_id: &str) -> Result<Chat, String> {
    validate_chat_id(chat_id)?;
    state
        .store
        .get_chat(chat_id)
        .ok_or_else(|| format!("Chat {} not found", chat_id))
}

/// Open the chat between the local user and `input.user_id`, creating it if
/// the two have never talked
pub async fn create_chat(state: &AppState, input: CreateChatInput) -> Result<Chat, String> {
    input.validate_input()?;

    let self_id = state.local_user_id();
    if input.user_id == self_id {
        return Err("Cannot start a chat with yourself".to_string());
    }

    let peer = state
        .store
        .get_user(&input.user_id)
        .ok_or_else(|| format!("User {} not found", input.user_id))?;

    if let Some(existing) = state.store.find_chat_between(self_id, &peer.id) {
        return Ok(existing);
    }

    let mut chat = Chat::new(
        generate_deterministic_chat_id(self_id, &peer.id),
        self_id,
        peer.id.clone(),
    );
    chat.username = Some(peer.username.clone());
    chat.profile_image = Some(peer.profile_picture.clone());
    chat.is_online = Some(peer.is_online);
    chat.last_seen = peer.last_active.clone();

    let chat_id = chat.id.clone();
    if !state.writer.apply(StoreIntent::CreateChat { chat }).await {
        // Lost a race with another create for the same pair
        info!("Chat {} already existed", chat_id);
    }

    state
        .store
        .get_chat(&chat_id)
        .ok_or_else(|| "Failed to create chat".to_string())
}

pub async fn mark_as_read(state: &AppState, input: MarkAsReadInput) -> Result<(), String> {
    input.validate_input()?;

    if state
        .writer
        .apply(StoreIntent::MarkRead {
            chat_id: input.chat_id.clone(),
        })
        .await
    {
        Ok(())
    } else {
        Err(format!("Chat {} not found", input.chat_id))
    }
}

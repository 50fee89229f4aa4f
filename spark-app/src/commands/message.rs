use rand::Rng;
use spark_core::random::{delay_between, pick_or};
use spark_core::{Message, StoreIntent};
use tracing::debug;

use crate::models::input::{GetMessagesInput, SendMessageInput, ValidateExt};
use crate::state::AppState;
use crate::utils::simulate_latency;

/// What the other side says back to a message the user sent
pub const AUTO_REPLIES: [&str; 10] = [
    "That's great!",
    "Sounds good to me.",
    "I'd love to hear more about that.",
    "Interesting! Tell me more.",
    "Cool! What are you up to now?",
    "Nice to hear from you!",
    "I was just thinking about that!",
    "Absolutely!",
    "Let's meet up soon!",
    "Haha, that's funny.",
];

/// Messages of a chat in send order; with a limit, only the most recent ones
pub fn get_messages(state: &AppState, input: GetMessagesInput) -> Result<Vec<Message>, String> {
    input.validate_input()?;

    if state.store.get_chat(&input.chat_id).is_none() {
        return Err(format!("Chat {} not found", input.chat_id));
    }

    let mut messages = state.store.get_messages(&input.chat_id);
    if let Some(limit) = input.limit {
        let skip = messages.len().saturating_sub(limit);
        messages.drain(..skip);
    }
    Ok(messages)
}

/// Send a message as the local user. The other participant may answer a few
/// seconds later.
pub async fn send_message(state: &AppState, input: SendMessageInput) -> Result<Message, String> {
    input.validate_input()?;

    let self_id = state.local_user_id().to_string();
    let chat = state
        .store
        .get_chat(&input.chat_id)
        .ok_or_else(|| format!("Chat {} not found", input.chat_id))?;
    let peer_id = chat
        .peer_of(&self_id)
        .ok_or_else(|| "You are not a participant in this chat".to_string())?
        .to_string();

    simulate_latency(state.config.send_latency).await;

    let message = Message::new(&chat.id, &self_id, input.content);
    let sent = state
        .writer
        .apply(StoreIntent::AppendMessage {
            message: message.clone(),
            unread_delta: 0,
        })
        .await;
    if !sent {
        return Err("Failed to send message".to_string());
    }

    schedule_auto_reply(state, &chat.id, &peer_id);
    Ok(message)
}

fn schedule_auto_reply(state: &AppState, chat_id: &str, peer_id: &str) {
    let config = &state.config;
    let planned = state.with_rng(|rng| {
        if !rng.gen_bool(config.auto_reply_probability.clamp(0.0, 1.0)) {
            return None;
        }
        let delay = delay_between(rng, config.auto_reply_min_delay, config.auto_reply_max_delay);
        Some((delay, pick_or(rng, &AUTO_REPLIES, AUTO_REPLIES[0])))
    });
    let Some((delay, content)) = planned else {
        return;
    };

    debug!("Auto-reply from {} in {:?}", peer_id, delay);

    let writer = state.writer.clone();
    let chat_id = chat_id.to_string();
    let peer_id = peer_id.to_string();
    let handle = tokio::spawn(async move {
        tokio::time::sleep(delay).await;
        let mut reply = Message::new(chat_id, peer_id, content);
        // The chat is open while the reply comes in
        reply.read = true;
        writer.submit(StoreIntent::AppendMessage {
            message: reply,
            unread_delta: 0,
        });
    });
    state.track_reply(handle);
}

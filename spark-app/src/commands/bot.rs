use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct BotStatus {
    pub active: bool,
    pub queued: usize,
    pub pending_welcomes: usize,
}

/// Start the bot conversations; fails if there are too few users to pair up
pub fn start_bot_messaging(state: &AppState) -> Result<(), String> {
    if state.scheduler.start() {
        Ok(())
    } else {
        Err(format!(
            "Not enough users to start bot messaging (need {})",
            state.scheduler.config().min_users
        ))
    }
}

pub fn stop_bot_messaging(state: &AppState) {
    state.scheduler.stop();
}

pub fn bot_queue_len(state: &AppState) -> usize {
    state.scheduler.queued_count()
}

pub fn bot_status(state: &AppState) -> BotStatus {
    BotStatus {
        active: state.scheduler.is_active(),
        queued: state.scheduler.queued_count(),
        pending_welcomes: state.scheduler.pending_welcome_count(),
    }
}

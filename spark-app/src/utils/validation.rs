//! Input validation for identifiers
//!
//! Note: Most validation is handled by garde in models/input.rs.
//! These functions cover commands that take bare ids instead of DTOs.

/// Maximum lengths for various fields
pub const MAX_USER_ID_LENGTH: usize = 128;
pub const MAX_CHAT_ID_LENGTH: usize = 256;

/// Validate a user id: seeded ids are numeric, signed-up ids look like `user_<millis>`
pub fn validate_user_id(user_id: &str) -> Result<(), String> {
    validate_id(user_id, "User ID", MAX_USER_ID_LENGTH)
}

pub fn validate_chat_id(chat_id: &str) -> Result<(), String> {
    validate_id(chat_id, "Chat ID", MAX_CHAT_ID_LENGTH)
}

fn validate_id(id: &str, label: &str, max_length: usize) -> Result<(), String> {
    if id.is_empty() {
        return Err(format!("{} cannot be empty", label));
    }
    if id.len() > max_length {
        return Err(format!("{} too long (max {} characters)", label, max_length));
    }
    if !id
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    {
        return Err(format!("{} contains invalid characters", label));
    }
    Ok(())
}

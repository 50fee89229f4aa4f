//! Input DTOs with garde validation for shell commands.
//!
//! These structs validate caller data before any store mutation.

use garde::Validate;
use serde::Deserialize;

/// Validation constants
const MAX_USER_ID_LENGTH: usize = 128;
const MAX_CHAT_ID_LENGTH: usize = 256;
const MAX_MESSAGE_LENGTH: usize = 10000;
const MAX_SEARCH_QUERY_LENGTH: usize = 200;
const MAX_NAME_LENGTH: usize = 100;
const MAX_BIO_LENGTH: usize = 500;
const MAX_LOCATION_LENGTH: usize = 100;
const MAX_INTERESTS: usize = 10;
const MAX_INTEREST_LENGTH: usize = 50;

/// Custom validation for a profile's interest tags
fn validate_interests(value: &Option<Vec<String>>, _ctx: &()) -> garde::Result {
    let Some(interests) = value else {
        return Ok(());
    };
    if interests.len() > MAX_INTERESTS {
        return Err(garde::Error::new("Too many interests"));
    }
    if interests
        .iter()
        .any(|i| i.trim().is_empty() || i.len() > MAX_INTEREST_LENGTH)
    {
        return Err(garde::Error::new("Invalid interest"));
    }
    Ok(())
}

/// Input for opening a chat with another user
#[derive(Debug, Deserialize, Validate)]
#[garde(context(()))]
pub struct CreateChatInput {
    #[garde(length(min = 1, max = MAX_USER_ID_LENGTH))]
    pub user_id: String,
}

/// Input for getting messages from a chat
#[derive(Debug, Deserialize, Validate)]
#[garde(context(()))]
pub struct GetMessagesInput {
    #[garde(length(min = 1, max = MAX_CHAT_ID_LENGTH))]
    pub chat_id: String,
    /// Only the most recent `limit` messages
    #[garde(range(min = 1, max = 1000))]
    pub limit: Option<usize>,
}

/// Input for sending a message as the local user
#[derive(Debug, Deserialize, Validate)]
#[garde(context(()))]
pub struct SendMessageInput {
    #[garde(length(min = 1, max = MAX_CHAT_ID_LENGTH))]
    pub chat_id: String,
    #[garde(length(min = 1, max = MAX_MESSAGE_LENGTH))]
    pub content: String,
}

/// Input for marking a chat as read
#[derive(Debug, Deserialize, Validate)]
#[garde(context(()))]
pub struct MarkAsReadInput {
    #[garde(length(min = 1, max = MAX_CHAT_ID_LENGTH))]
    pub chat_id: String,
}

/// Input for searching users by name or bio. Empty matches everyone.
#[derive(Debug, Deserialize, Validate)]
#[garde(context(()))]
pub struct SearchUsersInput {
    #[garde(length(max = MAX_SEARCH_QUERY_LENGTH))]
    pub query: String,
}

/// Input for searching cities by name or country. Empty matches every city.
#[derive(Debug, Deserialize, Validate)]
#[garde(context(()))]
pub struct SearchCitiesInput {
    #[garde(length(max = MAX_SEARCH_QUERY_LENGTH))]
    pub query: String,
}

#[derive(Debug, Deserialize, Validate)]
#[garde(context(()))]
pub struct LoginInput {
    #[garde(email)]
    pub email: String,
    #[garde(length(min = 1, max = 128))]
    pub password: String,
}

#[derive(Debug, Deserialize, Validate)]
#[garde(context(()))]
pub struct SignupInput {
    #[garde(length(min = 1, max = MAX_NAME_LENGTH))]
    pub name: String,
    #[garde(email)]
    pub email: String,
    #[garde(length(min = 6, max = 128))]
    pub password: String,
    #[garde(length(max = 50))]
    pub gender: Option<String>,
    #[garde(length(max = 50))]
    pub preference: Option<String>,
}

/// Partial profile update; `None` fields are left unchanged
#[derive(Debug, Default, Deserialize, Validate)]
#[garde(context(()))]
pub struct ProfileUpdateInput {
    #[garde(length(min = 1, max = MAX_NAME_LENGTH))]
    pub username: Option<String>,
    #[garde(range(min = 18, max = 120))]
    pub age: Option<u32>,
    #[garde(length(max = MAX_BIO_LENGTH))]
    pub bio: Option<String>,
    #[garde(length(max = MAX_LOCATION_LENGTH))]
    pub location: Option<String>,
    #[garde(custom(validate_interests))]
    pub interests: Option<Vec<String>>,
    #[garde(skip)]
    pub is_online: Option<bool>,
}

/// Discovery filters
#[derive(Debug, Clone, Deserialize, Validate)]
#[garde(context(()))]
pub struct FilterPreferences {
    #[garde(range(min = 18, max = 120))]
    pub min_age: u32,
    #[garde(range(min = 18, max = 120))]
    pub max_age: u32,
    #[garde(range(min = 1, max = 500))]
    pub max_distance: u32,
    #[garde(skip)]
    pub show_online_only: bool,
}

impl Default for FilterPreferences {
    fn default() -> Self {
        Self {
            min_age: 18,
            max_age: 65,
            max_distance: 25,
            show_online_only: false,
        }
    }
}

/// Helper trait to convert garde validation errors to String
pub trait ValidateExt {
    fn validate_input(&self) -> Result<(), String>;
}

impl<T: Validate<Context = ()>> ValidateExt for T {
    fn validate_input(&self) -> Result<(), String> {
        self.validate().map_err(|e| e.to_string())
    }
}

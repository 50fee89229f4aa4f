use spark_core::{StoreIntent, User};

use crate::models::input::{FilterPreferences, ProfileUpdateInput, SearchUsersInput, ValidateExt};
use crate::models::AccountUser;
use crate::state::AppState;
use crate::utils::validation::validate_user_id;

pub fn get_user(state: &AppState, user_id: &str) -> Result<User, String> {
    validate_user_id(user_id)?;
    state
        .store
        .get_user(user_id)
        .ok_or_else(|| format!("User {} not found", user_id))
}

/// The signed-in account
pub fn get_current_user(state: &AppState) -> Result<AccountUser, String> {
    state
        .session
        .current_user()
        .ok_or_else(|| "Not authenticated".to_string())
}

/// Case-insensitive match on username or bio. An empty query returns everyone.
pub fn search_users(state: &AppState, input: SearchUsersInput) -> Result<Vec<User>, String> {
    input.validate_input()?;

    let query = input.query.trim().to_lowercase();
    let users = state.store.list_users();
    if query.is_empty() {
        return Ok(users);
    }

    Ok(users
        .into_iter()
        .filter(|u| {
            u.username.to_lowercase().contains(&query)
                || u
                    .bio
                    .as_deref()
                    .is_some_and(|bio| bio.to_lowercase().contains(&query))
        })
        .collect())
}

/// Users within the age range and distance, optionally online only
pub fn filter_users(state: &AppState, filters: FilterPreferences) -> Result<Vec<User>, String> {
    filters.validate_input()?;
    if filters.min_age > filters.max_age {
        return Err("Minimum age cannot exceed maximum age".to_string());
    }

    Ok(state
        .store
        .list_users()
        .into_iter()
        .filter(|u| u.age >= filters.min_age && u.age <= filters.max_age)
        .filter(|u| u.distance <= filters.max_distance)
        .filter(|u| !filters.show_online_only || u.is_online)
        .collect())
}

/// Edit the local user's profile; fields left as `None` keep their value
pub async fn update_profile(state: &AppState, input: ProfileUpdateInput) -> Result<User, String> {
    input.validate_input()?;

    let mut user = get_user(state, state.local_user_id())?;
    if let Some(username) = input.username {
        user.username = username.trim().to_string();
    }
    if let Some(age) = input.age {
        user.age = age;
    }
    if let Some(bio) = input.bio {
        user.bio = Some(bio).filter(|b| !b.trim().is_empty());
    }
    if let Some(location) = input.location {
        user.location = Some(location).filter(|l| !l.trim().is_empty());
    }
    if let Some(interests) = input.interests {
        user.interests = interests.into_iter().map(|i| i.trim().to_string()).collect();
    }
    if let Some(is_online) = input.is_online {
        user.is_online = is_online;
    }

    if !state
        .writer
        .apply(StoreIntent::UpdateUser { user: user.clone() })
        .await
    {
        return Err("Failed to update profile".to_string());
    }
    Ok(user)
}

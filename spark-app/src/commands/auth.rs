use tracing::{info, warn};

use crate::models::input::{LoginInput, SignupInput, ValidateExt};
use crate::models::AccountUser;
use crate::state::AppState;

pub async fn login(state: &AppState, input: LoginInput) -> Result<AccountUser, String> {
    input.validate_input()?;
    Ok(state.session.login(&input.email, &input.password).await)
}

/// Create an account, then have a bot greet the newcomer after a while
pub async fn signup(state: &AppState, input: SignupInput) -> Result<AccountUser, String> {
    input.validate_input()?;
    let user = state.session.signup(&input).await;

    match state.scheduler.schedule_welcome_message(&user.id) {
        Some(system_user) => info!("Welcome for {} will come from {}", user.id, system_user),
        None => warn!("No system user available to welcome {}", user.id),
    }

    Ok(user)
}

pub fn logout(state: &AppState) {
    state.session.logout();
}

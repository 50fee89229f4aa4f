use std::sync::RwLock;
use std::time::Duration;

use tracing::info;

use crate::models::input::SignupInput;
use crate::models::AccountUser;
use crate::utils::{now_millis, simulate_latency};

const DEMO_USER_ID: &str = "123";
const DEMO_USER_NAME: &str = "Test User";

/// Simulated authentication: any well-formed credentials are accepted and
/// the signed-in account lives only in memory.
pub struct Session {
    user: RwLock<Option<AccountUser>>,
    login_latency: Duration,
    signup_latency: Duration,
}

impl Session {
    pub fn new(login_latency: Duration, signup_latency: Duration) -> Self {
        Self {
            user: RwLock::new(None),
            login_latency,
            signup_latency,
        }
    }

    /// Sign in as the demo account
    pub async fn login(&self, email: &str, _password: &str) -> AccountUser {
        simulate_latency(self.login_latency).await;

        let user = AccountUser {
            gender: "Male".to_string(),
            sexual_preference: "Everyone".to_string(),
            ..AccountUser::new(DEMO_USER_ID, DEMO_USER_NAME, email)
        };
        info!("Logged in as {}", user.id);
        self.set_user(Some(user.clone()));
        user
    }

    /// Create a fresh account with a time-based id and sign in as it
    pub async fn signup(&self, input: &SignupInput) -> AccountUser {
        simulate_latency(self.signup_latency).await;

        let mut user = AccountUser::new(
            format!("user_{}", now_millis()),
            input.name.clone(),
            input.email.clone(),
        );
        if let Some(gender) = input.gender.as_ref().filter(|g| !g.is_empty()) {
            user.gender = gender.clone();
        }
        if let Some(preference) = input.preference.as_ref().filter(|p| !p.is_empty()) {
            user.sexual_preference = preference.clone();
        }

        info!("Signed up {} as {}", user.name, user.id);
        self.set_user(Some(user.clone()));
        user
    }

    pub fn logout(&self) {
        if let Some(user) = self.current_user() {
            info!("Logged out {}", user.id);
        }
        self.set_user(None);
    }

    pub fn current_user(&self) -> Option<AccountUser> {
        self.user.read().map(|u| (*u).clone()).unwrap_or_default()
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.read().map(|u| u.is_some()).unwrap_or(false)
    }

    fn set_user(&self, user: Option<AccountUser>) {
        match self.user.write() {
            Ok(mut guard) => *guard = user,
            Err(poisoned) => *poisoned.into_inner() = user,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> Session {
        Session::new(Duration::from_secs(1), Duration::from_secs(1))
    }

    #[tokio::test(start_paused = true)]
    async fn test_login_uses_demo_account() {
        let session = session();
        assert!(!session.is_authenticated());

        let start = tokio::time::Instant::now();
        let user = session.login("alex@example.com", "secret").await;
        assert!(start.elapsed() >= Duration::from_secs(1));

        assert_eq!(user.id, "123");
        assert_eq!(user.name, "Test User");
        assert_eq!(user.email, "alex@example.com");
        assert_eq!(user.gender, "Male");
        assert_eq!(user.sexual_preference, "Everyone");
        assert!(session.is_authenticated());
    }

    #[tokio::test(start_paused = true)]
    async fn test_signup_defaults_and_logout() {
        let session = session();
        let input = SignupInput {
            name: "Sam".to_string(),
            email: "sam@example.com".to_string(),
            password: "secret1".to_string(),
            gender: Some("Female".to_string()),
            preference: None,
        };

        let user = session.signup(&input).await;
        assert!(user.id.starts_with("user_"));
        assert_eq!(user.gender, "Female");
        assert_eq!(user.sexual_preference, "Not specified");
        assert_eq!(user.sexual_interests, vec!["Dating", "Hookups", "Friendship"]);
        assert_eq!(session.current_user(), Some(user));

        session.logout();
        assert!(!session.is_authenticated());
        assert!(session.current_user().is_none());
    }
}

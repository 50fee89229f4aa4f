use std::str::FromStr;
use std::time::Duration;

use tracing::warn;

use crate::textgen::DEFAULT_TEXTGEN_URL;

/// Timing, probabilities and identities that drive the bot scheduler
#[derive(Debug, Clone)]
pub struct SchedulerConfig {
    /// The signed-in user of this session; their sends never count as unread
    pub local_user_id: String,
    /// Below this many users the scheduler refuses to start
    pub min_users: usize,
    pub tick_interval: Duration,
    pub new_chat_probability: f64,
    pub follow_up_probability: f64,
    /// Follow-ups are only queued while the queue is shorter than this
    pub max_queue: usize,
    pub min_delay: Duration,
    pub max_delay: Duration,
    pub reply_probability: f64,
    pub welcome_delay: Duration,
    /// Seeded users with a numeric id below this act as system users
    pub system_user_id_limit: u32,
    pub remote_generation: bool,
    pub textgen_url: String,
    pub textgen_timeout: Duration,
    /// Fixed RNG seed for reproducible runs
    pub seed: Option<u64>,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            local_user_id: "1".to_string(),
            min_users: 10,
            tick_interval: Duration::from_secs(5),
            new_chat_probability: 0.2,
            follow_up_probability: 0.2,
            max_queue: 5,
            min_delay: Duration::from_secs(3),
            max_delay: Duration::from_secs(10),
            reply_probability: 0.5,
            // 15 minutes in production, shortened for demos
            welcome_delay: Duration::from_secs(30),
            system_user_id_limit: 20,
            remote_generation: true,
            textgen_url: DEFAULT_TEXTGEN_URL.to_string(),
            textgen_timeout: Duration::from_secs(5),
            seed: None,
        }
    }
}

impl SchedulerConfig {
    /// Defaults overridden by `SPARK_*` environment variables
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(id) = std::env::var("SPARK_LOCAL_USER_ID") {
            if !id.trim().is_empty() {
                config.local_user_id = id.trim().to_string();
            }
        }
        if let Some(ms) = env_parse::<u64>("SPARK_TICK_INTERVAL_MS") {
            config.tick_interval = Duration::from_millis(ms.max(1));
        }
        if let Some(ms) = env_parse::<u64>("SPARK_WELCOME_DELAY_MS") {
            config.welcome_delay = Duration::from_millis(ms);
        }
        if let Some(p) = env_parse::<f64>("SPARK_REPLY_PROBABILITY") {
            config.reply_probability = p.clamp(0.0, 1.0);
        }
        if let Some(enabled) = env_parse::<bool>("SPARK_REMOTE_GENERATION") {
            config.remote_generation = enabled;
        }
        if let Ok(url) = std::env::var("SPARK_TEXTGEN_URL") {
            if !url.is_empty() {
                config.textgen_url = url;
            }
        }
        if let Some(ms) = env_parse::<u64>("SPARK_TEXTGEN_TIMEOUT_MS") {
            config.textgen_timeout = Duration::from_millis(ms);
        }
        config.seed = env_parse::<u64>("SPARK_SEED");

        config
    }
}

/// Parse an environment variable, warning about and ignoring bad values
pub fn env_parse<T: FromStr>(key: &str) -> Option<T> {
    let raw = std::env::var(key).ok()?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!("Ignoring invalid value for {}: {:?}", key, raw);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SchedulerConfig::default();
        assert_eq!(config.local_user_id, "1");
        assert_eq!(config.min_users, 10);
        assert_eq!(config.tick_interval, Duration::from_secs(5));
        assert_eq!(config.max_queue, 5);
        assert_eq!(config.min_delay, Duration::from_secs(3));
        assert_eq!(config.max_delay, Duration::from_secs(10));
        assert_eq!(config.reply_probability, 0.5);
        assert_eq!(config.welcome_delay, Duration::from_secs(30));
        assert_eq!(config.textgen_timeout, Duration::from_secs(5));
        assert!(config.seed.is_none());
    }

    #[test]
    fn test_env_parse_rejects_garbage() {
        std::env::set_var("SPARK_TEST_GARBAGE_NUMBER", "not-a-number");
        assert_eq!(env_parse::<u64>("SPARK_TEST_GARBAGE_NUMBER"), None);

        std::env::set_var("SPARK_TEST_VALID_NUMBER", " 42 ");
        assert_eq!(env_parse::<u64>("SPARK_TEST_VALID_NUMBER"), Some(42));

        assert_eq!(env_parse::<u64>("SPARK_TEST_UNSET_NUMBER"), None);
    }
}

use std::time::Duration;

use spark_core::config::env_parse;
use spark_core::SchedulerConfig;

/// Runtime settings for the app shell. The bot scheduler's own knobs live in
/// `scheduler`; everything else covers the simulated network and chat replies.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub scheduler: SchedulerConfig,
    pub login_latency: Duration,
    pub signup_latency: Duration,
    pub send_latency: Duration,
    pub cities_latency: Duration,
    /// Chance that the other participant answers a message the user sends
    pub auto_reply_probability: f64,
    pub auto_reply_min_delay: Duration,
    pub auto_reply_max_delay: Duration,
    pub auto_start_bots: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            scheduler: SchedulerConfig::default(),
            login_latency: Duration::from_secs(1),
            signup_latency: Duration::from_secs(1),
            send_latency: Duration::from_millis(500),
            cities_latency: Duration::from_millis(1200),
            auto_reply_probability: 0.7,
            auto_reply_min_delay: Duration::from_secs(2),
            auto_reply_max_delay: Duration::from_secs(5),
            auto_start_bots: true,
        }
    }
}

impl AppConfig {
    /// Defaults overridden by `SPARK_*` environment variables
    pub fn from_env() -> Self {
        let mut config = Self {
            scheduler: SchedulerConfig::from_env(),
            ..Self::default()
        };

        if let Some(auto_start) = env_parse("SPARK_AUTO_START_BOTS") {
            config.auto_start_bots = auto_start;
        }
        if let Some(p) = env_parse::<f64>("SPARK_AUTO_REPLY_PROBABILITY") {
            config.auto_reply_probability = p.clamp(0.0, 1.0);
        }
        if env_parse::<bool>("SPARK_SIMULATED_LATENCY") == Some(false) {
            config = config.without_latency();
        }

        config
    }

    /// Same settings with every simulated network delay removed
    pub fn without_latency(self) -> Self {
        Self {
            login_latency: Duration::ZERO,
            signup_latency: Duration::ZERO,
            send_latency: Duration::ZERO,
            cities_latency: Duration::ZERO,
            ..self
        }
    }
}

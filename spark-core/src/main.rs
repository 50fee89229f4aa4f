use std::sync::Arc;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::SeedableRng;
use spark_core::{seed, spawn_executor, BotScheduler, SchedulerConfig};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

const STATS_INTERVAL: Duration = Duration::from_secs(30);

#[tokio::main]
async fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = SchedulerConfig::from_env();

    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let store = Arc::new(seed::seeded_store(&mut rng));
    info!(
        "Seeded store with {} users and {} chats",
        store.user_count(),
        store.chat_count()
    );

    let (writer, executor) = spawn_executor(store.clone());

    let scheduler = match BotScheduler::from_config(config, store.clone(), writer) {
        Ok(s) => s,
        Err(e) => {
            error!("Failed to set up text generation: {}", e);
            std::process::exit(1);
        }
    };

    if !scheduler.start() {
        error!("Bot scheduler refused to start");
        std::process::exit(1);
    }

    let mut stats = tokio::time::interval(STATS_INTERVAL);
    stats.tick().await;

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                info!("Shutting down");
                break;
            }
            _ = stats.tick() => {
                info!(
                    "{} chats, {} messages, {} queued",
                    store.chat_count(),
                    store.total_messages(),
                    scheduler.queued_count()
                );
            }
        }
    }

    scheduler.stop();
    drop(scheduler);
    executor.abort();
}

use std::sync::{Arc, Mutex};

use rand::rngs::StdRng;
use rand::SeedableRng;
use spark_core::{seed, spawn_executor, BotScheduler, MockStore, StoreWriter};
use tokio::task::JoinHandle;
use tracing::info;

use crate::auth::Session;
use crate::config::AppConfig;

/// Everything the command surface needs: the store and its writer, the bot
/// scheduler, and the signed-in session.
pub struct AppState {
    pub store: Arc<MockStore>,
    pub writer: StoreWriter,
    pub scheduler: BotScheduler,
    pub session: Session,
    pub config: AppConfig,
    rng: Mutex<StdRng>,
    executor: JoinHandle<()>,
    /// Pending auto-replies to the user's own messages
    reply_tasks: Mutex<Vec<JoinHandle<()>>>,
}

impl AppState {
    /// Seed a fresh store and wire everything to it.
    /// Must be called from inside a tokio runtime.
    pub fn new(config: AppConfig) -> Result<Self, String> {
        let mut rng = seeded_rng(config.scheduler.seed);
        let store = Arc::new(seed::seeded_store(&mut rng));
        info!(
            "Seeded store with {} users and {} chats",
            store.user_count(),
            store.chat_count()
        );
        Self::build(config, store, rng)
    }

    /// Wire the app to an existing store
    pub fn with_store(config: AppConfig, store: Arc<MockStore>) -> Result<Self, String> {
        let rng = seeded_rng(config.scheduler.seed);
        Self::build(config, store, rng)
    }

    fn build(config: AppConfig, store: Arc<MockStore>, rng: StdRng) -> Result<Self, String> {
        let (writer, executor) = spawn_executor(store.clone());
        let scheduler =
            BotScheduler::from_config(config.scheduler.clone(), store.clone(), writer.clone())
                .map_err(|e| format!("Failed to set up text generation: {}", e))?;

        Ok(Self {
            store,
            writer,
            scheduler,
            session: Session::new(config.login_latency, config.signup_latency),
            config,
            rng: Mutex::new(rng),
            executor,
            reply_tasks: Mutex::new(Vec::new()),
        })
    }

    /// Id the chat commands act as
    pub fn local_user_id(&self) -> &str {
        &self.config.scheduler.local_user_id
    }

    pub fn with_rng<R>(&self, f: impl FnOnce(&mut StdRng) -> R) -> R {
        let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
        f(&mut *rng)
    }

    pub(crate) fn track_reply(&self, handle: JoinHandle<()>) {
        let mut tasks = self.reply_tasks.lock().unwrap_or_else(|e| e.into_inner());
        tasks.retain(|t| !t.is_finished());
        tasks.push(handle);
    }

    /// Number of auto-replies still waiting to be sent
    pub fn pending_replies(&self) -> usize {
        let tasks = self.reply_tasks.lock().unwrap_or_else(|e| e.into_inner());
        tasks.iter().filter(|t| !t.is_finished()).count()
    }

    /// Stop the bots, drop pending auto-replies and halt the store executor
    pub fn shutdown(&self) {
        self.scheduler.stop();

        let tasks: Vec<JoinHandle<()>> = {
            let mut tasks = self.reply_tasks.lock().unwrap_or_else(|e| e.into_inner());
            tasks.drain(..).collect()
        };
        for task in tasks {
            task.abort();
        }

        self.executor.abort();
        info!("App state shut down");
    }
}

fn seeded_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

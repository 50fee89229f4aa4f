use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use tokio::sync::{oneshot, Notify};
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::config::SchedulerConfig;
use crate::executor::StoreWriter;
use crate::generator::MessageGenerator;
use crate::intents::StoreIntent;
use crate::models::{Chat, Message};
use crate::random::{delay_between, pick_two_distinct};
use crate::store::MockStore;
use crate::textgen::{TextGenBackend, TextGenError, TextGeneration};

/// A generated message waiting for its delivery delay
#[derive(Debug, Clone, PartialEq)]
pub struct PendingSend {
    pub chat_id: String,
    pub sender_id: String,
    pub receiver_id: String,
    pub content: String,
    pub delay: Duration,
}

struct WelcomeTimer {
    token: u64,
    handle: JoinHandle<()>,
}

struct Inner<T> {
    config: SchedulerConfig,
    store: Arc<MockStore>,
    writer: StoreWriter,
    generator: MessageGenerator<T>,
    rng: Mutex<StdRng>,
    active: AtomicBool,
    /// Bumped on every stop so in-flight generations know to discard
    epoch: AtomicU64,
    queue: Mutex<VecDeque<PendingSend>>,
    queue_notify: Notify,
    tasks: Mutex<Vec<JoinHandle<()>>>,
    welcome_timers: DashMap<String, WelcomeTimer>,
    next_timer_token: AtomicU64,
}

/// Simulates other users chatting: a periodic ticker opens chats and
/// follow-ups, a drain worker delivers queued sends after their delay and
/// sometimes answers them. Also owns the one-shot welcome timers.
///
/// All store writes go through the executor. Dropping the scheduler stops
/// everything it spawned.
pub struct BotScheduler<T = TextGenBackend> {
    inner: Arc<Inner<T>>,
}

impl BotScheduler<TextGenBackend> {
    /// Scheduler backed by the text generation selected in `config`
    pub fn from_config(
        config: SchedulerConfig,
        store: Arc<MockStore>,
        writer: StoreWriter,
    ) -> Result<Self, TextGenError> {
        let text_gen = TextGenBackend::from_config(&config)?;
        Ok(Self::new(config, store, writer, text_gen))
    }
}

impl<T: TextGeneration> BotScheduler<T> {
    pub fn new(
        config: SchedulerConfig,
        store: Arc<MockStore>,
        writer: StoreWriter,
        text_gen: T,
    ) -> Self {
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let generator_rng = StdRng::seed_from_u64(rng.gen());

        let inner = Inner {
            generator: MessageGenerator::new(store.clone(), text_gen, generator_rng),
            config,
            store,
            writer,
            rng: Mutex::new(rng),
            active: AtomicBool::new(false),
            epoch: AtomicU64::new(0),
            queue: Mutex::new(VecDeque::new()),
            queue_notify: Notify::new(),
            tasks: Mutex::new(Vec::new()),
            welcome_timers: DashMap::new(),
            next_timer_token: AtomicU64::new(1),
        };

        Self {
            inner: Arc::new(inner),
        }
    }

    /// Start the ticker and the drain worker. Returns false without
    /// starting when there are too few users to simulate.
    pub fn start(&self) -> bool {
        let inner = &self.inner;
        let user_count = inner.store.user_count();
        if user_count < inner.config.min_users {
            warn!(
                "Not enough users to start bot messaging ({} < {})",
                user_count, inner.config.min_users
            );
            return false;
        }

        if inner.active.swap(true, Ordering::SeqCst) {
            debug!("Bot scheduler already running");
            return true;
        }

        let ticker = tokio::spawn(run_ticker(inner.clone()));
        let drain = tokio::spawn(run_drain(inner.clone()));
        inner.lock_tasks().extend([ticker, drain]);

        info!(
            "Bot scheduler started with {} users, ticking every {:?}",
            user_count, inner.config.tick_interval
        );
        true
    }

    /// Stop the workers, discard queued sends and cancel welcome timers
    pub fn stop(&self) {
        let was_active = self.inner.active.load(Ordering::SeqCst);
        let (discarded, welcomes) = self.inner.halt();
        if was_active || discarded > 0 || welcomes > 0 {
            info!(
                "Bot scheduler stopped, discarded {} queued messages and {} welcome timers",
                discarded, welcomes
            );
        }
    }

    /// Pick two distinct users and return their chat, creating it if needed
    pub async fn create_random_chat(&self) -> Option<Chat> {
        self.inner.create_random_chat().await
    }

    /// Generate a message from `sender_id` and queue it for delivery.
    /// Returns false if nothing was queued.
    pub async fn queue_message(&self, chat_id: &str, sender_id: &str, receiver_id: &str) -> bool {
        self.inner.queue_message(chat_id, sender_id, receiver_id).await
    }

    /// Arm a one-shot welcome from a random system user to `new_user_id`.
    /// Returns the chosen system user's id.
    pub fn schedule_welcome_message(&self, new_user_id: &str) -> Option<String> {
        self.inner.schedule_welcome(new_user_id)
    }

    pub fn cancel_welcome_message(&self, user_id: &str) -> bool {
        match self.inner.welcome_timers.remove(user_id) {
            Some((_, timer)) => {
                timer.handle.abort();
                debug!("Cancelled welcome message for {}", user_id);
                true
            }
            None => false,
        }
    }

    pub fn pending_welcome_count(&self) -> usize {
        self.inner
            .welcome_timers
            .iter()
            .filter(|timer| !timer.handle.is_finished())
            .count()
    }

    pub fn queued_count(&self) -> usize {
        self.inner.lock_queue().len()
    }

    /// Snapshot of the queue, head first
    pub fn pending_sends(&self) -> Vec<PendingSend> {
        self.inner.lock_queue().iter().cloned().collect()
    }

    pub fn is_active(&self) -> bool {
        self.inner.active.load(Ordering::SeqCst)
    }

    pub fn config(&self) -> &SchedulerConfig {
        &self.inner.config
    }
}

impl<T> Drop for BotScheduler<T> {
    fn drop(&mut self) {
        self.inner.halt();
    }
}

impl<T> Inner<T> {
    /// Returns the number of discarded sends and cancelled welcome timers
    fn halt(&self) -> (usize, usize) {
        let discarded = {
            let mut queue = self.lock_queue();
            self.epoch.fetch_add(1, Ordering::SeqCst);
            self.active.store(false, Ordering::SeqCst);
            let len = queue.len();
            queue.clear();
            len
        };

        let tasks = std::mem::take(&mut *self.lock_tasks());
        for task in &tasks {
            task.abort();
        }

        let user_ids: Vec<String> = self.welcome_timers.iter().map(|t| t.key().clone()).collect();
        let mut welcomes = 0;
        for user_id in user_ids {
            if let Some((_, timer)) = self.welcome_timers.remove(&user_id) {
                timer.handle.abort();
                welcomes += 1;
            }
        }

        (discarded, welcomes)
    }

    fn lock_queue(&self) -> MutexGuard<'_, VecDeque<PendingSend>> {
        self.queue.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn lock_tasks(&self) -> MutexGuard<'_, Vec<JoinHandle<()>>> {
        self.tasks.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn with_rng<R>(&self, f: impl FnOnce(&mut StdRng) -> R) -> R {
        let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
        f(&mut *rng)
    }
}

impl<T: TextGeneration> Inner<T> {
    async fn tick(&self) {
        let roll: f64 = self.with_rng(|rng| rng.gen());
        if roll < self.config.new_chat_probability {
            if let Some(chat) = self.create_random_chat().await {
                let [first, second] = chat.participants;
                self.queue_message(&chat.id, &first, &second).await;
            }
            return;
        }

        if self.store.chat_count() == 0 || self.lock_queue().len() >= self.config.max_queue {
            return;
        }

        let roll: f64 = self.with_rng(|rng| rng.gen());
        if roll >= self.config.follow_up_probability {
            return;
        }

        let chats = self.store.list_chats();
        let picked = self.with_rng(|rng| {
            let chat = chats.choose(rng)?;
            let [first, second] = &chat.participants;
            let (sender, receiver) = if rng.gen_bool(0.5) {
                (first, second)
            } else {
                (second, first)
            };
            Some((chat.id.clone(), sender.clone(), receiver.clone()))
        });

        if let Some((chat_id, sender_id, receiver_id)) = picked {
            debug!("Follow-up in chat {} from {}", chat_id, sender_id);
            self.queue_message(&chat_id, &sender_id, &receiver_id).await;
        }
    }

    async fn create_random_chat(&self) -> Option<Chat> {
        let users = self.store.list_users();
        let (first, second) = self.with_rng(|rng| {
            pick_two_distinct(rng, &users).map(|(a, b)| (a.id.clone(), b.id.clone()))
        })?;

        if let Some(existing) = self.store.find_chat_between(&first, &second) {
            debug!("Reusing chat {} between {} and {}", existing.id, first, second);
            return Some(existing);
        }

        let chat = Chat::new(format!("chat_{}", Uuid::new_v4().simple()), first, second);
        if !self
            .writer
            .apply(StoreIntent::CreateChat { chat: chat.clone() })
            .await
        {
            warn!("Failed to create chat {}", chat.id);
            return None;
        }

        info!(
            "Created bot chat {} between {} and {}",
            chat.id, chat.participants[0], chat.participants[1]
        );
        Some(chat)
    }

    async fn queue_message(&self, chat_id: &str, sender_id: &str, receiver_id: &str) -> bool {
        let epoch = self.epoch.load(Ordering::SeqCst);

        let content = self.generator.generate(chat_id, sender_id, receiver_id).await;
        if content.is_empty() {
            debug!("No content generated for chat {}, skipping", chat_id);
            return false;
        }

        let delay =
            self.with_rng(|rng| delay_between(rng, self.config.min_delay, self.config.max_delay));

        {
            let mut queue = self.lock_queue();
            if self.epoch.load(Ordering::SeqCst) != epoch {
                debug!("Scheduler stopped during generation, discarding message for {}", chat_id);
                return false;
            }
            queue.push_back(PendingSend {
                chat_id: chat_id.to_string(),
                sender_id: sender_id.to_string(),
                receiver_id: receiver_id.to_string(),
                content,
                delay,
            });
        }
        self.queue_notify.notify_one();

        debug!("Queued message from {} in chat {} with delay {:?}", sender_id, chat_id, delay);
        true
    }

    /// Pop the head of the queue and hand it to the executor
    fn take_due(&self) -> Option<(PendingSend, oneshot::Receiver<bool>)> {
        let mut queue = self.lock_queue();
        if !self.active.load(Ordering::SeqCst) {
            return None;
        }
        let send = queue.pop_front()?;

        let unread_delta = if send.sender_id == self.config.local_user_id {
            0
        } else {
            1
        };
        let message = Message::new(&send.chat_id, &send.sender_id, &send.content);
        let ack = self.writer.submit_with_ack(StoreIntent::AppendMessage {
            message,
            unread_delta,
        });
        Some((send, ack))
    }

    fn schedule_welcome(self: &Arc<Self>, new_user_id: &str) -> Option<String> {
        let candidates: Vec<String> = self
            .store
            .list_users()
            .into_iter()
            .filter(|u| u.id != self.config.local_user_id && u.id != new_user_id)
            .filter(|u| {
                u.numeric_id()
                    .is_some_and(|id| id < self.config.system_user_id_limit)
            })
            .map(|u| u.id)
            .collect();

        let Some(system_user_id) = self.with_rng(|rng| candidates.choose(rng).cloned()) else {
            warn!("No system users available to welcome {}", new_user_id);
            return None;
        };

        let token = self.next_timer_token.fetch_add(1, Ordering::SeqCst);
        let previous = {
            let entry = self.welcome_timers.entry(new_user_id.to_string());
            let handle = tokio::spawn(run_welcome_timer(
                self.clone(),
                new_user_id.to_string(),
                system_user_id.clone(),
                token,
            ));
            let timer = WelcomeTimer { token, handle };
            match entry {
                Entry::Occupied(mut occupied) => Some(occupied.insert(timer)),
                Entry::Vacant(vacant) => {
                    vacant.insert(timer);
                    None
                }
            }
        };
        if let Some(previous) = previous {
            previous.handle.abort();
            debug!("Replaced pending welcome message for {}", new_user_id);
        }

        info!(
            "Scheduled welcome message for {} from {} in {:?}",
            new_user_id, system_user_id, self.config.welcome_delay
        );
        Some(system_user_id)
    }

    async fn deliver_welcome(&self, new_user_id: &str, system_user_id: &str, token: u64) {
        let Some(system_user) = self.store.get_user(system_user_id) else {
            warn!("System user {} disappeared, skipping welcome", system_user_id);
            return;
        };

        let mut chat = Chat::new(
            format!("chat_welcome_{}", Uuid::new_v4().simple()),
            new_user_id,
            system_user_id,
        );
        chat.username = Some(system_user.username.clone());
        chat.profile_image = Some(system_user.profile_picture.clone());
        chat.is_online = Some(true);

        let chat_id = chat.id.clone();
        let message = Message::new(&chat_id, system_user_id, self.generator.welcome());

        // Holding the entry keeps a concurrent cancel from interleaving
        let ack = match self.welcome_timers.get(new_user_id) {
            Some(timer) if timer.token == token => {
                self.writer.submit(StoreIntent::CreateChat { chat });
                Some(self.writer.submit_with_ack(StoreIntent::AppendMessage {
                    message,
                    unread_delta: 1,
                }))
            }
            _ => None,
        };

        let stored = match ack {
            Some(ack) => Some(ack.await.unwrap_or(false)),
            None => None,
        };
        match stored {
            Some(true) => {
                info!("Delivered welcome message to {} in chat {}", new_user_id, chat_id);
            }
            Some(false) => warn!("Welcome message for {} was not stored", new_user_id),
            None => debug!("Welcome for {} was cancelled", new_user_id),
        }
    }
}

async fn run_ticker<T: TextGeneration>(inner: Arc<Inner<T>>) {
    let period = inner.config.tick_interval;
    let mut ticker = interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        ticker.tick().await;
        if !inner.active.load(Ordering::SeqCst) {
            break;
        }
        inner.tick().await;
    }
}

async fn run_drain<T: TextGeneration>(inner: Arc<Inner<T>>) {
    loop {
        let head_delay = inner.lock_queue().front().map(|send| send.delay);
        let Some(delay) = head_delay else {
            inner.queue_notify.notified().await;
            continue;
        };

        tokio::time::sleep(delay).await;

        let Some((send, ack)) = inner.take_due() else {
            if !inner.active.load(Ordering::SeqCst) {
                break;
            }
            continue;
        };

        if !ack.await.unwrap_or(false) {
            warn!("Message for chat {} was not delivered", send.chat_id);
            continue;
        }
        debug!("Delivered message from {} in chat {}", send.sender_id, send.chat_id);

        let roll: f64 = inner.with_rng(|rng| rng.gen());
        if roll < inner.config.reply_probability && inner.active.load(Ordering::SeqCst) {
            inner
                .queue_message(&send.chat_id, &send.receiver_id, &send.sender_id)
                .await;
        }
    }
}

async fn run_welcome_timer<T: TextGeneration>(
    inner: Arc<Inner<T>>,
    new_user_id: String,
    system_user_id: String,
    token: u64,
) {
    tokio::time::sleep(inner.config.welcome_delay).await;
    inner.deliver_welcome(&new_user_id, &system_user_id, token).await;
    inner
        .welcome_timers
        .remove_if(&new_user_id, |_, timer| timer.token == token);
}

//! Spark Core Library
//!
//! Mock store, store executor and the bot messaging scheduler that keeps
//! the mock app feeling alive.

pub mod config;
pub mod executor;
pub mod generator;
pub mod intents;
pub mod models;
pub mod random;
pub mod scheduler;
pub mod seed;
pub mod store;
pub mod templates;
pub mod textgen;

pub use config::SchedulerConfig;
pub use executor::{apply_intent, spawn_executor, StoreWriter};
pub use generator::MessageGenerator;
pub use intents::StoreIntent;
pub use models::{Chat, City, Message, Preferences, User};
pub use scheduler::{BotScheduler, PendingSend};
pub use store::MockStore;
pub use textgen::{
    DisabledTextGeneration, HttpTextGenerator, TextGenBackend, TextGenError, TextGeneration,
};

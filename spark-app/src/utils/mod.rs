mod helpers;
pub mod validation;

pub use helpers::{generate_deterministic_chat_id, now_millis, simulate_latency};

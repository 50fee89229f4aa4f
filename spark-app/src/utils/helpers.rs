use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::time::Duration;

/// Generate a deterministic chat ID from two user IDs
/// This ensures both users will have the same chat ID regardless of who initiates
pub fn generate_deterministic_chat_id(user_id_1: &str, user_id_2: &str) -> String {
    let mut ids = [user_id_1, user_id_2];
    ids.sort();
    let key = format!("{}_{}", ids[0], ids[1]);

    let mut hasher = DefaultHasher::new();
    key.hash(&mut hasher);
    format!("chat_{:016x}", hasher.finish())
}

/// Milliseconds since the Unix epoch
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Stand-in for a network round trip
pub async fn simulate_latency(latency: Duration) {
    if !latency.is_zero() {
        tokio::time::sleep(latency).await;
    }
}

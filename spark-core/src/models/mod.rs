mod chat;
mod city;
mod message;
mod user;

pub use chat::Chat;
pub use city::City;
pub use message::Message;
pub use user::{Preferences, User};

use chrono::{SecondsFormat, Utc};

/// Current time in the RFC 3339 form used for every stored timestamp
/// (millisecond precision, `Z` suffix) so that timestamps sort lexically.
pub fn now_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

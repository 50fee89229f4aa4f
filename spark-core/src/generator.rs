use std::sync::{Arc, Mutex};

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use tracing::{debug, warn};

use crate::random::pick_or;
use crate::store::MockStore;
use crate::templates::{
    match_keyword, Keyword, GENERIC_FILLERS, GENERIC_INTEREST, GREETINGS,
    RESPONSES, WELCOME_MESSAGES,
};
use crate::textgen::TextGeneration;

/// Produces bot message content from conversation history.
///
/// Empty chats get a greeting, chats with a single message get a templated
/// response, and longer chats are continued by the remote model with a
/// keyword-based local fallback.
pub struct MessageGenerator<T> {
    store: Arc<MockStore>,
    text_gen: T,
    rng: Mutex<StdRng>,
}

impl<T: TextGeneration> MessageGenerator<T> {
    pub fn new(store: Arc<MockStore>, text_gen: T, rng: StdRng) -> Self {
        Self {
            store,
            text_gen,
            rng: Mutex::new(rng),
        }
    }

    /// Content for `sender_id` to send to `receiver_id` in `chat_id`.
    /// Returns an empty string if any of them is unknown.
    pub async fn generate(&self, chat_id: &str, sender_id: &str, receiver_id: &str) -> String {
        if self.store.get_user(sender_id).is_none() {
            debug!("Unknown sender {}, nothing to generate", sender_id);
            return String::new();
        }
        let Some(receiver) = self.store.get_user(receiver_id) else {
            debug!("Unknown receiver {}, nothing to generate", receiver_id);
            return String::new();
        };
        if self.store.get_chat(chat_id).is_none() {
            debug!("Unknown chat {}, nothing to generate", chat_id);
            return String::new();
        }

        let history = self.store.get_messages(chat_id);
        match history.len() {
            0 => self.greeting(),
            1 => {
                let interest = self.with_rng(|rng| {
                    receiver
                        .interests
                        .choose(rng)
                        .map(|i| i.to_lowercase())
                        .unwrap_or_else(|| GENERIC_INTEREST.to_string())
                });
                self.response(&interest)
            }
            n => {
                let prompt = &history[n - 1].content;
                let context = &history[n - 2].content;
                self.continuation(prompt, context).await
            }
        }
    }

    pub fn welcome(&self) -> String {
        self.with_rng(|rng| pick_or(rng, &WELCOME_MESSAGES, WELCOME_MESSAGES[0]).to_string())
    }

    fn greeting(&self) -> String {
        self.with_rng(|rng| pick_or(rng, &GREETINGS, GREETINGS[0]).to_string())
    }

    fn response(&self, interest: &str) -> String {
        let template = self.with_rng(|rng| RESPONSES.choose(rng).copied().unwrap_or(RESPONSES[0]));
        template.render(interest)
    }

    async fn continuation(&self, prompt: &str, context: &str) -> String {
        match self.text_gen.generate(prompt, context).await {
            Ok(Some(text)) => text,
            Ok(None) => self.response(GENERIC_INTEREST),
            Err(e) => {
                warn!("Remote text generation failed, using local reply: {}", e);
                self.local_reply(prompt)
            }
        }
    }

    fn local_reply(&self, prompt: &str) -> String {
        match match_keyword(prompt) {
            Some(Keyword::Greeting) => self.response(GENERIC_INTEREST),
            Some(keyword) => match keyword.canned_reply() {
                Some(reply) => reply.to_string(),
                None => self.response(GENERIC_INTEREST),
            },
            None => {
                self.with_rng(|rng| pick_or(rng, &GENERIC_FILLERS, GENERIC_FILLERS[0]).to_string())
            }
        }
    }

    fn with_rng<R>(&self, f: impl FnOnce(&mut StdRng) -> R) -> R {
        let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
        f(&mut *rng)
    }
}

/// Every string a fallback reply can render to for `interest`
pub fn local_replies(interest: &str) -> Vec<String> {
    let mut replies: Vec<String> = RESPONSES.iter().map(|t| t.render(interest)).collect();
    replies.extend(GENERIC_FILLERS.iter().map(|s| s.to_string()));
    for keyword in [Keyword::HowAreYou, Keyword::Name, Keyword::Age, Keyword::Meet] {
        if let Some(reply) = keyword.canned_reply() {
            replies.push(reply.to_string());
        }
    }
    replies
}

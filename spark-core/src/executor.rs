use std::sync::Arc;

use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::intents::StoreIntent;
use crate::store::MockStore;

/// Intent plus an optional channel to report whether it was applied
struct Envelope {
    intent: StoreIntent,
    ack: Option<oneshot::Sender<bool>>,
}

/// Handle for submitting intents to the store executor. Cheap to clone;
/// the executor stops once every writer has been dropped.
#[derive(Clone)]
pub struct StoreWriter {
    tx: mpsc::UnboundedSender<Envelope>,
}

impl StoreWriter {
    /// Fire-and-forget submission
    pub fn submit(&self, intent: StoreIntent) {
        let kind = intent.kind();
        if self.tx.send(Envelope { intent, ack: None }).is_err() {
            warn!("Store executor stopped, dropping {} intent", kind);
        }
    }

    /// Submit without waiting; the receiver resolves once the intent has
    /// been applied. Submission itself happens before this returns.
    pub fn submit_with_ack(&self, intent: StoreIntent) -> oneshot::Receiver<bool> {
        let (ack_tx, ack_rx) = oneshot::channel();
        let kind = intent.kind();
        if self
            .tx
            .send(Envelope {
                intent,
                ack: Some(ack_tx),
            })
            .is_err()
        {
            warn!("Store executor stopped, dropping {} intent", kind);
        }
        ack_rx
    }

    /// Submit and wait until the executor has applied the intent.
    /// Returns false if the intent had no effect or the executor is gone.
    pub async fn apply(&self, intent: StoreIntent) -> bool {
        self.submit_with_ack(intent).await.unwrap_or(false)
    }

    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

/// Start the single writer for `store`
pub fn spawn_executor(store: Arc<MockStore>) -> (StoreWriter, JoinHandle<()>) {
    let (tx, rx) = mpsc::unbounded_channel();
    let handle = tokio::spawn(run_executor(store, rx));
    (StoreWriter { tx }, handle)
}

async fn run_executor(store: Arc<MockStore>, mut rx: mpsc::UnboundedReceiver<Envelope>) {
    info!("Store executor started");

    while let Some(Envelope { intent, ack }) = rx.recv().await {
        let applied = apply_intent(&store, intent);
        if let Some(ack) = ack {
            let _ = ack.send(applied);
        }
    }

    info!("Store executor stopped");
}

/// Apply one intent to the store
pub fn apply_intent(store: &MockStore, intent: StoreIntent) -> bool {
    match intent {
        StoreIntent::CreateChat { chat } => {
            let chat_id = chat.id.clone();
            let inserted = store.upsert_chat(chat);
            if inserted {
                debug!("Created chat {}", chat_id);
            }
            inserted
        }
        StoreIntent::AppendMessage {
            message,
            unread_delta,
        } => {
            let chat_id = message.chat_id.clone();
            let content = message.content.clone();
            let timestamp = message.timestamp.clone();
            let sender_id = message.sender_id.clone();

            if !store.append_message(message) {
                return false;
            }
            store.update_chat_summary(&chat_id, &content, &timestamp, unread_delta);
            debug!("Appended message from {} to chat {}", sender_id, chat_id);
            true
        }
        StoreIntent::MarkRead { chat_id } => store.mark_chat_read(&chat_id),
        StoreIntent::UpdateUser { user } => store.update_user(user),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Chat, Message, User};

    fn store() -> Arc<MockStore> {
        let store = MockStore::with_users(vec![
            User {
                id: "1".to_string(),
                ..Default::default()
            },
            User {
                id: "5".to_string(),
                ..Default::default()
            },
        ]);
        Arc::new(store)
    }

    #[test]
    fn test_apply_append_updates_summary() {
        let store = store();
        assert!(apply_intent(
            &store,
            StoreIntent::CreateChat {
                chat: Chat::new("chat1", "1", "5"),
            }
        ));

        let message = Message::new("chat1", "5", "Hey! What's up?");
        let timestamp = message.timestamp.clone();
        assert!(apply_intent(
            &store,
            StoreIntent::AppendMessage {
                message,
                unread_delta: 1,
            }
        ));

        let chat = store.get_chat("chat1").unwrap();
        assert_eq!(chat.last_message, "Hey! What's up?");
        assert_eq!(chat.last_message_time, timestamp);
        assert_eq!(chat.unread_count, 1);
    }

    #[test]
    fn test_apply_append_to_missing_chat() {
        let store = store();
        let applied = apply_intent(
            &store,
            StoreIntent::AppendMessage {
                message: Message::new("nowhere", "5", "lost"),
                unread_delta: 1,
            },
        );
        assert!(!applied);
        assert_eq!(store.total_messages(), 0);
        assert!(store.get_chat("nowhere").is_none());
    }

    #[test]
    fn test_apply_mark_read_and_update_user() {
        let store = store();
        apply_intent(
            &store,
            StoreIntent::CreateChat {
                chat: Chat::new("chat1", "1", "5"),
            },
        );
        apply_intent(
            &store,
            StoreIntent::AppendMessage {
                message: Message::new("chat1", "5", "ping"),
                unread_delta: 1,
            },
        );

        assert!(apply_intent(
            &store,
            StoreIntent::MarkRead {
                chat_id: "chat1".to_string(),
            }
        ));
        assert_eq!(store.get_chat("chat1").unwrap().unread_count, 0);

        let mut user = store.get_user("5").unwrap();
        user.username = "Emily".to_string();
        assert!(apply_intent(&store, StoreIntent::UpdateUser { user }));
        assert_eq!(store.get_user("5").unwrap().username, "Emily");
    }

    #[tokio::test]
    async fn test_executor_applies_in_submission_order() {
        let store = store();
        let (writer, _handle) = spawn_executor(store.clone());

        writer.submit(StoreIntent::CreateChat {
            chat: Chat::new("chat1", "1", "5"),
        });
        for i in 0..5 {
            writer.submit(StoreIntent::AppendMessage {
                message: Message::new("chat1", "5", format!("msg{}", i)),
                unread_delta: 1,
            });
        }
        // Acked intent is applied after everything submitted before it
        assert!(
            writer
                .apply(StoreIntent::AppendMessage {
                    message: Message::new("chat1", "1", "last"),
                    unread_delta: 0,
                })
                .await
        );

        let contents: Vec<String> = store
            .get_messages("chat1")
            .into_iter()
            .map(|m| m.content)
            .collect();
        assert_eq!(contents, vec!["msg0", "msg1", "msg2", "msg3", "msg4", "last"]);
        assert_eq!(store.get_chat("chat1").unwrap().unread_count, 5);
    }

    #[tokio::test]
    async fn test_apply_reports_no_effect() {
        let store = store();
        let (writer, _handle) = spawn_executor(store.clone());

        assert!(
            writer
                .apply(StoreIntent::CreateChat {
                    chat: Chat::new("chat1", "1", "5"),
                })
                .await
        );
        // Same id again is a no-op
        assert!(
            !writer
                .apply(StoreIntent::CreateChat {
                    chat: Chat::new("chat1", "1", "5"),
                })
                .await
        );
    }

    #[tokio::test]
    async fn test_stopped_executor_drops_intents() {
        let store = store();
        let (writer, handle) = spawn_executor(store.clone());
        handle.abort();
        let _ = handle.await;

        assert!(writer.is_closed());
        let applied = writer
            .apply(StoreIntent::CreateChat {
                chat: Chat::new("chat1", "1", "5"),
            })
            .await;
        assert!(!applied);
        assert_eq!(store.chat_count(), 0);
    }
}

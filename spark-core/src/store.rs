use dashmap::DashMap;
use tracing::{debug, warn};

use crate::models::{Chat, City, Message, User};

/// In-memory stand-in for the app backend: users, chats and per-chat
/// message logs. Reads may happen from anywhere; writes are expected to go
/// through the store executor so there is a single writer.
pub struct MockStore {
    users: DashMap<String, User>,
    chats: DashMap<String, Chat>,
    cities: DashMap<String, City>,
    /// chat_id -> messages in append order
    messages: DashMap<String, Vec<Message>>,
}

impl MockStore {
    pub fn new() -> Self {
        Self {
            users: DashMap::new(),
            chats: DashMap::new(),
            cities: DashMap::new(),
            messages: DashMap::new(),
        }
    }

    pub fn with_users(users: impl IntoIterator<Item = User>) -> Self {
        let store = Self::new();
        for user in users {
            store.insert_user(user);
        }
        store
    }

    pub fn insert_user(&self, user: User) {
        self.users.insert(user.id.clone(), user);
    }

    /// All users, seeded numeric ids first in numeric order
    pub fn list_users(&self) -> Vec<User> {
        let mut users: Vec<User> = self.users.iter().map(|e| e.value().clone()).collect();
        users.sort_by(|a, b| {
            let key_a = (a.numeric_id().unwrap_or(u32::MAX), &a.id);
            let key_b = (b.numeric_id().unwrap_or(u32::MAX), &b.id);
            key_a.cmp(&key_b)
        });
        users
    }

    pub fn get_user(&self, user_id: &str) -> Option<User> {
        self.users.get(user_id).map(|u| u.value().clone())
    }

    pub fn user_count(&self) -> usize {
        self.users.len()
    }

    /// Replace an existing user's profile. Unknown ids are ignored.
    pub fn update_user(&self, user: User) -> bool {
        match self.users.get_mut(&user.id) {
            Some(mut entry) => {
                *entry = user;
                true
            }
            None => false,
        }
    }

    pub fn insert_city(&self, city: City) {
        self.cities.insert(city.id.clone(), city);
    }

    /// All cities in id order
    pub fn list_cities(&self) -> Vec<City> {
        let mut cities: Vec<City> = self.cities.iter().map(|e| e.value().clone()).collect();
        cities.sort_by(|a, b| {
            let key_a = (a.id.parse::<u32>().unwrap_or(u32::MAX), &a.id);
            let key_b = (b.id.parse::<u32>().unwrap_or(u32::MAX), &b.id);
            key_a.cmp(&key_b)
        });
        cities
    }

    /// The `limit` cities with the most active users
    pub fn popular_cities(&self, limit: usize) -> Vec<City> {
        let mut cities = self.list_cities();
        cities.sort_by(|a, b| b.active_users.cmp(&a.active_users));
        cities.truncate(limit);
        cities
    }

    pub fn city_count(&self) -> usize {
        self.cities.len()
    }

    /// Chats ordered by most recent activity first
    pub fn list_chats(&self) -> Vec<Chat> {
        let mut chats: Vec<Chat> = self.chats.iter().map(|e| e.value().clone()).collect();
        chats.sort_by(|a, b| {
            b.last_message_time
                .cmp(&a.last_message_time)
                .then_with(|| a.id.cmp(&b.id))
        });
        chats
    }

    pub fn get_chat(&self, chat_id: &str) -> Option<Chat> {
        self.chats.get(chat_id).map(|c| c.value().clone())
    }

    pub fn chat_count(&self) -> usize {
        self.chats.len()
    }

    pub fn find_chat_between(&self, a: &str, b: &str) -> Option<Chat> {
        self.chats
            .iter()
            .find(|e| e.value().is_between(a, b))
            .map(|e| e.value().clone())
    }

    /// Insert a chat unless one with the same id already exists.
    /// Returns true if the chat was inserted.
    pub fn upsert_chat(&self, chat: Chat) -> bool {
        if self.chats.contains_key(&chat.id) {
            debug!("Chat {} already exists, keeping existing", chat.id);
            return false;
        }
        self.messages.entry(chat.id.clone()).or_default();
        self.chats.insert(chat.id.clone(), chat);
        true
    }

    pub fn get_messages(&self, chat_id: &str) -> Vec<Message> {
        self.messages
            .get(chat_id)
            .map(|msgs| msgs.value().clone())
            .unwrap_or_default()
    }

    pub fn message_count(&self, chat_id: &str) -> usize {
        self.messages
            .get(chat_id)
            .map(|msgs| msgs.len())
            .unwrap_or(0)
    }

    /// Total number of messages across all chats
    pub fn total_messages(&self) -> usize {
        self.messages.iter().map(|e| e.value().len()).sum()
    }

    /// Append a message to its chat's log. Messages for unknown chats are
    /// dropped so every stored message refers to an existing chat.
    pub fn append_message(&self, message: Message) -> bool {
        if !self.chats.contains_key(&message.chat_id) {
            warn!(
                "Dropping message {} for unknown chat {}",
                message.id, message.chat_id
            );
            return false;
        }
        self.messages
            .entry(message.chat_id.clone())
            .or_default()
            .push(message);
        true
    }

    /// Roll the chat summary forward to the latest message
    pub fn update_chat_summary(
        &self,
        chat_id: &str,
        last_message: &str,
        last_message_time: &str,
        unread_delta: u32,
    ) -> bool {
        match self.chats.get_mut(chat_id) {
            Some(mut chat) => {
                chat.last_message = last_message.to_string();
                chat.last_message_time = last_message_time.to_string();
                chat.unread_count = chat.unread_count.saturating_add(unread_delta);
                true
            }
            None => false,
        }
    }

    /// Reset the unread counter and flag every message as read
    pub fn mark_chat_read(&self, chat_id: &str) -> bool {
        let Some(mut chat) = self.chats.get_mut(chat_id) else {
            return false;
        };
        chat.unread_count = 0;
        drop(chat);

        if let Some(mut msgs) = self.messages.get_mut(chat_id) {
            for msg in msgs.iter_mut() {
                msg.read = true;
            }
        }
        true
    }
}

impl Default for MockStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: &str) -> User {
        User {
            id: id.to_string(),
            username: format!("user{}", id),
            ..Default::default()
        }
    }

    fn store_with_chat() -> MockStore {
        let store = MockStore::with_users(vec![user("1"), user("5")]);
        store.upsert_chat(Chat::new("chat1", "1", "5"));
        store
    }

    #[test]
    fn test_new_store() {
        let store = MockStore::new();
        assert_eq!(store.user_count(), 0);
        assert!(store.list_chats().is_empty());
        assert_eq!(store.total_messages(), 0);
    }

    #[test]
    fn test_default_impl() {
        let store = MockStore::default();
        assert_eq!(store.chat_count(), 0);
    }

    #[test]
    fn test_list_users_numeric_order() {
        let store = MockStore::with_users(vec![
            user("10"),
            user("user_1700000000"),
            user("2"),
            user("1"),
        ]);

        let ids: Vec<String> = store.list_users().into_iter().map(|u| u.id).collect();
        assert_eq!(ids, vec!["1", "2", "10", "user_1700000000"]);
    }

    #[test]
    fn test_update_user() {
        let store = MockStore::with_users(vec![user("1")]);

        let mut edited = store.get_user("1").unwrap();
        edited.bio = Some("Updated bio".to_string());
        assert!(store.update_user(edited));
        assert_eq!(
            store.get_user("1").unwrap().bio.as_deref(),
            Some("Updated bio")
        );

        assert!(!store.update_user(user("99")));
        assert!(store.get_user("99").is_none());
    }

    #[test]
    fn test_upsert_chat_keeps_existing() {
        let store = store_with_chat();

        let mut duplicate = Chat::new("chat1", "1", "7");
        duplicate.last_message = "should not replace".to_string();
        assert!(!store.upsert_chat(duplicate));

        let chat = store.get_chat("chat1").unwrap();
        assert_eq!(chat.participants[1], "5");
        assert_eq!(store.chat_count(), 1);
    }

    #[test]
    fn test_find_chat_between_either_order() {
        let store = store_with_chat();
        assert!(store.find_chat_between("1", "5").is_some());
        assert!(store.find_chat_between("5", "1").is_some());
        assert!(store.find_chat_between("1", "2").is_none());
    }

    #[test]
    fn test_append_message_requires_chat() {
        let store = store_with_chat();

        assert!(store.append_message(Message::new("chat1", "5", "hello")));
        assert!(!store.append_message(Message::new("missing", "5", "lost")));

        assert_eq!(store.message_count("chat1"), 1);
        assert_eq!(store.message_count("missing"), 0);
        assert_eq!(store.total_messages(), 1);
    }

    #[test]
    fn test_messages_keep_append_order() {
        let store = store_with_chat();
        store.append_message(Message::new("chat1", "5", "first"));
        store.append_message(Message::new("chat1", "1", "second"));
        store.append_message(Message::new("chat1", "5", "third"));

        let contents: Vec<String> = store
            .get_messages("chat1")
            .into_iter()
            .map(|m| m.content)
            .collect();
        assert_eq!(contents, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_update_chat_summary_accumulates_unread() {
        let store = store_with_chat();

        assert!(store.update_chat_summary("chat1", "hey", "2023-08-12T10:30:00.000Z", 1));
        assert!(store.update_chat_summary("chat1", "you there?", "2023-08-12T10:31:00.000Z", 1));
        assert!(store.update_chat_summary("chat1", "yes", "2023-08-12T10:32:00.000Z", 0));

        let chat = store.get_chat("chat1").unwrap();
        assert_eq!(chat.last_message, "yes");
        assert_eq!(chat.last_message_time, "2023-08-12T10:32:00.000Z");
        assert_eq!(chat.unread_count, 2);

        assert!(!store.update_chat_summary("missing", "x", "y", 1));
    }

    #[test]
    fn test_mark_chat_read() {
        let store = store_with_chat();
        store.append_message(Message::new("chat1", "5", "unread"));
        store.update_chat_summary("chat1", "unread", "2023-08-12T10:30:00.000Z", 1);

        assert!(store.mark_chat_read("chat1"));
        assert_eq!(store.get_chat("chat1").unwrap().unread_count, 0);
        assert!(store.get_messages("chat1").iter().all(|m| m.read));

        assert!(!store.mark_chat_read("missing"));
    }

    fn city(id: &str, name: &str, active_users: u32) -> City {
        City {
            id: id.to_string(),
            name: name.to_string(),
            country: "Somewhere".to_string(),
            active_users,
            distance: None,
            image_url: None,
        }
    }

    #[test]
    fn test_cities_in_id_order_and_by_popularity() {
        let store = MockStore::new();
        store.insert_city(city("10", "Oslo", 500));
        store.insert_city(city("2", "Lima", 900));
        store.insert_city(city("1", "Rome", 700));

        let ids: Vec<String> = store.list_cities().into_iter().map(|c| c.id).collect();
        assert_eq!(ids, vec!["1", "2", "10"]);

        let names: Vec<String> = store.popular_cities(2).into_iter().map(|c| c.name).collect();
        assert_eq!(names, vec!["Lima", "Rome"]);
        assert_eq!(store.popular_cities(10).len(), 3);
        assert_eq!(store.city_count(), 3);
    }

    #[test]
    fn test_list_chats_newest_first() {
        let store = MockStore::new();
        let mut older = Chat::new("older", "1", "2");
        older.last_message_time = "2023-08-01T18:22:00.000Z".to_string();
        let mut newer = Chat::new("newer", "1", "3");
        newer.last_message_time = "2023-08-12T10:30:00.000Z".to_string();
        store.upsert_chat(older);
        store.upsert_chat(newer);

        let ids: Vec<String> = store.list_chats().into_iter().map(|c| c.id).collect();
        assert_eq!(ids, vec!["newer", "older"]);
    }
}

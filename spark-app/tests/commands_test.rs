//! Integration tests for the command surface against a seeded store
//!
//! Time is paused so simulated latency, auto-replies and welcome timers can
//! be stepped through.

use std::sync::Arc;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::SeedableRng;
use spark_core::{seed, Chat, MockStore, SchedulerConfig};
use spark_lib::commands::{auth, bot, chat, city, message, user};
use spark_lib::config::AppConfig;
use spark_lib::models::input::{
    CreateChatInput, FilterPreferences, GetMessagesInput, LoginInput, MarkAsReadInput,
    ProfileUpdateInput, SearchCitiesInput, SearchUsersInput, SendMessageInput, SignupInput,
};
use spark_lib::state::AppState;
use spark_lib::utils::generate_deterministic_chat_id;

fn test_config(auto_reply_probability: f64) -> AppConfig {
    AppConfig {
        scheduler: SchedulerConfig {
            remote_generation: false,
            seed: Some(11),
            ..Default::default()
        },
        auto_reply_probability,
        auto_start_bots: false,
        ..Default::default()
    }
}

fn setup_with(config: AppConfig) -> (Arc<MockStore>, AppState) {
    let mut rng = StdRng::seed_from_u64(11);
    let store = Arc::new(seed::seeded_store(&mut rng));
    let state = AppState::with_store(config, store.clone()).unwrap();
    (store, state)
}

fn setup() -> (Arc<MockStore>, AppState) {
    setup_with(test_config(0.0))
}

fn send_input(chat_id: &str, content: &str) -> SendMessageInput {
    SendMessageInput {
        chat_id: chat_id.to_string(),
        content: content.to_string(),
    }
}

#[tokio::test(start_paused = true)]
async fn test_create_chat_returns_existing() {
    let (store, state) = setup();
    let chats_before = store.chat_count();

    let existing = chat::create_chat(
        &state,
        CreateChatInput {
            user_id: "5".to_string(),
        },
    )
    .await
    .unwrap();

    assert_eq!(existing.id, "chat1");
    assert_eq!(store.chat_count(), chats_before);
}

#[tokio::test(start_paused = true)]
async fn test_create_chat_with_new_peer() {
    let (store, state) = setup();
    let chats_before = store.chat_count();

    let created = chat::create_chat(
        &state,
        CreateChatInput {
            user_id: "6".to_string(),
        },
    )
    .await
    .unwrap();

    let peer = store.get_user("6").unwrap();
    assert_eq!(created.id, generate_deterministic_chat_id("1", "6"));
    assert_eq!(created.participants, ["1".to_string(), "6".to_string()]);
    assert_eq!(created.username.as_deref(), Some(peer.username.as_str()));
    assert_eq!(created.is_online, Some(peer.is_online));
    assert_eq!(created.unread_count, 0);
    assert_eq!(store.chat_count(), chats_before + 1);

    // Opening it again does not duplicate it
    let again = chat::create_chat(
        &state,
        CreateChatInput {
            user_id: "6".to_string(),
        },
    )
    .await
    .unwrap();
    assert_eq!(again.id, created.id);
    assert_eq!(store.chat_count(), chats_before + 1);
}

#[tokio::test(start_paused = true)]
async fn test_create_chat_rejects_bad_peers() {
    let (_store, state) = setup();

    for user_id in ["1", "9999", ""] {
        let result = chat::create_chat(
            &state,
            CreateChatInput {
                user_id: user_id.to_string(),
            },
        )
        .await;
        assert!(result.is_err(), "user {:?} should be rejected", user_id);
    }
}

#[tokio::test(start_paused = true)]
async fn test_send_message_appends_from_local_user() {
    let (store, state) = setup();
    let unread_before = store.get_chat("chat2").unwrap().unread_count;

    let start = tokio::time::Instant::now();
    let sent = message::send_message(&state, send_input("chat2", "Saturday works!"))
        .await
        .unwrap();
    assert!(start.elapsed() >= Duration::from_millis(500));

    assert_eq!(sent.sender_id, "1");
    let messages = store.get_messages("chat2");
    assert_eq!(messages.last().unwrap().id, sent.id);

    let summary = store.get_chat("chat2").unwrap();
    assert_eq!(summary.last_message, "Saturday works!");
    assert_eq!(summary.unread_count, unread_before);

    // Replies are disabled in this setup
    tokio::time::sleep(Duration::from_secs(10)).await;
    assert_eq!(store.get_messages("chat2").len(), messages.len());
}

#[tokio::test(start_paused = true)]
async fn test_peer_auto_replies() {
    let (store, state) = setup_with(test_config(1.0));
    let count_before = store.message_count("chat3");

    message::send_message(&state, send_input("chat3", "Want to shoot together?"))
        .await
        .unwrap();
    assert_eq!(state.pending_replies(), 1);

    tokio::time::sleep(Duration::from_millis(1_900)).await;
    assert_eq!(store.message_count("chat3"), count_before + 1);

    tokio::time::sleep(Duration::from_secs(4)).await;
    let messages = store.get_messages("chat3");
    assert_eq!(messages.len(), count_before + 2);

    let reply = messages.last().unwrap();
    assert_eq!(reply.sender_id, "2");
    assert!(reply.read);
    assert!(message::AUTO_REPLIES.contains(&reply.content.as_str()));

    let summary = store.get_chat("chat3").unwrap();
    assert_eq!(summary.last_message, reply.content);
    assert_eq!(summary.unread_count, 0);
}

#[tokio::test(start_paused = true)]
async fn test_shutdown_drops_pending_replies() {
    let (store, state) = setup_with(test_config(1.0));
    let count_before = store.message_count("chat3");

    message::send_message(&state, send_input("chat3", "Hello?"))
        .await
        .unwrap();
    state.shutdown();

    tokio::time::sleep(Duration::from_secs(10)).await;
    assert_eq!(store.message_count("chat3"), count_before + 1);
    assert_eq!(state.pending_replies(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_send_message_requires_participation() {
    let (store, state) = setup();
    store.upsert_chat(Chat::new("chat_others", "2", "3"));

    let result = message::send_message(&state, send_input("chat_others", "Hi")).await;
    assert!(result.unwrap_err().contains("not a participant"));

    let result = message::send_message(&state, send_input("missing", "Hi")).await;
    assert!(result.is_err());

    let result = message::send_message(&state, send_input("chat1", "")).await;
    assert!(result.is_err());
    assert_eq!(store.message_count("chat_others"), 0);
}

#[tokio::test(start_paused = true)]
async fn test_get_messages_limit_keeps_latest() {
    let (_store, state) = setup();

    let all = message::get_messages(
        &state,
        GetMessagesInput {
            chat_id: "chat1".to_string(),
            limit: None,
        },
    )
    .unwrap();
    assert_eq!(all.len(), 7);

    let latest = message::get_messages(
        &state,
        GetMessagesInput {
            chat_id: "chat1".to_string(),
            limit: Some(2),
        },
    )
    .unwrap();
    let contents: Vec<&str> = latest.iter().map(|m| m.content.as_str()).collect();
    assert_eq!(
        contents,
        vec![
            "Definitely! I'm a big coffee fan. Would love some recommendations.",
            "Hey, how are you doing?"
        ]
    );

    // Chats without history are fine
    let empty = message::get_messages(
        &state,
        GetMessagesInput {
            chat_id: "chat4".to_string(),
            limit: Some(10),
        },
    )
    .unwrap();
    assert!(empty.is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_mark_as_read() {
    let (store, state) = setup();
    assert_eq!(store.get_chat("chat2").unwrap().unread_count, 3);

    chat::mark_as_read(
        &state,
        MarkAsReadInput {
            chat_id: "chat2".to_string(),
        },
    )
    .await
    .unwrap();

    assert_eq!(store.get_chat("chat2").unwrap().unread_count, 0);
    assert!(store.get_messages("chat2").iter().all(|m| m.read));

    let result = chat::mark_as_read(
        &state,
        MarkAsReadInput {
            chat_id: "missing".to_string(),
        },
    )
    .await;
    assert!(result.is_err());
}

#[tokio::test(start_paused = true)]
async fn test_get_chats_newest_first() {
    let (_store, state) = setup();

    let chats = chat::get_chats(&state);
    assert_eq!(chats.len(), 5);
    assert!(chats
        .windows(2)
        .all(|w| w[0].last_message_time >= w[1].last_message_time));
    assert_eq!(chats[0].id, "chat1");

    assert!(chat::get_chat(&state, "chat5").is_ok());
    assert!(chat::get_chat(&state, "nope").is_err());
}

#[tokio::test(start_paused = true)]
async fn test_search_users() {
    let (store, state) = setup();

    let everyone = user::search_users(
        &state,
        SearchUsersInput {
            query: String::new(),
        },
    )
    .unwrap();
    assert_eq!(everyone.len(), store.user_count());

    let coffee = user::search_users(
        &state,
        SearchUsersInput {
            query: "COFFEE".to_string(),
        },
    )
    .unwrap();
    assert!(coffee.iter().any(|u| u.id == "2"));
    assert!(coffee.iter().all(|u| {
        u.username.to_lowercase().contains("coffee")
            || u.bio.as_deref().unwrap_or("").to_lowercase().contains("coffee")
    }));

    let by_name = user::search_users(
        &state,
        SearchUsersInput {
            query: "samantha".to_string(),
        },
    )
    .unwrap();
    assert!(by_name.iter().any(|u| u.id == "2"));
}

#[tokio::test(start_paused = true)]
async fn test_list_and_popular_cities() {
    let (_store, state) = setup();

    let start = tokio::time::Instant::now();
    let cities = city::list_cities(&state).await;
    assert!(start.elapsed() >= Duration::from_millis(1200));
    let ids: Vec<&str> = cities.iter().map(|c| c.id.as_str()).collect();
    assert_eq!(ids, ["1", "2", "3", "4", "5", "6", "7", "8"]);

    let popular = city::popular_cities(&state).await;
    assert_eq!(popular.len(), city::POPULAR_CITY_COUNT);
    let names: Vec<&str> = popular.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, ["Tokyo", "London", "Paris", "New York", "Berlin"]);
}

#[tokio::test(start_paused = true)]
async fn test_search_cities() {
    let (_store, state) = setup();
    let search = |query: &str| {
        city::search_cities(
            &state,
            SearchCitiesInput {
                query: query.to_string(),
            },
        )
    };

    let us = search("UNITED").unwrap();
    let names: Vec<&str> = us.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, ["New York", "Los Angeles", "London"]);

    let japan = search("  japan ").unwrap();
    assert_eq!(japan.len(), 1);
    assert_eq!(japan[0].name, "Tokyo");

    assert_eq!(search("").unwrap().len(), 8);
    assert!(search("Atlantis").unwrap().is_empty());
    assert!(search(&"x".repeat(201)).is_err());
}

#[tokio::test(start_paused = true)]
async fn test_filter_users() {
    let (_store, state) = setup();

    let filters = FilterPreferences {
        min_age: 25,
        max_age: 30,
        max_distance: 10,
        show_online_only: true,
    };
    let matches = user::filter_users(&state, filters.clone()).unwrap();

    assert!(matches.iter().any(|u| u.id == "2"));
    assert!(matches.iter().all(|u| {
        u.age >= 25 && u.age <= 30 && u.distance <= 10 && u.is_online
    }));
    // Morgan is offline
    assert!(!matches.iter().any(|u| u.id == "4"));

    let inverted = FilterPreferences {
        min_age: 40,
        max_age: 30,
        ..filters
    };
    assert!(user::filter_users(&state, inverted).is_err());
}

#[tokio::test(start_paused = true)]
async fn test_update_profile() {
    let (store, state) = setup();

    let updated = user::update_profile(
        &state,
        ProfileUpdateInput {
            bio: Some("Coffee, trails and film cameras".to_string()),
            interests: Some(vec!["Coffee".to_string(), " Hiking ".to_string()]),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    assert_eq!(updated.id, "1");
    let stored = store.get_user("1").unwrap();
    assert_eq!(stored.bio.as_deref(), Some("Coffee, trails and film cameras"));
    assert_eq!(stored.interests, vec!["Coffee", "Hiking"]);
    assert_eq!(stored.username, "Alex");

    let result = user::update_profile(
        &state,
        ProfileUpdateInput {
            age: Some(12),
            ..Default::default()
        },
    )
    .await;
    assert!(result.is_err());
    assert_eq!(store.get_user("1").unwrap().age, 28);
}

#[tokio::test(start_paused = true)]
async fn test_login_and_current_user() {
    let (_store, state) = setup();
    assert!(user::get_current_user(&state).is_err());

    let bad = auth::login(
        &state,
        LoginInput {
            email: "nope".to_string(),
            password: "secret".to_string(),
        },
    )
    .await;
    assert!(bad.is_err());

    auth::login(
        &state,
        LoginInput {
            email: "alex@example.com".to_string(),
            password: "secret".to_string(),
        },
    )
    .await
    .unwrap();
    assert_eq!(user::get_current_user(&state).unwrap().id, "123");

    auth::logout(&state);
    assert!(user::get_current_user(&state).is_err());
}

#[tokio::test(start_paused = true)]
async fn test_signup_schedules_welcome() {
    let (store, state) = setup();

    let account = auth::signup(
        &state,
        SignupInput {
            name: "Riley".to_string(),
            email: "riley@example.com".to_string(),
            password: "secret1".to_string(),
            gender: None,
            preference: Some("Women".to_string()),
        },
    )
    .await
    .unwrap();
    assert_eq!(state.scheduler.pending_welcome_count(), 1);
    assert_eq!(account.sexual_preference, "Women");

    tokio::time::sleep(Duration::from_secs(31)).await;

    let welcome: Vec<Chat> = store
        .list_chats()
        .into_iter()
        .filter(|c| c.includes(&account.id))
        .collect();
    assert_eq!(welcome.len(), 1);
    assert_eq!(store.message_count(&welcome[0].id), 1);
    assert_eq!(welcome[0].unread_count, 1);
}

#[tokio::test(start_paused = true)]
async fn test_bot_controls() {
    let (_store, state) = setup();

    let status = bot::bot_status(&state);
    assert!(!status.active);
    assert_eq!(status.queued, 0);

    bot::start_bot_messaging(&state).unwrap();
    assert!(bot::bot_status(&state).active);

    bot::stop_bot_messaging(&state);
    assert!(!bot::bot_status(&state).active);
    assert_eq!(bot::bot_queue_len(&state), 0);
}

#[tokio::test(start_paused = true)]
async fn test_bots_refuse_to_start_without_users() {
    let store = Arc::new(MockStore::new());
    let state = AppState::with_store(test_config(0.0), store).unwrap();

    let result = bot::start_bot_messaging(&state);
    assert!(result.unwrap_err().contains("Not enough users"));
}

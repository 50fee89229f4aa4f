//! Startup data for the mock store.

use rand::Rng;

use crate::models::{Chat, City, Message, Preferences, User};
use crate::random::{pick_or, pick_some};
use crate::store::MockStore;

pub const SEEDED_USER_COUNT: u32 = 100;

const MALE_NAMES: [&str; 20] = [
    "James", "John", "Robert", "Michael", "William", "David", "Richard", "Joseph", "Thomas",
    "Daniel", "Matthew", "Anthony", "Christopher", "Charles", "Andrew", "Paul", "Brian", "Mark",
    "George", "Kenneth",
];
const FEMALE_NAMES: [&str; 20] = [
    "Mary", "Patricia", "Jennifer", "Linda", "Elizabeth", "Barbara", "Susan", "Jessica", "Sarah",
    "Karen", "Nancy", "Lisa", "Margaret", "Betty", "Sandra", "Ashley", "Dorothy", "Kimberly",
    "Emily", "Donna",
];
const NEUTRAL_NAMES: [&str; 20] = [
    "Alex", "Jordan", "Taylor", "Morgan", "Riley", "Casey", "Avery", "Quinn", "Reese", "Finley",
    "River", "Dakota", "Skyler", "Tatum", "Jamie", "Emerson", "Rowan", "Blair", "Phoenix",
    "Oakley",
];
const GENDERS: [&str; 7] = [
    "Male",
    "Female",
    "Trans Man",
    "Trans Woman",
    "Non-binary",
    "Gender Fluid People",
    "Other",
];
const LOCATIONS: [&str; 15] = [
    "Downtown", "Midtown", "Uptown", "East Village", "West End", "Brooklyn", "Greenwich",
    "Tribeca", "SoHo", "Financial District", "Chelsea", "Upper East Side", "Lower Manhattan",
    "Chinatown", "Harlem",
];
const INTERESTS: [&str; 40] = [
    "Hiking", "Photography", "Travel", "Fitness", "Coffee", "Food", "Coding", "Cooking", "Gaming",
    "Art", "Dogs", "Yoga", "Writing", "Music", "Concerts", "DJing", "Meditation", "Health",
    "Marketing", "Reading", "Activism", "Poetry", "Technology", "Entrepreneurship", "Wellness",
    "Volunteering", "Nature", "Cinema", "Theatre", "Dance", "Singing", "Painting", "Cycling",
    "Running", "Swimming", "Climbing", "Fashion", "Design", "Languages", "Science",
];
const SEXUAL_PREFERENCES: [&str; 3] = ["Men", "Women", "Everyone"];
const SEXUAL_ROLES: [&str; 4] = ["Active", "Passive", "Versatile", "Not specified"];
const SEXUAL_POSITIONS: [&str; 4] = ["Giving", "Receiving", "Both", "None"];
const INTIMACY_PREFERENCES: [&str; 5] = [
    "Casual Dating",
    "Hookups",
    "Serious Relationship",
    "Friendship",
    "Networking",
];
const SEX_STYLES: [&str; 5] = ["Gentle", "Moderate", "Intense", "Experimental", "BDSM/Kink"];
const HIV_STATUSES: [&str; 5] = [
    "Negative",
    "Negative on PrEP",
    "Positive",
    "Positive Undetectable",
    "Prefer not to say",
];
const SAFETY_PRACTICES: [&str; 4] = [
    "Always practice safe sex",
    "Sometimes practice safe sex",
    "Prefer not to say",
    "Discuss in person",
];
const LAST_ACTIVE: [&str; 11] = [
    "2 min ago", "5 min ago", "15 min ago", "30 min ago", "1 hour ago", "2 hours ago",
    "3 hours ago", "Yesterday", "This morning", "Last night", "This week",
];
const ETHNICITIES: [&str; 11] = [
    "White", "Black", "Hispanic", "Asian", "Middle Eastern", "Mixed", "Pacific Islander",
    "Native American", "South Asian", "East Asian", "African",
];
const OCCUPATIONS: [&str; 9] = [
    "designer", "developer", "writer", "artist", "consultant", "teacher", "student", "chef",
    "entrepreneur",
];

struct Profile {
    id: &'static str,
    username: &'static str,
    age: u32,
    gender: &'static str,
    distance: u32,
    bio: &'static str,
    picture: &'static str,
    location: &'static str,
    interests: &'static [&'static str],
    last_active: &'static str,
    is_online: bool,
    sexual_preference: &'static str,
    sexual_role: Option<&'static str>,
    intimacy: &'static [&'static str],
}

const PROFILES: [Profile; 12] = [
    Profile {
        id: "1",
        username: "Alex",
        age: 28,
        gender: "Male",
        distance: 2,
        bio: "Just moved to the city, looking to meet new people!",
        picture: "https://randomuser.me/api/portraits/men/32.jpg",
        location: "Downtown",
        interests: &["Hiking", "Photography", "Travel"],
        last_active: "2 min ago",
        is_online: true,
        sexual_preference: "Everyone",
        sexual_role: Some("Versatile"),
        intimacy: &["Casual Dating", "Friendship"],
    },
    Profile {
        id: "2",
        username: "Samantha",
        age: 25,
        gender: "Female",
        distance: 5,
        bio: "Coffee addict and fitness enthusiast. Love trying new restaurants and exploring the city.",
        picture: "https://randomuser.me/api/portraits/women/43.jpg",
        location: "Midtown",
        interests: &["Fitness", "Coffee", "Food"],
        last_active: "5 min ago",
        is_online: true,
        sexual_preference: "Men",
        sexual_role: None,
        intimacy: &["Serious Relationship"],
    },
    Profile {
        id: "3",
        username: "Taylor",
        age: 30,
        gender: "Non-binary",
        distance: 7,
        bio: "Software engineer by day, chef by night. Looking for genuine connections and good conversations.",
        picture: "https://randomuser.me/api/portraits/women/91.jpg",
        location: "Uptown",
        interests: &["Coding", "Cooking", "Gaming"],
        last_active: "15 min ago",
        is_online: false,
        sexual_preference: "Everyone",
        sexual_role: None,
        intimacy: &["Friendship", "Networking"],
    },
    Profile {
        id: "4",
        username: "Morgan",
        age: 26,
        gender: "Male",
        distance: 10,
        bio: "Art lover and dog parent. Always up for adventure and trying new things!",
        picture: "https://randomuser.me/api/portraits/men/57.jpg",
        location: "East Village",
        interests: &["Art", "Dogs", "Yoga"],
        last_active: "30 min ago",
        is_online: false,
        sexual_preference: "Men",
        sexual_role: Some("Active"),
        intimacy: &["Casual Dating", "Hookups"],
    },
    Profile {
        id: "5",
        username: "Emily",
        age: 29,
        gender: "Female",
        distance: 3,
        bio: "Journalist who loves to travel. Looking for someone to explore with and share adventures.",
        picture: "https://randomuser.me/api/portraits/women/64.jpg",
        location: "West End",
        interests: &["Travel", "Writing", "Photography"],
        last_active: "1 hour ago",
        is_online: true,
        sexual_preference: "Everyone",
        sexual_role: None,
        intimacy: &["Casual Dating", "Serious Relationship"],
    },
    Profile {
        id: "6",
        username: "Jamie",
        age: 31,
        gender: "Trans Woman",
        distance: 15,
        bio: "Music producer and concert lover. Can talk about music all day long!",
        picture: "https://randomuser.me/api/portraits/women/22.jpg",
        location: "Brooklyn",
        interests: &["Music", "Concerts", "DJing"],
        last_active: "2 hours ago",
        is_online: false,
        sexual_preference: "Everyone",
        sexual_role: Some("Versatile"),
        intimacy: &["Friendship", "Serious Relationship"],
    },
    Profile {
        id: "7",
        username: "Jessica",
        age: 27,
        gender: "Female",
        distance: 8,
        bio: "Yoga instructor and wellness enthusiast. Looking for positive connections and mindful people.",
        picture: "https://randomuser.me/api/portraits/women/33.jpg",
        location: "Greenwich",
        interests: &["Yoga", "Meditation", "Health"],
        last_active: "3 hours ago",
        is_online: true,
        sexual_preference: "Men",
        sexual_role: None,
        intimacy: &["Serious Relationship"],
    },
    Profile {
        id: "8",
        username: "Michael",
        age: 32,
        gender: "Male",
        distance: 6,
        bio: "Marketing professional who enjoys hiking and outdoor activities on weekends.",
        picture: "https://randomuser.me/api/portraits/men/76.jpg",
        location: "Tribeca",
        interests: &["Hiking", "Marketing", "Reading"],
        last_active: "4 hours ago",
        is_online: false,
        sexual_preference: "Men",
        sexual_role: None,
        intimacy: &["Casual Dating"],
    },
    Profile {
        id: "9",
        username: "Jordan",
        age: 29,
        gender: "Gender Fluid People",
        distance: 12,
        bio: "Artist and activist. Passionate about creative expression and community building.",
        picture: "https://randomuser.me/api/portraits/women/85.jpg",
        location: "SoHo",
        interests: &["Art", "Activism", "Poetry"],
        last_active: "1 hour ago",
        is_online: true,
        sexual_preference: "Everyone",
        sexual_role: None,
        intimacy: &["Friendship", "Casual Dating", "Networking"],
    },
    Profile {
        id: "10",
        username: "Nadia",
        age: 34,
        gender: "Trans Woman",
        distance: 9,
        bio: "Tech entrepreneur and foodie. Love discovering new restaurants and connecting with interesting people.",
        picture: "https://randomuser.me/api/portraits/women/29.jpg",
        location: "Financial District",
        interests: &["Technology", "Food", "Entrepreneurship"],
        last_active: "5 hours ago",
        is_online: false,
        sexual_preference: "Everyone",
        sexual_role: None,
        intimacy: &["Networking", "Friendship"],
    },
    Profile {
        id: "11",
        username: "Riley",
        age: 26,
        gender: "Trans Man",
        distance: 14,
        bio: "Fitness trainer and health coach. Believe in the power of wellness and positive mindset.",
        picture: "https://randomuser.me/api/portraits/men/40.jpg",
        location: "Chelsea",
        interests: &["Fitness", "Wellness", "Coaching"],
        last_active: "30 min ago",
        is_online: true,
        sexual_preference: "Women",
        sexual_role: None,
        intimacy: &["Serious Relationship"],
    },
    Profile {
        id: "12",
        username: "Olivia",
        age: 30,
        gender: "Female",
        distance: 7,
        bio: "Veterinarian and animal lover. Spend my free time volunteering at local animal shelters.",
        picture: "https://randomuser.me/api/portraits/women/71.jpg",
        location: "Upper East Side",
        interests: &["Animals", "Volunteering", "Nature"],
        last_active: "20 min ago",
        is_online: true,
        sexual_preference: "Men",
        sexual_role: None,
        intimacy: &["Casual Dating", "Serious Relationship"],
    },
];

impl Profile {
    fn to_user(&self) -> User {
        User {
            id: self.id.to_string(),
            username: self.username.to_string(),
            age: self.age,
            gender: self.gender.to_string(),
            distance: self.distance,
            bio: Some(self.bio.to_string()),
            profile_picture: self.picture.to_string(),
            location: Some(self.location.to_string()),
            interests: to_strings(self.interests),
            last_active: Some(self.last_active.to_string()),
            is_online: self.is_online,
            preferences: Preferences {
                sexual_preference: Some(self.sexual_preference.to_string()),
                sexual_role: self.sexual_role.map(str::to_string),
                intimacy_preferences: to_strings(self.intimacy),
                ..Default::default()
            },
            ..Default::default()
        }
    }
}

/// Explore screen cities: (name, country, active users, distance km, unsplash photo id)
const CITIES: [(&str, &str, u32, u32, &str); 8] = [
    ("New York", "United States", 35420, 12, "1496588152823-86ff7695e68f"),
    ("Los Angeles", "United States", 28750, 28, "1534190760961-74e8c1c5c3da"),
    ("London", "United Kingdom", 42300, 150, "1513635269975-59663e0ac1ad"),
    ("Paris", "France", 38200, 220, "1502602898657-3e91760cbb34"),
    ("Tokyo", "Japan", 46800, 580, "1540959733332-eab4deabeeaf"),
    ("Sydney", "Australia", 23500, 950, "1549180030-48bf079fb38a"),
    ("Berlin", "Germany", 31200, 300, "1560969184-10fe8719e047"),
    ("Barcelona", "Spain", 27400, 380, "1579282240050-352db0a14c21"),
];

/// Cities with ids "1".. in table order
pub fn seed_cities() -> Vec<City> {
    CITIES
        .iter()
        .enumerate()
        .map(|(index, (name, country, active_users, distance, photo))| City {
            id: (index + 1).to_string(),
            name: name.to_string(),
            country: country.to_string(),
            active_users: *active_users,
            distance: Some(*distance),
            image_url: Some(format!(
                "https://images.unsplash.com/photo-{}?auto=format&fit=crop&w=2070&q=80",
                photo
            )),
        })
        .collect()
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Store holding the seeded users, cities, chats and message histories
pub fn seeded_store(rng: &mut impl Rng) -> MockStore {
    let store = MockStore::with_users(seed_users(rng));
    for city in seed_cities() {
        store.insert_city(city);
    }
    for (chat, messages) in seed_chats() {
        store.upsert_chat(chat);
        for message in messages {
            store.append_message(message);
        }
    }
    store
}

/// The hand-written profiles followed by generated ones up to id 100
pub fn seed_users(rng: &mut impl Rng) -> Vec<User> {
    let mut users: Vec<User> = PROFILES.iter().map(Profile::to_user).collect();
    let first_generated = PROFILES.len() as u32 + 1;
    for id in first_generated..=SEEDED_USER_COUNT {
        users.push(generate_user(rng, id));
    }
    users
}

fn generate_user(rng: &mut impl Rng, id: u32) -> User {
    let gender = pick_or(rng, &GENDERS, "Other");
    let names: &[&str] = match gender {
        "Male" | "Trans Man" => &MALE_NAMES,
        "Female" | "Trans Woman" => &FEMALE_NAMES,
        _ => &NEUTRAL_NAMES,
    };
    let mut username = pick_or(rng, names, "Alex").to_string();
    if rng.gen_bool(0.3) {
        username.push_str(&rng.gen_range(0..99).to_string());
    }

    let age = rng.gen_range(18..=50);
    let distance = rng.gen_range(1..=30);
    let is_online = rng.gen_bool(0.3);
    let bio = if rng.gen_bool(0.9) {
        Some(generate_bio(rng, &username, age))
    } else {
        None
    };

    let category = match gender {
        "Male" | "Trans Man" => "men",
        "Female" | "Trans Woman" => "women",
        _ if rng.gen_bool(0.5) => "men",
        _ => "women",
    };
    let profile_picture = format!(
        "https://randomuser.me/api/portraits/{}/{}.jpg",
        category,
        rng.gen_range(1..=90)
    );

    User {
        id: id.to_string(),
        username,
        age,
        gender: gender.to_string(),
        distance,
        bio,
        profile_picture,
        location: Some(pick_or(rng, &LOCATIONS, "Downtown").to_string()),
        interests: to_strings(&pick_some(rng, &INTERESTS, 1, 5)),
        last_active: Some(pick_or(rng, &LAST_ACTIVE, "This week").to_string()),
        is_online,
        preferences: Preferences {
            sexual_preference: Some(pick_or(rng, &SEXUAL_PREFERENCES, "Everyone").to_string()),
            sexual_role: Some(pick_or(rng, &SEXUAL_ROLES, "Not specified").to_string()),
            sexual_position: Some(pick_or(rng, &SEXUAL_POSITIONS, "None").to_string()),
            intimacy_preferences: to_strings(&pick_some(rng, &INTIMACY_PREFERENCES, 1, 3)),
            sex_style: Some(pick_or(rng, &SEX_STYLES, "Gentle").to_string()),
            hiv_status: Some(pick_or(rng, &HIV_STATUSES, "Prefer not to say").to_string()),
            safety_practices: Some(
                pick_or(rng, &SAFETY_PRACTICES, "Prefer not to say").to_string(),
            ),
            show_publicly: rng.gen_bool(0.5),
        },
        height: Some(rng.gen_range(150..=200)),
        weight: Some(rng.gen_range(50..=100)),
        ethnicity: Some(pick_or(rng, &ETHNICITIES, "Mixed").to_string()),
        ..Default::default()
    }
}

fn generate_bio(rng: &mut impl Rng, username: &str, age: u32) -> String {
    match rng.gen_range(0..5) {
        0 => format!(
            "{} here! {} and looking for connections. Love {} and {}.",
            username,
            age,
            random_interest(rng),
            random_interest(rng)
        ),
        1 => format!(
            "{} about {}. Looking for {}.",
            pick_or(rng, &["Passionate", "Enthusiastic", "Dedicated"], "Passionate"),
            random_interest(rng),
            pick_or(rng, &INTIMACY_PREFERENCES, "Friendship").to_lowercase()
        ),
        2 => format!(
            "Living in {}, working as a {}.",
            pick_or(rng, &LOCATIONS, "Downtown"),
            pick_or(rng, &OCCUPATIONS, "designer")
        ),
        3 => format!(
            "{} {} and good conversations.",
            pick_or(rng, &["Lover of", "Addicted to", "Can't live without"], "Lover of"),
            random_interest(rng)
        ),
        _ => format!(
            "{}, excited to meet new people!",
            pick_or(
                rng,
                &["New to the city", "Long-time local", "Recently moved here"],
                "New to the city"
            )
        ),
    }
}

fn random_interest(rng: &mut impl Rng) -> &'static str {
    pick_or(rng, &INTERESTS, "Travel")
}

/// Seeded conversations between the local user "1" and a handful of peers
pub fn seed_chats() -> Vec<(Chat, Vec<Message>)> {
    vec![
        (
            seeded_chat(
                "chat1",
                "5",
                "Emma",
                "https://randomuser.me/api/portraits/women/64.jpg",
                true,
                "2023-08-12T10:30:00.000Z",
            ),
            vec![
                seeded_message("m1", "chat1", "5", "Hi there! I saw your profile and thought I'd say hello.", "2023-08-10T14:22:00.000Z", true),
                seeded_message("m2", "chat1", "1", "Hey Emma! Nice to meet you. How's your day going?", "2023-08-10T14:25:00.000Z", true),
                seeded_message("m3", "chat1", "5", "It's going well! Just finished work and now relaxing. Are you new to the area?", "2023-08-10T14:30:00.000Z", true),
                seeded_message("m4", "chat1", "1", "Yeah, moved here about a month ago. Still exploring all the cool spots!", "2023-08-10T14:33:00.000Z", true),
                seeded_message("m5", "chat1", "5", "Oh nice! I know some great coffee shops if you're into that.", "2023-08-12T10:25:00.000Z", true),
                seeded_message("m6", "chat1", "1", "Definitely! I'm a big coffee fan. Would love some recommendations.", "2023-08-12T10:28:00.000Z", true),
                seeded_message("m7", "chat1", "5", "Hey, how are you doing?", "2023-08-12T10:30:00.000Z", true),
            ],
        ),
        (
            Chat {
                unread_count: 3,
                ..seeded_chat(
                    "chat2",
                    "4",
                    "Morgan",
                    "https://randomuser.me/api/portraits/men/57.jpg",
                    false,
                    "2023-08-11T16:10:00.000Z",
                )
            },
            vec![
                seeded_message("m1", "chat2", "4", "Hey, I noticed we both like hiking!", "2023-08-11T15:30:00.000Z", true),
                seeded_message("m2", "chat2", "1", "Yeah! Have you tried the trails at Mountain Creek?", "2023-08-11T15:35:00.000Z", true),
                seeded_message("m3", "chat2", "4", "Not yet, but I've heard great things. We should go sometime!", "2023-08-11T15:40:00.000Z", true),
                seeded_message("m4", "chat2", "4", "Let me know when you're free", "2023-08-11T15:45:00.000Z", false),
            ],
        ),
        (
            seeded_chat(
                "chat3",
                "2",
                "Samantha",
                "https://randomuser.me/api/portraits/women/43.jpg",
                true,
                "2023-08-12T09:45:00.000Z",
            ),
            vec![
                seeded_message("m1", "chat3", "1", "Hey Samantha, I see you're into photography as well!", "2023-08-05T19:55:00.000Z", true),
                seeded_message("m2", "chat3", "2", "Yes! Been doing it for about 5 years now. What kind of photos do you take?", "2023-08-05T20:00:00.000Z", true),
                seeded_message("m3", "chat3", "1", "Mostly landscapes and street photography. I'm planning a shoot at the waterfront this weekend.", "2023-08-05T20:10:00.000Z", true),
                seeded_message("m4", "chat3", "2", "That sounds amazing!", "2023-08-05T20:15:00.000Z", true),
            ],
        ),
        (
            Chat {
                last_message: "See you tomorrow at 6!".to_string(),
                last_message_time: "2023-08-01T18:22:00.000Z".to_string(),
                ..seeded_chat(
                    "chat4",
                    "3",
                    "Taylor",
                    "https://randomuser.me/api/portraits/women/91.jpg",
                    false,
                    "2023-08-10T12:15:00.000Z",
                )
            },
            Vec::new(),
        ),
        (
            Chat {
                last_message: "Haha, that was fun!".to_string(),
                last_message_time: "2023-07-28T21:05:00.000Z".to_string(),
                ..seeded_chat(
                    "chat5",
                    "7",
                    "Jessica",
                    "https://randomuser.me/api/portraits/women/33.jpg",
                    true,
                    "2023-08-12T08:30:00.000Z",
                )
            },
            Vec::new(),
        ),
    ]
    .into_iter()
    .map(|(chat, messages)| (with_history_summary(chat, &messages), messages))
    .collect()
}

fn seeded_chat(
    id: &str,
    peer_id: &str,
    display_name: &str,
    profile_image: &str,
    is_online: bool,
    last_seen: &str,
) -> Chat {
    Chat {
        username: Some(display_name.to_string()),
        profile_image: Some(profile_image.to_string()),
        is_online: Some(is_online),
        last_seen: Some(last_seen.to_string()),
        ..Chat::new(id, "1", peer_id)
    }
}

/// Summary of a chat with a history always reflects its latest message
fn with_history_summary(mut chat: Chat, messages: &[Message]) -> Chat {
    if let Some(last) = messages.last() {
        chat.last_message = last.content.clone();
        chat.last_message_time = last.timestamp.clone();
    }
    chat
}

fn seeded_message(
    id: &str,
    chat_id: &str,
    sender_id: &str,
    content: &str,
    timestamp: &str,
    read: bool,
) -> Message {
    Message {
        id: id.to_string(),
        timestamp: timestamp.to_string(),
        read,
        ..Message::new(chat_id, sender_id, content)
    }
}

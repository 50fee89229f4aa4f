//! Canned conversation text used by the bot scheduler.

/// Interest used when the receiver has no interest tags
pub const GENERIC_INTEREST: &str = "chatting";

pub const GREETINGS: [&str; 10] = [
    "Hey there! How are you doing?",
    "Hi! I noticed your profile and thought I'd say hello.",
    "Hello! How's your day going?",
    "Hey, I like your profile! Want to chat?",
    "Hi there, you seem interesting. How are you?",
    "Hey! What's up?",
    "Hello from the other side of the app! 👋",
    "Hi, I'm new here. Nice to meet you!",
    "Hey! How's your week going?",
    "Hello! Thought I'd reach out and connect.",
];

pub const WELCOME_MESSAGES: [&str; 5] = [
    "Welcome to the app! How are you liking it so far?",
    "Hey there! Just checking in to see how your experience has been after signing up. Finding any interesting matches?",
    "Hope you're enjoying the app! Wanted to remind you to complete your profile to get more matches.",
    "Hi there! Thanks for joining our community. We've seen many people with similar interests to yours. Have you explored the Discover tab yet?",
    "Welcome aboard! Let me know if you need any help navigating the app.",
];

pub const GENERIC_FILLERS: [&str; 7] = [
    "That's interesting! Tell me more.",
    "I'd love to hear more about that.",
    "Really? That sounds great!",
    "Cool! What else is on your mind?",
    "Interesting perspective. What makes you think that?",
    "I see! And how does that make you feel?",
    "That's great to know. What else are you into?",
];

/// Reply to a greeting, optionally mentioning one of the receiver's interests
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseTemplate {
    Plain(&'static str),
    WithInterest {
        before: &'static str,
        after: &'static str,
    },
}

impl ResponseTemplate {
    pub fn render(&self, interest: &str) -> String {
        match self {
            ResponseTemplate::Plain(text) => text.to_string(),
            ResponseTemplate::WithInterest { before, after } => {
                format!("{}{}{}", before, interest, after)
            }
        }
    }
}

pub const RESPONSES: [ResponseTemplate; 10] = [
    ResponseTemplate::Plain("I'm doing pretty well, thanks for asking! How about you?"),
    ResponseTemplate::WithInterest {
        before: "I'm good! Just been busy with ",
        after: " lately.",
    },
    ResponseTemplate::WithInterest {
        before: "Hey! I'm great. Just got back from a ",
        after: " session.",
    },
    ResponseTemplate::Plain("I'm okay, thanks! What have you been up to?"),
    ResponseTemplate::Plain("Doing well, thanks for reaching out! What's new with you?"),
    ResponseTemplate::Plain("Pretty good! Looking forward to the weekend. Any plans?"),
    ResponseTemplate::Plain("I'm good, just chilling. What about you?"),
    ResponseTemplate::Plain("Hi there! I'm well. How's your day been?"),
    ResponseTemplate::Plain("I'm doing fine, thanks for asking! How's everything with you?"),
    ResponseTemplate::Plain("Not bad! Just relaxing after a long day. How are you?"),
];

/// Topic recognised in an incoming message when remote generation fails
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keyword {
    Greeting,
    HowAreYou,
    Name,
    Age,
    Meet,
}

impl Keyword {
    /// Fixed reply for the keyword. Greetings have none; they are answered
    /// with a response template instead.
    pub fn canned_reply(&self) -> Option<&'static str> {
        match self {
            Keyword::Greeting => None,
            Keyword::HowAreYou => Some("I'm doing great! Thanks for asking. How about you?"),
            Keyword::Name => Some("My name is a secret, but you can call me whatever you like!"),
            Keyword::Age => {
                Some("I don't really count my age, but I'm definitely young at heart!")
            }
            Keyword::Meet => {
                Some("I'd love to get to know you better first. What do you enjoy doing?")
            }
        }
    }
}

/// Find the first keyword in `message`, checked in priority order.
/// Matching is case-insensitive substring search, so "this" counts as "hi".
pub fn match_keyword(message: &str) -> Option<Keyword> {
    let lower = message.to_lowercase();

    if contains_any(&lower, &["hello", "hi", "hey"]) {
        return Some(Keyword::Greeting);
    }
    if lower.contains("how are you") {
        return Some(Keyword::HowAreYou);
    }
    if lower.contains("name") {
        return Some(Keyword::Name);
    }
    if lower.contains("age") {
        return Some(Keyword::Age);
    }
    if contains_any(&lower, &["date", "meet"]) {
        return Some(Keyword::Meet);
    }
    None
}

fn contains_any(text: &str, needles: &[&str]) -> bool {
    needles.iter().any(|n| text.contains(n))
}

//! Line-oriented shell over the command surface, reading from stdin.

use spark_core::City;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::warn;

use crate::commands;
use crate::models::input::{
    CreateChatInput, GetMessagesInput, LoginInput, MarkAsReadInput, SearchCitiesInput,
    SearchUsersInput, SendMessageInput, SignupInput,
};
use crate::state::AppState;

const HELP: &str = "\
Commands:
  users [query]                   list or search users
  cities [query]                  list or search cities
  popular                         most active cities
  chats                           list chats, newest first
  open <chat_id>                  show a chat's messages
  send <chat_id> <text>           send a message as the local user
  read <chat_id>                  mark a chat as read
  chat <user_id>                  open or start a chat with a user
  login <email> <password>
  signup <name> <email> <password>
  logout
  bots start|stop|status
  help
  quit";

/// Messages shown by `open`
const OPEN_LIMIT: usize = 20;

#[derive(Debug, Clone, PartialEq)]
pub enum ConsoleCommand {
    Help,
    Users { query: String },
    Cities { query: String },
    Popular,
    Chats,
    Open { chat_id: String },
    Send { chat_id: String, content: String },
    Read { chat_id: String },
    Chat { user_id: String },
    Login { email: String, password: String },
    Signup { name: String, email: String, password: String },
    Logout,
    BotsStart,
    BotsStop,
    BotsStatus,
    Quit,
}

impl ConsoleCommand {
    /// Parse one input line. Blank lines yield `Ok(None)`.
    pub fn parse(line: &str) -> Result<Option<Self>, String> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };
        let args: Vec<&str> = rest.split_whitespace().collect();

        let command = match (word.to_lowercase().as_str(), args.as_slice()) {
            ("", _) => return Ok(None),
            ("help" | "?", _) => Self::Help,
            ("users", _) => Self::Users {
                query: rest.to_string(),
            },
            ("cities", _) => Self::Cities {
                query: rest.to_string(),
            },
            ("popular", []) => Self::Popular,
            ("chats", []) => Self::Chats,
            ("open", [chat_id]) => Self::Open {
                chat_id: chat_id.to_string(),
            },
            ("send", [chat_id, ..]) => {
                let content = rest[chat_id.len()..].trim();
                if content.is_empty() {
                    return Err("Usage: send <chat_id> <text>".to_string());
                }
                Self::Send {
                    chat_id: chat_id.to_string(),
                    content: content.to_string(),
                }
            }
            ("read", [chat_id]) => Self::Read {
                chat_id: chat_id.to_string(),
            },
            ("chat", [user_id]) => Self::Chat {
                user_id: user_id.to_string(),
            },
            ("login", [email, password]) => Self::Login {
                email: email.to_string(),
                password: password.to_string(),
            },
            ("signup", [name, email, password]) => Self::Signup {
                name: name.to_string(),
                email: email.to_string(),
                password: password.to_string(),
            },
            ("logout", []) => Self::Logout,
            ("bots", ["start"]) => Self::BotsStart,
            ("bots", ["stop"]) => Self::BotsStop,
            ("bots", [] | ["status"]) => Self::BotsStatus,
            ("quit" | "exit", []) => Self::Quit,
            (other, _) => {
                return Err(format!("Unknown or malformed command '{}', try 'help'", other))
            }
        };
        Ok(Some(command))
    }
}

/// Read commands until `quit` or end of input
pub async fn run(state: &AppState) -> std::io::Result<()> {
    println!("{}", HELP);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Some(line) = lines.next_line().await? {
        let command = match ConsoleCommand::parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                println!("{}", e);
                continue;
            }
        };
        if command == ConsoleCommand::Quit {
            break;
        }
        if let Err(e) = execute(state, command).await {
            warn!("Command failed: {}", e);
            println!("Error: {}", e);
        }
    }

    Ok(())
}

async fn execute(state: &AppState, command: ConsoleCommand) -> Result<(), String> {
    match command {
        ConsoleCommand::Help => println!("{}", HELP),
        ConsoleCommand::Users { query } => {
            let users = commands::user::search_users(state, SearchUsersInput { query })?;
            for user in users {
                let online = if user.is_online { " (online)" } else { "" };
                println!(
                    "{:>6}  {}, {} - {} km{}",
                    user.id, user.username, user.age, user.distance, online
                );
            }
        }
        ConsoleCommand::Cities { query } => {
            let cities = if query.is_empty() {
                commands::city::list_cities(state).await
            } else {
                commands::city::search_cities(state, SearchCitiesInput { query })?
            };
            print_cities(&cities);
        }
        ConsoleCommand::Popular => print_cities(&commands::city::popular_cities(state).await),
        ConsoleCommand::Chats => {
            for chat in commands::chat::get_chats(state) {
                println!(
                    "{}  {} [{} unread] {}",
                    chat.id,
                    chat.username.as_deref().unwrap_or("?"),
                    chat.unread_count,
                    chat.last_message
                );
            }
        }
        ConsoleCommand::Open { chat_id } => {
            let messages = commands::message::get_messages(
                state,
                GetMessagesInput {
                    chat_id,
                    limit: Some(OPEN_LIMIT),
                },
            )?;
            for message in messages {
                println!("[{}] {}: {}", message.timestamp, message.sender_id, message.content);
            }
        }
        ConsoleCommand::Send { chat_id, content } => {
            let message =
                commands::message::send_message(state, SendMessageInput { chat_id, content })
                    .await?;
            println!("Sent {}", message.id);
        }
        ConsoleCommand::Read { chat_id } => {
            commands::chat::mark_as_read(state, MarkAsReadInput { chat_id }).await?;
        }
        ConsoleCommand::Chat { user_id } => {
            let chat = commands::chat::create_chat(state, CreateChatInput { user_id }).await?;
            println!("Chat {}", chat.id);
        }
        ConsoleCommand::Login { email, password } => {
            let user = commands::auth::login(state, LoginInput { email, password }).await?;
            println!("Welcome back, {}", user.name);
        }
        ConsoleCommand::Signup {
            name,
            email,
            password,
        } => {
            let input = SignupInput {
                name,
                email,
                password,
                gender: None,
                preference: None,
            };
            let user = commands::auth::signup(state, input).await?;
            println!("Signed up as {}", user.id);
        }
        ConsoleCommand::Logout => commands::auth::logout(state),
        ConsoleCommand::BotsStart => commands::bot::start_bot_messaging(state)?,
        ConsoleCommand::BotsStop => commands::bot::stop_bot_messaging(state),
        ConsoleCommand::BotsStatus => {
            let status = commands::bot::bot_status(state);
            println!(
                "active: {}, queued: {}, pending welcomes: {}",
                status.active, status.queued, status.pending_welcomes
            );
        }
        ConsoleCommand::Quit => {}
    }
    Ok(())
}

fn print_cities(cities: &[City]) {
    for city in cities {
        println!(
            "{:>3}  {}, {} - {} active",
            city.id, city.name, city.country, city.active_users
        );
    }
}

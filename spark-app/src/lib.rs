pub mod auth;
pub mod commands;
pub mod config;
pub mod console;
mod logging;
pub mod models;
pub mod state;
pub mod utils;

use std::time::Duration;

use tracing::{error, info};

use crate::config::AppConfig;
use crate::state::AppState;

const SHUTDOWN_TIMEOUT: Duration = Duration::from_millis(200);

pub fn run() {
    // A missing .env file is fine
    let _ = dotenvy::dotenv();

    let log_dir = logging::log_dir_from_env();
    let _log_guard = logging::init(log_dir.as_deref());

    let config = AppConfig::from_env();

    let runtime = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            error!("Failed to start async runtime: {}", e);
            std::process::exit(1);
        }
    };

    let result = runtime.block_on(serve(config));
    // Stdin reads block a pool thread until the next line arrives
    runtime.shutdown_timeout(SHUTDOWN_TIMEOUT);

    if let Err(e) = result {
        error!("{}", e);
        std::process::exit(1);
    }
}

async fn serve(config: AppConfig) -> Result<(), String> {
    let state = AppState::new(config)?;

    if state.config.auto_start_bots {
        match commands::bot::start_bot_messaging(&state) {
            Ok(()) => info!("Bot messaging started"),
            Err(e) => error!("{}", e),
        }
    }

    tokio::select! {
        result = console::run(&state) => {
            if let Err(e) = result {
                error!("Console input failed: {}", e);
            }
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Interrupted");
        }
    }

    state.shutdown();
    Ok(())
}

//! Process configuration.
//!
//! `Config` holds the values read from the environment (optionally populated from a `.env`
//! file by dotenvy in `main`). Game tuning lives in a separate JSON file described by
//! [`game::GameConfig`].

pub mod game;

use std::path::PathBuf;

use crate::error::{config::ConfigError, AppError};

pub struct Config {
    pub database_url: String,
    pub discord_bot_token: String,

    /// Location of the game tuning file, `data/reiatsu_config.json` unless overridden.
    pub game_config_path: PathBuf,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        Ok(Self {
            database_url: std::env::var("DATABASE_URL")
                .map_err(|_| ConfigError::MissingEnvVar("DATABASE_URL".to_string()))?,
            discord_bot_token: std::env::var("DISCORD_BOT_TOKEN")
                .map_err(|_| ConfigError::MissingEnvVar("DISCORD_BOT_TOKEN".to_string()))?,
            game_config_path: std::env::var("REIATSU_CONFIG_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(game::DEFAULT_CONFIG_PATH)),
        })
    }
}

use dioxus_logger::tracing::{self, Level};
use serenity::http::Http;
use std::sync::Arc;

use reiatsu::{
    bot, config::Config, error::AppError, scheduler::reiatsu_spawn,
    service::channel::DiscordSpawnChannel, startup, state::AppState,
};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    if let Err(e) = dioxus_logger::init(Level::INFO) {
        eprintln!("Failed to initialize logger: {}", e);
    }

    let config = Config::from_env()?;

    let db = startup::connect_to_database(&config).await?;
    let game_config = startup::load_game_config(&config);

    // REST client for posting markers, independent of the gateway connection
    let discord_http = Arc::new(Http::new(&config.discord_bot_token));
    let channel = Arc::new(DiscordSpawnChannel::new(discord_http));

    let state = AppState::new(db, channel, game_config);

    tracing::info!("Starting Reiatsu bot");

    let bot_client = bot::start::init_bot(&config, state.clone()).await?;

    reiatsu_spawn::start_scheduler(state).await?;

    // Runs until the gateway shuts down
    bot::start::start_bot(bot_client).await
}

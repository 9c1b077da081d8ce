use dioxus_logger::tracing;

use crate::{
    config::{game::GameConfig, Config},
    error::AppError,
};

/// Connects to the Sqlite database and runs pending migrations.
///
/// Establishes a connection pool to the Sqlite database using the connection string from
/// configuration, then runs all pending SeaORM migrations so the `reiatsu_config` and
/// `reiatsu_player` tables exist before the bot or the scheduler touch them.
///
/// # Arguments
/// - `config` - Application configuration containing the database URL
///
/// # Returns
/// - `Ok(DatabaseConnection)` - Connected database with migrations applied
/// - `Err(AppError::DbErr)` - Failed to connect to database or run migrations
pub async fn connect_to_database(config: &Config) -> Result<sea_orm::DatabaseConnection, AppError> {
    use migration::{Migrator, MigratorTrait};
    use sea_orm::{ConnectOptions, Database};

    let mut opt = ConnectOptions::new(&config.database_url);
    opt.sqlx_logging(false);

    let db = Database::connect(opt).await?;

    Migrator::up(&db, None).await?;

    Ok(db)
}

/// Loads the game tuning file named by the configuration.
///
/// Never fails; see [`GameConfig::load`] for the fallback rules.
pub fn load_game_config(config: &Config) -> GameConfig {
    let game_config = GameConfig::load(&config.game_config_path);

    tracing::info!(
        "Game config: spawn loop every {}s, tiers [{}], default '{}'",
        game_config.spawn_loop_interval,
        game_config
            .spawn_speed_ranges
            .keys()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", "),
        game_config.default_spawn_speed
    );

    game_config
}

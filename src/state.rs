//! Application state shared by the gateway handler and the scheduler.
//!
//! `AppState` is built once during startup and cloned into the bot handler and the spawn job.
//! All fields are cheap to clone: the database connection is a pool, the channel and game
//! config are reference-counted, and the lock map shares its inner map.

use sea_orm::DatabaseConnection;
use std::sync::Arc;

use crate::{
    config::game::GameConfig,
    service::{
        admin::AdminService, capture::CaptureService, channel::SpawnChannel,
        guild_lock::GuildLocks, reconcile::ReconcileService, skill::SkillService,
        spawn::SpawnService,
    },
};

#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub db: DatabaseConnection,

    /// Channel markers are posted to and retired from.
    pub channel: Arc<dyn SpawnChannel>,

    /// Game tuning loaded at startup.
    pub game_config: Arc<GameConfig>,

    /// Per-community locks serializing every spawn state mutation.
    pub guild_locks: GuildLocks,
}

impl AppState {
    /// Creates a new application state with the provided dependencies.
    ///
    /// # Arguments
    /// - `db` - Database connection pool
    /// - `channel` - Spawn channel implementation
    /// - `game_config` - Game tuning constants
    ///
    /// # Returns
    /// - `AppState` - Initialized state with an empty lock map
    pub fn new(
        db: DatabaseConnection,
        channel: Arc<dyn SpawnChannel>,
        game_config: GameConfig,
    ) -> Self {
        Self {
            db,
            channel,
            game_config: Arc::new(game_config),
            guild_locks: GuildLocks::new(),
        }
    }

    pub fn capture_service(&self) -> CaptureService<'_> {
        CaptureService::new(
            &self.db,
            self.channel.as_ref(),
            &self.game_config,
            &self.guild_locks,
        )
    }

    pub fn spawn_service(&self) -> SpawnService<'_> {
        SpawnService::new(
            &self.db,
            self.channel.as_ref(),
            &self.game_config,
            &self.guild_locks,
        )
    }

    pub fn reconcile_service(&self) -> ReconcileService<'_> {
        ReconcileService::new(&self.db, self.channel.as_ref(), &self.guild_locks)
    }

    pub fn admin_service(&self) -> AdminService<'_> {
        AdminService::new(
            &self.db,
            self.channel.as_ref(),
            &self.game_config,
            &self.guild_locks,
        )
    }

    pub fn skill_service(&self) -> SkillService<'_> {
        SkillService::new(&self.db, &self.game_config)
    }
}

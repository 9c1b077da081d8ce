//! Reiatsu config factory for creating per-community spawn configuration rows.

use crate::factory::helpers::next_id;
use chrono::{DateTime, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating test spawn configurations with customizable fields.
///
/// # Example
///
/// ```rust,ignore
/// let config = ReiatsuConfigFactory::new(&db)
///     .guild_id(42)
///     .channel_id(None)
///     .build()
///     .await?;
/// ```
pub struct ReiatsuConfigFactory<'a> {
    db: &'a DatabaseConnection,
    guild_id: i64,
    channel_id: Option<i64>,
    spawn_speed: String,
    spawn_delay: i64,
    last_spawn_at: Option<DateTime<Utc>>,
    spawn_message_id: Option<i64>,
    pending_real: bool,
    pending_decoy: bool,
}

impl<'a> ReiatsuConfigFactory<'a> {
    /// Creates a new factory with default values.
    ///
    /// Defaults:
    /// - guild_id / channel_id: unique auto-incremented ids
    /// - spawn_speed: `"normal"`, spawn_delay: `2700`
    /// - never spawned, nothing pending
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self {
            db,
            guild_id: next_id() as i64,
            channel_id: Some(next_id() as i64),
            spawn_speed: "normal".to_string(),
            spawn_delay: 2700,
            last_spawn_at: None,
            spawn_message_id: None,
            pending_real: false,
            pending_decoy: false,
        }
    }

    pub fn guild_id(mut self, guild_id: u64) -> Self {
        self.guild_id = guild_id as i64;
        self
    }

    pub fn channel_id(mut self, channel_id: Option<u64>) -> Self {
        self.channel_id = channel_id.map(|id| id as i64);
        self
    }

    pub fn spawn_speed(mut self, spawn_speed: impl Into<String>) -> Self {
        self.spawn_speed = spawn_speed.into();
        self
    }

    pub fn spawn_delay(mut self, spawn_delay: i64) -> Self {
        self.spawn_delay = spawn_delay;
        self
    }

    pub fn last_spawn_at(mut self, last_spawn_at: Option<DateTime<Utc>>) -> Self {
        self.last_spawn_at = last_spawn_at;
        self
    }

    /// Marks a real marker as pending.
    ///
    /// # Arguments
    /// - `message_id` - Message id of the marker; `None` produces a flag without reference
    pub fn pending_real(mut self, message_id: Option<u64>) -> Self {
        self.pending_real = true;
        self.spawn_message_id = message_id.map(|id| id as i64);
        self
    }

    pub fn pending_decoy(mut self, pending_decoy: bool) -> Self {
        self.pending_decoy = pending_decoy;
        self
    }

    /// Builds and inserts the config row into the database.
    ///
    /// # Returns
    /// - `Ok(entity::reiatsu_config::Model)` - Created row
    /// - `Err(DbErr)` - Database error during insert
    pub async fn build(self) -> Result<entity::reiatsu_config::Model, DbErr> {
        let now = Utc::now();
        entity::reiatsu_config::ActiveModel {
            guild_id: ActiveValue::Set(self.guild_id),
            channel_id: ActiveValue::Set(self.channel_id),
            spawn_speed: ActiveValue::Set(self.spawn_speed),
            spawn_delay: ActiveValue::Set(self.spawn_delay),
            last_spawn_at: ActiveValue::Set(self.last_spawn_at),
            pending_real: ActiveValue::Set(self.pending_real),
            spawn_message_id: ActiveValue::Set(self.spawn_message_id),
            pending_decoy: ActiveValue::Set(self.pending_decoy),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
        }
        .insert(self.db)
        .await
    }
}

/// Creates a configured community with default values.
///
/// Shorthand for `ReiatsuConfigFactory::new(db).build().await`.
pub async fn create_config(
    db: &DatabaseConnection,
) -> Result<entity::reiatsu_config::Model, DbErr> {
    ReiatsuConfigFactory::new(db).build().await
}

//! Community configuration and player overrides.
//!
//! `AdminService` backs the moderator commands of the bot: choosing the spawn channel, changing
//! the cadence tier, forcing a spawn, and overriding a player's balance or class. Command
//! parsing and permission checks happen in the chat layer.

use chrono::Utc;
use dioxus_logger::tracing;
use sea_orm::{DatabaseConnection, TransactionTrait};

use crate::{
    config::game::GameConfig,
    data::{reiatsu_config::ReiatsuConfigRepository, reiatsu_player::ReiatsuPlayerRepository},
    error::AppError,
    model::{
        reiatsu_config::{ReiatsuConfig, UpsertReiatsuChannelParam},
        reiatsu_player::{PlayerClass, ReiatsuPlayer},
    },
    service::{channel::SpawnChannel, guild_lock::GuildLocks, spawn::SpawnService},
};

/// Service for moderator operations on spawn configuration and player state.
pub struct AdminService<'a> {
    db: &'a DatabaseConnection,
    channel: &'a dyn SpawnChannel,
    config: &'a GameConfig,
    locks: &'a GuildLocks,
}

impl<'a> AdminService<'a> {
    /// Creates a new AdminService instance.
    ///
    /// # Arguments
    /// - `db` - Database connection
    /// - `channel` - Channel forced spawns are posted to
    /// - `config` - Cadence tiers
    /// - `locks` - Per-community lock map shared with the other services
    ///
    /// # Returns
    /// - `AdminService` - New service instance
    pub fn new(
        db: &'a DatabaseConnection,
        channel: &'a dyn SpawnChannel,
        config: &'a GameConfig,
        locks: &'a GuildLocks,
    ) -> Self {
        Self {
            db,
            channel,
            config,
            locks,
        }
    }

    /// Sets the spawn channel of a community.
    ///
    /// Resets the community to the default tier with a freshly drawn delay and starts the
    /// cadence now. Markers pending in the previous channel are retired: the real one is
    /// forgotten and posted decoys go back to their holders unposted, to be posted again in
    /// the new channel.
    ///
    /// # Arguments
    /// - `guild_id` - Discord guild ID of the community
    /// - `channel_id` - Channel markers will be posted to
    ///
    /// # Returns
    /// - `Ok(ReiatsuConfig)` - The stored configuration
    /// - `Err(AppError::DbErr)` - Database error during upsert
    pub async fn configure_channel(
        &self,
        guild_id: u64,
        channel_id: u64,
    ) -> Result<ReiatsuConfig, AppError> {
        let _guard = self.locks.acquire(guild_id).await;
        let now = Utc::now();

        let spawn_speed = self.config.default_spawn_speed.clone();
        let spawn_delay = self.config.cadence(&spawn_speed).roll(&mut rand::rng());

        let txn = self.db.begin().await?;
        let config_repo = ReiatsuConfigRepository::new(&txn);

        let previous = config_repo.get_by_guild_id(guild_id).await?;
        let withdrawn = ReiatsuPlayerRepository::new(&txn)
            .withdraw_posted_decoys(guild_id, now)
            .await?;
        let config = config_repo
            .upsert_channel(
                UpsertReiatsuChannelParam {
                    guild_id,
                    channel_id,
                    spawn_speed,
                    spawn_delay,
                },
                now,
            )
            .await?;

        txn.commit().await?;

        if let Some(previous) = previous {
            self.retire_markers(&previous, &withdrawn).await;
        }

        tracing::info!(
            "Guild {} spawns Reiatsu in channel {} (first spawn in {}s)",
            guild_id,
            channel_id,
            spawn_delay
        );

        Ok(config)
    }

    /// Stops spawning in a community.
    ///
    /// Pending markers are retired the same way as in [`Self::configure_channel`].
    ///
    /// # Returns
    /// - `Ok(())` - Channel and pending state cleared
    /// - `Err(AppError::NotFound)` - Community is not configured
    /// - `Err(AppError::DbErr)` - Database error during update
    pub async fn unset_channel(&self, guild_id: u64) -> Result<(), AppError> {
        let _guard = self.locks.acquire(guild_id).await;
        let now = Utc::now();

        let txn = self.db.begin().await?;
        let config_repo = ReiatsuConfigRepository::new(&txn);

        let Some(previous) = config_repo.get_by_guild_id(guild_id).await? else {
            return Err(AppError::NotFound(format!(
                "Guild {} is not configured",
                guild_id
            )));
        };
        let withdrawn = ReiatsuPlayerRepository::new(&txn)
            .withdraw_posted_decoys(guild_id, now)
            .await?;
        config_repo.unset_channel(guild_id, now).await?;

        txn.commit().await?;

        self.retire_markers(&previous, &withdrawn).await;

        tracing::info!("Guild {} no longer spawns Reiatsu", guild_id);

        Ok(())
    }

    /// Deletes the markers a community had posted before its channel changed.
    ///
    /// Failures are logged only: the markers are no longer recorded, so claims on them are
    /// ignored.
    async fn retire_markers(&self, previous: &ReiatsuConfig, withdrawn_decoys: &[u64]) {
        let Some(channel_id) = previous.channel_id else {
            return;
        };

        let real = previous.spawn_message_id.filter(|_| previous.pending_real);
        for message_id in real.iter().chain(withdrawn_decoys) {
            if let Err(e) = self.channel.delete_marker(channel_id, *message_id).await {
                tracing::warn!(
                    "Failed to retire marker {} in channel {} of guild {}: {}",
                    message_id,
                    channel_id,
                    previous.guild_id,
                    e
                );
            }
        }
    }

    /// Changes the cadence tier of a community and draws a new delay from it.
    ///
    /// # Arguments
    /// - `guild_id` - Discord guild ID of the community
    /// - `spawn_speed` - Name of the tier
    ///
    /// # Returns
    /// - `Ok(i64)` - The newly drawn delay in seconds
    /// - `Err(AppError::BadRequest)` - Unknown tier
    /// - `Err(AppError::NotFound)` - Community is not configured
    pub async fn set_spawn_speed(&self, guild_id: u64, spawn_speed: &str) -> Result<i64, AppError> {
        if !self.config.has_tier(spawn_speed) {
            let known: Vec<&str> = self
                .config
                .spawn_speed_ranges
                .keys()
                .map(String::as_str)
                .collect();
            return Err(AppError::BadRequest(format!(
                "Unknown spawn speed '{}', expected one of: {}",
                spawn_speed,
                known.join(", ")
            )));
        }

        let _guard = self.locks.acquire(guild_id).await;

        let spawn_delay = self.config.cadence(spawn_speed).roll(&mut rand::rng());
        if !ReiatsuConfigRepository::new(self.db)
            .update_spawn_speed(guild_id, spawn_speed, spawn_delay, Utc::now())
            .await?
        {
            return Err(AppError::NotFound(format!(
                "Guild {} is not configured",
                guild_id
            )));
        }

        tracing::info!(
            "Guild {} spawn speed set to '{}' ({}s)",
            guild_id,
            spawn_speed,
            spawn_delay
        );

        Ok(spawn_delay)
    }

    /// Posts a real marker now, see [`SpawnService::force_spawn`].
    pub async fn force_spawn(&self, guild_id: u64) -> Result<u64, AppError> {
        SpawnService::new(self.db, self.channel, self.config, self.locks)
            .force_spawn(guild_id)
            .await
    }

    /// Overrides a player's balance, creating the player if needed.
    ///
    /// # Returns
    /// - `Ok(ReiatsuPlayer)` - Updated player
    /// - `Err(AppError::BadRequest)` - Balance exceeds the largest storable balance
    /// - `Err(AppError)` - Database error or invalid stored row
    pub async fn set_balance(&self, user_id: u64, balance: u64) -> Result<ReiatsuPlayer, AppError> {
        if i64::try_from(balance).is_err() {
            return Err(AppError::BadRequest(format!(
                "Balance {} exceeds the maximum of {}",
                balance,
                i64::MAX
            )));
        }

        let now = Utc::now();
        let player_repo = ReiatsuPlayerRepository::new(self.db);

        let mut player = player_repo.get_or_create(user_id, now).await?;
        player_repo.set_balance(user_id, balance, now).await?;
        player.balance = balance;

        tracing::info!("Balance of user {} set to {}", user_id, balance);

        Ok(player)
    }

    /// Changes a player's class, creating the player if needed.
    ///
    /// # Returns
    /// - `Ok(ReiatsuPlayer)` - Updated player
    /// - `Err(AppError::BadRequest)` - Unknown class name
    pub async fn set_class(&self, user_id: u64, class: &str) -> Result<ReiatsuPlayer, AppError> {
        let class = PlayerClass::from_name(class)
            .ok_or_else(|| AppError::BadRequest(format!("Unknown class '{}'", class)))?;

        let now = Utc::now();
        let player_repo = ReiatsuPlayerRepository::new(self.db);

        let mut player = player_repo.get_or_create(user_id, now).await?;
        player_repo.set_class(user_id, class, now).await?;
        player.class = class;

        Ok(player)
    }

    /// Reads a player's state, the default state if the player never played.
    pub async fn profile(&self, user_id: u64) -> Result<ReiatsuPlayer, AppError> {
        let player = ReiatsuPlayerRepository::new(self.db)
            .get_by_user_id(user_id)
            .await?;

        Ok(player.unwrap_or_else(|| ReiatsuPlayer::new_default(user_id, Utc::now())))
    }
}

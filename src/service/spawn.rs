//! Marker emission.
//!
//! `SpawnService::tick` is driven by the scheduler. For every configured community it posts a
//! real marker once the drawn delay has elapsed, and posts the decoy of an Illusionist who
//! activated their skill in that community. Each community holds at most one pending marker of
//! each kind. A marker whose emission cannot be persisted is deleted again so no unrecorded
//! claimable marker stays in the channel.

use chrono::{DateTime, Utc};
use dioxus_logger::tracing;
use sea_orm::{DatabaseConnection, TransactionTrait};

use crate::{
    config::game::GameConfig,
    data::{reiatsu_config::ReiatsuConfigRepository, reiatsu_player::ReiatsuPlayerRepository},
    error::AppError,
    model::{
        claim::MarkerKind,
        reiatsu_config::ReiatsuConfig,
        reiatsu_player::{ActiveSkill, DecoySkill},
    },
    service::{channel::SpawnChannel, guild_lock::GuildLocks},
};

/// Service emitting real and decoy markers.
pub struct SpawnService<'a> {
    db: &'a DatabaseConnection,
    channel: &'a dyn SpawnChannel,
    config: &'a GameConfig,
    locks: &'a GuildLocks,
}

impl<'a> SpawnService<'a> {
    /// Creates a new SpawnService instance.
    ///
    /// # Arguments
    /// - `db` - Database connection
    /// - `channel` - Channel markers are posted to
    /// - `config` - Cadence tiers
    /// - `locks` - Per-community lock map shared with the other services
    ///
    /// # Returns
    /// - `SpawnService` - New service instance
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

    /// Runs one spawn tick over every configured community.
    ///
    /// Communities are processed sequentially. A failure in one community is logged and the
    /// tick continues with the next.
    ///
    /// # Arguments
    /// - `now` - Tick time
    ///
    /// # Returns
    /// - `Ok(())` - Tick completed (individual communities may have failed)
    /// - `Err(AppError)` - Configured communities could not be listed
    pub async fn tick(&self, now: DateTime<Utc>) -> Result<(), AppError> {
        let configs = ReiatsuConfigRepository::new(self.db)
            .get_configured()
            .await?;

        for config in configs {
            let guild_id = config.guild_id;
            if let Err(e) = self.process_guild(guild_id, now).await {
                tracing::error!("Spawn tick failed for guild {}: {}", guild_id, e);
            }
        }

        Ok(())
    }

    /// Posts a real marker immediately, ignoring the cadence.
    ///
    /// # Arguments
    /// - `guild_id` - Discord guild ID of the community
    ///
    /// # Returns
    /// - `Ok(u64)` - Message ID of the posted marker
    /// - `Err(AppError::NotFound)` - Community has no spawn channel configured
    /// - `Err(AppError::BadRequest)` - A real marker is already pending
    /// - `Err(AppError)` - Posting or persisting the marker failed
    pub async fn force_spawn(&self, guild_id: u64) -> Result<u64, AppError> {
        let _guard = self.locks.acquire(guild_id).await;

        let config = ReiatsuConfigRepository::new(self.db)
            .get_by_guild_id(guild_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Guild {} is not configured", guild_id)))?;
        let channel_id = config.channel_id.ok_or_else(|| {
            AppError::NotFound(format!("Guild {} has no spawn channel", guild_id))
        })?;
        if config.pending_real {
            return Err(AppError::BadRequest(
                "A Reiatsu is already waiting to be claimed".to_string(),
            ));
        }

        self.emit_real(&config, channel_id, Utc::now())
            .await?
            .ok_or_else(|| {
                AppError::BadRequest("A Reiatsu is already waiting to be claimed".to_string())
            })
    }

    async fn process_guild(&self, guild_id: u64, now: DateTime<Utc>) -> Result<(), AppError> {
        let _guard = self.locks.acquire(guild_id).await;

        // Re-read under the lock, a claim may have resolved since the tick listed configs
        let Some(config) = ReiatsuConfigRepository::new(self.db)
            .get_by_guild_id(guild_id)
            .await?
        else {
            return Ok(());
        };
        let Some(channel_id) = config.channel_id else {
            tracing::debug!("Guild {} has no spawn channel, skipping", guild_id);
            return Ok(());
        };

        let config = self.ensure_delay_in_bounds(config, now).await?;

        if config.is_due(now) {
            if let Err(e) = self.emit_real(&config, channel_id, now).await {
                tracing::error!("Failed to spawn Reiatsu in guild {}: {}", guild_id, e);
            }
        }

        if !config.pending_decoy {
            if let Err(e) = self.emit_decoy(&config, channel_id, now).await {
                tracing::error!("Failed to spawn decoy in guild {}: {}", guild_id, e);
            }
        }

        Ok(())
    }

    /// Re-rolls and persists a stored delay that lies outside its tier bounds.
    async fn ensure_delay_in_bounds(
        &self,
        mut config: ReiatsuConfig,
        now: DateTime<Utc>,
    ) -> Result<ReiatsuConfig, AppError> {
        let range = self.config.cadence(&config.spawn_speed);
        if range.contains(config.spawn_delay) {
            return Ok(config);
        }

        let delay = range.roll(&mut rand::rng());
        ReiatsuConfigRepository::new(self.db)
            .update_spawn_delay(config.guild_id, delay, now)
            .await?;

        tracing::info!(
            "Spawn delay {} of guild {} outside '{}' bounds [{}, {}], re-rolled to {}",
            config.spawn_delay,
            config.guild_id,
            config.spawn_speed,
            range.min,
            range.max,
            delay
        );
        config.spawn_delay = delay;

        Ok(config)
    }

    /// Posts a real marker and records it as pending.
    ///
    /// # Returns
    /// - `Ok(Some(message_id))` - Marker posted and recorded
    /// - `Ok(None)` - A real marker was already pending, the new one was retracted
    /// - `Err(AppError)` - Posting or persisting failed
    async fn emit_real(
        &self,
        config: &ReiatsuConfig,
        channel_id: u64,
        now: DateTime<Utc>,
    ) -> Result<Option<u64>, AppError> {
        let message_id = self.channel.post_marker(channel_id, MarkerKind::Real).await?;

        match ReiatsuConfigRepository::new(self.db)
            .mark_real_spawned(config.guild_id, message_id, now)
            .await
        {
            Ok(true) => {
                tracing::info!(
                    "Spawned Reiatsu {} in guild {} (next delay {}s after claim)",
                    message_id,
                    config.guild_id,
                    config.spawn_delay
                );
                Ok(Some(message_id))
            }
            Ok(false) => {
                tracing::warn!(
                    "Guild {} already had a pending Reiatsu, retracting {}",
                    config.guild_id,
                    message_id
                );
                self.retract(channel_id, message_id).await;
                Ok(None)
            }
            Err(e) => {
                self.retract(channel_id, message_id).await;
                Err(e.into())
            }
        }
    }

    /// Posts the first unposted decoy scoped to the community, if any.
    async fn emit_decoy(
        &self,
        config: &ReiatsuConfig,
        channel_id: u64,
        now: DateTime<Utc>,
    ) -> Result<(), AppError> {
        let decoy = ReiatsuPlayerRepository::new(self.db)
            .get_decoys()
            .await?
            .into_iter()
            .find(|(_, decoy)| decoy.guild_id == config.guild_id && decoy.spawn_ref.is_none());
        let Some((holder_id, decoy)) = decoy else {
            return Ok(());
        };

        let message_id = self.channel.post_marker(channel_id, MarkerKind::Decoy).await?;

        match self
            .record_decoy(config.guild_id, holder_id, &decoy, message_id, now)
            .await
        {
            Ok(true) => {
                tracing::info!(
                    "Spawned decoy {} of user {} in guild {}",
                    message_id,
                    decoy.owner_id,
                    config.guild_id
                );
                Ok(())
            }
            Ok(false) => {
                tracing::warn!(
                    "Decoy of user {} changed while posting, retracting {}",
                    decoy.owner_id,
                    message_id
                );
                self.retract(channel_id, message_id).await;
                Ok(())
            }
            Err(e) => {
                self.retract(channel_id, message_id).await;
                Err(e)
            }
        }
    }

    /// Stores the decoy's marker reference and sets the pending decoy flag in one transaction.
    ///
    /// # Returns
    /// - `Ok(true)` - Decoy recorded
    /// - `Ok(false)` - Payload or flag changed since it was read, nothing stored
    async fn record_decoy(
        &self,
        guild_id: u64,
        holder_id: u64,
        decoy: &DecoySkill,
        message_id: u64,
        now: DateTime<Utc>,
    ) -> Result<bool, AppError> {
        let txn = self.db.begin().await?;
        let player_repo = ReiatsuPlayerRepository::new(&txn);
        let config_repo = ReiatsuConfigRepository::new(&txn);

        let expected = ActiveSkill::Decoy(decoy.clone());
        let current = player_repo
            .get_by_user_id(holder_id)
            .await?
            .and_then(|player| player.active_skill);
        if current.as_ref() != Some(&expected) {
            txn.rollback().await?;
            return Ok(false);
        }

        let posted = ActiveSkill::Decoy(DecoySkill {
            spawn_ref: Some(message_id),
            ..decoy.clone()
        });
        player_repo
            .update_active_skill(holder_id, &posted, now)
            .await?;
        if !config_repo.set_pending_decoy(guild_id, true, now).await? {
            txn.rollback().await?;
            return Ok(false);
        }

        txn.commit().await?;

        Ok(true)
    }

    async fn retract(&self, channel_id: u64, message_id: u64) {
        if let Err(e) = self.channel.delete_marker(channel_id, message_id).await {
            tracing::error!(
                "Failed to retract unrecorded marker {} in channel {}: {}",
                message_id,
                channel_id,
                e
            );
        }
    }
}

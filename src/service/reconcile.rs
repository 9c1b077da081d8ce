//! Startup reconciliation of pending marker state.
//!
//! Markers can disappear while the bot is offline (deleted by a moderator, channel removed,
//! access revoked), leaving pending flags that would block the community forever.
//! `ReconcileService::sweep` clears such orphans once the gateway is ready. Only markers the
//! channel positively reports as missing are treated as orphaned; transient failures leave the
//! state untouched for the next run.

use chrono::{DateTime, Utc};
use dioxus_logger::tracing;
use sea_orm::DatabaseConnection;

use crate::{
    data::{reiatsu_config::ReiatsuConfigRepository, reiatsu_player::ReiatsuPlayerRepository},
    error::AppError,
    service::{channel::SpawnChannel, guild_lock::GuildLocks},
};

/// Number of orphans cleared by a sweep.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SweepReport {
    /// Pending real markers cleared.
    pub real_cleared: usize,
    /// Decoy payloads cleared.
    pub decoys_cleared: usize,
    /// Pending decoy flags cleared.
    pub pending_decoys_cleared: usize,
}

impl SweepReport {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Service clearing orphaned pending state.
pub struct ReconcileService<'a> {
    db: &'a DatabaseConnection,
    channel: &'a dyn SpawnChannel,
    locks: &'a GuildLocks,
}

impl<'a> ReconcileService<'a> {
    /// Creates a new ReconcileService instance.
    ///
    /// # Arguments
    /// - `db` - Database connection
    /// - `channel` - Channel queried for marker existence
    /// - `locks` - Per-community lock map shared with the other services
    ///
    /// # Returns
    /// - `ReconcileService` - New service instance
    pub fn new(
        db: &'a DatabaseConnection,
        channel: &'a dyn SpawnChannel,
        locks: &'a GuildLocks,
    ) -> Self {
        Self { db, channel, locks }
    }

    /// Clears orphaned pending state in every community.
    ///
    /// For each community, under its lock:
    /// - a pending real marker with no message reference, no channel, or a missing message is
    ///   cleared
    /// - each posted decoy scoped to the community whose marker is missing (or whose community
    ///   has no channel) is removed from its holder
    /// - a pending decoy flag with no posted decoy left is cleared
    ///
    /// Running it twice without activity in between changes nothing the second time.
    ///
    /// # Returns
    /// - `Ok(SweepReport)` - Counts of cleared orphans
    /// - `Err(AppError)` - Communities could not be listed
    pub async fn sweep(&self) -> Result<SweepReport, AppError> {
        let guild_ids: Vec<u64> = ReiatsuConfigRepository::new(self.db)
            .get_all()
            .await?
            .into_iter()
            .map(|config| config.guild_id)
            .collect();

        let mut report = SweepReport::default();
        for guild_id in guild_ids {
            if let Err(e) = self.reconcile_guild(guild_id, &mut report).await {
                tracing::error!("Reconciliation failed for guild {}: {}", guild_id, e);
            }
        }

        if report.is_empty() {
            tracing::info!("Reconciliation found no orphaned spawn state");
        } else {
            tracing::info!(
                "Reconciliation cleared {} pending Reiatsu, {} decoys, {} pending decoy flags",
                report.real_cleared,
                report.decoys_cleared,
                report.pending_decoys_cleared
            );
        }

        Ok(report)
    }

    async fn reconcile_guild(
        &self,
        guild_id: u64,
        report: &mut SweepReport,
    ) -> Result<(), AppError> {
        let _guard = self.locks.acquire(guild_id).await;
        let now = Utc::now();

        let config_repo = ReiatsuConfigRepository::new(self.db);
        let Some(config) = config_repo.get_by_guild_id(guild_id).await? else {
            return Ok(());
        };

        if config.pending_real {
            let orphaned = match (config.channel_id, config.spawn_message_id) {
                (Some(channel_id), Some(message_id)) => {
                    self.is_gone(channel_id, message_id).await == Some(true)
                }
                _ => true,
            };

            if orphaned && config_repo.clear_pending_real(guild_id, now).await? {
                tracing::info!("Cleared orphaned pending Reiatsu in guild {}", guild_id);
                report.real_cleared += 1;
            }
        }

        let posted_left = self
            .reconcile_decoys(guild_id, config.channel_id, now, report)
            .await?;

        if config.pending_decoy
            && !posted_left
            && config_repo.set_pending_decoy(guild_id, false, now).await?
        {
            tracing::info!("Cleared orphaned pending decoy in guild {}", guild_id);
            report.pending_decoys_cleared += 1;
        }

        Ok(())
    }

    /// Clears posted decoys of a community whose marker is gone.
    ///
    /// # Returns
    /// - `Ok(true)` - At least one posted decoy remains (or could not be checked)
    /// - `Ok(false)` - No posted decoy remains in the community
    async fn reconcile_decoys(
        &self,
        guild_id: u64,
        channel_id: Option<u64>,
        now: DateTime<Utc>,
        report: &mut SweepReport,
    ) -> Result<bool, AppError> {
        let player_repo = ReiatsuPlayerRepository::new(self.db);
        let decoys = player_repo.get_decoys().await?;

        let mut posted_left = false;
        for (holder_id, decoy) in decoys {
            if decoy.guild_id != guild_id {
                continue;
            }
            let Some(spawn_ref) = decoy.spawn_ref else {
                continue;
            };

            let gone = match channel_id {
                Some(channel_id) => match self.is_gone(channel_id, spawn_ref).await {
                    Some(gone) => gone,
                    None => {
                        posted_left = true;
                        continue;
                    }
                },
                None => true,
            };

            if !gone {
                posted_left = true;
            } else if player_repo.clear_active_skill(holder_id, now).await? {
                tracing::info!(
                    "Cleared orphaned decoy {} of user {} in guild {}",
                    spawn_ref,
                    decoy.owner_id,
                    guild_id
                );
                report.decoys_cleared += 1;
            }
        }

        Ok(posted_left)
    }

    /// Whether the channel reports a marker as gone, `None` if it could not tell.
    async fn is_gone(&self, channel_id: u64, message_id: u64) -> Option<bool> {
        match self.channel.marker_exists(channel_id, message_id).await {
            Ok(exists) => Some(!exists),
            Err(e) => {
                tracing::warn!(
                    "Could not check marker {} in channel {}, keeping its state: {}",
                    message_id,
                    channel_id,
                    e
                );
                None
            }
        }
    }
}

//! Claim arbitration.
//!
//! `CaptureService` turns a claim signal into at most one reward. Claims of a community are
//! serialized by its guild lock, and every resolution runs in one database transaction whose
//! pending flag is cleared by a conditional update. A resolution that finds the flag already
//! cleared pays nothing, so even claims racing through different processes sharing the store
//! produce a single winner.

use chrono::{DateTime, Utc};
use dioxus_logger::tracing;
use sea_orm::{DatabaseConnection, DatabaseTransaction, TransactionTrait};
use std::time::Duration;

use crate::{
    config::game::GameConfig,
    data::{reiatsu_config::ReiatsuConfigRepository, reiatsu_player::ReiatsuPlayerRepository},
    error::AppError,
    model::claim::{ClaimOutcome, ClaimSignal},
    service::{
        channel::SpawnChannel,
        gain::{compute_gain, GainDraws},
        guild_lock::GuildLocks,
    },
};

/// Service resolving claim signals against pending markers.
pub struct CaptureService<'a> {
    db: &'a DatabaseConnection,
    channel: &'a dyn SpawnChannel,
    config: &'a GameConfig,
    locks: &'a GuildLocks,
}

impl<'a> CaptureService<'a> {
    /// Creates a new CaptureService instance.
    ///
    /// # Arguments
    /// - `db` - Database connection
    /// - `channel` - Channel used to retire claimed markers
    /// - `config` - Reward and timeout constants
    /// - `locks` - Per-community lock map shared with the other services
    ///
    /// # Returns
    /// - `CaptureService` - New service instance
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

    /// Resolves a claim signal.
    ///
    /// Takes the community lock and resolves the claim within `claim_timeout`. A claimed decoy
    /// pays its owner; the pending real marker pays the claimant. Anything else is ignored.
    /// The claimed marker is deleted after the transaction commits; a failed deletion is only
    /// logged.
    ///
    /// # Arguments
    /// - `signal` - Community, channel, message and claimant of the claim
    ///
    /// # Returns
    /// - `Ok(ClaimOutcome::Captured)` - Claimant won the real marker
    /// - `Ok(ClaimOutcome::DecoyTriggered)` - A decoy was claimed and its owner paid
    /// - `Ok(ClaimOutcome::Ignored)` - Stale, duplicate or unrelated claim
    /// - `Err(AppError::Timeout)` - Resolution abandoned and rolled back
    /// - `Err(AppError)` - Store failure, nothing was changed
    pub async fn handle_claim(&self, signal: ClaimSignal) -> Result<ClaimOutcome, AppError> {
        let timeout = Duration::from_secs(self.config.claim_timeout);

        let outcome = tokio::time::timeout(timeout, async {
            let _guard = self.locks.acquire(signal.guild_id).await;
            self.resolve(&signal, Utc::now()).await
        })
        .await
        .map_err(|_| AppError::Timeout {
            guild_id: signal.guild_id,
        })??;

        match &outcome {
            ClaimOutcome::Captured {
                user_id,
                gain,
                is_rare,
                class,
            } => {
                tracing::info!(
                    "User {} captured Reiatsu {} in guild {}: +{} ({}{})",
                    user_id,
                    signal.message_id,
                    signal.guild_id,
                    gain,
                    class.as_str(),
                    if *is_rare { ", rare" } else { "" }
                );
                self.retire_marker(&signal).await;
            }
            ClaimOutcome::DecoyTriggered {
                owner_id,
                claimant_id,
                gain,
            } => {
                tracing::info!(
                    "User {} claimed decoy {} in guild {}, owner {} gains {}",
                    claimant_id,
                    signal.message_id,
                    signal.guild_id,
                    owner_id,
                    gain
                );
                self.retire_marker(&signal).await;
            }
            ClaimOutcome::Ignored => {
                tracing::debug!(
                    "Ignored claim of message {} by user {} in guild {}",
                    signal.message_id,
                    signal.user_id,
                    signal.guild_id
                );
            }
        }

        Ok(outcome)
    }

    /// Resolves a claim inside one transaction. Must be called with the community lock held.
    async fn resolve(
        &self,
        signal: &ClaimSignal,
        now: DateTime<Utc>,
    ) -> Result<ClaimOutcome, AppError> {
        let txn = self.db.begin().await?;

        let outcome = match self.resolve_decoy(&txn, signal, now).await? {
            Some(outcome) => outcome,
            None => self.resolve_real(&txn, signal, now).await?,
        };

        if outcome == ClaimOutcome::Ignored {
            txn.rollback().await?;
        } else {
            txn.commit().await?;
        }

        Ok(outcome)
    }

    /// Pays the owner of the decoy posted as `signal.message_id`, if there is one.
    ///
    /// # Returns
    /// - `Ok(Some(outcome))` - The message is a decoy marker
    /// - `Ok(None)` - The message is not a decoy marker
    async fn resolve_decoy(
        &self,
        txn: &DatabaseTransaction,
        signal: &ClaimSignal,
        now: DateTime<Utc>,
    ) -> Result<Option<ClaimOutcome>, AppError> {
        let player_repo = ReiatsuPlayerRepository::new(txn);
        let config_repo = ReiatsuConfigRepository::new(txn);

        let decoy = player_repo
            .get_decoys()
            .await?
            .into_iter()
            .find(|(_, decoy)| decoy.spawn_ref == Some(signal.message_id));
        let Some((holder_id, decoy)) = decoy else {
            return Ok(None);
        };

        if !player_repo.clear_active_skill(holder_id, now).await? {
            return Ok(Some(ClaimOutcome::Ignored));
        }

        let gain = self.config.decoy_gain;
        player_repo.get_or_create(decoy.owner_id, now).await?;
        player_repo.add_balance(decoy.owner_id, gain, now).await?;
        config_repo
            .set_pending_decoy(decoy.guild_id, false, now)
            .await?;

        Ok(Some(ClaimOutcome::DecoyTriggered {
            owner_id: decoy.owner_id,
            claimant_id: signal.user_id,
            gain,
        }))
    }

    /// Pays the claimant if `signal.message_id` is the pending real marker.
    async fn resolve_real(
        &self,
        txn: &DatabaseTransaction,
        signal: &ClaimSignal,
        now: DateTime<Utc>,
    ) -> Result<ClaimOutcome, AppError> {
        let player_repo = ReiatsuPlayerRepository::new(txn);
        let config_repo = ReiatsuConfigRepository::new(txn);

        let Some(config) = config_repo.get_by_guild_id(signal.guild_id).await? else {
            return Ok(ClaimOutcome::Ignored);
        };
        if !config.is_pending_real(signal.message_id) {
            return Ok(ClaimOutcome::Ignored);
        }

        let player = player_repo.get_or_create(signal.user_id, now).await?;

        let (draws, next_delay) = {
            let mut rng = rand::rng();
            let draws = GainDraws::roll(&mut rng, self.config);
            let next_delay = self.config.cadence(&config.spawn_speed).roll(&mut rng);
            (draws, next_delay)
        };
        let gain = compute_gain(player.class, player.streak, &draws, self.config);

        if !config_repo
            .resolve_real(signal.guild_id, signal.message_id, next_delay, now)
            .await?
        {
            return Ok(ClaimOutcome::Ignored);
        }

        player_repo
            .apply_capture(signal.user_id, gain.amount, gain.streak, now)
            .await?;

        Ok(ClaimOutcome::Captured {
            user_id: signal.user_id,
            gain: gain.amount,
            is_rare: gain.is_rare,
            class: player.class,
        })
    }

    async fn retire_marker(&self, signal: &ClaimSignal) {
        if let Err(e) = self
            .channel
            .delete_marker(signal.channel_id, signal.message_id)
            .await
        {
            tracing::warn!(
                "Failed to delete claimed marker {} in channel {}: {}",
                signal.message_id,
                signal.channel_id,
                e
            );
        }
    }
}

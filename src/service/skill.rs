//! Decoy skill activation.
//!
//! The Illusionist's skill stores a decoy payload on the player. The spawn tick posts it as a
//! marker indistinguishable from a real one at a glance, and whoever claims it pays the
//! Illusionist instead of themselves.

use chrono::{DateTime, Utc};
use dioxus_logger::tracing;
use sea_orm::DatabaseConnection;

use crate::{
    config::game::GameConfig,
    data::{reiatsu_config::ReiatsuConfigRepository, reiatsu_player::ReiatsuPlayerRepository},
    error::AppError,
    model::reiatsu_player::{ActiveSkill, DecoySkill, PlayerClass},
};

/// Service activating class skills.
pub struct SkillService<'a> {
    db: &'a DatabaseConnection,
    config: &'a GameConfig,
}

impl<'a> SkillService<'a> {
    /// Creates a new SkillService instance.
    ///
    /// # Arguments
    /// - `db` - Database connection
    /// - `config` - Decoy cooldown
    ///
    /// # Returns
    /// - `SkillService` - New service instance
    pub fn new(db: &'a DatabaseConnection, config: &'a GameConfig) -> Self {
        Self { db, config }
    }

    /// Activates the decoy skill of a player in a community.
    ///
    /// # Arguments
    /// - `user_id` - Discord user ID of the player
    /// - `guild_id` - Community the decoy will spawn in
    /// - `now` - Activation time
    ///
    /// # Returns
    /// - `Ok(DecoySkill)` - Stored payload, waiting to be posted
    /// - `Err(AppError::BadRequest)` - Not an Illusionist, skill on cooldown, another skill
    ///   active, or the community has no spawn channel
    /// - `Err(AppError)` - Database error
    pub async fn activate_decoy(
        &self,
        user_id: u64,
        guild_id: u64,
        now: DateTime<Utc>,
    ) -> Result<DecoySkill, AppError> {
        let configured = ReiatsuConfigRepository::new(self.db)
            .get_by_guild_id(guild_id)
            .await?
            .is_some_and(|config| config.channel_id.is_some());
        if !configured {
            return Err(AppError::BadRequest(
                "Reiatsu does not spawn in this server".to_string(),
            ));
        }

        let player_repo = ReiatsuPlayerRepository::new(self.db);
        let player = player_repo.get_or_create(user_id, now).await?;

        if player.class != PlayerClass::Illusionist {
            return Err(AppError::BadRequest(
                "Only Illusionists can create a decoy".to_string(),
            ));
        }
        if let Some(ready_at) = player.skill_ready_at(now) {
            return Err(AppError::BadRequest(format!(
                "Skill is recharging, ready in {} minutes",
                (ready_at - now).num_minutes() + 1
            )));
        }
        if player.has_skill_payload {
            return Err(AppError::BadRequest("Another skill is already active".to_string()));
        }

        let decoy = DecoySkill {
            owner_id: user_id,
            guild_id,
            spawn_ref: None,
            created_at: now,
        };

        // Refused if a payload appeared since the read above
        if !player_repo
            .activate_skill(
                user_id,
                &ActiveSkill::Decoy(decoy.clone()),
                self.config.decoy_cooldown,
                now,
            )
            .await?
        {
            return Err(AppError::BadRequest("Another skill is already active".to_string()));
        }

        tracing::info!("User {} activated a decoy in guild {}", user_id, guild_id);

        Ok(decoy)
    }
}

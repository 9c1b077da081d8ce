//! Player state repository.
//!
//! Provides `ReiatsuPlayerRepository` for balances, capture streaks, skill cooldowns and the
//! one-shot skill payload. Players are created lazily with default values on first
//! interaction.

use chrono::{DateTime, Utc};
use sea_orm::{
    sea_query::{Expr, OnConflict},
    ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QueryOrder,
};

use crate::{
    error::{internal::InternalError, AppError},
    model::reiatsu_player::{ActiveSkill, DecoySkill, PlayerClass, ReiatsuPlayer},
};

use entity::reiatsu_player::Column;

/// Repository providing database operations for player game state.
pub struct ReiatsuPlayerRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> ReiatsuPlayerRepository<'a, C> {
    /// Creates a new ReiatsuPlayerRepository instance.
    ///
    /// # Arguments
    /// - `db` - Database connection or open transaction
    ///
    /// # Returns
    /// - `ReiatsuPlayerRepository` - New repository instance
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Gets the state of a player.
    ///
    /// # Arguments
    /// - `user_id` - Discord user ID
    ///
    /// # Returns
    /// - `Ok(Some(ReiatsuPlayer))` - Player exists
    /// - `Ok(None)` - Player never interacted with the game
    /// - `Err(AppError::DbErr)` - Database error during query
    /// - `Err(AppError::InternalErr)` - Stored row holds a negative balance or streak
    pub async fn get_by_user_id(&self, user_id: u64) -> Result<Option<ReiatsuPlayer>, AppError> {
        let entity = entity::prelude::ReiatsuPlayer::find_by_id(user_id as i64)
            .one(self.db)
            .await?;

        entity
            .map(ReiatsuPlayer::from_entity)
            .transpose()
            .map_err(Into::into)
    }

    /// Gets the state of a player, creating it with default values if missing.
    ///
    /// Concurrent creation of the same player is tolerated: the insert is skipped on conflict
    /// and the existing row is returned.
    ///
    /// # Arguments
    /// - `user_id` - Discord user ID
    /// - `now` - Current time, used for timestamps of a new row
    ///
    /// # Returns
    /// - `Ok(ReiatsuPlayer)` - Existing or newly created player
    /// - `Err(AppError)` - Database error or invalid stored row
    pub async fn get_or_create(
        &self,
        user_id: u64,
        now: DateTime<Utc>,
    ) -> Result<ReiatsuPlayer, AppError> {
        if let Some(player) = self.get_by_user_id(user_id).await? {
            return Ok(player);
        }

        let model = entity::reiatsu_player::ActiveModel {
            user_id: ActiveValue::Set(user_id as i64),
            balance: ActiveValue::Set(0),
            class: ActiveValue::Set(PlayerClass::default().as_str().to_string()),
            streak: ActiveValue::Set(0),
            last_skill_at: ActiveValue::Set(None),
            skill_cooldown_secs: ActiveValue::Set(0),
            last_steal_at: ActiveValue::Set(None),
            active_skill: ActiveValue::Set(None),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
        };

        match entity::prelude::ReiatsuPlayer::insert(model)
            .on_conflict(OnConflict::column(Column::UserId).do_nothing().to_owned())
            .exec_without_returning(self.db)
            .await
        {
            Ok(_) | Err(DbErr::RecordNotInserted) => {}
            Err(e) => return Err(e.into()),
        }

        self.get_by_user_id(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Player {} not found", user_id)))
    }

    /// Credits a capture: adds the gain and stores the new streak value.
    ///
    /// # Arguments
    /// - `user_id` - Discord user ID of the winner
    /// - `gain` - Amount to add to the balance
    /// - `streak` - Streak value after this capture
    /// - `now` - Current time
    ///
    /// # Returns
    /// - `Ok(true)` - Player updated
    /// - `Ok(false)` - Player does not exist
    /// - `Err(AppError::InternalErr)` - `gain` does not fit a stored balance
    /// - `Err(AppError::DbErr)` - Database error during update
    pub async fn apply_capture(
        &self,
        user_id: u64,
        gain: u64,
        streak: u32,
        now: DateTime<Utc>,
    ) -> Result<bool, AppError> {
        let gain = stored_amount(user_id, gain)?;

        let result = entity::prelude::ReiatsuPlayer::update_many()
            .col_expr(Column::Balance, saturating_credit(gain))
            .col_expr(Column::Streak, Expr::value(streak as i32))
            .col_expr(Column::UpdatedAt, Expr::value(now))
            .filter(Column::UserId.eq(user_id as i64))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    /// Adds `amount` to the balance of a player, saturating at the largest storable balance.
    ///
    /// # Returns
    /// - `Ok(true)` - Player updated
    /// - `Ok(false)` - Player does not exist
    /// - `Err(AppError::InternalErr)` - `amount` does not fit a stored balance
    /// - `Err(AppError::DbErr)` - Database error during update
    pub async fn add_balance(
        &self,
        user_id: u64,
        amount: u64,
        now: DateTime<Utc>,
    ) -> Result<bool, AppError> {
        let amount = stored_amount(user_id, amount)?;

        let result = entity::prelude::ReiatsuPlayer::update_many()
            .col_expr(Column::Balance, saturating_credit(amount))
            .col_expr(Column::UpdatedAt, Expr::value(now))
            .filter(Column::UserId.eq(user_id as i64))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    /// Overwrites the balance of a player.
    ///
    /// Fails with `AppError::InternalErr` if `balance` does not fit a stored balance.
    pub async fn set_balance(
        &self,
        user_id: u64,
        balance: u64,
        now: DateTime<Utc>,
    ) -> Result<bool, AppError> {
        let balance = stored_amount(user_id, balance)?;

        let result = entity::prelude::ReiatsuPlayer::update_many()
            .col_expr(Column::Balance, Expr::value(balance))
            .col_expr(Column::UpdatedAt, Expr::value(now))
            .filter(Column::UserId.eq(user_id as i64))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    /// Overwrites the class of a player.
    pub async fn set_class(
        &self,
        user_id: u64,
        class: PlayerClass,
        now: DateTime<Utc>,
    ) -> Result<bool, DbErr> {
        let result = entity::prelude::ReiatsuPlayer::update_many()
            .col_expr(Column::Class, Expr::value(class.as_str()))
            .col_expr(Column::UpdatedAt, Expr::value(now))
            .filter(Column::UserId.eq(user_id as i64))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    /// Gets every recognized decoy payload together with the player holding it.
    ///
    /// Payloads of unknown kinds are skipped, never returned or modified.
    ///
    /// # Returns
    /// - `Ok(Vec<(u64, DecoySkill)>)` - Holder user ID and decoy, ordered by holder
    /// - `Err(AppError)` - Database error or invalid stored row
    pub async fn get_decoys(&self) -> Result<Vec<(u64, DecoySkill)>, AppError> {
        let entities = entity::prelude::ReiatsuPlayer::find()
            .filter(Column::ActiveSkill.is_not_null())
            .order_by_asc(Column::UserId)
            .all(self.db)
            .await?;

        let mut decoys = Vec::new();
        for entity in entities {
            let player = ReiatsuPlayer::from_entity(entity)?;
            if let Some(decoy) = player.active_skill.as_ref().and_then(ActiveSkill::as_decoy) {
                decoys.push((player.user_id, decoy.clone()));
            }
        }

        Ok(decoys)
    }

    /// Takes every posted decoy of a community back to its unposted state.
    ///
    /// Payloads stay with their holders with `spawn_ref` cleared, so the scheduler posts them
    /// again once the community has a spawn channel.
    ///
    /// # Arguments
    /// - `guild_id` - Discord guild ID of the community
    /// - `now` - Current time
    ///
    /// # Returns
    /// - `Ok(Vec<u64>)` - Message IDs of the withdrawn markers
    /// - `Err(AppError)` - Database or serialization error
    pub async fn withdraw_posted_decoys(
        &self,
        guild_id: u64,
        now: DateTime<Utc>,
    ) -> Result<Vec<u64>, AppError> {
        let mut withdrawn = Vec::new();
        for (holder_id, decoy) in self.get_decoys().await? {
            if decoy.guild_id != guild_id {
                continue;
            }
            let Some(spawn_ref) = decoy.spawn_ref else {
                continue;
            };

            let unposted = ActiveSkill::Decoy(DecoySkill {
                spawn_ref: None,
                ..decoy
            });
            if self.update_active_skill(holder_id, &unposted, now).await? {
                withdrawn.push(spawn_ref);
            }
        }

        Ok(withdrawn)
    }

    /// Stores a new skill payload and starts the skill cooldown.
    ///
    /// Only applies while the player holds no payload at all, so an active skill of any kind
    /// is never overwritten.
    ///
    /// # Arguments
    /// - `user_id` - Discord user ID
    /// - `skill` - Payload to store
    /// - `cooldown_secs` - Cooldown started at `now`
    /// - `now` - Current time
    ///
    /// # Returns
    /// - `Ok(true)` - Skill stored
    /// - `Ok(false)` - Player missing or already holding a payload
    /// - `Err(AppError)` - Database or serialization error
    pub async fn activate_skill(
        &self,
        user_id: u64,
        skill: &ActiveSkill,
        cooldown_secs: i64,
        now: DateTime<Utc>,
    ) -> Result<bool, AppError> {
        let payload = serde_json::to_string(skill)?;

        let result = entity::prelude::ReiatsuPlayer::update_many()
            .col_expr(Column::ActiveSkill, Expr::value(payload))
            .col_expr(Column::LastSkillAt, Expr::value(now))
            .col_expr(Column::SkillCooldownSecs, Expr::value(cooldown_secs))
            .col_expr(Column::UpdatedAt, Expr::value(now))
            .filter(Column::UserId.eq(user_id as i64))
            .filter(Column::ActiveSkill.is_null())
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    /// Replaces a player's skill payload, keeping cooldown markers untouched.
    ///
    /// Used by the scheduler to record the posted decoy marker in the payload.
    pub async fn update_active_skill(
        &self,
        user_id: u64,
        skill: &ActiveSkill,
        now: DateTime<Utc>,
    ) -> Result<bool, AppError> {
        let payload = serde_json::to_string(skill)?;

        let result = entity::prelude::ReiatsuPlayer::update_many()
            .col_expr(Column::ActiveSkill, Expr::value(payload))
            .col_expr(Column::UpdatedAt, Expr::value(now))
            .filter(Column::UserId.eq(user_id as i64))
            .filter(Column::ActiveSkill.is_not_null())
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    /// Clears the skill payload of a player.
    ///
    /// # Returns
    /// - `Ok(true)` - A payload was cleared by this call
    /// - `Ok(false)` - Player holds no payload
    /// - `Err(DbErr)` - Database error during update
    pub async fn clear_active_skill(
        &self,
        user_id: u64,
        now: DateTime<Utc>,
    ) -> Result<bool, DbErr> {
        let result = entity::prelude::ReiatsuPlayer::update_many()
            .col_expr(Column::ActiveSkill, Expr::value(Option::<String>::None))
            .col_expr(Column::UpdatedAt, Expr::value(now))
            .filter(Column::UserId.eq(user_id as i64))
            .filter(Column::ActiveSkill.is_not_null())
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }
}

/// Converts an amount to the stored balance type.
fn stored_amount(user_id: u64, amount: u64) -> Result<i64, InternalError> {
    i64::try_from(amount).map_err(|_| InternalError::BalanceOutOfRange { user_id, amount })
}

/// `balance + amount`, capped at `i64::MAX` instead of overflowing.
fn saturating_credit(amount: i64) -> Expr {
    Expr::cust_with_values(
        "CASE WHEN balance > ? THEN ? ELSE balance + ? END",
        [i64::MAX - amount, i64::MAX, amount],
    )
}

//! Reiatsu player factory for creating player state rows.

use crate::factory::helpers::next_id;
use chrono::{DateTime, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating test players with customizable fields.
///
/// # Example
///
/// ```rust,ignore
/// let player = ReiatsuPlayerFactory::new(&db)
///     .class("gambler")
///     .balance(120)
///     .build()
///     .await?;
/// ```
pub struct ReiatsuPlayerFactory<'a> {
    db: &'a DatabaseConnection,
    user_id: i64,
    balance: i64,
    class: String,
    streak: i32,
    last_skill_at: Option<DateTime<Utc>>,
    skill_cooldown_secs: i64,
    active_skill: Option<String>,
}

impl<'a> ReiatsuPlayerFactory<'a> {
    /// Creates a new factory with default values.
    ///
    /// Defaults:
    /// - user_id: unique auto-incremented id
    /// - balance 0, class `"worker"`, streak 0
    /// - no skill used, no active skill payload
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self {
            db,
            user_id: next_id() as i64,
            balance: 0,
            class: "worker".to_string(),
            streak: 0,
            last_skill_at: None,
            skill_cooldown_secs: 0,
            active_skill: None,
        }
    }

    pub fn user_id(mut self, user_id: u64) -> Self {
        self.user_id = user_id as i64;
        self
    }

    pub fn balance(mut self, balance: i64) -> Self {
        self.balance = balance;
        self
    }

    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.class = class.into();
        self
    }

    pub fn streak(mut self, streak: i32) -> Self {
        self.streak = streak;
        self
    }

    /// Sets the skill cooldown markers.
    pub fn last_skill(mut self, at: DateTime<Utc>, cooldown_secs: i64) -> Self {
        self.last_skill_at = Some(at);
        self.skill_cooldown_secs = cooldown_secs;
        self
    }

    /// Sets the raw active skill payload text.
    pub fn active_skill(mut self, payload: impl Into<String>) -> Self {
        self.active_skill = Some(payload.into());
        self
    }

    /// Builds and inserts the player row into the database.
    ///
    /// # Returns
    /// - `Ok(entity::reiatsu_player::Model)` - Created row
    /// - `Err(DbErr)` - Database error during insert
    pub async fn build(self) -> Result<entity::reiatsu_player::Model, DbErr> {
        let now = Utc::now();
        entity::reiatsu_player::ActiveModel {
            user_id: ActiveValue::Set(self.user_id),
            balance: ActiveValue::Set(self.balance),
            class: ActiveValue::Set(self.class),
            streak: ActiveValue::Set(self.streak),
            last_skill_at: ActiveValue::Set(self.last_skill_at),
            skill_cooldown_secs: ActiveValue::Set(self.skill_cooldown_secs),
            last_steal_at: ActiveValue::Set(None),
            active_skill: ActiveValue::Set(self.active_skill),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
        }
        .insert(self.db)
        .await
    }
}

/// Creates a player with default values.
///
/// Shorthand for `ReiatsuPlayerFactory::new(db).build().await`.
pub async fn create_player(
    db: &DatabaseConnection,
) -> Result<entity::reiatsu_player::Model, DbErr> {
    ReiatsuPlayerFactory::new(db).build().await
}

//! Spawn configuration repository.
//!
//! Provides `ReiatsuConfigRepository`, the store of per-community spawn configuration: the
//! channel markers go to, the cadence tier and the drawn delay, and the pending real/decoy
//! marker state.

use chrono::{DateTime, Utc};
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr,
    EntityTrait, QueryFilter, QueryOrder,
};

use crate::model::reiatsu_config::{ReiatsuConfig, UpsertReiatsuChannelParam};

use entity::reiatsu_config::Column;

/// Repository providing database operations for community spawn configuration.
pub struct ReiatsuConfigRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> ReiatsuConfigRepository<'a, C> {
    /// Creates a new ReiatsuConfigRepository instance.
    ///
    /// # Arguments
    /// - `db` - Database connection or open transaction
    ///
    /// # Returns
    /// - `ReiatsuConfigRepository` - New repository instance
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Gets the spawn configuration of a community.
    ///
    /// # Arguments
    /// - `guild_id` - Discord guild ID
    ///
    /// # Returns
    /// - `Ok(Some(ReiatsuConfig))` - Community is configured
    /// - `Ok(None)` - No configuration exists
    /// - `Err(DbErr)` - Database error during query
    pub async fn get_by_guild_id(&self, guild_id: u64) -> Result<Option<ReiatsuConfig>, DbErr> {
        let entity = entity::prelude::ReiatsuConfig::find_by_id(guild_id as i64)
            .one(self.db)
            .await?;

        Ok(entity.map(ReiatsuConfig::from_entity))
    }

    /// Gets every stored configuration, ordered by guild ID.
    pub async fn get_all(&self) -> Result<Vec<ReiatsuConfig>, DbErr> {
        let entities = entity::prelude::ReiatsuConfig::find()
            .order_by_asc(Column::GuildId)
            .all(self.db)
            .await?;

        Ok(entities.into_iter().map(ReiatsuConfig::from_entity).collect())
    }

    /// Gets configurations that have a spawn channel, ordered by guild ID.
    pub async fn get_configured(&self) -> Result<Vec<ReiatsuConfig>, DbErr> {
        let entities = entity::prelude::ReiatsuConfig::find()
            .filter(Column::ChannelId.is_not_null())
            .order_by_asc(Column::GuildId)
            .all(self.db)
            .await?;

        Ok(entities.into_iter().map(ReiatsuConfig::from_entity).collect())
    }

    /// Creates or resets the spawn configuration of a community.
    ///
    /// Sets the channel, tier and delay, restarts the cadence at `now` and clears any pending
    /// marker state. `created_at` is preserved on update.
    ///
    /// # Arguments
    /// - `param` - Channel, tier and delay to store
    /// - `now` - Current time
    ///
    /// # Returns
    /// - `Ok(ReiatsuConfig)` - The created or updated configuration
    /// - `Err(DbErr)` - Database error during upsert
    pub async fn upsert_channel(
        &self,
        param: UpsertReiatsuChannelParam,
        now: DateTime<Utc>,
    ) -> Result<ReiatsuConfig, DbErr> {
        let existing = entity::prelude::ReiatsuConfig::find_by_id(param.guild_id as i64)
            .one(self.db)
            .await?;

        let model = entity::reiatsu_config::ActiveModel {
            guild_id: ActiveValue::Set(param.guild_id as i64),
            channel_id: ActiveValue::Set(Some(param.channel_id as i64)),
            spawn_speed: ActiveValue::Set(param.spawn_speed),
            spawn_delay: ActiveValue::Set(param.spawn_delay),
            last_spawn_at: ActiveValue::Set(Some(now)),
            pending_real: ActiveValue::Set(false),
            spawn_message_id: ActiveValue::Set(None),
            pending_decoy: ActiveValue::Set(false),
            created_at: ActiveValue::Set(existing.as_ref().map_or(now, |e| e.created_at)),
            updated_at: ActiveValue::Set(now),
        };

        let entity = if existing.is_some() {
            model.update(self.db).await?
        } else {
            model.insert(self.db).await?
        };

        Ok(ReiatsuConfig::from_entity(entity))
    }

    /// Removes the spawn channel of a community and clears its pending marker state.
    ///
    /// # Returns
    /// - `Ok(true)` - Configuration updated
    /// - `Ok(false)` - Community has no configuration
    /// - `Err(DbErr)` - Database error during update
    pub async fn unset_channel(&self, guild_id: u64, now: DateTime<Utc>) -> Result<bool, DbErr> {
        let result = entity::prelude::ReiatsuConfig::update_many()
            .col_expr(Column::ChannelId, Expr::value(Option::<i64>::None))
            .col_expr(Column::PendingReal, Expr::value(false))
            .col_expr(Column::SpawnMessageId, Expr::value(Option::<i64>::None))
            .col_expr(Column::PendingDecoy, Expr::value(false))
            .col_expr(Column::UpdatedAt, Expr::value(now))
            .filter(Column::GuildId.eq(guild_id as i64))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    /// Changes the cadence tier and stores a delay drawn from it.
    ///
    /// # Returns
    /// - `Ok(true)` - Configuration updated
    /// - `Ok(false)` - Community has no configuration
    /// - `Err(DbErr)` - Database error during update
    pub async fn update_spawn_speed(
        &self,
        guild_id: u64,
        spawn_speed: &str,
        spawn_delay: i64,
        now: DateTime<Utc>,
    ) -> Result<bool, DbErr> {
        let result = entity::prelude::ReiatsuConfig::update_many()
            .col_expr(Column::SpawnSpeed, Expr::value(spawn_speed))
            .col_expr(Column::SpawnDelay, Expr::value(spawn_delay))
            .col_expr(Column::UpdatedAt, Expr::value(now))
            .filter(Column::GuildId.eq(guild_id as i64))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    /// Replaces the stored spawn delay.
    pub async fn update_spawn_delay(
        &self,
        guild_id: u64,
        spawn_delay: i64,
        now: DateTime<Utc>,
    ) -> Result<bool, DbErr> {
        let result = entity::prelude::ReiatsuConfig::update_many()
            .col_expr(Column::SpawnDelay, Expr::value(spawn_delay))
            .col_expr(Column::UpdatedAt, Expr::value(now))
            .filter(Column::GuildId.eq(guild_id as i64))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    /// Records a freshly posted real marker.
    ///
    /// Only applies while no real marker is pending, so a second emission can never replace
    /// the first one.
    ///
    /// # Arguments
    /// - `guild_id` - Discord guild ID
    /// - `message_id` - Message ID of the posted marker
    /// - `now` - Emission time, stored as the last spawn
    ///
    /// # Returns
    /// - `Ok(true)` - Marker recorded
    /// - `Ok(false)` - A real marker was already pending (or no configuration exists)
    /// - `Err(DbErr)` - Database error during update
    pub async fn mark_real_spawned(
        &self,
        guild_id: u64,
        message_id: u64,
        now: DateTime<Utc>,
    ) -> Result<bool, DbErr> {
        let result = entity::prelude::ReiatsuConfig::update_many()
            .col_expr(Column::PendingReal, Expr::value(true))
            .col_expr(Column::SpawnMessageId, Expr::value(message_id as i64))
            .col_expr(Column::LastSpawnAt, Expr::value(now))
            .col_expr(Column::UpdatedAt, Expr::value(now))
            .filter(Column::GuildId.eq(guild_id as i64))
            .filter(Column::PendingReal.eq(false))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    /// Resolves the pending real marker and stores the next spawn delay.
    ///
    /// Only applies while `message_id` is the pending marker; the caller that gets `true`
    /// is the single winner of that marker.
    ///
    /// # Arguments
    /// - `guild_id` - Discord guild ID
    /// - `message_id` - Message ID of the claimed marker
    /// - `next_delay` - Delay drawn for the next cycle
    ///
    /// # Returns
    /// - `Ok(true)` - Marker resolved by this call
    /// - `Ok(false)` - Marker not pending (already resolved or unrelated)
    /// - `Err(DbErr)` - Database error during update
    pub async fn resolve_real(
        &self,
        guild_id: u64,
        message_id: u64,
        next_delay: i64,
        now: DateTime<Utc>,
    ) -> Result<bool, DbErr> {
        let result = entity::prelude::ReiatsuConfig::update_many()
            .col_expr(Column::PendingReal, Expr::value(false))
            .col_expr(Column::SpawnMessageId, Expr::value(Option::<i64>::None))
            .col_expr(Column::SpawnDelay, Expr::value(next_delay))
            .col_expr(Column::UpdatedAt, Expr::value(now))
            .filter(Column::GuildId.eq(guild_id as i64))
            .filter(Column::PendingReal.eq(true))
            .filter(Column::SpawnMessageId.eq(message_id as i64))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    /// Clears the pending real marker without touching the delay.
    ///
    /// # Returns
    /// - `Ok(true)` - A pending marker was cleared
    /// - `Ok(false)` - Nothing was pending
    /// - `Err(DbErr)` - Database error during update
    pub async fn clear_pending_real(
        &self,
        guild_id: u64,
        now: DateTime<Utc>,
    ) -> Result<bool, DbErr> {
        let result = entity::prelude::ReiatsuConfig::update_many()
            .col_expr(Column::PendingReal, Expr::value(false))
            .col_expr(Column::SpawnMessageId, Expr::value(Option::<i64>::None))
            .col_expr(Column::UpdatedAt, Expr::value(now))
            .filter(Column::GuildId.eq(guild_id as i64))
            .filter(Column::PendingReal.eq(true))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    /// Sets or clears the pending decoy flag.
    ///
    /// # Returns
    /// - `Ok(true)` - Flag changed by this call
    /// - `Ok(false)` - Flag already had the requested value (or no configuration exists)
    /// - `Err(DbErr)` - Database error during update
    pub async fn set_pending_decoy(
        &self,
        guild_id: u64,
        pending: bool,
        now: DateTime<Utc>,
    ) -> Result<bool, DbErr> {
        let result = entity::prelude::ReiatsuConfig::update_many()
            .col_expr(Column::PendingDecoy, Expr::value(pending))
            .col_expr(Column::UpdatedAt, Expr::value(now))
            .filter(Column::GuildId.eq(guild_id as i64))
            .filter(Column::PendingDecoy.eq(!pending))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }
}

//! Domain models for per-community spawn configuration.

use chrono::{DateTime, Utc};

/// Spawn configuration of a single community.
///
/// At most one real marker (`pending_real` + `spawn_message_id`) and one decoy marker
/// (`pending_decoy`) are outstanding at a time.
#[derive(Debug, Clone, PartialEq)]
pub struct ReiatsuConfig {
    /// Discord guild ID of the community.
    pub guild_id: u64,
    /// Channel markers are posted to, `None` while unconfigured.
    pub channel_id: Option<u64>,
    /// Name of the cadence tier the spawn delay is drawn from.
    pub spawn_speed: String,
    /// Seconds between the last spawn and the next one.
    pub spawn_delay: i64,
    /// When the last real marker was posted.
    pub last_spawn_at: Option<DateTime<Utc>>,
    /// A real marker is posted and not yet claimed.
    pub pending_real: bool,
    /// Message ID of the pending real marker.
    pub spawn_message_id: Option<u64>,
    /// A decoy marker is posted and not yet claimed.
    pub pending_decoy: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ReiatsuConfig {
    /// Converts an entity model to a domain model at the repository boundary.
    ///
    /// # Arguments
    /// - `entity` - The entity model from the database
    ///
    /// # Returns
    /// - `ReiatsuConfig` - The converted domain model
    pub fn from_entity(entity: entity::reiatsu_config::Model) -> Self {
        Self {
            guild_id: entity.guild_id as u64,
            channel_id: entity.channel_id.map(|id| id as u64),
            spawn_speed: entity.spawn_speed,
            spawn_delay: entity.spawn_delay,
            last_spawn_at: entity.last_spawn_at,
            pending_real: entity.pending_real,
            spawn_message_id: entity.spawn_message_id.map(|id| id as u64),
            pending_decoy: entity.pending_decoy,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }

    /// Whether a new real marker should be posted at `now`.
    ///
    /// A community that never spawned is due immediately. A pending real marker always
    /// blocks the next one.
    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        if self.pending_real {
            return false;
        }

        match self.last_spawn_at {
            Some(last) => (now - last).num_seconds() >= self.spawn_delay,
            None => true,
        }
    }

    /// Whether `message_id` is the pending real marker of this community.
    pub fn is_pending_real(&self, message_id: u64) -> bool {
        self.pending_real && self.spawn_message_id == Some(message_id)
    }
}

/// Parameters for (re)configuring the spawn channel of a community.
///
/// Creates the config if none exists, otherwise resets it: pending state is cleared and the
/// cadence restarts from `now`.
#[derive(Debug, Clone)]
pub struct UpsertReiatsuChannelParam {
    pub guild_id: u64,
    pub channel_id: u64,
    pub spawn_speed: String,
    pub spawn_delay: i64,
}

//! Domain models for player game state.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::error::internal::InternalError;

/// Passive reward modifier applied to normal (non-rare) captures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Passive {
    /// Reward unchanged.
    None,
    /// Fixed add-on on every normal capture.
    FlatBonus,
    /// Either nothing or a random amount; ignores the streak.
    Gamble,
    /// Counts consecutive normal captures and pays a bonus on completion.
    Streak,
}

/// Player class, chosen outside this engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlayerClass {
    /// Default class of new players.
    #[default]
    Worker,
    Absorber,
    Gambler,
    Illusionist,
    Thief,
}

impl PlayerClass {
    /// Name stored in the `class` column.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Worker => "worker",
            Self::Absorber => "absorber",
            Self::Gambler => "gambler",
            Self::Illusionist => "illusionist",
            Self::Thief => "thief",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "worker" => Some(Self::Worker),
            "absorber" => Some(Self::Absorber),
            "gambler" => Some(Self::Gambler),
            "illusionist" => Some(Self::Illusionist),
            "thief" => Some(Self::Thief),
            _ => None,
        }
    }

    pub fn passive(&self) -> Passive {
        match self {
            Self::Worker => Passive::Streak,
            Self::Absorber => Passive::FlatBonus,
            Self::Gambler => Passive::Gamble,
            Self::Illusionist | Self::Thief => Passive::None,
        }
    }
}

/// Decoy skill payload.
///
/// Created without `spawn_ref` by the skill activation; the scheduler fills `spawn_ref` once
/// the decoy marker is posted in `guild_id`'s spawn channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecoySkill {
    pub owner_id: u64,
    pub guild_id: u64,
    pub spawn_ref: Option<u64>,
    pub created_at: DateTime<Utc>,
}

/// One-shot skill state attached to a player, stored as tagged JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ActiveSkill {
    Decoy(DecoySkill),
}

impl ActiveSkill {
    /// Parses a stored payload. Kinds this engine does not know are treated as absent.
    pub fn parse(raw: &str) -> Option<Self> {
        serde_json::from_str(raw).ok()
    }

    pub fn as_decoy(&self) -> Option<&DecoySkill> {
        match self {
            Self::Decoy(decoy) => Some(decoy),
        }
    }
}

/// Game state of a single player.
#[derive(Debug, Clone, PartialEq)]
pub struct ReiatsuPlayer {
    /// Discord user ID.
    pub user_id: u64,
    pub balance: u64,
    pub class: PlayerClass,
    /// Consecutive normal captures since the last rare capture or streak bonus.
    pub streak: u32,
    pub last_skill_at: Option<DateTime<Utc>>,
    pub skill_cooldown_secs: i64,
    pub last_steal_at: Option<DateTime<Utc>>,
    /// Recognized skill payload.
    pub active_skill: Option<ActiveSkill>,
    /// A payload is stored, whether or not this engine recognizes it.
    pub has_skill_payload: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ReiatsuPlayer {
    /// Converts an entity model to a domain model at the repository boundary.
    ///
    /// Unknown class names fall back to the default class.
    ///
    /// # Arguments
    /// - `entity` - The entity model from the database
    ///
    /// # Returns
    /// - `Ok(ReiatsuPlayer)` - The converted domain model
    /// - `Err(InternalError)` - Stored balance or streak is negative
    pub fn from_entity(entity: entity::reiatsu_player::Model) -> Result<Self, InternalError> {
        let user_id = entity.user_id as u64;
        let balance = u64::try_from(entity.balance).map_err(|_| InternalError::NegativeBalance {
            user_id,
            balance: entity.balance,
        })?;
        let streak = u32::try_from(entity.streak).map_err(|_| InternalError::NegativeStreak {
            user_id,
            streak: entity.streak,
        })?;

        Ok(Self {
            user_id,
            balance,
            class: PlayerClass::from_name(&entity.class).unwrap_or_default(),
            streak,
            last_skill_at: entity.last_skill_at,
            skill_cooldown_secs: entity.skill_cooldown_secs,
            last_steal_at: entity.last_steal_at,
            active_skill: entity.active_skill.as_deref().and_then(ActiveSkill::parse),
            has_skill_payload: entity.active_skill.is_some(),
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        })
    }

    /// State of a player who never interacted with the game.
    pub fn new_default(user_id: u64, now: DateTime<Utc>) -> Self {
        Self {
            user_id,
            balance: 0,
            class: PlayerClass::default(),
            streak: 0,
            last_skill_at: None,
            skill_cooldown_secs: 0,
            last_steal_at: None,
            active_skill: None,
            has_skill_payload: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// When the class skill can be used again, `None` if it is ready.
    pub fn skill_ready_at(&self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        let ready_at = self.last_skill_at? + Duration::seconds(self.skill_cooldown_secs);
        (now < ready_at).then_some(ready_at)
    }
}

//! Game tuning constants loaded from JSON.
//!
//! The file is read once at startup. Every field is optional; a missing file, a file that
//! fails to parse, or an individual out-of-range value falls back to the defaults documented
//! on [`GameConfig::default`]. Loading never fails.
//!
//! ```json
//! {
//!   "spawn_loop_interval": 60,
//!   "rare_chance": 0.01,
//!   "spawn_speed_ranges": { "fast": [600, 1200], "normal": [1800, 3600] },
//!   "default_spawn_speed": "normal",
//!   "classes": { "streak_threshold": 5 }
//! }
//! ```

use std::{collections::BTreeMap, path::Path};

use dioxus_logger::tracing;
use rand::Rng;
use serde::Deserialize;

pub const DEFAULT_CONFIG_PATH: &str = "data/reiatsu_config.json";

/// Tier used when a community's stored tier is unknown.
pub const DEFAULT_SPAWN_SPEED: &str = "normal";

/// Largest reward constant, the largest storable balance.
pub const MAX_REWARD: u64 = i64::MAX as u64;

/// Range backing [`DEFAULT_SPAWN_SPEED`] when the file does not define it.
const FALLBACK_RANGE: CadenceRange = CadenceRange {
    min: 1800,
    max: 3600,
};

/// Inclusive `[min, max]` range of seconds a spawn delay is drawn from.
///
/// Written as a two element array in the JSON file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(from = "(i64, i64)")]
pub struct CadenceRange {
    pub min: i64,
    pub max: i64,
}

impl From<(i64, i64)> for CadenceRange {
    fn from((min, max): (i64, i64)) -> Self {
        Self { min, max }
    }
}

impl CadenceRange {
    pub fn contains(&self, delay: i64) -> bool {
        (self.min..=self.max).contains(&delay)
    }

    /// Draws a delay uniformly within the range.
    pub fn roll<R: Rng + ?Sized>(&self, rng: &mut R) -> i64 {
        rng.random_range(self.min..=self.max)
    }

    fn is_valid(&self) -> bool {
        self.min >= 0 && self.min <= self.max
    }
}

/// Constants of the per-class passive reward modifiers.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ClassConfig {
    /// Added to every normal capture of the flat-bonus class.
    pub flat_bonus: u64,
    /// Probability that a gamble-class capture pays nothing.
    pub gamble_loss_chance: f64,
    /// Inclusive bounds of a winning gamble-class capture.
    pub gamble_min: u64,
    pub gamble_max: u64,
    /// Number of consecutive normal captures that triggers the streak bonus.
    pub streak_threshold: u32,
    /// Reward paid instead of the normal gain when the streak completes.
    pub streak_bonus: u64,
}

impl Default for ClassConfig {
    fn default() -> Self {
        Self {
            flat_bonus: 5,
            gamble_loss_chance: 0.5,
            gamble_min: 5,
            gamble_max: 12,
            streak_threshold: 5,
            streak_bonus: 6,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Seconds between two spawn ticks.
    pub spawn_loop_interval: u64,
    /// Upper bound in seconds of a lock-protected claim resolution.
    pub claim_timeout: u64,
    /// Probability that a capture is rare.
    pub rare_chance: f64,
    pub rare_gain: u64,
    pub normal_gain: u64,
    /// Paid to the owner of a claimed decoy.
    pub decoy_gain: u64,
    /// Cooldown in seconds applied after activating the decoy skill.
    pub decoy_cooldown: i64,
    pub spawn_speed_ranges: BTreeMap<String, CadenceRange>,
    pub default_spawn_speed: String,
    pub classes: ClassConfig,
}

impl Default for GameConfig {
    /// Documented defaults:
    ///
    /// | key | value |
    /// |-----|-------|
    /// | `spawn_loop_interval` | 60 |
    /// | `claim_timeout` | 10 |
    /// | `rare_chance` | 0.01 |
    /// | `rare_gain` | 100 |
    /// | `normal_gain` | 1 |
    /// | `decoy_gain` | 10 |
    /// | `decoy_cooldown` | 28800 (8 h) |
    /// | `spawn_speed_ranges` | ultra_fast 60-300, fast 600-1200, normal 1800-3600, slow 7200-10800 |
    /// | `default_spawn_speed` | normal |
    fn default() -> Self {
        Self {
            spawn_loop_interval: 60,
            claim_timeout: 10,
            rare_chance: 0.01,
            rare_gain: 100,
            normal_gain: 1,
            decoy_gain: 10,
            decoy_cooldown: 8 * 3600,
            spawn_speed_ranges: default_ranges(),
            default_spawn_speed: DEFAULT_SPAWN_SPEED.to_string(),
            classes: ClassConfig::default(),
        }
    }
}

fn default_ranges() -> BTreeMap<String, CadenceRange> {
    BTreeMap::from([
        ("ultra_fast".to_string(), CadenceRange { min: 60, max: 300 }),
        ("fast".to_string(), CadenceRange { min: 600, max: 1200 }),
        (DEFAULT_SPAWN_SPEED.to_string(), FALLBACK_RANGE),
        ("slow".to_string(), CadenceRange { min: 7200, max: 10800 }),
    ])
}

impl GameConfig {
    /// Loads the game configuration from a JSON file.
    ///
    /// # Arguments
    /// - `path` - Location of the JSON file
    ///
    /// # Returns
    /// - `GameConfig` - Parsed and sanitized configuration, defaults on any failure
    pub fn load(path: &Path) -> Self {
        let raw = match std::fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!(
                    "No game config at {}, using defaults",
                    path.display()
                );
                return Self::default();
            }
            Err(e) => {
                tracing::warn!(
                    "Failed to read game config {}: {}, using defaults",
                    path.display(),
                    e
                );
                return Self::default();
            }
        };

        Self::from_json(&raw)
    }

    /// Parses and sanitizes a JSON document, falling back to defaults if it is malformed.
    pub fn from_json(raw: &str) -> Self {
        match serde_json::from_str::<GameConfig>(raw) {
            Ok(config) => config.sanitized(),
            Err(e) => {
                tracing::warn!("Malformed game config: {}, using defaults", e);
                Self::default()
            }
        }
    }

    /// Replaces every out-of-range value with its default.
    fn sanitized(mut self) -> Self {
        let defaults = Self::default();

        if self.spawn_loop_interval == 0 {
            tracing::warn!("spawn_loop_interval must be positive, using default");
            self.spawn_loop_interval = defaults.spawn_loop_interval;
        }
        if self.claim_timeout == 0 {
            tracing::warn!("claim_timeout must be positive, using default");
            self.claim_timeout = defaults.claim_timeout;
        }
        if !is_probability(self.rare_chance) {
            tracing::warn!("rare_chance {} is not a probability, using default", self.rare_chance);
            self.rare_chance = defaults.rare_chance;
        }
        if self.decoy_cooldown < 0 {
            tracing::warn!("decoy_cooldown must not be negative, using default");
            self.decoy_cooldown = defaults.decoy_cooldown;
        }

        let class_defaults = ClassConfig::default();
        for (name, value, default) in [
            ("normal_gain", &mut self.normal_gain, defaults.normal_gain),
            ("rare_gain", &mut self.rare_gain, defaults.rare_gain),
            ("decoy_gain", &mut self.decoy_gain, defaults.decoy_gain),
            ("flat_bonus", &mut self.classes.flat_bonus, class_defaults.flat_bonus),
            ("streak_bonus", &mut self.classes.streak_bonus, class_defaults.streak_bonus),
        ] {
            if *value > MAX_REWARD {
                tracing::warn!("{} {} exceeds {}, using default", name, value, MAX_REWARD);
                *value = default;
            }
        }
        if self.classes.gamble_max > MAX_REWARD {
            tracing::warn!("gamble_max exceeds {}, using default bounds", MAX_REWARD);
            self.classes.gamble_min = class_defaults.gamble_min;
            self.classes.gamble_max = class_defaults.gamble_max;
        }
        if !is_probability(self.classes.gamble_loss_chance) {
            tracing::warn!("gamble_loss_chance is not a probability, using default");
            self.classes.gamble_loss_chance = class_defaults.gamble_loss_chance;
        }
        if self.classes.gamble_min > self.classes.gamble_max {
            tracing::warn!("gamble_min exceeds gamble_max, using default bounds");
            self.classes.gamble_min = class_defaults.gamble_min;
            self.classes.gamble_max = class_defaults.gamble_max;
        }
        if self.classes.streak_threshold == 0 {
            tracing::warn!("streak_threshold must be positive, using default");
            self.classes.streak_threshold = class_defaults.streak_threshold;
        }

        self.spawn_speed_ranges.retain(|name, range| {
            let valid = range.is_valid();
            if !valid {
                tracing::warn!(
                    "Dropping invalid spawn speed '{}' [{}, {}]",
                    name,
                    range.min,
                    range.max
                );
            }
            valid
        });
        if self.spawn_speed_ranges.is_empty() {
            tracing::warn!("No valid spawn speed ranges, using defaults");
            self.spawn_speed_ranges = defaults.spawn_speed_ranges;
        }
        if !self.spawn_speed_ranges.contains_key(&self.default_spawn_speed) {
            tracing::warn!(
                "Default spawn speed '{}' is not defined, falling back to '{}'",
                self.default_spawn_speed,
                DEFAULT_SPAWN_SPEED
            );
            self.default_spawn_speed = DEFAULT_SPAWN_SPEED.to_string();
            self.spawn_speed_ranges
                .entry(DEFAULT_SPAWN_SPEED.to_string())
                .or_insert(FALLBACK_RANGE);
        }

        self
    }

    pub fn has_tier(&self, tier: &str) -> bool {
        self.spawn_speed_ranges.contains_key(tier)
    }

    /// Resolves a tier name to its delay range, using the default tier for unknown names.
    pub fn cadence(&self, tier: &str) -> CadenceRange {
        self.spawn_speed_ranges
            .get(tier)
            .or_else(|| self.spawn_speed_ranges.get(&self.default_spawn_speed))
            .copied()
            .unwrap_or(FALLBACK_RANGE)
    }
}

fn is_probability(value: f64) -> bool {
    (0.0..=1.0).contains(&value)
}

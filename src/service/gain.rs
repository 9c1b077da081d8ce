//! Reward computation for real marker captures.
//!
//! The computation is split in two: [`GainDraws::roll`] consumes randomness and
//! [`compute_gain`] deterministically turns the draws into a reward, so the class passives can
//! be tested without a random source.

use rand::Rng;

use crate::{
    config::game::{GameConfig, MAX_REWARD},
    model::reiatsu_player::{Passive, PlayerClass},
};

/// Random values consumed by one gain computation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GainDraws {
    /// Uniform in `[0, 1)`, compared against `rare_chance`.
    pub rare_roll: f64,
    /// Uniform in `[0, 1)`, compared against `gamble_loss_chance`.
    pub gamble_roll: f64,
    /// Uniform in `[gamble_min, gamble_max]`.
    pub gamble_amount: u64,
}

impl GainDraws {
    /// Draws every value a gain computation may need.
    pub fn roll<R: Rng + ?Sized>(rng: &mut R, config: &GameConfig) -> Self {
        let classes = &config.classes;

        Self {
            rare_roll: rng.random::<f64>(),
            gamble_roll: rng.random::<f64>(),
            gamble_amount: rng.random_range(classes.gamble_min..=classes.gamble_max),
        }
    }
}

/// Reward of a capture and the player's streak after it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Gain {
    pub amount: u64,
    pub is_rare: bool,
    pub streak: u32,
}

/// Computes the reward of a capture.
///
/// A rare capture pays `rare_gain` and resets the streak whatever the class. Otherwise the
/// class passive decides:
/// - `FlatBonus` adds `flat_bonus` to `normal_gain`
/// - `Gamble` pays nothing or `gamble_amount`, leaving the streak untouched
/// - `Streak` counts the capture and pays `streak_bonus` instead of `normal_gain` every
///   `streak_threshold` captures, resetting the streak
///
/// # Arguments
/// - `class` - Class of the claimant
/// - `streak` - Streak of the claimant before this capture
/// - `draws` - Random values for this capture
/// - `config` - Reward constants
///
/// # Returns
/// - `Gain` - Amount to credit, rarity, and the streak to store
pub fn compute_gain(
    class: PlayerClass,
    streak: u32,
    draws: &GainDraws,
    config: &GameConfig,
) -> Gain {
    if draws.rare_roll < config.rare_chance {
        return Gain {
            amount: config.rare_gain,
            is_rare: true,
            streak: 0,
        };
    }

    let classes = &config.classes;
    let base = config.normal_gain;

    let (amount, streak) = match class.passive() {
        Passive::None => (base, streak),
        Passive::FlatBonus => (base.saturating_add(classes.flat_bonus).min(MAX_REWARD), streak),
        Passive::Gamble => {
            if draws.gamble_roll < classes.gamble_loss_chance {
                (0, streak)
            } else {
                (draws.gamble_amount, streak)
            }
        }
        Passive::Streak => {
            let next = streak.saturating_add(1);
            if next >= classes.streak_threshold {
                (classes.streak_bonus, 0)
            } else {
                (base, next)
            }
        }
    };

    Gain {
        amount,
        is_rare: false,
        streak,
    }
}

//! Domain models and parameter types.
//!
//! Domain models are converted from entity models at the repository boundary so services never
//! handle raw rows: Discord snowflakes become `u64`, the class column becomes [`PlayerClass`]
//! and the skill payload column becomes a typed [`ActiveSkill`].
//!
//! [`PlayerClass`]: reiatsu_player::PlayerClass
//! [`ActiveSkill`]: reiatsu_player::ActiveSkill

pub mod claim;
pub mod reiatsu_config;
pub mod reiatsu_player;

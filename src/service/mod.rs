//! Business logic of the spawn-and-capture engine.
//!
//! Services coordinate the repositories with the messaging channel:
//! - `spawn` - Periodic emission of real and decoy markers
//! - `capture` - Claim arbitration with at-most-one winner per marker
//! - `reconcile` - Startup sweep clearing orphaned pending state
//! - `admin` - Community configuration and player overrides
//! - `skill` - Decoy skill activation
//!
//! `gain` holds the pure reward computation, `channel` the messaging abstraction and its Discord
//! implementation, and `guild_lock` the per-community lock map shared by everything that
//! mutates a community's spawn state.

pub mod admin;
pub mod capture;
pub mod channel;
pub mod gain;
pub mod guild_lock;
pub mod reconcile;
pub mod skill;
pub mod spawn;

#[cfg(test)]
mod test;

//! Reiatsu spawn-and-capture engine.
//!
//! Periodically posts a claimable Reiatsu marker in each configured Discord community, lets
//! exactly one member capture it through a 💠 reaction, and pays a class- and streak-dependent
//! reward. Illusionists can plant decoys that pay them instead of whoever claims them.
//!
//! Layout follows the usual split of the bot:
//! - `model` - Domain models converted from entities at the repository boundary
//! - `data` - SeaORM repositories
//! - `service` - Spawn, capture, reconciliation, admin and skill logic
//! - `scheduler` - Periodic spawn job
//! - `bot` - Discord gateway handler
//! - `config`, `error`, `state`, `startup` - Ambient plumbing

pub mod bot;
pub mod config;
pub mod data;
pub mod error;
pub mod model;
pub mod scheduler;
pub mod service;
pub mod startup;
pub mod state;

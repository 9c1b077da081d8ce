//! Periodic jobs.

pub mod reiatsu_spawn;

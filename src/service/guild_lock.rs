//! Per-community lock map.
//!
//! Every operation that reads then writes a community's spawn state (claim resolution,
//! emission, reconciliation, admin changes) holds that community's lock. Locks are created on
//! first use and never removed; different communities never contend.

use std::{collections::HashMap, sync::Arc};
use tokio::sync::{Mutex, OwnedMutexGuard};

/// Lazily populated map of community ID to its async mutex.
#[derive(Clone, Default)]
pub struct GuildLocks {
    locks: Arc<Mutex<HashMap<u64, Arc<Mutex<()>>>>>,
}

impl GuildLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Waits for and takes the lock of a community.
    ///
    /// The map itself is only locked while looking up the entry, never while waiting for the
    /// community lock.
    ///
    /// # Arguments
    /// - `guild_id` - Discord guild ID of the community
    ///
    /// # Returns
    /// - `OwnedMutexGuard<()>` - Guard releasing the lock when dropped
    pub async fn acquire(&self, guild_id: u64) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.locks.lock().await;
            locks.entry(guild_id).or_default().clone()
        };

        lock.lock_owned().await
    }
}

//! Shared helper utilities for factory methods.

use chrono::Utc;

/// Counter for generating unique IDs in tests.
static COUNTER: std::sync::atomic::AtomicU64 = std::sync::atomic::AtomicU64::new(1);

/// Gets the next unique counter value for test data.
///
/// # Returns
/// - `u64` - Next unique counter value
pub fn next_id() -> u64 {
    COUNTER.fetch_add(1, std::sync::atomic::Ordering::SeqCst)
}

/// Builds the JSON text of a decoy skill payload as stored in `reiatsu_player.active_skill`.
///
/// # Arguments
/// - `owner_id` - Player who activated the skill
/// - `guild_id` - Community the decoy is scoped to
/// - `spawn_ref` - Message id of the posted decoy marker, `None` while not yet posted
///
/// # Returns
/// - `String` - Serialized payload
pub fn decoy_payload(owner_id: u64, guild_id: u64, spawn_ref: Option<u64>) -> String {
    serde_json::json!({
        "kind": "decoy",
        "owner_id": owner_id,
        "guild_id": guild_id,
        "spawn_ref": spawn_ref,
        "created_at": Utc::now(),
    })
    .to_string()
}

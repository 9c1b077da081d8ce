use chrono::{Duration, Utc};
use sea_orm::DatabaseConnection;
use serenity::async_trait;
use std::{
    collections::HashSet,
    sync::{
        atomic::{AtomicU64, Ordering},
        Mutex,
    },
};
use test_utils::{
    builder::TestBuilder,
    context::TestContext,
    factory::{
        helpers::decoy_payload, reiatsu_config::ReiatsuConfigFactory,
        reiatsu_player::ReiatsuPlayerFactory,
    },
};

use crate::{
    config::game::GameConfig,
    data::{reiatsu_config::ReiatsuConfigRepository, reiatsu_player::ReiatsuPlayerRepository},
    error::AppError,
    model::claim::{ClaimOutcome, ClaimSignal, MarkerKind},
    service::{channel::SpawnChannel, guild_lock::GuildLocks},
};

mod spawn;

/// In-memory spawn channel recording every marker it posts and deletes.
pub struct MockChannel {
    next_id: AtomicU64,
    state: Mutex<MockState>,
}

#[derive(Default)]
struct MockState {
    posted: Vec<(u64, u64, MarkerKind)>,
    live: HashSet<u64>,
    deleted: Vec<u64>,
    fail_post: bool,
    fail_exists: bool,
}

impl MockChannel {
    pub fn new() -> Self {
        Self {
            next_id: AtomicU64::new(10_000),
            state: Mutex::new(MockState::default()),
        }
    }

    /// Registers a marker as present without posting it through the service.
    pub fn add_live(&self, message_id: u64) {
        self.state.lock().unwrap().live.insert(message_id);
    }

    /// Simulates a moderator deleting a marker.
    pub fn remove(&self, message_id: u64) {
        self.state.lock().unwrap().live.remove(&message_id);
    }

    pub fn fail_post(&self, fail: bool) {
        self.state.lock().unwrap().fail_post = fail;
    }

    pub fn fail_exists(&self, fail: bool) {
        self.state.lock().unwrap().fail_exists = fail;
    }

    /// Markers posted so far as `(channel_id, message_id, kind)`.
    pub fn posted(&self) -> Vec<(u64, u64, MarkerKind)> {
        self.state.lock().unwrap().posted.clone()
    }

    pub fn deleted(&self) -> Vec<u64> {
        self.state.lock().unwrap().deleted.clone()
    }
}

#[async_trait]
impl SpawnChannel for MockChannel {
    async fn post_marker(&self, channel_id: u64, kind: MarkerKind) -> Result<u64, AppError> {
        let mut state = self.state.lock().unwrap();
        if state.fail_post {
            return Err(AppError::BadRequest("channel unavailable".to_string()));
        }

        let message_id = self.next_id.fetch_add(1, Ordering::SeqCst);
        state.posted.push((channel_id, message_id, kind));
        state.live.insert(message_id);

        Ok(message_id)
    }

    async fn delete_marker(&self, _channel_id: u64, message_id: u64) -> Result<(), AppError> {
        let mut state = self.state.lock().unwrap();
        state.live.remove(&message_id);
        state.deleted.push(message_id);

        Ok(())
    }

    async fn marker_exists(&self, _channel_id: u64, message_id: u64) -> Result<bool, AppError> {
        let state = self.state.lock().unwrap();
        if state.fail_exists {
            return Err(AppError::BadRequest("channel unavailable".to_string()));
        }

        Ok(state.live.contains(&message_id))
    }
}

/// Game config without randomness in the reward: rare captures never happen.
pub fn game_config() -> GameConfig {
    GameConfig {
        rare_chance: 0.0,
        ..GameConfig::default()
    }
}

pub async fn setup() -> TestContext {
    TestBuilder::new().with_reiatsu_tables().build().await.unwrap()
}

pub fn claim(guild_id: u64, channel_id: u64, message_id: u64, user_id: u64) -> ClaimSignal {
    ClaimSignal {
        guild_id,
        channel_id,
        message_id,
        user_id,
    }
}

pub async fn balance_of(db: &DatabaseConnection, user_id: u64) -> u64 {
    ReiatsuPlayerRepository::new(db)
        .get_by_user_id(user_id)
        .await
        .unwrap()
        .map_or(0, |player| player.balance)
}

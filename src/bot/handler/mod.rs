use serenity::all::{Context, EventHandler, Reaction, Ready};
use serenity::async_trait;
use std::sync::atomic::AtomicBool;

use crate::state::AppState;

pub mod reaction;
pub mod ready;

/// Discord bot event handler
pub struct Handler {
    pub state: AppState,
    /// Set once the reconciliation sweep has been started.
    pub swept: AtomicBool,
}

impl Handler {
    pub fn new(state: AppState) -> Self {
        Self {
            state,
            swept: AtomicBool::new(false),
        }
    }
}

#[async_trait]
impl EventHandler for Handler {
    /// Called when the bot is ready and connected to Discord
    async fn ready(&self, ctx: Context, ready: Ready) {
        ready::handle_ready(&self.state, &self.swept, ctx, ready).await;
    }

    /// Called when a reaction is added to a message
    async fn reaction_add(&self, ctx: Context, add_reaction: Reaction) {
        reaction::handle_reaction_add(&self.state, ctx, add_reaction).await;
    }
}

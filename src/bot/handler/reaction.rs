//! Reaction event handler.
//!
//! Every 💠 reaction on a guild message is forwarded to the capture service as a claim signal;
//! the service decides whether the message is a pending marker. Reactions by the bot itself
//! (the one pre-added to every marker) are dropped here.

use dioxus_logger::tracing;
use serenity::all::{Context, Reaction};

use crate::{model::claim::ClaimSignal, service::channel::SPAWN_EMOJI, state::AppState};

/// Handles a reaction added to a message.
///
/// # Arguments
/// - `state` - Shared application state
/// - `ctx` - Discord context, used to identify the bot's own reactions
/// - `reaction` - The added reaction
pub async fn handle_reaction_add(state: &AppState, ctx: Context, reaction: Reaction) {
    if !reaction.emoji.unicode_eq(SPAWN_EMOJI) {
        return;
    }
    let (Some(guild_id), Some(user_id)) = (reaction.guild_id, reaction.user_id) else {
        return;
    };

    let bot_id = ctx.cache.current_user().id;
    if user_id == bot_id {
        return;
    }

    let signal = ClaimSignal {
        guild_id: guild_id.get(),
        channel_id: reaction.channel_id.get(),
        message_id: reaction.message_id.get(),
        user_id: user_id.get(),
    };

    if let Err(e) = state.capture_service().handle_claim(signal).await {
        tracing::error!(
            "Failed to resolve claim of message {} by user {}: {}",
            signal.message_id,
            signal.user_id,
            e
        );
    }
}

//! Messaging channel abstraction for spawn markers.
//!
//! The engine only needs three operations from the chat platform: post a claimable marker,
//! delete it, and check whether it still exists. [`SpawnChannel`] captures those so the spawn,
//! capture and reconciliation services can run against an in-memory double in tests, while
//! [`DiscordSpawnChannel`] implements them with serenity's HTTP client.

use dioxus_logger::tracing;
use serenity::{
    all::{ChannelId, CreateEmbed, CreateMessage, MessageId, ReactionType},
    async_trait,
    http::{Http, HttpError},
};
use std::sync::Arc;

use crate::{error::AppError, model::claim::MarkerKind};

/// Reaction users add to a marker to claim it.
pub const SPAWN_EMOJI: &str = "💠";

/// Operations the engine performs on a community's spawn channel.
#[async_trait]
pub trait SpawnChannel: Send + Sync {
    /// Posts a claimable marker and returns its message ID.
    async fn post_marker(&self, channel_id: u64, kind: MarkerKind) -> Result<u64, AppError>;

    /// Deletes a marker. A marker that no longer exists is not an error.
    async fn delete_marker(&self, channel_id: u64, message_id: u64) -> Result<(), AppError>;

    /// Checks whether a marker still exists.
    ///
    /// # Returns
    /// - `Ok(true)` - Marker exists
    /// - `Ok(false)` - Marker or channel is gone, or the bot lost access to it
    /// - `Err(AppError)` - Transient failure, existence unknown
    async fn marker_exists(&self, channel_id: u64, message_id: u64) -> Result<bool, AppError>;
}

/// Discord implementation of [`SpawnChannel`].
///
/// Markers are embeds with the spawn emoji pre-reacted so users only have to click it.
pub struct DiscordSpawnChannel {
    /// Discord HTTP client shared with the gateway client
    http: Arc<Http>,
}

impl DiscordSpawnChannel {
    /// Creates a new DiscordSpawnChannel instance.
    ///
    /// # Arguments
    /// - `http` - Arc-wrapped Discord HTTP client for API requests
    ///
    /// # Returns
    /// - `DiscordSpawnChannel` - New channel instance
    pub fn new(http: Arc<Http>) -> Self {
        Self { http }
    }

    fn build_embed(kind: MarkerKind) -> CreateEmbed {
        match kind {
            MarkerKind::Real => CreateEmbed::new()
                .title(format!("{} A wild Reiatsu appears!", SPAWN_EMOJI))
                .description(format!("React with {} to absorb it.", SPAWN_EMOJI))
                .color(0x9b59b6),
            MarkerKind::Decoy => CreateEmbed::new()
                .title("🎭 A strange Reiatsu appears!")
                .description(format!("React with {} to absorb it... if you dare.", SPAWN_EMOJI))
                .color(0xf1c40f),
        }
    }
}

/// Whether a Discord error means the message or channel is gone (404) or inaccessible (403).
pub fn is_missing(err: &serenity::Error) -> bool {
    match err {
        serenity::Error::Http(HttpError::UnsuccessfulRequest(response)) => {
            matches!(response.status_code.as_u16(), 403 | 404)
        }
        _ => false,
    }
}

#[async_trait]
impl SpawnChannel for DiscordSpawnChannel {
    async fn post_marker(&self, channel_id: u64, kind: MarkerKind) -> Result<u64, AppError> {
        let message = ChannelId::new(channel_id)
            .send_message(&self.http, CreateMessage::new().embed(Self::build_embed(kind)))
            .await?;

        // Users can still add the reaction themselves
        if let Err(e) = message
            .react(&self.http, ReactionType::Unicode(SPAWN_EMOJI.to_string()))
            .await
        {
            tracing::warn!(
                "Failed to add spawn reaction to message {} in channel {}: {}",
                message.id,
                channel_id,
                e
            );
        }

        Ok(message.id.get())
    }

    async fn delete_marker(&self, channel_id: u64, message_id: u64) -> Result<(), AppError> {
        match self
            .http
            .delete_message(ChannelId::new(channel_id), MessageId::new(message_id), None)
            .await
        {
            Ok(()) => Ok(()),
            Err(e) if is_missing(&e) => {
                tracing::debug!(
                    "Marker {} in channel {} already gone",
                    message_id,
                    channel_id
                );
                Ok(())
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn marker_exists(&self, channel_id: u64, message_id: u64) -> Result<bool, AppError> {
        match self
            .http
            .get_message(ChannelId::new(channel_id), MessageId::new(message_id))
            .await
        {
            Ok(_) => Ok(true),
            Err(e) if is_missing(&e) => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}

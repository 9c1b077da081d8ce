//! Discord gateway integration.
//!
//! The bot turns 💠 reactions into claim signals for the capture service and runs the
//! reconciliation sweep once the gateway first reports ready. Markers themselves are posted
//! through the REST client held by the spawn channel, so the scheduler does not depend on the
//! gateway connection.
//!
//! # Gateway Intents
//!
//! - `GUILDS` - Guild availability, required for guild-scoped events
//! - `GUILD_MESSAGE_REACTIONS` - Reactions added to markers

pub mod handler;
pub mod start;

//! Ready event handler.
//!
//! The gateway sends `ready` on the first connection and again after every full reconnect.
//! The reconciliation sweep only runs on the first one; later ready events just log.

use dioxus_logger::tracing;
use serenity::all::{Context, Ready};
use std::sync::atomic::{AtomicBool, Ordering};

use crate::state::AppState;

/// Handles the ready event when the bot connects to Discord.
///
/// # Arguments
/// - `state` - Shared application state
/// - `swept` - Whether the sweep was already started by an earlier ready event
/// - `_ctx` - Discord context
/// - `ready` - Ready event data containing bot user information
pub async fn handle_ready(state: &AppState, swept: &AtomicBool, _ctx: Context, ready: Ready) {
    tracing::info!("{} is connected to Discord", ready.user.name);

    if swept.swap(true, Ordering::SeqCst) {
        return;
    }

    let state = state.clone();
    tokio::spawn(async move {
        if let Err(e) = state.reconcile_service().sweep().await {
            tracing::error!("Reconciliation sweep failed: {}", e);
        }
    });
}

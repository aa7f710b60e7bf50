// SPDX-FileCopyrightText: 2026 Tunelink Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Shared state for axum request handlers.

use std::sync::Arc;

use tunelink_bot::Dispatcher;
use tunelink_core::{AccountRepository, MusicService, ReplyChannel, TokenProvider};
use tunelink_spotify::SpotifyAuth;

/// Everything the handlers need, cloned per request.
#[derive(Clone)]
pub struct GatewayState {
    /// Webhook event router.
    pub dispatcher: Arc<Dispatcher>,
    /// Outbound channel, for linking confirmations and signup prompts.
    pub channel: Arc<dyn ReplyChannel>,
    /// Linkage persistence.
    pub accounts: Arc<dyn AccountRepository>,
    /// OAuth code exchange.
    pub tokens: Arc<dyn TokenProvider>,
    /// Profile fetch at link time.
    pub music: Arc<dyn MusicService>,
    /// Authorize-URL construction for the signup redirect.
    pub auth: Arc<SpotifyAuth>,
    /// Rich menu switched to after a successful link, when configured.
    pub rich_menu_default: Option<String>,
}

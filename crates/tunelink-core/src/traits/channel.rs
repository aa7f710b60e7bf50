// SPDX-FileCopyrightText: 2026 Tunelink Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Outbound reply channel trait for the messaging platform.

use async_trait::async_trait;

use crate::error::TunelinkError;

/// Outbound message delivery to the chat platform.
///
/// `message` parameters are fully rendered message documents (what a flex
/// builder's `to_message()` produced); the channel wraps them in the
/// reply/push envelope and never inspects their contents. Non-2xx sends are
/// logged with the rendered payload and surfaced, never retried.
#[async_trait]
pub trait ReplyChannel: Send + Sync {
    /// Replies to an event using its one-shot reply token.
    async fn reply(
        &self,
        reply_token: &str,
        message: serde_json::Value,
    ) -> Result<(), TunelinkError>;

    /// Pushes a message to a user outside a reply window.
    async fn push(
        &self,
        chat_user_id: &str,
        message: serde_json::Value,
    ) -> Result<(), TunelinkError>;

    /// Replies with a plain text message.
    async fn reply_text(&self, reply_token: &str, text: &str) -> Result<(), TunelinkError>;

    /// Pushes a plain text message.
    async fn push_text(&self, chat_user_id: &str, text: &str) -> Result<(), TunelinkError>;

    /// Switches the rich menu shown to a user (used after account linking).
    async fn link_rich_menu(
        &self,
        chat_user_id: &str,
        rich_menu_id: &str,
    ) -> Result<(), TunelinkError>;
}

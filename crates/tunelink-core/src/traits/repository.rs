// SPDX-FileCopyrightText: 2026 Tunelink Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Account repository trait for linkage persistence backends.

use async_trait::async_trait;

use crate::error::TunelinkError;
use crate::types::Account;

/// Persistence contract for chat-user ↔ music-service linkages.
///
/// The dispatcher resolves the caller's account through this trait on every
/// command that needs music-service data and never caches the result beyond
/// a single request.
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Persists a new linkage. Re-linking the same chat user replaces the
    /// stored record; `chat_user_id` stays unique either way.
    async fn create_account(&self, account: Account) -> Result<Account, TunelinkError>;

    /// Looks up the linkage for a chat user. `Ok(None)` means the user has
    /// never completed the OAuth flow.
    async fn account_by_chat_user(
        &self,
        chat_user_id: &str,
    ) -> Result<Option<Account>, TunelinkError>;
}

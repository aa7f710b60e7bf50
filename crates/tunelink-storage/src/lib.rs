// SPDX-FileCopyrightText: 2026 Tunelink Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite persistence layer for the Tunelink bot.
//!
//! Provides WAL-mode SQLite storage with embedded migrations, a
//! single-writer concurrency model via `tokio-rusqlite`, and the
//! [`tunelink_core::AccountRepository`] implementation used by the
//! dispatcher and the linking flow.

pub mod database;
pub mod migrations;
pub mod queries;

pub use database::Database;

use async_trait::async_trait;

use tunelink_core::{Account, AccountRepository, TunelinkError};

/// Account repository backed by the shared SQLite database.
#[derive(Clone)]
pub struct SqliteAccountStore {
    db: Database,
}

impl SqliteAccountStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

#[async_trait]
impl AccountRepository for SqliteAccountStore {
    async fn create_account(&self, account: Account) -> Result<Account, TunelinkError> {
        queries::accounts::upsert_account(&self.db, &account).await?;
        Ok(account)
    }

    async fn account_by_chat_user(
        &self,
        chat_user_id: &str,
    ) -> Result<Option<Account>, TunelinkError> {
        queries::accounts::account_by_chat_user(&self.db, chat_user_id).await
    }
}

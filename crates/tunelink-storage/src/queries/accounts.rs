// SPDX-FileCopyrightText: 2026 Tunelink Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Account linkage CRUD operations.

use chrono::{DateTime, Utc};
use rusqlite::params;

use tunelink_core::{Account, TunelinkError};

use crate::database::{Database, map_tr_err};

/// Insert a linkage, replacing any existing one for the same chat user.
/// Re-linking after a revoked token goes through the same path.
pub async fn upsert_account(db: &Database, account: &Account) -> Result<(), TunelinkError> {
    let account = account.clone();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO accounts (chat_user_id, service_user_id, refresh_token, created_at)
                 VALUES (?1, ?2, ?3, ?4)
                 ON CONFLICT(chat_user_id) DO UPDATE SET
                     service_user_id = excluded.service_user_id,
                     refresh_token = excluded.refresh_token,
                     created_at = excluded.created_at",
                params![
                    account.chat_user_id,
                    account.service_user_id,
                    account.refresh_token,
                    account.created_at.to_rfc3339(),
                ],
            )?;
            Ok(())
        })
        .await
        .map_err(map_tr_err)
}

/// Get the linkage for a chat user, if one exists.
pub async fn account_by_chat_user(
    db: &Database,
    chat_user_id: &str,
) -> Result<Option<Account>, TunelinkError> {
    let chat_user_id = chat_user_id.to_string();
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT chat_user_id, service_user_id, refresh_token, created_at
                 FROM accounts WHERE chat_user_id = ?1",
            )?;
            let result = stmt.query_row(params![chat_user_id], |row| {
                let created_at: String = row.get(3)?;
                Ok(Account {
                    chat_user_id: row.get(0)?,
                    service_user_id: row.get(1)?,
                    refresh_token: row.get(2)?,
                    created_at: DateTime::parse_from_rfc3339(&created_at)
                        .map(|dt| dt.with_timezone(&Utc))
                        .unwrap_or_default(),
                })
            });
            match result {
                Ok(account) => Ok(Some(account)),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(e) => Err(e),
            }
        })
        .await
        .map_err(map_tr_err)
}

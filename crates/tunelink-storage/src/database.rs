// SPDX-FileCopyrightText: 2026 Tunelink Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Database connection management with PRAGMA setup, WAL mode, and embedded
//! migrations on open.
//!
//! All writes are serialized through tokio-rusqlite's single background
//! thread. Do NOT create additional Connection instances for writes.

use std::path::Path;

use tokio_rusqlite::Connection;
use tracing::info;

use tunelink_core::TunelinkError;

use crate::migrations;

/// Convert tokio-rusqlite errors into the storage error variant.
pub(crate) fn map_tr_err(e: tokio_rusqlite::Error<rusqlite::Error>) -> TunelinkError {
    TunelinkError::Storage {
        source: Box::new(e),
    }
}

/// Handle to the single SQLite connection.
#[derive(Clone)]
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Opens (creating if needed) the database at `path`, applies PRAGMAs
    /// and runs any pending migrations.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, TunelinkError> {
        let path = path.as_ref().to_path_buf();
        let conn = Connection::open(&path)
            .await
            .map_err(|e| TunelinkError::Storage {
                source: Box::new(e),
            })?;

        conn.call(|conn| {
            conn.execute_batch(
                "PRAGMA journal_mode = WAL;
                 PRAGMA synchronous = NORMAL;
                 PRAGMA foreign_keys = ON;
                 PRAGMA busy_timeout = 5000;",
            )?;
            Ok(())
        })
        .await
        .map_err(map_tr_err)?;

        conn.call(migrations::run_migrations)
            .await
            .map_err(|e| TunelinkError::Storage {
                source: Box::new(e),
            })?;

        info!(path = %path.display(), "database opened");
        Ok(Self { conn })
    }

    /// The underlying async connection, for query modules.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}

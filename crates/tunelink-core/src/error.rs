// SPDX-FileCopyrightText: 2026 Tunelink Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types shared across the Tunelink workspace.

use thiserror::Error;

/// The primary error type used across all Tunelink collaborator traits and
/// workflow operations.
#[derive(Debug, Error)]
pub enum TunelinkError {
    /// Configuration errors (invalid TOML, missing required fields).
    #[error("configuration error: {0}")]
    Config(String),

    /// Account repository errors (connection, query failure).
    #[error("storage error: {source}")]
    Storage {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The chat user has no linked music-service account.
    #[error("no linked account for chat user {chat_user_id}")]
    AccountNotLinked { chat_user_id: String },

    /// The OAuth token endpoint refused or failed the exchange.
    #[error("token exchange failed: {message}")]
    TokenExchange { message: String },

    /// An upstream HTTP call failed. `status` is set for non-2xx responses
    /// and absent for connection-level failures.
    #[error("{service} request failed{}: {message}", .status.map(|s| format!(" with status {s}")).unwrap_or_default())]
    Upstream {
        service: &'static str,
        status: Option<u16>,
        message: String,
    },

    /// An upstream response body could not be decoded.
    #[error("malformed response from {service}: {source}")]
    MalformedResponse {
        service: &'static str,
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The recommendation seed set exceeds the provider maximum.
    #[error("seed set has {count} tracks, provider allows at most {max}")]
    InvalidSeedSet { count: usize, max: usize },

    /// A playlist was created remotely but adding tracks to it failed.
    /// The playlist still exists; there is no compensating delete.
    #[error("playlist {playlist_id} was created but adding tracks failed: {source}")]
    PartialFailure {
        playlist_id: String,
        source: Box<TunelinkError>,
    },

    /// An upstream call exceeded its per-call timeout.
    #[error("upstream call timed out after {duration:?}")]
    Timeout { duration: std::time::Duration },

    /// A carousel was assembled with more children than the rendering
    /// format permits.
    #[error("carousel supports at most {max} children, got {count}")]
    CarouselOverflow { count: usize, max: usize },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

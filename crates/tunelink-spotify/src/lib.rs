// SPDX-FileCopyrightText: 2026 Tunelink Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Spotify client crate for the Tunelink bot.
//!
//! [`SpotifyAuth`] handles the accounts-service side (authorize URL,
//! code/refresh token exchange with HTTP Basic credentials);
//! [`SpotifyClient`] issues bearer-auth REST calls and implements the
//! [`tunelink_core::MusicService`] contract, including the composite
//! seed-sampling and playlist-creation operations. [`aggregate`] holds the
//! pure data-shape helpers (stride sampling, album-id deduplication) that
//! feed the dispatcher.

pub mod aggregate;
pub mod auth;
pub mod client;
mod wire;

pub use auth::SpotifyAuth;
pub use client::{FetchLimits, MAX_SEED_TRACKS, SpotifyClient};

use std::time::Duration;

use tunelink_core::TunelinkError;

/// Bounded per-call timeout for every outbound HTTP request.
pub(crate) const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

pub(crate) const SERVICE: &str = "spotify";

/// Maps a reqwest send error: timeouts get their own variant so callers
/// can tell a slow upstream from a broken one.
pub(crate) fn map_send_error(err: reqwest::Error) -> TunelinkError {
    if err.is_timeout() {
        TunelinkError::Timeout {
            duration: REQUEST_TIMEOUT,
        }
    } else {
        TunelinkError::Upstream {
            service: SERVICE,
            status: None,
            message: err.to_string(),
        }
    }
}

// SPDX-FileCopyrightText: 2026 Tunelink Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Music-service client trait.

use async_trait::async_trait;

use crate::error::TunelinkError;
use crate::types::{Album, Artist, Playlist, Track, UserProfile};

/// Typed fetch operations against the music service's REST surface, plus
/// the two composite operations the dispatcher orchestrates.
///
/// Implementations are stateless per invocation: no local state is retained
/// between calls, so one instance is safe to share across concurrent
/// requests.
#[async_trait]
pub trait MusicService: Send + Sync {
    /// Fetches the linked user's profile.
    async fn profile(&self, access_token: &str) -> Result<UserProfile, TunelinkError>;

    /// Fetches the user's top tracks, most-listened first.
    async fn top_tracks(&self, access_token: &str, limit: usize)
        -> Result<Vec<Track>, TunelinkError>;

    /// Fetches the user's top artists, most-listened first.
    async fn top_artists(
        &self,
        access_token: &str,
        limit: usize,
    ) -> Result<Vec<Artist>, TunelinkError>;

    /// Fetches a single album.
    async fn album(&self, access_token: &str, id: &str) -> Result<Album, TunelinkError>;

    /// Fetches several albums in one batched call. Callers deduplicate ids
    /// before calling; the service bills one request either way.
    async fn albums(&self, access_token: &str, ids: &[String])
        -> Result<Vec<Album>, TunelinkError>;

    /// Fetches a playlist's full detail (name, description, images).
    async fn playlist(&self, access_token: &str, id: &str) -> Result<Playlist, TunelinkError>;

    /// Samples the user's recent-play history into recommendation seeds
    /// (stride sampling over one fixed-size page).
    async fn recent_track_seeds(&self, access_token: &str)
        -> Result<Vec<String>, TunelinkError>;

    /// Fetches algorithmic recommendations for a seed set. Fails with
    /// [`TunelinkError::InvalidSeedSet`] before any HTTP call when the seed
    /// set exceeds the provider maximum.
    async fn recommendations(
        &self,
        access_token: &str,
        seeds: &[String],
        limit: usize,
    ) -> Result<Vec<Track>, TunelinkError>;

    /// Seeds → recommendations → create playlist → add tracks. Returns the
    /// new playlist id. If adding tracks fails after creation succeeded the
    /// playlist still exists remotely and the error is
    /// [`TunelinkError::PartialFailure`].
    async fn create_recommended_playlist(
        &self,
        access_token: &str,
        service_user_id: &str,
    ) -> Result<String, TunelinkError>;
}

// SPDX-FileCopyrightText: 2026 Tunelink Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Bearer-auth REST client implementing [`MusicService`].

use async_trait::async_trait;
use chrono::Local;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use tunelink_core::{
    Album, Artist, MusicService, Playlist, Track, TunelinkError, UserProfile,
};

use crate::aggregate::{stride_sample, track_uris};
use crate::wire::{
    AlbumsResponse, CreatedPlaylist, Paging, PlayHistoryEntry, RecommendationsResponse,
    WireAlbum, WireArtist, WirePlaylist, WireProfile, WireTrack,
};
use crate::{REQUEST_TIMEOUT, SERVICE, map_send_error};

/// Provider-imposed ceiling on recommendation seeds per request.
pub const MAX_SEED_TRACKS: usize = 5;

const PLAYLIST_NAME_SUFFIX: &str = "Tracks for you";
const PLAYLIST_DESCRIPTION: &str = "Playlist created by tunelink";

/// Page sizes and sampling parameters for the composite operations.
#[derive(Debug, Clone, Copy)]
pub struct FetchLimits {
    /// How many recently-played entries to request in the seed page.
    pub recently_played_page: usize,
    /// Every n-th recent track becomes a seed.
    pub seed_stride: usize,
    /// Track count requested for a generated playlist.
    pub playlist_size: usize,
}

impl Default for FetchLimits {
    fn default() -> Self {
        Self {
            recently_played_page: 50,
            seed_stride: 10,
            playlist_size: 25,
        }
    }
}

/// REST client for the music service's API surface.
#[derive(Debug, Clone)]
pub struct SpotifyClient {
    http: reqwest::Client,
    api_base_url: String,
    limits: FetchLimits,
}

impl SpotifyClient {
    pub fn new(api_base_url: impl Into<String>, limits: FetchLimits) -> Result<Self, TunelinkError> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| TunelinkError::Internal(format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            http,
            api_base_url: api_base_url.into(),
            limits,
        })
    }

    async fn decode<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, TunelinkError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = %status, body = %body, "upstream call failed");
            return Err(TunelinkError::Upstream {
                service: SERVICE,
                status: Some(status.as_u16()),
                message: body,
            });
        }
        response
            .json::<T>()
            .await
            .map_err(|e| TunelinkError::MalformedResponse {
                service: SERVICE,
                source: Box::new(e),
            })
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        access_token: &str,
        path_and_query: &str,
    ) -> Result<T, TunelinkError> {
        debug!(path = %path_and_query, "GET");
        let response = self
            .http
            .get(format!("{}{path_and_query}", self.api_base_url))
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(map_send_error)?;
        Self::decode(response).await
    }

    async fn post_json<T: DeserializeOwned>(
        &self,
        access_token: &str,
        path_and_query: &str,
        body: &serde_json::Value,
    ) -> Result<T, TunelinkError> {
        debug!(path = %path_and_query, "POST");
        let response = self
            .http
            .post(format!("{}{path_and_query}", self.api_base_url))
            .bearer_auth(access_token)
            .json(body)
            .send()
            .await
            .map_err(map_send_error)?;
        Self::decode(response).await
    }

    async fn create_playlist(
        &self,
        access_token: &str,
        service_user_id: &str,
    ) -> Result<String, TunelinkError> {
        let name = format!("{} {PLAYLIST_NAME_SUFFIX}", Local::now().format("%Y-%m-%d"));
        let created: CreatedPlaylist = self
            .post_json(
                access_token,
                &format!("/v1/users/{service_user_id}/playlists"),
                &serde_json::json!({
                    "name": name,
                    "description": PLAYLIST_DESCRIPTION,
                }),
            )
            .await?;
        Ok(created.id)
    }

    async fn add_tracks(
        &self,
        access_token: &str,
        playlist_id: &str,
        uris: &[String],
    ) -> Result<(), TunelinkError> {
        let response = self
            .http
            .post(format!(
                "{}/v1/playlists/{playlist_id}/tracks?uris={}",
                self.api_base_url,
                uris.join(",")
            ))
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(map_send_error)?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = %status, body = %body, playlist_id, "add tracks failed");
            return Err(TunelinkError::Upstream {
                service: SERVICE,
                status: Some(status.as_u16()),
                message: body,
            });
        }
        Ok(())
    }
}

#[async_trait]
impl MusicService for SpotifyClient {
    async fn profile(&self, access_token: &str) -> Result<UserProfile, TunelinkError> {
        let profile: WireProfile = self.get_json(access_token, "/v1/me").await?;
        Ok(profile.into())
    }

    async fn top_tracks(
        &self,
        access_token: &str,
        limit: usize,
    ) -> Result<Vec<Track>, TunelinkError> {
        let page: Paging<WireTrack> = self
            .get_json(
                access_token,
                &format!("/v1/me/top/tracks?limit={limit}&time_range=short_term"),
            )
            .await?;
        Ok(page.items.into_iter().map(Into::into).collect())
    }

    async fn top_artists(
        &self,
        access_token: &str,
        limit: usize,
    ) -> Result<Vec<Artist>, TunelinkError> {
        let page: Paging<WireArtist> = self
            .get_json(
                access_token,
                &format!("/v1/me/top/artists?limit={limit}&time_range=medium_term"),
            )
            .await?;
        Ok(page.items.into_iter().map(Into::into).collect())
    }

    async fn album(&self, access_token: &str, id: &str) -> Result<Album, TunelinkError> {
        let album: WireAlbum = self.get_json(access_token, &format!("/v1/albums/{id}")).await?;
        Ok(album.into())
    }

    async fn albums(
        &self,
        access_token: &str,
        ids: &[String],
    ) -> Result<Vec<Album>, TunelinkError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let response: AlbumsResponse = self
            .get_json(access_token, &format!("/v1/albums?ids={}", ids.join(",")))
            .await?;
        Ok(response.albums.into_iter().map(Into::into).collect())
    }

    async fn playlist(&self, access_token: &str, id: &str) -> Result<Playlist, TunelinkError> {
        let playlist: WirePlaylist = self
            .get_json(access_token, &format!("/v1/playlists/{id}"))
            .await?;
        Ok(playlist.into())
    }

    async fn recent_track_seeds(
        &self,
        access_token: &str,
    ) -> Result<Vec<String>, TunelinkError> {
        let page: Paging<PlayHistoryEntry> = self
            .get_json(
                access_token,
                &format!(
                    "/v1/me/player/recently-played?limit={}",
                    self.limits.recently_played_page
                ),
            )
            .await?;
        let ids: Vec<String> = page.items.into_iter().map(|entry| entry.track.id).collect();
        Ok(stride_sample(&ids, self.limits.seed_stride))
    }

    async fn recommendations(
        &self,
        access_token: &str,
        seeds: &[String],
        limit: usize,
    ) -> Result<Vec<Track>, TunelinkError> {
        if seeds.len() > MAX_SEED_TRACKS {
            return Err(TunelinkError::InvalidSeedSet {
                count: seeds.len(),
                max: MAX_SEED_TRACKS,
            });
        }
        let response: RecommendationsResponse = self
            .get_json(
                access_token,
                &format!(
                    "/v1/recommendations?limit={limit}&seed_tracks={}",
                    seeds.join(",")
                ),
            )
            .await?;
        Ok(response.tracks.into_iter().map(Into::into).collect())
    }

    async fn create_recommended_playlist(
        &self,
        access_token: &str,
        service_user_id: &str,
    ) -> Result<String, TunelinkError> {
        let seeds = self.recent_track_seeds(access_token).await?;
        let tracks = self
            .recommendations(access_token, &seeds, self.limits.playlist_size)
            .await?;
        let playlist_id = self.create_playlist(access_token, service_user_id).await?;
        // The playlist exists remotely from this point; an add-tracks
        // failure leaves it empty rather than rolling it back.
        if let Err(source) = self
            .add_tracks(access_token, &playlist_id, &track_uris(&tracks))
            .await
        {
            return Err(TunelinkError::PartialFailure {
                playlist_id,
                source: Box::new(source),
            });
        }
        Ok(playlist_id)
    }
}

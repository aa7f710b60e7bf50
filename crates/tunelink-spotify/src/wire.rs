// SPDX-FileCopyrightText: 2026 Tunelink Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Wire-format types for the Spotify REST and accounts APIs.
//!
//! Kept separate from the domain types in `tunelink-core`: the wire shapes
//! track what the provider actually sends (nullable fields, paging
//! envelopes) and convert into the cleaned-up domain form at the crate
//! boundary.

use serde::Deserialize;

use tunelink_core::{Album, Artist, Image, ItemRef, Playlist, Track, UserProfile};

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct WireImage {
    pub url: String,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
}

impl From<WireImage> for Image {
    fn from(w: WireImage) -> Self {
        Image {
            url: w.url,
            width: w.width.unwrap_or_default(),
            height: w.height.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct WireRef {
    pub id: String,
    pub name: String,
}

impl From<WireRef> for ItemRef {
    fn from(w: WireRef) -> Self {
        ItemRef {
            id: w.id,
            name: w.name,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct ExternalUrls {
    #[serde(default)]
    pub spotify: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct WireTrack {
    pub id: String,
    pub name: String,
    pub artists: Vec<WireRef>,
    pub album: WireRef,
    pub duration_ms: u64,
    #[serde(default)]
    pub external_urls: ExternalUrls,
    pub uri: String,
}

impl From<WireTrack> for Track {
    fn from(w: WireTrack) -> Self {
        Track {
            id: w.id,
            name: w.name,
            artists: w.artists.into_iter().map(Into::into).collect(),
            album: w.album.into(),
            duration_ms: w.duration_ms,
            external_url: w.external_urls.spotify.unwrap_or_default(),
            uri: w.uri,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct WireAlbum {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub images: Vec<WireImage>,
    #[serde(default)]
    pub artists: Vec<WireRef>,
}

impl From<WireAlbum> for Album {
    fn from(w: WireAlbum) -> Self {
        Album {
            id: w.id,
            name: w.name,
            images: w.images.into_iter().map(Into::into).collect(),
            artists: w.artists.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct WireArtist {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub images: Vec<WireImage>,
    #[serde(default)]
    pub external_urls: ExternalUrls,
}

impl From<WireArtist> for Artist {
    fn from(w: WireArtist) -> Self {
        Artist {
            id: w.id,
            name: w.name,
            images: w.images.into_iter().map(Into::into).collect(),
            external_url: w.external_urls.spotify.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct WirePlaylist {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub images: Option<Vec<WireImage>>,
    #[serde(default)]
    pub external_urls: ExternalUrls,
}

impl From<WirePlaylist> for Playlist {
    fn from(w: WirePlaylist) -> Self {
        Playlist {
            id: w.id,
            name: w.name,
            description: w.description.unwrap_or_default(),
            images: w
                .images
                .unwrap_or_default()
                .into_iter()
                .map(Into::into)
                .collect(),
            external_url: w.external_urls.spotify.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct WireProfile {
    pub id: String,
    #[serde(default)]
    pub display_name: Option<String>,
}

impl From<WireProfile> for UserProfile {
    fn from(w: WireProfile) -> Self {
        UserProfile {
            id: w.id,
            display_name: w.display_name.unwrap_or_default(),
        }
    }
}

// --- Response envelopes ---

/// Generic paging envelope; only `items` is consumed.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct Paging<T> {
    pub items: Vec<T>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct PlayHistoryEntry {
    pub track: WireTrack,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RecommendationsResponse {
    pub tracks: Vec<WireTrack>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct AlbumsResponse {
    pub albums: Vec<WireAlbum>,
}

/// The create-playlist call returns only a skeleton; name, description and
/// images come from a follow-up playlist fetch.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct CreatedPlaylist {
    pub id: String,
}

/// Token endpoint response. `refresh_token` is absent on refresh grants.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
}

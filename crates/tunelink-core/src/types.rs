// SPDX-FileCopyrightText: 2026 Tunelink Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain types shared across the Tunelink workspace.
//!
//! Music-service entities are read-only snapshots fetched per request and
//! never persisted; only [`Account`] is stored.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Linkage between a chat user and a music-service account.
///
/// Created once the OAuth flow completes. The refresh token is long-lived;
/// access tokens are derived from it per request and never stored.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Opaque chat-platform user id (primary key).
    pub chat_user_id: String,
    /// Music-service user id, fetched from the profile endpoint at link time.
    pub service_user_id: String,
    /// Long-lived OAuth refresh token.
    pub refresh_token: String,
    /// When the linkage was created.
    pub created_at: DateTime<Utc>,
}

impl std::fmt::Debug for Account {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Account")
            .field("chat_user_id", &self.chat_user_id)
            .field("service_user_id", &self.service_user_id)
            .field("refresh_token", &"[redacted]")
            .field("created_at", &self.created_at)
            .finish()
    }
}

/// Access/refresh token pair returned by the authorization-code exchange.
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

impl std::fmt::Debug for TokenPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenPair")
            .field("access_token", &"[redacted]")
            .field("refresh_token", &"[redacted]")
            .finish()
    }
}

/// Lightweight id/name reference to a track, artist, or album.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemRef {
    pub id: String,
    pub name: String,
}

/// Provider image, largest-first by provider convention.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Image {
    pub url: String,
    pub width: u32,
    pub height: u32,
}

/// A track as returned by the music service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    pub id: String,
    pub name: String,
    pub artists: Vec<ItemRef>,
    pub album: ItemRef,
    pub duration_ms: u64,
    pub external_url: String,
    pub uri: String,
}

impl Track {
    /// Artist names joined for display ("A, B").
    pub fn artist_line(&self) -> String {
        self.artists
            .iter()
            .map(|a| a.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// An album with its cover images.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Album {
    pub id: String,
    pub name: String,
    pub images: Vec<Image>,
    pub artists: Vec<ItemRef>,
}

/// An artist with portrait images.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artist {
    pub id: String,
    pub name: String,
    pub images: Vec<Image>,
    pub external_url: String,
}

/// A playlist owned by the linked user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Playlist {
    pub id: String,
    pub name: String,
    pub description: String,
    pub images: Vec<Image>,
    pub external_url: String,
}

/// The linked user's music-service profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub display_name: String,
}

/// A decoded inbound chat event.
///
/// Closed sum over the event kinds the bot reacts to. Anything that is not
/// a text message maps to [`InboundEvent::Other`] and is a no-op branch,
/// never a runtime cast failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InboundEvent {
    /// A text message from a chat user.
    Text {
        chat_user_id: String,
        reply_token: String,
        text: String,
    },
    /// Any other event kind (follow, sticker, image, ...).
    Other,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn account_debug_redacts_refresh_token() {
        let acc = Account {
            chat_user_id: "U1".into(),
            service_user_id: "spotify-user".into(),
            refresh_token: "very-secret".into(),
            created_at: Utc::now(),
        };
        let rendered = format!("{acc:?}");
        assert!(!rendered.contains("very-secret"), "got: {rendered}");
        assert!(rendered.contains("[redacted]"));
    }

    #[test]
    fn artist_line_joins_names_in_order() {
        let track = Track {
            id: "t1".into(),
            name: "Song".into(),
            artists: vec![
                ItemRef { id: "a1".into(), name: "First".into() },
                ItemRef { id: "a2".into(), name: "Second".into() },
            ],
            album: ItemRef { id: "al1".into(), name: "Album".into() },
            duration_ms: 1000,
            external_url: String::new(),
            uri: "spotify:track:t1".into(),
        };
        assert_eq!(track.artist_line(), "First, Second");
    }
}

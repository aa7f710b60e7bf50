// SPDX-FileCopyrightText: 2026 Tunelink Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain-to-flex rendering.
//!
//! Pure functions from core types to the flex builders; no I/O. The
//! dispatcher calls these and hands the rendered documents to the channel.

use std::collections::HashMap;

use tunelink_core::{Album, Artist, Playlist, Track, TunelinkError};
use tunelink_flex::{
    ButtonBubble, Carousel, FlexComponent, ImageCard, ReceiptBubble, ReceiptItem,
    MAX_CAROUSEL_ITEMS,
};
use tunelink_spotify::aggregate::cover_url;

const PLAYLIST_COLOR: &str = "1DB954";
const TRACK_COLOR: &str = "2FA6E9";

/// Formats a millisecond duration as `m:ss`, seconds zero-padded, partial
/// seconds truncated. 125000 renders as "2:05".
pub fn format_duration(duration_ms: u64) -> String {
    let total_seconds = duration_ms / 1000;
    format!("{}:{:02}", total_seconds / 60, total_seconds % 60)
}

/// Builds the top-tracks receipt: one line item per track, joined with the
/// album cover map. A track whose album is missing from the map gets an
/// empty image URL.
pub fn top_tracks_receipt(tracks: &[Track], covers: &HashMap<String, String>) -> ReceiptBubble {
    let items = tracks
        .iter()
        .map(|track| ReceiptItem {
            header: track.name.clone(),
            text: track.artist_line(),
            trailing: format_duration(track.duration_ms),
            image_url: cover_url(covers, track),
            url: track.external_url.clone(),
        })
        .collect();
    ReceiptBubble::new(
        "Your top tracks",
        "TUNELINK",
        "Top tracks",
        "What you have had on repeat lately",
        items,
    )
}

/// Builds the top-artists carousel, truncating to the carousel ceiling
/// before construction so an oversized fetch can never fail rendering.
pub fn top_artists_carousel(artists: &[Artist]) -> Result<Carousel, TunelinkError> {
    let cards: Vec<Box<dyn FlexComponent>> = artists
        .iter()
        .take(MAX_CAROUSEL_ITEMS)
        .map(|artist| {
            Box::new(ImageCard::new(
                "Your top artists",
                artist.name.clone(),
                artist.images.first().map(|i| i.url.clone()).unwrap_or_default(),
                artist.external_url.clone(),
            )) as Box<dyn FlexComponent>
        })
        .collect();
    Carousel::new("Your top artists", cards)
}

/// Builds the presentation bubble for a freshly created playlist.
pub fn playlist_bubble(playlist: &Playlist) -> ButtonBubble {
    ButtonBubble::new(
        "Playlist created",
        playlist.name.clone(),
        playlist.description.clone(),
        "Open playlist",
        playlist.external_url.clone(),
        playlist.images.first().map(|i| i.url.clone()).unwrap_or_default(),
        PLAYLIST_COLOR,
    )
}

/// Builds the presentation bubble for a single recommended track.
pub fn track_bubble(track: &Track, album: &Album) -> ButtonBubble {
    ButtonBubble::new(
        "A track for you",
        track.name.clone(),
        track.artist_line(),
        "Listen now",
        track.external_url.clone(),
        album.images.first().map(|i| i.url.clone()).unwrap_or_default(),
        TRACK_COLOR,
    )
}

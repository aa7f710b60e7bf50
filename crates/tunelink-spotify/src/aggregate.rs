// SPDX-FileCopyrightText: 2026 Tunelink Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Pure helpers for turning raw API pages into the shapes the bot needs:
//! stride sampling for seed selection, album deduplication, and the
//! album-to-cover-image join.

use std::collections::HashMap;

use tunelink_core::{Album, Track};

/// Picks every `stride`-th element starting at index 0.
///
/// A page of 50 with stride 10 yields elements 0, 10, 20, 30 and 40.
/// A stride of 0 would loop forever, so it is treated as 1.
pub fn stride_sample<T: Clone>(items: &[T], stride: usize) -> Vec<T> {
    let stride = stride.max(1);
    items.iter().step_by(stride).cloned().collect()
}

/// Album IDs of `tracks` with duplicates removed, first occurrence wins.
pub fn dedup_album_ids(tracks: &[Track]) -> Vec<String> {
    let mut seen = Vec::new();
    for track in tracks {
        if !seen.contains(&track.album.id) {
            seen.push(track.album.id.clone());
        }
    }
    seen
}

/// Maps each album's ID to its first image URL. Albums with no images are
/// skipped; callers fall back to an empty URL on lookup misses.
pub fn album_image_map(albums: &[Album]) -> HashMap<String, String> {
    albums
        .iter()
        .filter_map(|album| {
            album
                .images
                .first()
                .map(|image| (album.id.clone(), image.url.clone()))
        })
        .collect()
}

/// Cover image URL for a track, or empty when the album is absent from the
/// join map.
pub fn cover_url(images: &HashMap<String, String>, track: &Track) -> String {
    images.get(&track.album.id).cloned().unwrap_or_default()
}

/// Track URIs in order, for playlist population.
pub fn track_uris(tracks: &[Track]) -> Vec<String> {
    tracks.iter().map(|track| track.uri.clone()).collect()
}

// SPDX-FileCopyrightText: 2026 Tunelink Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for values Figment cannot check.

use tunelink_core::TunelinkError;

use crate::model::TunelinkConfig;

/// Validates invariants required to actually serve: credentials present,
/// limits non-degenerate, public base URL shaped like a URL.
pub fn validate_config(config: &TunelinkConfig) -> Result<(), TunelinkError> {
    if config
        .line
        .channel_token
        .as_deref()
        .unwrap_or_default()
        .is_empty()
    {
        return Err(TunelinkError::Config(
            "line.channel_token is required".into(),
        ));
    }

    if config
        .spotify
        .client_id
        .as_deref()
        .unwrap_or_default()
        .is_empty()
        || config
            .spotify
            .client_secret
            .as_deref()
            .unwrap_or_default()
            .is_empty()
    {
        return Err(TunelinkError::Config(
            "spotify.client_id and spotify.client_secret are required".into(),
        ));
    }

    if !config.server.public_base_url.starts_with("http") {
        return Err(TunelinkError::Config(
            "server.public_base_url must be an absolute http(s) URL".into(),
        ));
    }
    if config.server.public_base_url.ends_with('/') {
        return Err(TunelinkError::Config(
            "server.public_base_url must not end with a slash".into(),
        ));
    }

    if config.limits.seed_stride == 0 {
        return Err(TunelinkError::Config("limits.seed_stride must be > 0".into()));
    }
    if config.limits.top_tracks == 0 || config.limits.playlist_size == 0 {
        return Err(TunelinkError::Config(
            "limits.top_tracks and limits.playlist_size must be > 0".into(),
        ));
    }

    Ok(())
}

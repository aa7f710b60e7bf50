// SPDX-FileCopyrightText: 2026 Tunelink Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./tunelink.toml` > `~/.config/tunelink/tunelink.toml`
//! > `/etc/tunelink/tunelink.toml` with environment variable overrides via
//! the `TUNELINK_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::TunelinkConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/tunelink/tunelink.toml` (system-wide)
/// 3. `~/.config/tunelink/tunelink.toml` (user XDG config)
/// 4. `./tunelink.toml` (local directory)
/// 5. `TUNELINK_*` environment variables
pub fn load_config() -> Result<TunelinkConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(TunelinkConfig::default()))
        .merge(Toml::file("/etc/tunelink/tunelink.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("tunelink/tunelink.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("tunelink.toml"))
        .merge(env_provider())
        .extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env).
///
/// Used for testing and explicit config file specification.
pub fn load_config_from_str(toml_content: &str) -> Result<TunelinkConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(TunelinkConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<TunelinkConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(TunelinkConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Create the environment variable provider using explicit `map()` for
/// section-to-dot mapping.
///
/// Uses `Env::map()` NOT `Env::split("_")` to avoid ambiguity with
/// underscore-containing key names: `TUNELINK_LINE_CHANNEL_TOKEN` must map
/// to `line.channel_token`, not `line.channel.token`.
fn env_provider() -> Env {
    Env::prefixed("TUNELINK_").map(|key| {
        let key_str = key.as_str();
        let mapped = key_str
            .replacen("app_", "app.", 1)
            .replacen("server_", "server.", 1)
            .replacen("line_", "line.", 1)
            .replacen("spotify_", "spotify.", 1)
            .replacen("storage_", "storage.", 1)
            .replacen("commands_", "commands.", 1)
            .replacen("limits_", "limits.", 1);
        mapped.into()
    })
}

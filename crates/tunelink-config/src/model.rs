// SPDX-FileCopyrightText: 2026 Tunelink Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Tunelink bot.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup. The command vocabulary and workflow limits live
//! here rather than as package-level constants so tests can run the
//! dispatcher with a different vocabulary without process-global state.

use serde::{Deserialize, Serialize};

/// Top-level Tunelink configuration.
///
/// Loaded from TOML files following XDG hierarchy, with environment
/// variable overrides. All sections are optional and default to sensible
/// values; secrets obviously have no defaults and are validated at startup.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct TunelinkConfig {
    /// Process-level settings (log level).
    #[serde(default)]
    pub app: AppConfig,

    /// HTTP server bind address and public base URL.
    #[serde(default)]
    pub server: ServerConfig,

    /// Messaging-platform (LINE) credentials and endpoints.
    #[serde(default)]
    pub line: LineConfig,

    /// Music-service (Spotify) credentials and endpoints.
    #[serde(default)]
    pub spotify: SpotifyConfig,

    /// Account store settings.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Text-command vocabulary the dispatcher reacts to.
    #[serde(default)]
    pub commands: CommandsConfig,

    /// Workflow limits (page sizes, stride, playlist size).
    #[serde(default)]
    pub limits: LimitsConfig,
}

/// Process-level configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// HTTP server configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    /// Host address to bind.
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Externally reachable base URL, used to build the signup link and the
    /// OAuth redirect URI (e.g. "https://bot.example.com"). No trailing
    /// slash.
    #[serde(default)]
    pub public_base_url: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            public_base_url: String::new(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

/// Messaging-platform configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LineConfig {
    /// Channel access token for the bot.
    #[serde(default)]
    pub channel_token: Option<String>,

    /// Rich menu shown to users who have not linked an account.
    #[serde(default)]
    pub rich_menu_login: Option<String>,

    /// Rich menu shown to linked users.
    #[serde(default)]
    pub rich_menu_default: Option<String>,

    /// Messaging API base URL (override for tests).
    #[serde(default = "default_line_api_base")]
    pub api_base_url: String,
}

impl Default for LineConfig {
    fn default() -> Self {
        Self {
            channel_token: None,
            rich_menu_login: None,
            rich_menu_default: None,
            api_base_url: default_line_api_base(),
        }
    }
}

fn default_line_api_base() -> String {
    "https://api.line.me".to_string()
}

/// Music-service configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SpotifyConfig {
    /// OAuth client id.
    #[serde(default)]
    pub client_id: Option<String>,

    /// OAuth client secret.
    #[serde(default)]
    pub client_secret: Option<String>,

    /// Accounts-service base URL (authorize + token endpoints).
    #[serde(default = "default_spotify_accounts_base")]
    pub accounts_base_url: String,

    /// REST API base URL (override for tests).
    #[serde(default = "default_spotify_api_base")]
    pub api_base_url: String,
}

impl Default for SpotifyConfig {
    fn default() -> Self {
        Self {
            client_id: None,
            client_secret: None,
            accounts_base_url: default_spotify_accounts_base(),
            api_base_url: default_spotify_api_base(),
        }
    }
}

fn default_spotify_accounts_base() -> String {
    "https://accounts.spotify.com".to_string()
}

fn default_spotify_api_base() -> String {
    "https://api.spotify.com".to_string()
}

/// Account store configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    /// Path to the SQLite database file.
    #[serde(default = "default_database_path")]
    pub database_path: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
        }
    }
}

fn default_database_path() -> String {
    "tunelink.db".to_string()
}

/// The text-command vocabulary.
///
/// Matching happens after trimming and case-folding the inbound text, so
/// values here should be lowercase.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct CommandsConfig {
    #[serde(default = "default_cmd_signup")]
    pub signup: String,
    #[serde(default = "default_cmd_echo")]
    pub echo: String,
    #[serde(default = "default_cmd_top_tracks")]
    pub top_tracks: String,
    #[serde(default = "default_cmd_top_artists")]
    pub top_artists: String,
    #[serde(default = "default_cmd_create_playlist")]
    pub create_playlist: String,
    #[serde(default = "default_cmd_random_track")]
    pub random_track: String,
}

impl Default for CommandsConfig {
    fn default() -> Self {
        Self {
            signup: default_cmd_signup(),
            echo: default_cmd_echo(),
            top_tracks: default_cmd_top_tracks(),
            top_artists: default_cmd_top_artists(),
            create_playlist: default_cmd_create_playlist(),
            random_track: default_cmd_random_track(),
        }
    }
}

fn default_cmd_signup() -> String {
    "signup".to_string()
}

fn default_cmd_echo() -> String {
    "echo".to_string()
}

fn default_cmd_top_tracks() -> String {
    "my top tracks".to_string()
}

fn default_cmd_top_artists() -> String {
    "my top artists".to_string()
}

fn default_cmd_create_playlist() -> String {
    "create playlist".to_string()
}

fn default_cmd_random_track() -> String {
    "random track".to_string()
}

/// Workflow limits.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LimitsConfig {
    /// Tracks shown in the top-tracks receipt.
    #[serde(default = "default_top_tracks_limit")]
    pub top_tracks: usize,

    /// Artists shown in the top-artists carousel (the rendering format
    /// caps carousels at 10 children).
    #[serde(default = "default_top_artists_limit")]
    pub top_artists: usize,

    /// Page size for the recently-played history fetch.
    #[serde(default = "default_recently_played_page")]
    pub recently_played_page: usize,

    /// Stride for seed sampling over recent-play history.
    #[serde(default = "default_seed_stride")]
    pub seed_stride: usize,

    /// Number of recommended tracks in a generated playlist.
    #[serde(default = "default_playlist_size")]
    pub playlist_size: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            top_tracks: default_top_tracks_limit(),
            top_artists: default_top_artists_limit(),
            recently_played_page: default_recently_played_page(),
            seed_stride: default_seed_stride(),
            playlist_size: default_playlist_size(),
        }
    }
}

fn default_top_tracks_limit() -> usize {
    5
}

fn default_top_artists_limit() -> usize {
    10
}

fn default_recently_played_page() -> usize {
    50
}

fn default_seed_stride() -> usize {
    10
}

fn default_playlist_size() -> usize {
    25
}

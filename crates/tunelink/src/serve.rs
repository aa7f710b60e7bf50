// SPDX-FileCopyrightText: 2026 Tunelink Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `tunelink serve` command implementation.
//!
//! Wires the SQLite account store, the music-service clients, the
//! messaging channel and the dispatcher together, then hands the result
//! to the gateway. Configuration is already validated when this runs.

use std::sync::Arc;

use tracing::info;

use tunelink_bot::Dispatcher;
use tunelink_config::TunelinkConfig;
use tunelink_core::{
    AccountRepository, MusicService, ReplyChannel, TokenProvider, TunelinkError,
};
use tunelink_gateway::GatewayState;
use tunelink_line::LineClient;
use tunelink_spotify::{FetchLimits, SpotifyAuth, SpotifyClient};
use tunelink_storage::{Database, SqliteAccountStore};

/// Runs the `tunelink serve` command.
pub async fn run_serve(config: TunelinkConfig) -> Result<(), TunelinkError> {
    init_tracing(&config.app.log_level);

    let channel_token = config
        .line
        .channel_token
        .as_deref()
        .ok_or_else(|| TunelinkError::Config("line.channel_token is required".into()))?;
    let client_id = config
        .spotify
        .client_id
        .as_deref()
        .ok_or_else(|| TunelinkError::Config("spotify.client_id is required".into()))?;
    let client_secret = config
        .spotify
        .client_secret
        .as_deref()
        .ok_or_else(|| TunelinkError::Config("spotify.client_secret is required".into()))?;

    let db = Database::open(&config.storage.database_path).await?;
    let accounts: Arc<dyn AccountRepository> = Arc::new(SqliteAccountStore::new(db));

    let channel: Arc<dyn ReplyChannel> =
        Arc::new(LineClient::new(&config.line.api_base_url, channel_token)?);

    let auth = Arc::new(SpotifyAuth::new(
        client_id,
        client_secret,
        &config.spotify.accounts_base_url,
        &config.server.public_base_url,
    )?);
    let tokens: Arc<dyn TokenProvider> = auth.clone();

    let music: Arc<dyn MusicService> = Arc::new(SpotifyClient::new(
        &config.spotify.api_base_url,
        FetchLimits {
            recently_played_page: config.limits.recently_played_page,
            seed_stride: config.limits.seed_stride,
            playlist_size: config.limits.playlist_size,
        },
    )?);

    let dispatcher = Arc::new(Dispatcher::new(
        channel.clone(),
        music.clone(),
        accounts.clone(),
        tokens.clone(),
        &config.commands,
        config.limits.clone(),
        &config.server.public_base_url,
    ));

    let state = GatewayState {
        dispatcher,
        channel,
        accounts,
        tokens,
        music,
        auth,
        rich_menu_default: config.line.rich_menu_default.clone(),
    };

    info!("tunelink starting");
    tunelink_gateway::serve(&config.server.host, config.server.port, state).await
}

/// Initializes the tracing subscriber, honoring `RUST_LOG` when set.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("tunelink={log_level},warn")));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}

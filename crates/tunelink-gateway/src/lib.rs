// SPDX-FileCopyrightText: 2026 Tunelink Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP gateway for the Tunelink bot.
//!
//! Three surfaces: the webhook endpoint the chat platform delivers events
//! to, the signup redirect that starts OAuth account linking, and the
//! OAuth callback that completes it. The agent logic itself lives in
//! `tunelink-bot`; this crate only adapts HTTP to it.

pub mod handlers;
pub mod state;

pub use state::GatewayState;

use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;
use tracing::info;

use tunelink_core::TunelinkError;

/// Builds the gateway router over the shared state.
pub fn router(state: GatewayState) -> Router {
    Router::new()
        .route("/", get(handlers::get_root))
        .route("/health", get(handlers::get_health))
        .route("/line-callback", post(handlers::post_webhook))
        .route("/signup", get(handlers::get_signup))
        .route("/spotify-callback", get(handlers::get_oauth_callback))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Binds and serves until ctrl-c.
pub async fn serve(host: &str, port: u16, state: GatewayState) -> Result<(), TunelinkError> {
    let addr = format!("{host}:{port}");
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| TunelinkError::Internal(format!("failed to bind {addr}: {e}")))?;

    info!("gateway listening on {addr}");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| TunelinkError::Internal(format!("gateway server error: {e}")))?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "shutdown signal listener failed");
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use axum::body::Bytes;
    use axum::extract::{Query, State};
    use axum::http::StatusCode;
    use axum_extra::extract::cookie::{Cookie, CookieJar};

    use tunelink_bot::Dispatcher;
    use tunelink_config::{CommandsConfig, LimitsConfig};
    use tunelink_core::{
        Account, AccountRepository, Album, Artist, MusicService, Playlist, ReplyChannel,
        TokenPair, TokenProvider, Track, TunelinkError, UserProfile,
    };
    use tunelink_spotify::SpotifyAuth;

    use crate::handlers::{self, CallbackParams};
    use crate::state::GatewayState;

    #[derive(Default)]
    struct MockChannel {
        texts: Mutex<Vec<(String, String)>>,
        rich_menus: Mutex<Vec<(String, String)>>,
    }

    #[async_trait]
    impl ReplyChannel for MockChannel {
        async fn reply(&self, _: &str, _: serde_json::Value) -> Result<(), TunelinkError> {
            Ok(())
        }
        async fn push(&self, _: &str, _: serde_json::Value) -> Result<(), TunelinkError> {
            Ok(())
        }
        async fn reply_text(&self, reply_token: &str, text: &str) -> Result<(), TunelinkError> {
            self.texts
                .lock()
                .unwrap()
                .push((reply_token.into(), text.into()));
            Ok(())
        }
        async fn push_text(&self, chat_user_id: &str, text: &str) -> Result<(), TunelinkError> {
            self.texts
                .lock()
                .unwrap()
                .push((chat_user_id.into(), text.into()));
            Ok(())
        }
        async fn link_rich_menu(
            &self,
            chat_user_id: &str,
            rich_menu_id: &str,
        ) -> Result<(), TunelinkError> {
            self.rich_menus
                .lock()
                .unwrap()
                .push((chat_user_id.into(), rich_menu_id.into()));
            Ok(())
        }
    }

    #[derive(Default)]
    struct MockAccounts {
        stored: Mutex<Vec<Account>>,
    }

    #[async_trait]
    impl AccountRepository for MockAccounts {
        async fn create_account(&self, account: Account) -> Result<Account, TunelinkError> {
            self.stored.lock().unwrap().push(account.clone());
            Ok(account)
        }
        async fn account_by_chat_user(
            &self,
            chat_user_id: &str,
        ) -> Result<Option<Account>, TunelinkError> {
            Ok(self
                .stored
                .lock()
                .unwrap()
                .iter()
                .find(|a| a.chat_user_id == chat_user_id)
                .cloned())
        }
    }

    struct MockTokens;

    #[async_trait]
    impl TokenProvider for MockTokens {
        async fn exchange_code(&self, _code: &str) -> Result<TokenPair, TunelinkError> {
            Ok(TokenPair {
                access_token: "acc".into(),
                refresh_token: "ref".into(),
            })
        }
        async fn refresh_access_token(&self, _: &str) -> Result<String, TunelinkError> {
            Ok("acc".into())
        }
    }

    struct MockMusic;

    #[async_trait]
    impl MusicService for MockMusic {
        async fn profile(&self, _: &str) -> Result<UserProfile, TunelinkError> {
            Ok(UserProfile {
                id: "spotify-user".into(),
                display_name: "Listener".into(),
            })
        }
        async fn top_tracks(&self, _: &str, _: usize) -> Result<Vec<Track>, TunelinkError> {
            Ok(vec![])
        }
        async fn top_artists(&self, _: &str, _: usize) -> Result<Vec<Artist>, TunelinkError> {
            Ok(vec![])
        }
        async fn album(&self, _: &str, _: &str) -> Result<Album, TunelinkError> {
            Err(TunelinkError::Internal("unused".into()))
        }
        async fn albums(&self, _: &str, _: &[String]) -> Result<Vec<Album>, TunelinkError> {
            Ok(vec![])
        }
        async fn playlist(&self, _: &str, _: &str) -> Result<Playlist, TunelinkError> {
            Err(TunelinkError::Internal("unused".into()))
        }
        async fn recent_track_seeds(&self, _: &str) -> Result<Vec<String>, TunelinkError> {
            Ok(vec![])
        }
        async fn recommendations(
            &self,
            _: &str,
            _: &[String],
            _: usize,
        ) -> Result<Vec<Track>, TunelinkError> {
            Ok(vec![])
        }
        async fn create_recommended_playlist(
            &self,
            _: &str,
            _: &str,
        ) -> Result<String, TunelinkError> {
            Ok("pl-1".into())
        }
    }

    fn test_state() -> (GatewayState, Arc<MockChannel>, Arc<MockAccounts>) {
        let channel = Arc::new(MockChannel::default());
        let accounts = Arc::new(MockAccounts::default());
        let music: Arc<dyn MusicService> = Arc::new(MockMusic);
        let tokens: Arc<dyn TokenProvider> = Arc::new(MockTokens);
        let dispatcher = Arc::new(Dispatcher::new(
            channel.clone(),
            music.clone(),
            accounts.clone(),
            tokens.clone(),
            &CommandsConfig::default(),
            LimitsConfig::default(),
            "https://bot.example.com",
        ));
        let auth = Arc::new(
            SpotifyAuth::new(
                "id",
                "secret",
                "https://accounts.example.com",
                "https://bot.example.com",
            )
            .unwrap(),
        );
        let state = GatewayState {
            dispatcher,
            channel: channel.clone(),
            accounts: accounts.clone(),
            tokens,
            music,
            auth,
            rich_menu_default: Some("rm-default".into()),
        };
        (state, channel, accounts)
    }

    fn webhook_body(text: &str) -> Bytes {
        Bytes::from(
            serde_json::json!({
                "events": [{
                    "type": "message",
                    "replyToken": "rt-1",
                    "source": {"type": "user", "userId": "U1"},
                    "message": {"id": "m1", "type": "text", "text": text}
                }]
            })
            .to_string(),
        )
    }

    #[tokio::test]
    async fn webhook_is_200_even_when_an_event_fails() {
        let (state, channel, _) = test_state();
        // U1 has no stored linkage, so "my top tracks" fails inside.
        let status =
            handlers::post_webhook(State(state), webhook_body("my top tracks")).await;
        assert_eq!(status, StatusCode::OK);

        // ...and the user got a signup prompt instead of silence.
        let texts = channel.texts.lock().unwrap();
        assert_eq!(texts.len(), 1);
        assert!(texts[0].1.contains("/signup?uid=U1"), "got: {:?}", texts[0]);
    }

    #[tokio::test]
    async fn undecodable_webhook_body_is_400() {
        let (state, _, _) = test_state();
        let status = handlers::post_webhook(State(state), Bytes::from_static(b"nope")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn oauth_callback_rejects_state_mismatch() {
        let (state, _, accounts) = test_state();
        let jar = CookieJar::new()
            .add(Cookie::new("tunelink_state", "expected"))
            .add(Cookie::new("tunelink_uid", "U1"));

        let response = handlers::get_oauth_callback(
            State(state),
            Query(CallbackParams {
                code: "c".into(),
                state: "tampered".into(),
            }),
            jar,
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(accounts.stored.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn oauth_callback_links_account_and_switches_rich_menu() {
        let (state, channel, accounts) = test_state();
        let jar = CookieJar::new()
            .add(Cookie::new("tunelink_state", "s-123"))
            .add(Cookie::new("tunelink_uid", "U1"));

        let response = handlers::get_oauth_callback(
            State(state),
            Query(CallbackParams {
                code: "auth-code".into(),
                state: "s-123".into(),
            }),
            jar,
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);

        let stored = accounts.stored.lock().unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].chat_user_id, "U1");
        assert_eq!(stored[0].service_user_id, "spotify-user");
        assert_eq!(stored[0].refresh_token, "ref");

        assert_eq!(
            *channel.rich_menus.lock().unwrap(),
            vec![("U1".to_string(), "rm-default".to_string())]
        );
    }
}

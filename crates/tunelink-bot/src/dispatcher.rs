// SPDX-FileCopyrightText: 2026 Tunelink Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Inbound event dispatch.
//!
//! One dispatcher instance handles all webhook events. Each command runs
//! the same prelude (resolve the caller's account, refresh an access
//! token), fetches what it needs from the music service, renders a message
//! and sends exactly one reply. Unrecognized text is dropped without a
//! reply. Errors propagate to the caller; the gateway decides how to react.

use std::sync::Arc;

use tracing::{debug, info, instrument};

use tunelink_config::{CommandsConfig, LimitsConfig};
use tunelink_core::{
    Account, AccountRepository, InboundEvent, MusicService, ReplyChannel, TokenProvider,
    TunelinkError,
};
use tunelink_flex::FlexMessage;
use tunelink_spotify::aggregate::{album_image_map, dedup_album_ids};

use crate::commands::{Command, CommandSet};
use crate::render;

/// Routes inbound events to command workflows.
pub struct Dispatcher {
    channel: Arc<dyn ReplyChannel>,
    music: Arc<dyn MusicService>,
    accounts: Arc<dyn AccountRepository>,
    tokens: Arc<dyn TokenProvider>,
    commands: CommandSet,
    limits: LimitsConfig,
    signup_url_base: String,
}

impl Dispatcher {
    pub fn new(
        channel: Arc<dyn ReplyChannel>,
        music: Arc<dyn MusicService>,
        accounts: Arc<dyn AccountRepository>,
        tokens: Arc<dyn TokenProvider>,
        commands: &CommandsConfig,
        limits: LimitsConfig,
        public_base_url: &str,
    ) -> Self {
        Self {
            channel,
            music,
            accounts,
            tokens,
            commands: CommandSet::from_config(commands),
            limits,
            signup_url_base: format!("{public_base_url}/signup"),
        }
    }

    /// The account-linking URL for a chat user.
    pub fn signup_url(&self, chat_user_id: &str) -> String {
        format!("{}?uid={chat_user_id}", self.signup_url_base)
    }

    /// Handles one webhook event. Non-text events are no-ops.
    pub async fn handle_event(&self, event: &InboundEvent) -> Result<(), TunelinkError> {
        match event {
            InboundEvent::Text {
                chat_user_id,
                reply_token,
                text,
            } => self.handle_text(chat_user_id, reply_token, text).await,
            InboundEvent::Other => Ok(()),
        }
    }

    #[instrument(skip(self, text), fields(user = %chat_user_id))]
    async fn handle_text(
        &self,
        chat_user_id: &str,
        reply_token: &str,
        text: &str,
    ) -> Result<(), TunelinkError> {
        let Some(command) = self.commands.parse(text) else {
            debug!("unrecognized text, ignoring");
            return Ok(());
        };
        info!(?command, "dispatching");

        match command {
            Command::Signup => {
                self.channel
                    .reply_text(reply_token, &self.signup_url(chat_user_id))
                    .await
            }
            Command::Echo => self.channel.reply_text(reply_token, text).await,
            Command::TopTracks => self.top_tracks(chat_user_id, reply_token).await,
            Command::TopArtists => self.top_artists(chat_user_id, reply_token).await,
            Command::CreatePlaylist => self.create_playlist(chat_user_id, reply_token).await,
            Command::RandomTrack => self.random_track(chat_user_id, reply_token).await,
        }
    }

    /// Resolves the caller's linkage and mints a fresh access token.
    async fn access_token(&self, chat_user_id: &str) -> Result<(Account, String), TunelinkError> {
        let account = self
            .accounts
            .account_by_chat_user(chat_user_id)
            .await?
            .ok_or_else(|| TunelinkError::AccountNotLinked {
                chat_user_id: chat_user_id.to_string(),
            })?;
        let token = self
            .tokens
            .refresh_access_token(&account.refresh_token)
            .await?;
        Ok((account, token))
    }

    async fn top_tracks(&self, chat_user_id: &str, reply_token: &str) -> Result<(), TunelinkError> {
        let (_, token) = self.access_token(chat_user_id).await?;
        let tracks = self.music.top_tracks(&token, self.limits.top_tracks).await?;
        let album_ids = dedup_album_ids(&tracks);
        let albums = self.music.albums(&token, &album_ids).await?;
        let covers = album_image_map(&albums);
        let receipt = render::top_tracks_receipt(&tracks, &covers);
        self.channel.reply(reply_token, receipt.to_message()).await
    }

    async fn top_artists(
        &self,
        chat_user_id: &str,
        reply_token: &str,
    ) -> Result<(), TunelinkError> {
        let (_, token) = self.access_token(chat_user_id).await?;
        let artists = self
            .music
            .top_artists(&token, self.limits.top_artists)
            .await?;
        let carousel = render::top_artists_carousel(&artists)?;
        self.channel.reply(reply_token, carousel.to_message()).await
    }

    async fn create_playlist(
        &self,
        chat_user_id: &str,
        reply_token: &str,
    ) -> Result<(), TunelinkError> {
        let (account, token) = self.access_token(chat_user_id).await?;
        let playlist_id = self
            .music
            .create_recommended_playlist(&token, &account.service_user_id)
            .await?;
        let playlist = self.music.playlist(&token, &playlist_id).await?;
        let bubble = render::playlist_bubble(&playlist);
        self.channel.reply(reply_token, bubble.to_message()).await
    }

    async fn random_track(
        &self,
        chat_user_id: &str,
        reply_token: &str,
    ) -> Result<(), TunelinkError> {
        let (_, token) = self.access_token(chat_user_id).await?;
        let seeds = self.music.recent_track_seeds(&token).await?;
        let tracks = self.music.recommendations(&token, &seeds, 1).await?;
        let Some(track) = tracks.first() else {
            return self
                .channel
                .reply_text(reply_token, "Nothing to recommend right now, play some music first!")
                .await;
        };
        let album = self.music.album(&token, &track.album.id).await?;
        let bubble = render::track_bubble(track, &album);
        self.channel.reply(reply_token, bubble.to_message()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use chrono::Utc;

    use tunelink_core::{Album, Artist, Image, ItemRef, Playlist, TokenPair, Track, UserProfile};

    #[derive(Debug, Clone, PartialEq, Eq)]
    enum Sent {
        Reply { token: String, message: serde_json::Value },
        ReplyText { token: String, text: String },
        Push { to: String },
    }

    #[derive(Default)]
    struct MockChannel {
        sent: Mutex<Vec<Sent>>,
    }

    #[async_trait]
    impl ReplyChannel for MockChannel {
        async fn reply(
            &self,
            reply_token: &str,
            message: serde_json::Value,
        ) -> Result<(), TunelinkError> {
            self.sent.lock().unwrap().push(Sent::Reply {
                token: reply_token.into(),
                message,
            });
            Ok(())
        }

        async fn push(
            &self,
            chat_user_id: &str,
            _message: serde_json::Value,
        ) -> Result<(), TunelinkError> {
            self.sent.lock().unwrap().push(Sent::Push {
                to: chat_user_id.into(),
            });
            Ok(())
        }

        async fn reply_text(&self, reply_token: &str, text: &str) -> Result<(), TunelinkError> {
            self.sent.lock().unwrap().push(Sent::ReplyText {
                token: reply_token.into(),
                text: text.into(),
            });
            Ok(())
        }

        async fn push_text(&self, chat_user_id: &str, _text: &str) -> Result<(), TunelinkError> {
            self.sent.lock().unwrap().push(Sent::Push {
                to: chat_user_id.into(),
            });
            Ok(())
        }

        async fn link_rich_menu(
            &self,
            _chat_user_id: &str,
            _rich_menu_id: &str,
        ) -> Result<(), TunelinkError> {
            Ok(())
        }
    }

    struct MockAccounts {
        account: Option<Account>,
    }

    #[async_trait]
    impl AccountRepository for MockAccounts {
        async fn create_account(&self, account: Account) -> Result<Account, TunelinkError> {
            Ok(account)
        }

        async fn account_by_chat_user(
            &self,
            _chat_user_id: &str,
        ) -> Result<Option<Account>, TunelinkError> {
            Ok(self.account.clone())
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

        async fn refresh_access_token(&self, _refresh_token: &str) -> Result<String, TunelinkError> {
            Ok("fresh-token".into())
        }
    }

    #[derive(Default)]
    struct MockMusic {
        calls: Mutex<Vec<String>>,
        fail_playlist_creation: bool,
        recommendation_count: usize,
    }

    fn track(id: &str, album_id: &str) -> Track {
        Track {
            id: id.into(),
            name: format!("track {id}"),
            artists: vec![ItemRef {
                id: "a".into(),
                name: "Artist".into(),
            }],
            album: ItemRef {
                id: album_id.into(),
                name: "Album".into(),
            },
            duration_ms: 125_000,
            external_url: format!("https://open.spotify.com/track/{id}"),
            uri: format!("spotify:track:{id}"),
        }
    }

    #[async_trait]
    impl MusicService for MockMusic {
        async fn profile(&self, _t: &str) -> Result<UserProfile, TunelinkError> {
            Ok(UserProfile {
                id: "spotify-user".into(),
                display_name: "Listener".into(),
            })
        }

        async fn top_tracks(&self, _t: &str, limit: usize) -> Result<Vec<Track>, TunelinkError> {
            self.calls.lock().unwrap().push(format!("top_tracks:{limit}"));
            Ok((0..limit)
                .map(|i| track(&format!("t{i}"), &format!("al{}", i % 2)))
                .collect())
        }

        async fn top_artists(&self, _t: &str, limit: usize) -> Result<Vec<Artist>, TunelinkError> {
            self.calls.lock().unwrap().push(format!("top_artists:{limit}"));
            Ok((0..limit)
                .map(|i| Artist {
                    id: format!("ar{i}"),
                    name: format!("Artist {i}"),
                    images: vec![],
                    external_url: String::new(),
                })
                .collect())
        }

        async fn album(&self, _t: &str, id: &str) -> Result<Album, TunelinkError> {
            self.calls.lock().unwrap().push(format!("album:{id}"));
            Ok(Album {
                id: id.into(),
                name: "Album".into(),
                images: vec![Image {
                    url: format!("https://img.example.com/{id}.jpg"),
                    width: 640,
                    height: 640,
                }],
                artists: vec![],
            })
        }

        async fn albums(&self, _t: &str, ids: &[String]) -> Result<Vec<Album>, TunelinkError> {
            self.calls
                .lock()
                .unwrap()
                .push(format!("albums:{}", ids.join(",")));
            Ok(ids
                .iter()
                .map(|id| Album {
                    id: id.clone(),
                    name: "Album".into(),
                    images: vec![Image {
                        url: format!("https://img.example.com/{id}.jpg"),
                        width: 640,
                        height: 640,
                    }],
                    artists: vec![],
                })
                .collect())
        }

        async fn playlist(&self, _t: &str, id: &str) -> Result<Playlist, TunelinkError> {
            self.calls.lock().unwrap().push(format!("playlist:{id}"));
            Ok(Playlist {
                id: id.into(),
                name: "2026-08-29 Tracks for you".into(),
                description: "Playlist created by tunelink".into(),
                images: vec![],
                external_url: format!("https://open.spotify.com/playlist/{id}"),
            })
        }

        async fn recent_track_seeds(&self, _t: &str) -> Result<Vec<String>, TunelinkError> {
            self.calls.lock().unwrap().push("seeds".into());
            Ok(vec!["s1".into(), "s2".into()])
        }

        async fn recommendations(
            &self,
            _t: &str,
            _seeds: &[String],
            limit: usize,
        ) -> Result<Vec<Track>, TunelinkError> {
            self.calls
                .lock()
                .unwrap()
                .push(format!("recommendations:{limit}"));
            Ok((0..self.recommendation_count.min(limit))
                .map(|i| track(&format!("r{i}"), "ral"))
                .collect())
        }

        async fn create_recommended_playlist(
            &self,
            _t: &str,
            service_user_id: &str,
        ) -> Result<String, TunelinkError> {
            self.calls
                .lock()
                .unwrap()
                .push(format!("create_playlist:{service_user_id}"));
            if self.fail_playlist_creation {
                return Err(TunelinkError::PartialFailure {
                    playlist_id: "pl-1".into(),
                    source: Box::new(TunelinkError::Upstream {
                        service: "spotify",
                        status: Some(500),
                        message: "server error".into(),
                    }),
                });
            }
            Ok("pl-1".into())
        }
    }

    fn linked_account() -> Account {
        Account {
            chat_user_id: "U1".into(),
            service_user_id: "spotify-user".into(),
            refresh_token: "stored-refresh".into(),
            created_at: Utc::now(),
        }
    }

    fn dispatcher(
        channel: Arc<MockChannel>,
        music: Arc<MockMusic>,
        account: Option<Account>,
    ) -> Dispatcher {
        Dispatcher::new(
            channel,
            music,
            Arc::new(MockAccounts { account }),
            Arc::new(MockTokens),
            &CommandsConfig::default(),
            LimitsConfig::default(),
            "https://bot.example.com",
        )
    }

    fn text_event(text: &str) -> InboundEvent {
        InboundEvent::Text {
            chat_user_id: "U1".into(),
            reply_token: "rt-1".into(),
            text: text.into(),
        }
    }

    #[tokio::test]
    async fn unrecognized_text_sends_nothing() {
        let channel = Arc::new(MockChannel::default());
        let music = Arc::new(MockMusic::default());
        let d = dispatcher(channel.clone(), music.clone(), Some(linked_account()));

        d.handle_event(&text_event("what is the weather")).await.unwrap();

        assert!(channel.sent.lock().unwrap().is_empty());
        assert!(music.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn signup_replies_with_link_and_skips_account_resolution() {
        let channel = Arc::new(MockChannel::default());
        let music = Arc::new(MockMusic::default());
        let d = dispatcher(channel.clone(), music.clone(), None);

        d.handle_event(&text_event("signup")).await.unwrap();

        let sent = channel.sent.lock().unwrap();
        assert_eq!(
            *sent,
            vec![Sent::ReplyText {
                token: "rt-1".into(),
                text: "https://bot.example.com/signup?uid=U1".into(),
            }]
        );
    }

    #[tokio::test]
    async fn top_tracks_builds_a_five_row_receipt() {
        let channel = Arc::new(MockChannel::default());
        let music = Arc::new(MockMusic::default());
        let d = dispatcher(channel.clone(), music.clone(), Some(linked_account()));

        d.handle_event(&text_event("my top tracks")).await.unwrap();

        // Five tracks over two albums: the batched album fetch is deduped.
        let calls = music.calls.lock().unwrap();
        assert_eq!(*calls, vec!["top_tracks:5", "albums:al0,al1"]);

        let sent = channel.sent.lock().unwrap();
        let Sent::Reply { token, message } = &sent[0] else {
            panic!("expected a flex reply, got {sent:?}");
        };
        assert_eq!(token, "rt-1");
        assert_eq!(message["type"], "flex");
        let rows = message["contents"]["body"]["contents"]
            .as_array()
            .unwrap()
            .last()
            .unwrap()["contents"]
            .as_array()
            .unwrap();
        assert_eq!(rows.len(), 5);
    }

    #[tokio::test]
    async fn top_artists_carousel_is_capped_at_ten() {
        let channel = Arc::new(MockChannel::default());
        let music = Arc::new(MockMusic::default());
        let d = dispatcher(channel.clone(), music.clone(), Some(linked_account()));

        d.handle_event(&text_event("my top artists")).await.unwrap();

        let sent = channel.sent.lock().unwrap();
        let Sent::Reply { message, .. } = &sent[0] else {
            panic!("expected a flex reply");
        };
        assert_eq!(message["contents"]["type"], "carousel");
        assert_eq!(
            message["contents"]["contents"].as_array().unwrap().len(),
            10
        );
    }

    #[tokio::test]
    async fn unlinked_user_surfaces_account_not_linked() {
        let channel = Arc::new(MockChannel::default());
        let music = Arc::new(MockMusic::default());
        let d = dispatcher(channel.clone(), music.clone(), None);

        let err = d
            .handle_event(&text_event("my top tracks"))
            .await
            .unwrap_err();
        assert!(matches!(err, TunelinkError::AccountNotLinked { .. }));
        assert!(channel.sent.lock().unwrap().is_empty());
        assert!(music.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn create_playlist_fetches_detail_then_replies() {
        let channel = Arc::new(MockChannel::default());
        let music = Arc::new(MockMusic::default());
        let d = dispatcher(channel.clone(), music.clone(), Some(linked_account()));

        d.handle_event(&text_event("create playlist")).await.unwrap();

        let calls = music.calls.lock().unwrap();
        assert_eq!(
            *calls,
            vec!["create_playlist:spotify-user", "playlist:pl-1"]
        );
        let sent = channel.sent.lock().unwrap();
        let Sent::Reply { message, .. } = &sent[0] else {
            panic!("expected a flex reply");
        };
        assert!(message.to_string().contains("Tracks for you"));
    }

    #[tokio::test]
    async fn partial_playlist_failure_sends_no_reply() {
        let channel = Arc::new(MockChannel::default());
        let music = Arc::new(MockMusic {
            fail_playlist_creation: true,
            ..Default::default()
        });
        let d = dispatcher(channel.clone(), music.clone(), Some(linked_account()));

        let err = d
            .handle_event(&text_event("create playlist"))
            .await
            .unwrap_err();
        assert!(matches!(err, TunelinkError::PartialFailure { .. }));
        assert!(channel.sent.lock().unwrap().is_empty());
        // The playlist fetch never happens after a failed creation.
        assert_eq!(*music.calls.lock().unwrap(), vec!["create_playlist:spotify-user"]);
    }

    #[tokio::test]
    async fn random_track_presents_one_recommendation() {
        let channel = Arc::new(MockChannel::default());
        let music = Arc::new(MockMusic {
            recommendation_count: 3,
            ..Default::default()
        });
        let d = dispatcher(channel.clone(), music.clone(), Some(linked_account()));

        d.handle_event(&text_event("random track")).await.unwrap();

        let calls = music.calls.lock().unwrap();
        assert_eq!(*calls, vec!["seeds", "recommendations:1", "album:ral"]);
        let sent = channel.sent.lock().unwrap();
        assert!(matches!(&sent[0], Sent::Reply { .. }));
    }

    #[tokio::test]
    async fn random_track_with_no_recommendations_replies_text() {
        let channel = Arc::new(MockChannel::default());
        let music = Arc::new(MockMusic::default());
        let d = dispatcher(channel.clone(), music.clone(), Some(linked_account()));

        d.handle_event(&text_event("random track")).await.unwrap();

        let sent = channel.sent.lock().unwrap();
        assert!(matches!(&sent[0], Sent::ReplyText { .. }));
    }

    #[tokio::test]
    async fn non_text_events_are_ignored() {
        let channel = Arc::new(MockChannel::default());
        let music = Arc::new(MockMusic::default());
        let d = dispatcher(channel.clone(), music.clone(), Some(linked_account()));

        d.handle_event(&InboundEvent::Other).await.unwrap();
        assert!(channel.sent.lock().unwrap().is_empty());
    }
}

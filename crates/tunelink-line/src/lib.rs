// SPDX-FileCopyrightText: 2026 Tunelink Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Chat-platform client crate for the Tunelink bot.
//!
//! [`LineClient`] implements the outbound [`tunelink_core::ReplyChannel`]
//! contract against the LINE messaging API; [`webhook`] decodes inbound
//! callback payloads into [`tunelink_core::InboundEvent`] values.

pub mod webhook;

use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, warn};

use tunelink_core::{ReplyChannel, TunelinkError};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const SERVICE: &str = "line";

/// Bearer-auth client for the messaging API's bot endpoints.
#[derive(Debug, Clone)]
pub struct LineClient {
    http: reqwest::Client,
    api_base_url: String,
    channel_token: String,
}

impl LineClient {
    pub fn new(
        api_base_url: impl Into<String>,
        channel_token: impl Into<String>,
    ) -> Result<Self, TunelinkError> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| TunelinkError::Internal(format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            http,
            api_base_url: api_base_url.into(),
            channel_token: channel_token.into(),
        })
    }

    async fn post(
        &self,
        path: &str,
        body: Option<&serde_json::Value>,
    ) -> Result<(), TunelinkError> {
        debug!(path, "POST");
        let mut request = self
            .http
            .post(format!("{}{path}", self.api_base_url))
            .bearer_auth(&self.channel_token);
        if let Some(body) = body {
            request = request.json(body);
        }
        let response = request.send().await.map_err(|err| {
            if err.is_timeout() {
                TunelinkError::Timeout {
                    duration: REQUEST_TIMEOUT,
                }
            } else {
                TunelinkError::Upstream {
                    service: SERVICE,
                    status: None,
                    message: err.to_string(),
                }
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            warn!(
                status = %status,
                detail = %detail,
                payload = %body.map(|b| b.to_string()).unwrap_or_default(),
                "send failed"
            );
            return Err(TunelinkError::Upstream {
                service: SERVICE,
                status: Some(status.as_u16()),
                message: detail,
            });
        }
        Ok(())
    }

    fn text_message(text: &str) -> serde_json::Value {
        serde_json::json!({"type": "text", "text": text})
    }
}

#[async_trait]
impl ReplyChannel for LineClient {
    async fn reply(
        &self,
        reply_token: &str,
        message: serde_json::Value,
    ) -> Result<(), TunelinkError> {
        self.post(
            "/v2/bot/message/reply",
            Some(&serde_json::json!({
                "replyToken": reply_token,
                "messages": [message],
            })),
        )
        .await
    }

    async fn push(
        &self,
        chat_user_id: &str,
        message: serde_json::Value,
    ) -> Result<(), TunelinkError> {
        self.post(
            "/v2/bot/message/push",
            Some(&serde_json::json!({
                "to": chat_user_id,
                "messages": [message],
            })),
        )
        .await
    }

    async fn reply_text(&self, reply_token: &str, text: &str) -> Result<(), TunelinkError> {
        self.reply(reply_token, Self::text_message(text)).await
    }

    async fn push_text(&self, chat_user_id: &str, text: &str) -> Result<(), TunelinkError> {
        self.push(chat_user_id, Self::text_message(text)).await
    }

    async fn link_rich_menu(
        &self,
        chat_user_id: &str,
        rich_menu_id: &str,
    ) -> Result<(), TunelinkError> {
        self.post(
            &format!("/v2/bot/user/{chat_user_id}/richmenu/{rich_menu_id}"),
            None,
        )
        .await
    }
}

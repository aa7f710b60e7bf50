// SPDX-FileCopyrightText: 2026 Tunelink Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Inbound webhook payload decoding.
//!
//! The callback body is a batch of events. Only text messages from known
//! users carry meaning for the bot; everything else (stickers, follows,
//! group sources) decodes to [`InboundEvent::Other`] so unknown kinds can
//! never fail the request.

use serde::Deserialize;
use tracing::debug;

use tunelink_core::{InboundEvent, TunelinkError};

#[derive(Debug, Deserialize)]
struct WebhookPayload {
    #[serde(default)]
    events: Vec<WebhookEvent>,
}

#[derive(Debug, Deserialize)]
struct WebhookEvent {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default, rename = "replyToken")]
    reply_token: Option<String>,
    #[serde(default)]
    source: Option<EventSource>,
    #[serde(default)]
    message: Option<EventMessage>,
}

#[derive(Debug, Deserialize)]
struct EventSource {
    #[serde(default, rename = "userId")]
    user_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct EventMessage {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: Option<String>,
}

/// Decodes a webhook request body into events, one per entry in the batch.
pub fn decode_events(body: &[u8]) -> Result<Vec<InboundEvent>, TunelinkError> {
    let payload: WebhookPayload =
        serde_json::from_slice(body).map_err(|e| TunelinkError::MalformedResponse {
            service: "line",
            source: Box::new(e),
        })?;
    debug!(count = payload.events.len(), "decoded webhook batch");
    Ok(payload.events.into_iter().map(into_inbound).collect())
}

fn into_inbound(event: WebhookEvent) -> InboundEvent {
    if event.kind != "message" {
        return InboundEvent::Other;
    }
    let (Some(reply_token), Some(source), Some(message)) =
        (event.reply_token, event.source, event.message)
    else {
        return InboundEvent::Other;
    };
    let (Some(chat_user_id), Some(text)) = (source.user_id, message.text) else {
        return InboundEvent::Other;
    };
    if message.kind != "text" {
        return InboundEvent::Other;
    }
    InboundEvent::Text {
        chat_user_id,
        reply_token,
        text,
    }
}

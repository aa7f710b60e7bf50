// SPDX-FileCopyrightText: 2026 Tunelink Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Request handlers: webhook delivery, signup redirect, OAuth callback.

use axum::body::Bytes;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use chrono::Utc;
use rand::distributions::Alphanumeric;
use rand::Rng;
use serde::Deserialize;
use tracing::{error, info, warn};

use tunelink_core::{Account, InboundEvent, TunelinkError};
use tunelink_line::webhook;

use crate::state::GatewayState;

const STATE_COOKIE: &str = "tunelink_state";
const UID_COOKIE: &str = "tunelink_uid";

/// GET / — service banner.
pub async fn get_root() -> impl IntoResponse {
    axum::Json(serde_json::json!({
        "service": "tunelink",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// GET /health — liveness for process supervisors.
pub async fn get_health() -> impl IntoResponse {
    axum::Json(serde_json::json!({"status": "ok"}))
}

/// POST /line-callback — webhook delivery.
///
/// Always answers 200 once the payload decodes: a non-2xx would make the
/// platform redeliver the whole batch, and per-event failures are not
/// worth a replay. Failed events are logged; an unlinked user gets a
/// best-effort signup prompt instead of silence.
pub async fn post_webhook(State(state): State<GatewayState>, body: Bytes) -> StatusCode {
    let events = match webhook::decode_events(&body) {
        Ok(events) => events,
        Err(e) => {
            warn!(error = %e, "undecodable webhook payload");
            return StatusCode::BAD_REQUEST;
        }
    };

    for event in &events {
        if let Err(e) = state.dispatcher.handle_event(event).await {
            error!(error = %e, "event handling failed");
            if let (
                TunelinkError::AccountNotLinked { .. },
                InboundEvent::Text { chat_user_id, reply_token, .. },
            ) = (&e, event)
            {
                let prompt = format!(
                    "Link your account first: {}",
                    state.dispatcher.signup_url(chat_user_id)
                );
                if let Err(e) = state.channel.reply_text(reply_token, &prompt).await {
                    warn!(error = %e, "signup prompt delivery failed");
                }
            }
        }
    }
    StatusCode::OK
}

#[derive(Debug, Deserialize)]
pub struct SignupParams {
    pub uid: String,
}

/// GET /signup?uid= — starts the OAuth flow.
///
/// The random state lands in a cookie and in the authorize URL; the
/// callback compares the two. The chat user id rides along in a second
/// cookie so the callback knows which chat account to link.
pub async fn get_signup(
    State(state): State<GatewayState>,
    Query(params): Query<SignupParams>,
    jar: CookieJar,
) -> Result<(CookieJar, Redirect), Response> {
    let oauth_state: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(32)
        .map(char::from)
        .collect();

    let authorize_url = state.auth.authorize_url(&oauth_state).map_err(|e| {
        error!(error = %e, "authorize URL construction failed");
        StatusCode::INTERNAL_SERVER_ERROR.into_response()
    })?;

    let jar = jar
        .add(Cookie::new(STATE_COOKIE, oauth_state))
        .add(Cookie::new(UID_COOKIE, params.uid));
    Ok((jar, Redirect::to(&authorize_url)))
}

#[derive(Debug, Deserialize)]
pub struct CallbackParams {
    pub code: String,
    pub state: String,
}

/// GET /spotify-callback — completes the OAuth flow.
///
/// Verifies the CSRF state, exchanges the code, fetches the service
/// profile and persists the linkage. Rich-menu switch and the chat
/// confirmation are best-effort: the linkage is already stored when they
/// run.
pub async fn get_oauth_callback(
    State(state): State<GatewayState>,
    Query(params): Query<CallbackParams>,
    jar: CookieJar,
) -> Response {
    let expected_state = jar.get(STATE_COOKIE).map(|c| c.value().to_string());
    let chat_user_id = jar.get(UID_COOKIE).map(|c| c.value().to_string());

    let (Some(expected_state), Some(chat_user_id)) = (expected_state, chat_user_id) else {
        warn!("callback without signup cookies");
        return (StatusCode::BAD_REQUEST, "missing signup cookies").into_response();
    };
    if expected_state != params.state {
        warn!("state mismatch on OAuth callback");
        return (StatusCode::BAD_REQUEST, "state mismatch").into_response();
    }

    match link_account(&state, &chat_user_id, &params.code).await {
        Ok(service_user_id) => {
            info!(service_user_id, "account linked");
            (StatusCode::OK, "Account linked. You can close this page.").into_response()
        }
        Err(e) => {
            error!(error = %e, "account linking failed");
            (StatusCode::BAD_GATEWAY, "account linking failed").into_response()
        }
    }
}

async fn link_account(
    state: &GatewayState,
    chat_user_id: &str,
    code: &str,
) -> Result<String, TunelinkError> {
    let pair = state.tokens.exchange_code(code).await?;
    let profile = state.music.profile(&pair.access_token).await?;

    state
        .accounts
        .create_account(Account {
            chat_user_id: chat_user_id.to_string(),
            service_user_id: profile.id.clone(),
            refresh_token: pair.refresh_token,
            created_at: Utc::now(),
        })
        .await?;

    if let Some(rich_menu_id) = &state.rich_menu_default {
        if let Err(e) = state.channel.link_rich_menu(chat_user_id, rich_menu_id).await {
            warn!(error = %e, "rich menu switch failed");
        }
    }
    if let Err(e) = state
        .channel
        .push_text(chat_user_id, "Your account is linked, ask away!")
        .await
    {
        warn!(error = %e, "link confirmation delivery failed");
    }

    Ok(profile.id)
}

// SPDX-FileCopyrightText: 2026 Tunelink Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! OAuth token provider trait.

use async_trait::async_trait;

use crate::error::TunelinkError;
use crate::types::TokenPair;

/// Token-exchange contract against the music service's accounts endpoint.
///
/// Both calls authenticate with HTTP Basic credentials built from the
/// client-id/secret pair, encoded once per client instance.
#[async_trait]
pub trait TokenProvider: Send + Sync {
    /// Exchanges an authorization code for an access/refresh token pair.
    async fn exchange_code(&self, code: &str) -> Result<TokenPair, TunelinkError>;

    /// Derives a short-lived access token from a stored refresh token.
    async fn refresh_access_token(&self, refresh_token: &str) -> Result<String, TunelinkError>;
}

// SPDX-FileCopyrightText: 2026 Tunelink Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Tunelink chat bot.
//!
//! This crate provides the foundational error type, domain types, and
//! collaborator trait definitions used throughout the Tunelink workspace.
//! The dispatcher crate depends only on what is defined here.

pub mod error;
pub mod traits;
pub mod types;

pub use error::TunelinkError;
pub use types::{
    Account, Album, Artist, Image, InboundEvent, ItemRef, Playlist, TokenPair, Track, UserProfile,
};

pub use traits::{AccountRepository, MusicService, ReplyChannel, TokenProvider};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_variants_cover_the_workflow_taxonomy() {
        let _not_linked = TunelinkError::AccountNotLinked {
            chat_user_id: "U1".into(),
        };
        let _token = TunelinkError::TokenExchange {
            message: "bad refresh token".into(),
        };
        let _upstream = TunelinkError::Upstream {
            service: "spotify",
            status: Some(500),
            message: "boom".into(),
        };
        let _malformed = TunelinkError::MalformedResponse {
            service: "spotify",
            source: Box::new(std::io::Error::other("truncated")),
        };
        let _seeds = TunelinkError::InvalidSeedSet { count: 6, max: 5 };
        let _partial = TunelinkError::PartialFailure {
            playlist_id: "pl".into(),
            source: Box::new(TunelinkError::Internal("add failed".into())),
        };
        let _timeout = TunelinkError::Timeout {
            duration: std::time::Duration::from_secs(30),
        };
    }

    #[test]
    fn traits_are_object_safe() {
        fn _assert_repo(_: &dyn AccountRepository) {}
        fn _assert_music(_: &dyn MusicService) {}
        fn _assert_channel(_: &dyn ReplyChannel) {}
        fn _assert_tokens(_: &dyn TokenProvider) {}
    }
}

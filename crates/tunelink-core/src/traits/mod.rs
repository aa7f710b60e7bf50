// SPDX-FileCopyrightText: 2026 Tunelink Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Collaborator trait definitions for the command-dispatch pipeline.
//!
//! The dispatcher only ever sees these traits; concrete implementations
//! (Spotify client, LINE client, SQLite store) live in their own crates.
//! All traits use `#[async_trait]` for dynamic dispatch compatibility.

pub mod channel;
pub mod music;
pub mod repository;
pub mod tokens;

pub use channel::ReplyChannel;
pub use music::MusicService;
pub use repository::AccountRepository;
pub use tokens::TokenProvider;

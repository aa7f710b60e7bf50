// SPDX-FileCopyrightText: 2026 Tunelink Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Command dispatch for the Tunelink bot.
//!
//! [`commands`] maps inbound text to commands, [`render`] turns
//! music-service data into flex documents, and [`Dispatcher`] wires the
//! two together over the collaborator traits from `tunelink-core`.

pub mod commands;
pub mod dispatcher;
pub mod render;

pub use commands::{Command, CommandSet};
pub use dispatcher::Dispatcher;

// SPDX-FileCopyrightText: 2026 Tunelink Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Text-to-command mapping.
//!
//! Command phrases come from configuration; matching is exact after
//! normalization (trim plus ASCII lowercase). Anything that matches no
//! phrase is [`None`], which the dispatcher treats as a silent no-op.

use tunelink_config::CommandsConfig;

/// A recognized chat command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Reply with the account-linking URL.
    Signup,
    /// Reply with the received text verbatim.
    Echo,
    /// Render the user's top tracks as a receipt.
    TopTracks,
    /// Render the user's top artists as a carousel.
    TopArtists,
    /// Generate a recommended playlist and present it.
    CreatePlaylist,
    /// Recommend a single track and present it.
    RandomTrack,
}

/// The configured command phrases, pre-normalized once at startup.
#[derive(Debug, Clone)]
pub struct CommandSet {
    signup: String,
    echo: String,
    top_tracks: String,
    top_artists: String,
    create_playlist: String,
    random_track: String,
}

impl CommandSet {
    pub fn from_config(commands: &CommandsConfig) -> Self {
        Self {
            signup: normalize(&commands.signup),
            echo: normalize(&commands.echo),
            top_tracks: normalize(&commands.top_tracks),
            top_artists: normalize(&commands.top_artists),
            create_playlist: normalize(&commands.create_playlist),
            random_track: normalize(&commands.random_track),
        }
    }

    /// Maps a raw inbound text to a command, or `None` for unrecognized
    /// input.
    pub fn parse(&self, text: &str) -> Option<Command> {
        let text = normalize(text);
        if text == self.signup {
            Some(Command::Signup)
        } else if text == self.echo {
            Some(Command::Echo)
        } else if text == self.top_tracks {
            Some(Command::TopTracks)
        } else if text == self.top_artists {
            Some(Command::TopArtists)
        } else if text == self.create_playlist {
            Some(Command::CreatePlaylist)
        } else if text == self.random_track {
            Some(Command::RandomTrack)
        } else {
            None
        }
    }
}

fn normalize(text: &str) -> String {
    text.trim().to_ascii_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set() -> CommandSet {
        CommandSet::from_config(&CommandsConfig::default())
    }

    #[test]
    fn default_phrases_map_to_commands() {
        let set = set();
        assert_eq!(set.parse("signup"), Some(Command::Signup));
        assert_eq!(set.parse("my top tracks"), Some(Command::TopTracks));
        assert_eq!(set.parse("my top artists"), Some(Command::TopArtists));
        assert_eq!(set.parse("create playlist"), Some(Command::CreatePlaylist));
        assert_eq!(set.parse("random track"), Some(Command::RandomTrack));
    }

    #[test]
    fn matching_ignores_case_and_surrounding_whitespace() {
        let set = set();
        assert_eq!(set.parse("  My Top Tracks \n"), Some(Command::TopTracks));
        assert_eq!(set.parse("SIGNUP"), Some(Command::Signup));
    }

    #[test]
    fn unrecognized_text_is_none() {
        let set = set();
        assert_eq!(set.parse("hello there"), None);
        assert_eq!(set.parse("my top tracks please"), None);
        assert_eq!(set.parse(""), None);
    }
}

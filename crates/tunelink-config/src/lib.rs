// SPDX-FileCopyrightText: 2026 Tunelink Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration system for the Tunelink bot.
//!
//! Provides TOML configuration parsing with strict validation
//! (`deny_unknown_fields`), XDG file hierarchy lookup, and environment
//! variable overrides.
//!
//! # Usage
//!
//! ```no_run
//! let config = tunelink_config::load_and_validate().expect("config errors");
//! println!("listening on port {}", config.server.port);
//! ```

pub mod loader;
pub mod model;
pub mod validation;

pub use loader::{load_config, load_config_from_path, load_config_from_str};
pub use model::{CommandsConfig, LimitsConfig, TunelinkConfig};

use tunelink_core::TunelinkError;

/// Load configuration from the XDG hierarchy and validate it for serving.
pub fn load_and_validate() -> Result<TunelinkConfig, TunelinkError> {
    let config = loader::load_config().map_err(|e| TunelinkError::Config(e.to_string()))?;
    validation::validate_config(&config)?;
    Ok(config)
}

/// Load configuration from a TOML string and validate it for serving.
///
/// Useful for testing and explicit configuration.
pub fn load_and_validate_str(toml_content: &str) -> Result<TunelinkConfig, TunelinkError> {
    let config =
        loader::load_config_from_str(toml_content).map_err(|e| TunelinkError::Config(e.to_string()))?;
    validation::validate_config(&config)?;
    Ok(config)
}

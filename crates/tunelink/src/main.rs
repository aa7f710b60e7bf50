// SPDX-FileCopyrightText: 2026 Tunelink Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Tunelink - a chat bot bridging a messaging platform and a music service.
//!
//! This is the binary entry point.

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

mod serve;

use clap::{Parser, Subcommand};

/// Tunelink - a chat bot bridging a messaging platform and a music service.
#[derive(Parser, Debug)]
#[command(name = "tunelink", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the bot server.
    Serve,
    /// Print the effective configuration.
    Config,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Serve) => {
            let config = match tunelink_config::load_and_validate() {
                Ok(config) => config,
                Err(e) => {
                    eprintln!("tunelink: {e}");
                    std::process::exit(1);
                }
            };
            if let Err(e) = serve::run_serve(config).await {
                eprintln!("tunelink: {e}");
                std::process::exit(1);
            }
        }
        Some(Commands::Config) => {
            // Dump without serve-time validation so a half-finished config
            // can still be inspected.
            match tunelink_config::load_config() {
                Ok(config) => match serde_json::to_string_pretty(&config) {
                    Ok(rendered) => println!("{rendered}"),
                    Err(e) => {
                        eprintln!("tunelink: {e}");
                        std::process::exit(1);
                    }
                },
                Err(e) => {
                    eprintln!("tunelink: {e}");
                    std::process::exit(1);
                }
            }
        }
        None => {
            println!("tunelink: use --help for available commands");
        }
    }
}

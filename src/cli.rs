//! Command-line interface for gotak.

use clap::{Parser, Subcommand};
use gotak::BoardSource;
use std::path::PathBuf;

/// gotak - play Tak on a gotak service from the terminal
#[derive(Parser, Debug)]
#[command(name = "gotak")]
#[command(about = "Client for the gotak.app Tak service", long_about = None)]
#[command(version)]
pub struct Cli {
    /// TOML configuration file (otherwise GOTAK_* environment variables)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Service root URL
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Per-request timeout in milliseconds
    #[arg(long, global = true)]
    pub timeout_ms: Option<u64>,

    /// Where boards come from
    #[arg(long, global = true, value_enum)]
    pub board_source: Option<BoardSource>,

    /// Log raw payloads
    #[arg(long, global = true)]
    pub debug: bool,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Check that the service answers
    Ping,

    /// Create a new game
    New {
        /// Board size
        #[arg(short, long, default_value = "5")]
        size: u8,
    },

    /// Show a game's board and status
    Show {
        /// Game slug
        slug: String,
    },

    /// Place a flat stone
    Play {
        /// Game slug
        slug: String,

        /// Target square, e.g. c3
        square: String,

        /// Acting player (1 or 2); defaults to the player to move
        #[arg(long)]
        player: Option<u8>,

        /// Turn number the move applies to; defaults to the next turn
        #[arg(long)]
        turn: Option<u32>,
    },

    /// Join a game
    Join {
        /// Game slug
        slug: String,

        /// Display name
        #[arg(long)]
        name: String,
    },

    /// Print a shareable link to a game
    Link {
        /// Game slug
        slug: String,
    },
}

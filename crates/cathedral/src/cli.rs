//! Command-line interface for cathedral.

use cathedral::{DEFAULT_CONFIG_FILE, PlayerKind};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Cathedral - the tile-placement board game
#[derive(Parser, Debug)]
#[command(name = "cathedral")]
#[command(about = "Play, replay and inspect games of Cathedral", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to the config file
    #[arg(short, long, global = true, default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    /// Defer the Church's turn until both players have placed a piece
    #[arg(long, global = true)]
    pub delayed_cathedral: bool,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play a game between two seats
    Play {
        /// Who plays Light and the Church (LocalHuman or RandomComputer)
        #[arg(long)]
        light: Option<PlayerKind>,

        /// Who plays Dark (LocalHuman or RandomComputer)
        #[arg(long)]
        dark: Option<PlayerKind>,

        /// Seed for computer players
        #[arg(long)]
        seed: Option<u64>,

        /// Finish a stuck opponent's game automatically
        #[arg(long)]
        auto_build: bool,

        /// Write the move log here when the game ends
        #[arg(long)]
        save: Option<PathBuf>,
    },

    /// Replay a move log, printing the board after every move
    Replay {
        /// Move log file
        log: PathBuf,
    },

    /// Show the final position of a move log
    Show {
        /// Move log file
        log: PathBuf,
    },

    /// Print the full game state of a move log as JSON
    Snapshot {
        /// Move log file
        log: PathBuf,
    },
}

//! Cathedral - play the board game from the terminal.
//!
//! Builds on [`cathedral_rules`] with the pieces a playable game needs.
//!
//! # Architecture
//!
//! - **Players**: the [`Player`] trait with human and random computer seats
//! - **Match**: drives a game between two seats and reports [`MatchEvent`]s
//! - **Config**: seats, seed and rule variants from a TOML file
//!
//! # Example
//!
//! ```
//! use cathedral::{Match, PlayerKind, RandomComputer};
//! use cathedral_rules::{GameSettings, Owner};
//! use std::sync::mpsc;
//!
//! let (tx, _rx) = mpsc::channel();
//! let mut m = Match::new(
//!     GameSettings::standard(),
//!     PlayerKind::RandomComputer.create(Owner::Light, Some(1)),
//!     Box::new(RandomComputer::new("Dark bot", Some(2))),
//!     tx,
//! );
//! let outcome = m.run()?;
//! println!("{outcome}");
//! # Ok::<(), anyhow::Error>(())
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod config;
mod orchestrator;
mod players;

// Crate-level exports - Configuration
pub use config::{AppConfig, ConfigError, DEFAULT_CONFIG_FILE};

// Crate-level exports - Match orchestration
pub use orchestrator::{Match, MatchEvent};

// Crate-level exports - Players
pub use players::{LocalHuman, Player, PlayerKind, RandomComputer};

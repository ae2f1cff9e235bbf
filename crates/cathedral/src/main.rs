//! Cathedral - Unified CLI
//!
//! Play games between humans and computers, and inspect saved move logs.

#![warn(missing_docs)]

mod cli;

use anyhow::{Context, Result};
use cathedral::{AppConfig, Match};
use cathedral_rules::{Game, GameSettings, Owner};
use clap::Parser;
use cli::{Cli, Command};
use std::path::Path;
use std::sync::mpsc;
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = AppConfig::load_or_default(&cli.config)?;
    let settings = GameSettings::new(
        cli.delayed_cathedral || *config.settings().delayed_cathedral(),
        *config.settings().auto_build(),
    );

    match cli.command {
        Command::Play {
            light,
            dark,
            seed,
            auto_build,
            save,
        } => {
            let mut config = config.with_settings(GameSettings::new(
                *settings.delayed_cathedral(),
                auto_build || *settings.auto_build(),
            ));
            if let Some(light) = light {
                config = config.with_light(light);
            }
            if let Some(dark) = dark {
                config = config.with_dark(dark);
            }
            if let Some(seed) = seed {
                config = config.with_seed(seed);
            }
            run_play(&config, save.as_deref())
        }
        Command::Replay { log } => run_replay(&log, settings),
        Command::Show { log } => run_show(&log, settings),
        Command::Snapshot { log } => run_snapshot(&log, settings),
    }
}

/// Play a match between the configured seats
#[instrument(skip(config))]
fn run_play(config: &AppConfig, save: Option<&Path>) -> Result<()> {
    info!(light = %config.light(), dark = %config.dark(), "Starting Cathedral match");

    let (event_tx, event_rx) = mpsc::channel();
    let mut session = Match::new(
        *config.settings(),
        config.light().create(Owner::Light, *config.seed()),
        config.dark().create(Owner::Dark, *config.seed()),
        event_tx,
    );

    loop {
        let more = session.step()?;
        for event in event_rx.try_iter() {
            println!("{event}");
        }
        if !more {
            break;
        }
    }

    let game = session.into_game();
    println!("\n{}", game.board());

    if let Some(path) = save {
        std::fs::write(path, game.log() + "\n")
            .with_context(|| format!("Failed to save move log to {}", path.display()))?;
        info!(path = %path.display(), "Move log saved");
    }
    Ok(())
}

/// Replay a move log, printing the board after every move
#[instrument(skip(settings))]
fn run_replay(log: &Path, settings: GameSettings) -> Result<()> {
    let full = load_log(log, settings)?;

    let mut game = Game::new(settings);
    for piece in full.build_history() {
        let placement = game.place_piece(*piece);
        println!("{}. {} ({})", game.build_history().len(), piece.log(), piece);
        if placement.captured_anything() {
            println!(
                "   claimed {} tiles, destroyed {}",
                placement.claimed.len(),
                placement.destroyed.len()
            );
        }
        println!("{}\n", game.board());
    }
    print_status(&game);
    Ok(())
}

/// Show the final position of a move log
#[instrument(skip(settings))]
fn run_show(log: &Path, settings: GameSettings) -> Result<()> {
    let game = load_log(log, settings)?;
    println!("{}\n", game.board());
    for owner in Owner::PLAYERS {
        println!(
            "{owner}: {} claimed, {} unbuilt ({} remaining)",
            game.claimed(owner).len(),
            game.unbuilt(owner).len(),
            game.player_score(owner)
        );
    }
    print_status(&game);
    Ok(())
}

/// Print the full game state of a move log as JSON
#[instrument(skip(settings))]
fn run_snapshot(log: &Path, settings: GameSettings) -> Result<()> {
    let game = load_log(log, settings)?;
    let json = serde_json::to_string_pretty(&game.snapshot())
        .context("Failed to serialize snapshot")?;
    println!("{json}");
    Ok(())
}

fn load_log(path: &Path, settings: GameSettings) -> Result<Game> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read move log {}", path.display()))?;
    let game = Game::from_log(&text, settings)
        .with_context(|| format!("Failed to replay {}", path.display()))?;
    info!(moves = game.build_history().len(), "Move log replayed");
    Ok(game)
}

fn print_status(game: &Game) {
    match (game.next_turn(), game.calculate_winner()) {
        (_, Some(outcome)) => println!("{outcome}"),
        (Some(owner), None) => println!("{owner} to move"),
        (None, None) => println!("Game over"),
    }
}

//! Match orchestration between two players.

use crate::players::Player;
use anyhow::{Context, Result, anyhow};
use cathedral_rules::{Building, Game, GameSettings, Outcome, Owner, Piece};
use std::sync::mpsc;
use tracing::{debug, info, instrument, warn};

/// Messages sent from the match to whoever is watching it.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum MatchEvent {
    /// A seat chose a move and it was placed.
    #[display("{player}: {piece}")]
    MovePlayed {
        /// Name of the seat's player.
        player: String,
        /// What was placed.
        piece: Piece,
    },
    /// A stuck player's move was made for them.
    #[display("auto-built {piece}")]
    AutoBuilt {
        /// What was placed.
        piece: Piece,
    },
    /// The last placement enclosed territory.
    #[display("{owner} claimed {claimed} tiles, destroying {}", destroyed.len())]
    Captured {
        /// Who claimed.
        owner: Owner,
        /// Number of tiles claimed.
        claimed: usize,
        /// Pieces removed from the board.
        destroyed: Vec<Piece>,
    },
    /// A player has no legal placement and passes.
    #[display("{owner} cannot move and passes")]
    TurnSkipped {
        /// Who passes.
        owner: Owner,
    },
    /// Neither player can move.
    #[display("Game over: {outcome}")]
    GameOver {
        /// Final result.
        outcome: Outcome,
    },
}

/// Drives one game between a Light seat and a Dark seat.
///
/// The Light seat also plays the Church's Cathedral turn.
pub struct Match {
    game: Game,
    light: Box<dyn Player>,
    dark: Box<dyn Player>,
    event_tx: mpsc::Sender<MatchEvent>,
}

impl Match {
    /// Creates a match on a new game.
    pub fn new(
        settings: GameSettings,
        light: Box<dyn Player>,
        dark: Box<dyn Player>,
        event_tx: mpsc::Sender<MatchEvent>,
    ) -> Self {
        Self::resume(Game::new(settings), light, dark, event_tx)
    }

    /// Creates a match continuing an existing game.
    pub fn resume(
        game: Game,
        light: Box<dyn Player>,
        dark: Box<dyn Player>,
        event_tx: mpsc::Sender<MatchEvent>,
    ) -> Self {
        Self {
            game,
            light,
            dark,
            event_tx,
        }
    }

    /// The game being played.
    pub fn game(&self) -> &Game {
        &self.game
    }

    /// Ends the match, handing back the game.
    pub fn into_game(self) -> Game {
        self.game
    }

    /// Plays one turn. Returns `false` once the game is over.
    ///
    /// # Errors
    ///
    /// A seat failed to produce a move, or produced an illegal one.
    #[instrument(skip(self), fields(moves = self.game.build_history().len()))]
    pub fn step(&mut self) -> Result<bool> {
        let Some(owner) = self.game.next_turn() else {
            return Ok(false);
        };

        let opponent_stuck = owner.is_player() && !self.game.can_make_move(owner.opponent());
        if opponent_stuck {
            self.emit(MatchEvent::TurnSkipped {
                owner: owner.opponent(),
            });
        }

        let (piece, auto) = if opponent_stuck && *self.game.settings().auto_build() {
            (self.auto_move(owner)?, true)
        } else {
            let seat = match owner {
                Owner::Dark => &mut self.dark,
                Owner::Light | Owner::Church => &mut self.light,
            };
            debug!(player = seat.name(), %owner, "Waiting for move");
            (seat.next_move(&self.game)?, false)
        };

        if piece.owner != owner {
            return Err(anyhow!("{owner} to move but {} was offered", piece.owner));
        }

        let placement = self
            .game
            .try_place(piece.building, piece.owner, piece.direction, piece.anchor)
            .inspect_err(|e| warn!(%piece, error = %e, "Seat offered an illegal move"))
            .with_context(|| format!("{} offered an illegal move", self.seat_name(owner)))?;

        let event = if auto {
            MatchEvent::AutoBuilt { piece }
        } else {
            MatchEvent::MovePlayed {
                player: self.seat_name(owner),
                piece,
            }
        };
        self.emit(event);

        if placement.captured_anything() {
            self.emit(MatchEvent::Captured {
                owner,
                claimed: placement.claimed.len(),
                destroyed: placement.destroyed.into_iter().collect(),
            });
        }

        if self.game.is_over() {
            let outcome = self
                .game
                .calculate_winner()
                .context("game ended while a player could still move")?;
            info!(%outcome, "Match finished");
            self.emit(MatchEvent::GameOver { outcome });
            return Ok(false);
        }
        Ok(true)
    }

    /// Plays until neither player can move.
    pub fn run(&mut self) -> Result<Outcome> {
        info!("Starting match");
        while self.step()? {}
        self.game
            .calculate_winner()
            .context("match stopped before the game ended")
    }

    /// First legal placement of the first placeable building, in catalog
    /// order.
    fn auto_move(&self, owner: Owner) -> Result<Piece> {
        Building::PLAYER_BUILDINGS
            .into_iter()
            .filter(|building| self.game.unbuilt(owner).contains(building))
            .find_map(|building| {
                self.game
                    .legal_placements(building, owner)
                    .first()
                    .map(|&(direction, anchor)| Piece::new(owner, building, direction, anchor))
            })
            .ok_or_else(|| anyhow!("{owner} has nothing left to auto-build"))
    }

    fn seat_name(&self, owner: Owner) -> String {
        match owner {
            Owner::Dark => self.dark.name().to_string(),
            Owner::Light | Owner::Church => self.light.name().to_string(),
        }
    }

    fn emit(&self, event: MatchEvent) {
        debug!(%event, "Match event");
        // A watcher that hung up does not stop the match.
        let _ = self.event_tx.send(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::players::RandomComputer;
    use cathedral_rules::{Address, Direction};

    /// Replays a fixed list of pieces.
    struct Scripted {
        moves: std::vec::IntoIter<Piece>,
    }

    impl Scripted {
        fn new(moves: Vec<Piece>) -> Box<dyn Player> {
            Box::new(Self {
                moves: moves.into_iter(),
            })
        }
    }

    impl Player for Scripted {
        fn next_move(&mut self, _game: &Game) -> Result<Piece> {
            self.moves.next().context("script exhausted")
        }

        fn name(&self) -> &str {
            "Script"
        }
    }

    #[test]
    fn test_light_seat_plays_church() {
        let (tx, rx) = mpsc::channel();
        let cathedral =
            Piece::new(Owner::Church, Building::Cathedral, Direction::East, Address::new(3, 0));
        let mut m = Match::new(
            GameSettings::standard(),
            Scripted::new(vec![cathedral]),
            Box::new(RandomComputer::new("Bot", Some(5))),
            tx,
        );

        assert!(m.step().unwrap());
        assert_eq!(m.game().next_turn(), Some(Owner::Dark));
        assert_eq!(
            rx.try_iter().next(),
            Some(MatchEvent::MovePlayed {
                player: "Script".into(),
                piece: cathedral
            })
        );
    }

    #[test]
    fn test_illegal_seat_move_is_an_error() {
        let (tx, _rx) = mpsc::channel();
        let wrong = Piece::new(Owner::Church, Building::Cathedral, Direction::North, Address::new(9, 9));
        let mut m = Match::new(
            GameSettings::standard(),
            Scripted::new(vec![wrong]),
            Scripted::new(vec![]),
            tx,
        );

        let err = m.step().unwrap_err();
        assert!(err.to_string().contains("illegal move"));
        assert_eq!(m.game().build_history().len(), 0);
    }

    #[test]
    fn test_random_self_play_finishes() {
        let (tx, rx) = mpsc::channel();
        let mut m = Match::new(
            GameSettings::standard(),
            Box::new(RandomComputer::new("Light", Some(1))),
            Box::new(RandomComputer::new("Dark", Some(2))),
            tx,
        );

        let outcome = m.run().unwrap();
        assert!(m.game().is_over());
        let events: Vec<_> = rx.try_iter().collect();
        assert_eq!(events.last(), Some(&MatchEvent::GameOver { outcome }));
    }

    #[test]
    fn test_auto_build_takes_over_when_opponent_stuck() {
        let (tx, rx) = mpsc::channel();
        let mut m = Match::new(
            GameSettings::new(false, true),
            Box::new(RandomComputer::new("Light", Some(3))),
            Box::new(RandomComputer::new("Dark", Some(4))),
            tx,
        );
        m.run().unwrap();

        let events: Vec<_> = rx.try_iter().collect();
        let skips = events
            .iter()
            .filter(|e| matches!(e, MatchEvent::TurnSkipped { .. }))
            .count();
        let autos = events
            .iter()
            .filter(|e| matches!(e, MatchEvent::AutoBuilt { .. }))
            .count();
        assert!(skips > 0, "seeded game never stranded a player");
        assert_eq!(skips, autos);
        for (index, event) in events.iter().enumerate() {
            if matches!(event, MatchEvent::TurnSkipped { .. }) {
                assert!(
                    matches!(events[index + 1], MatchEvent::AutoBuilt { .. }),
                    "pass at event {index} not followed by an auto-built move"
                );
            }
        }
    }
}

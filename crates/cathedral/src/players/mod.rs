//! Player trait and implementations.

mod human;
mod random;

pub use human::LocalHuman;
pub use random::RandomComputer;

use anyhow::Result;
use cathedral_rules::{Game, Owner, Piece};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Trait for players that can make moves.
pub trait Player {
    /// Chooses a piece for the owner whose turn it is.
    ///
    /// The returned piece must be legal for `game`; the match refuses
    /// anything else.
    fn next_move(&mut self, game: &Game) -> Result<Piece>;

    /// Returns the player's display name.
    fn name(&self) -> &str;
}

/// The kinds of player a seat can hold.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::IntoStaticStr,
)]
pub enum PlayerKind {
    /// Moves typed at the terminal.
    LocalHuman,
    /// Uniformly random legal moves.
    RandomComputer,
}

impl PlayerKind {
    /// Stable identifier, as written in config files.
    pub fn id(self) -> &'static str {
        self.into()
    }

    /// Human-readable name.
    pub fn display_name(self) -> &'static str {
        match self {
            PlayerKind::LocalHuman => "Local Human",
            PlayerKind::RandomComputer => "Computer",
        }
    }

    /// Creates a player of this kind for `seat`.
    ///
    /// Humans read from stdin. Computers are seeded from `seed` when given,
    /// offset per seat so two computers do not mirror each other.
    #[instrument]
    pub fn create(self, seat: Owner, seed: Option<u64>) -> Box<dyn Player> {
        let name = format!("{} ({seat})", self.display_name());
        match self {
            PlayerKind::LocalHuman => Box::new(LocalHuman::stdio(name)),
            PlayerKind::RandomComputer => {
                let offset = match seat {
                    Owner::Dark => 1,
                    _ => 0,
                };
                Box::new(RandomComputer::new(name, seed.map(|s| s.wrapping_add(offset))))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_ids_round_trip() {
        for kind in PlayerKind::iter() {
            assert_eq!(kind.id().parse::<PlayerKind>().unwrap(), kind);
            assert_eq!(kind.to_string(), kind.id());
        }
        assert_eq!(PlayerKind::LocalHuman.id(), "LocalHuman");
        assert_eq!(PlayerKind::RandomComputer.id(), "RandomComputer");
    }

    #[test]
    fn test_unknown_id_is_rejected() {
        assert!("NetworkPeer".parse::<PlayerKind>().is_err());
    }

    #[test]
    fn test_created_player_is_named_for_seat() {
        let player = PlayerKind::RandomComputer.create(Owner::Dark, Some(3));
        assert_eq!(player.name(), "Computer (Dark)");
    }
}

//! Full-state snapshot of a game.
//!
//! The move log is enough to rebuild any game; a snapshot instead records
//! every field so a game can be stored and restored without replaying it.
//! Restoring checks that the recorded fields agree with each other.

use crate::board::Board;
use crate::building::Building;
use crate::geometry::Address;
use crate::invariants::{InvariantSet, InvariantViolation, RulesInvariants};
use crate::owner::Owner;
use crate::piece::Piece;
use crate::settings::GameSettings;
use crate::Game;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::{instrument, warn};

/// Serializable copy of every field of a [`Game`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    /// Rule variants.
    pub settings: GameSettings,
    /// The board.
    pub board: Board,
    /// Light's unbuilt buildings.
    pub light_unbuilt: BTreeSet<Building>,
    /// Dark's unbuilt buildings.
    pub dark_unbuilt: BTreeSet<Building>,
    /// Standing pieces.
    pub built_pieces: BTreeSet<Piece>,
    /// Every piece ever placed, oldest first.
    pub build_history: Vec<Piece>,
    /// Whether the Church has moved.
    pub cathedral_built: bool,
    /// Light's claimed empty territory.
    pub light_claimed: BTreeSet<Address>,
    /// Dark's claimed empty territory.
    pub dark_claimed: BTreeSet<Address>,
    /// Who moves next; `None` once the game is over.
    pub next_turn: Option<Owner>,
}

/// Why a snapshot could not be restored.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum SnapshotError {
    /// The board does not have 100 tiles.
    #[display("board is not 10x10")]
    MalformedBoard,
    /// The Church is to move but the Cathedral is already built.
    #[display("Church to move after the Cathedral was built")]
    ChurchTurnAfterCathedral,
    /// A recorded piece could never have been placed: its owner may not
    /// build it, or its footprint leaves the board.
    #[display("impossible piece: {_0}")]
    ImpossiblePiece(Piece),
    /// The recorded fields disagree.
    #[display("inconsistent snapshot: {}", _0.iter().map(|v| v.description.as_str()).collect::<Vec<_>>().join("; "))]
    Inconsistent(Vec<InvariantViolation>),
}

impl std::error::Error for SnapshotError {}

impl From<&Game> for GameSnapshot {
    fn from(game: &Game) -> Self {
        Self {
            settings: game.settings,
            board: game.board.clone(),
            light_unbuilt: game.light_unbuilt.clone(),
            dark_unbuilt: game.dark_unbuilt.clone(),
            built_pieces: game.built_pieces.clone(),
            build_history: game.build_history.clone(),
            cathedral_built: game.cathedral_built,
            light_claimed: game.light_claimed.clone(),
            dark_claimed: game.dark_claimed.clone(),
            next_turn: game.next_turn,
        }
    }
}

impl TryFrom<GameSnapshot> for Game {
    type Error = SnapshotError;

    #[instrument(skip_all, fields(moves = snapshot.build_history.len()))]
    fn try_from(snapshot: GameSnapshot) -> Result<Self, Self::Error> {
        if !snapshot.board.is_well_formed() {
            return Err(SnapshotError::MalformedBoard);
        }
        if snapshot.cathedral_built && snapshot.next_turn == Some(Owner::Church) {
            return Err(SnapshotError::ChurchTurnAfterCathedral);
        }
        if let Some(piece) = snapshot.pieces().find(|piece| !is_possible(piece)) {
            warn!(%piece, "Snapshot records an impossible piece");
            return Err(SnapshotError::ImpossiblePiece(*piece));
        }

        let game = Game {
            settings: snapshot.settings,
            board: snapshot.board,
            light_unbuilt: snapshot.light_unbuilt,
            dark_unbuilt: snapshot.dark_unbuilt,
            built_pieces: snapshot.built_pieces,
            build_history: snapshot.build_history,
            cathedral_built: snapshot.cathedral_built,
            light_claimed: snapshot.light_claimed,
            dark_claimed: snapshot.dark_claimed,
            next_turn: snapshot.next_turn,
        };

        RulesInvariants::check_all(&game).map_err(|violations| {
            warn!(count = violations.len(), "Snapshot failed consistency checks");
            SnapshotError::Inconsistent(violations)
        })?;
        Ok(game)
    }
}

impl GameSnapshot {
    /// Every piece mentioned anywhere in the snapshot.
    fn pieces(&self) -> impl Iterator<Item = &Piece> {
        self.built_pieces
            .iter()
            .chain(&self.build_history)
            .chain(self.board.iter().filter_map(|(_, tile)| tile.piece()))
    }
}

/// Footprints are only computed for pieces that pass this.
fn is_possible(piece: &Piece) -> bool {
    piece.building.belongs_to(piece.owner) && piece.cells().all(Address::is_on_board)
}

impl Game {
    /// Captures every field of this game.
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot::from(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Direction;

    fn sample() -> Game {
        let mut game = Game::default();
        game.place(Building::Cathedral, Owner::Church, Direction::East, Address::new(3, 0));
        game.place(Building::Tower, Owner::Dark, Direction::West, Address::new(3, 2));
        game
    }

    #[test]
    fn test_snapshot_restores_identical_game() {
        let game = sample();
        let restored = Game::try_from(game.snapshot()).unwrap();
        assert_eq!(restored, game);
    }

    #[test]
    fn test_snapshot_survives_json() {
        let game = sample();
        let json = serde_json::to_string(&game.snapshot()).unwrap();
        let snapshot: GameSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(Game::try_from(snapshot).unwrap(), game);
    }

    #[test]
    fn test_inconsistent_snapshot_is_refused() {
        let mut snapshot = sample().snapshot();
        snapshot.dark_unbuilt.insert(Building::Tower);
        let err = Game::try_from(snapshot).unwrap_err();
        assert!(matches!(err, SnapshotError::Inconsistent(ref v) if v.len() == 1));
        assert!(err.to_string().contains("partition"));
    }

    #[test]
    fn test_church_turn_after_cathedral_is_refused() {
        let mut snapshot = sample().snapshot();
        snapshot.next_turn = Some(Owner::Church);
        assert_eq!(
            Game::try_from(snapshot),
            Err(SnapshotError::ChurchTurnAfterCathedral)
        );
    }

    #[test]
    fn test_church_tower_is_refused() {
        let mut snapshot = sample().snapshot();
        let tower = Piece::new(Owner::Church, Building::Tower, Direction::North, Address::ORIGIN);
        snapshot.built_pieces.insert(tower);
        assert_eq!(
            Game::try_from(snapshot),
            Err(SnapshotError::ImpossiblePiece(tower))
        );
    }

    #[test]
    fn test_piece_hanging_off_board_is_refused() {
        let mut snapshot = sample().snapshot();
        let inn = Piece::new(Owner::Light, Building::Inn, Direction::North, Address::new(9, i8::MAX));
        snapshot.build_history.push(inn);
        let err = Game::try_from(snapshot).unwrap_err();
        assert_eq!(err, SnapshotError::ImpossiblePiece(inn));
        assert!(err.to_string().starts_with("impossible piece"));
    }

    #[test]
    fn test_impossible_piece_on_a_tile_is_refused() {
        let mut snapshot = sample().snapshot();
        let cathedral = Piece::new(Owner::Dark, Building::Cathedral, Direction::North, Address::ORIGIN);
        snapshot.board.set(Address::new(9, 9), crate::board::Tile::built(cathedral));
        assert_eq!(
            Game::try_from(snapshot),
            Err(SnapshotError::ImpossiblePiece(cathedral))
        );
    }
}

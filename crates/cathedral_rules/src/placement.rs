//! What a placement changed, and why one was refused.

use crate::building::Building;
use crate::geometry::Address;
use crate::owner::Owner;
use crate::piece::Piece;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Result of a successful placement, for callers updating a view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    /// The piece that was built.
    pub piece: Piece,
    /// Addresses newly claimed by the mover.
    pub claimed: BTreeSet<Address>,
    /// Opposing pieces removed from the board.
    pub destroyed: BTreeSet<Piece>,
}

impl Placement {
    pub(crate) fn new(piece: Piece) -> Self {
        Self {
            piece,
            claimed: BTreeSet::new(),
            destroyed: BTreeSet::new(),
        }
    }

    /// Whether the placement captured anything.
    pub fn captured_anything(&self) -> bool {
        !self.claimed.is_empty() || !self.destroyed.is_empty()
    }
}

/// Reason a placement is not legal.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum PlaceError {
    /// Nobody can move any more.
    #[display("The game is over")]
    GameOver,

    /// It is someone else's turn.
    #[display("It is {expected}'s turn, not {actual}'s")]
    NotYourTurn {
        /// Whose turn it is.
        expected: Owner,
        /// Who tried to move.
        actual: Owner,
    },

    /// The Church only builds the Cathedral; players never do.
    #[display("{_0} cannot build a {_1}")]
    WrongBuilding(Owner, Building),

    /// The Cathedral is already standing (or was destroyed).
    #[display("The Cathedral has already been built")]
    CathedralAlreadyBuilt,

    /// The player has no unbuilt copy of this building.
    #[display("{_0} has no unbuilt {_1}")]
    NotInInventory(Owner, Building),

    /// A footprint cell falls off the board.
    #[display("{_0} is off the board")]
    OffBoard(Address),

    /// A footprint cell belongs to someone else.
    #[display("{_0} belongs to another owner")]
    Occupied(Address),

    /// A footprint cell already has a piece on it.
    #[display("{_0} is already built on")]
    AlreadyBuilt(Address),
}

impl std::error::Error for PlaceError {}

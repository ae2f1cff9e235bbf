//! A building standing on the board.

use crate::building::Building;
use crate::geometry::{Address, Direction};
use crate::owner::Owner;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// An immutable placed building.
///
/// Pieces compare by value: two pieces with the same owner, building,
/// facing and anchor are the same piece.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
#[display("{owner} {building} facing {direction} at {anchor}")]
pub struct Piece {
    /// Who placed it.
    pub owner: Owner,
    /// Which shape.
    pub building: Building,
    /// Its facing.
    pub direction: Direction,
    /// Where its base origin landed.
    pub anchor: Address,
}

impl Piece {
    /// Creates a piece.
    pub fn new(owner: Owner, building: Building, direction: Direction, anchor: Address) -> Self {
        Self {
            owner,
            building,
            direction,
            anchor,
        }
    }

    /// Iterates the absolute cells this piece covers.
    pub fn cells(&self) -> impl Iterator<Item = Address> {
        self.building.cells(self.owner, self.direction, self.anchor)
    }

    /// The absolute footprint.
    pub fn addresses(&self) -> BTreeSet<Address> {
        self.cells().collect()
    }
}

//! Grid coordinates and quarter-turn rotations.

use serde::{Deserialize, Serialize};
use std::ops::Add;

/// Number of columns and rows on the board.
pub const BOARD_SIZE: i8 = 10;

/// A column/row pair on (or transiently off) the board.
///
/// Off-board values are legal and show up while rotating shapes or walking
/// neighbors; they are never legal placements.
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
#[display("({col}, {row})")]
pub struct Address {
    /// Column, left to right.
    pub col: i8,
    /// Row, top to bottom.
    pub row: i8,
}

impl Address {
    /// Creates an address.
    pub const fn new(col: i8, row: i8) -> Self {
        Self { col, row }
    }

    /// The origin, used as the anchor of every base footprint.
    pub const ORIGIN: Address = Address::new(0, 0);

    /// Whether this address lies inside the 10×10 board.
    pub fn is_on_board(self) -> bool {
        (0..BOARD_SIZE).contains(&self.col) && (0..BOARD_SIZE).contains(&self.row)
    }

    /// The eight king-move neighbors, clockwise from north.
    ///
    /// No bounds filtering is done here.
    pub fn neighbors(self) -> [Address; 8] {
        let Address { col, row } = self;
        [
            Address::new(col, row - 1),
            Address::new(col + 1, row - 1),
            Address::new(col + 1, row),
            Address::new(col + 1, row + 1),
            Address::new(col, row + 1),
            Address::new(col - 1, row + 1),
            Address::new(col - 1, row),
            Address::new(col - 1, row - 1),
        ]
    }

    /// Neighbors that lie on the board.
    pub fn board_neighbors(self) -> impl Iterator<Item = Address> {
        self.neighbors().into_iter().filter(|a| a.is_on_board())
    }

    /// Maps a shape-local offset into the given facing.
    pub fn rotated(self, direction: Direction) -> Address {
        let Address { col, row } = self;
        match direction {
            Direction::North => Address::new(col, row),
            Direction::East => Address::new(-row, col),
            Direction::South => Address::new(-col, -row),
            Direction::West => Address::new(row, -col),
        }
    }

    /// Every on-board address in row-major order.
    pub fn all() -> impl Iterator<Item = Address> {
        (0..BOARD_SIZE).flat_map(|row| (0..BOARD_SIZE).map(move |col| Address::new(col, row)))
    }
}

impl Add for Address {
    type Output = Address;

    /// Sums saturate, so a result pinned at the `i8` limits is still off
    /// the board.
    fn add(self, other: Address) -> Address {
        Address::new(
            self.col.saturating_add(other.col),
            self.row.saturating_add(other.row),
        )
    }
}

/// The way a placed piece faces.
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
    strum::EnumIter,
    strum::Display,
)]
pub enum Direction {
    /// Unrotated.
    North,
    /// A quarter turn clockwise.
    East,
    /// A half turn.
    South,
    /// Three quarter turns clockwise.
    West,
}

impl Direction {
    /// All four facings, in the order placement searches try them.
    pub const CARDINAL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    /// Whether this facing swaps a shape's width and height.
    pub fn is_sideways(self) -> bool {
        matches!(self, Direction::East | Direction::West)
    }
}

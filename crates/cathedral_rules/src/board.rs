//! The 10×10 grid of tiles.

use crate::geometry::{Address, BOARD_SIZE};
use crate::owner::Owner;
use crate::piece::Piece;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Index;

/// A single board cell.
///
/// `piece.is_some()` implies `owner == piece.owner`. An owner without a
/// piece is claimed empty territory.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    owner: Option<Owner>,
    piece: Option<Piece>,
}

impl Tile {
    /// An unowned, unbuilt tile.
    pub const EMPTY: Tile = Tile {
        owner: None,
        piece: None,
    };

    /// A tile claimed by `owner` with nothing built on it.
    pub fn claimed(owner: Owner) -> Self {
        Self {
            owner: Some(owner),
            piece: None,
        }
    }

    /// A tile covered by `piece`.
    pub fn built(piece: Piece) -> Self {
        Self {
            owner: Some(piece.owner),
            piece: Some(piece),
        }
    }

    /// Owner of the tile, built or claimed.
    pub fn owner(&self) -> Option<Owner> {
        self.owner
    }

    /// The piece standing here, if any.
    pub fn piece(&self) -> Option<&Piece> {
        self.piece.as_ref()
    }

    /// Whether a piece stands here.
    pub fn is_built(&self) -> bool {
        self.piece.is_some()
    }

    /// Neither owned nor built on.
    pub fn is_free(&self) -> bool {
        self.owner.is_none() && self.piece.is_none()
    }

    /// Whether `owner` has a piece standing here.
    pub fn is_built_by(&self, owner: Owner) -> bool {
        self.is_built() && self.owner == Some(owner)
    }

    /// Whether `owner` holds this tile as empty territory.
    pub fn is_claimed_by(&self, owner: Owner) -> bool {
        !self.is_built() && self.owner == Some(owner)
    }

    fn glyph(&self) -> char {
        match self.owner {
            None => '.',
            Some(owner) if self.is_built() => owner.built_glyph(),
            Some(owner) => owner.claimed_glyph(),
        }
    }
}

/// The fixed-size game board, indexed by [`Address`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    /// Tiles in row-major order.
    tiles: Vec<Tile>,
}

impl Board {
    /// Creates an empty board.
    pub fn new() -> Self {
        Self {
            tiles: vec![Tile::EMPTY; (BOARD_SIZE as usize) * (BOARD_SIZE as usize)],
        }
    }

    fn index_of(address: Address) -> Option<usize> {
        address
            .is_on_board()
            .then(|| address.row as usize * BOARD_SIZE as usize + address.col as usize)
    }

    /// The tile at `address`, or `None` off the board.
    pub fn get(&self, address: Address) -> Option<&Tile> {
        Self::index_of(address).and_then(|i| self.tiles.get(i))
    }

    /// Replaces the tile at `address`.
    ///
    /// # Panics
    ///
    /// If `address` is off the board.
    pub fn set(&mut self, address: Address, tile: Tile) {
        let index = Self::index_of(address)
            .unwrap_or_else(|| panic!("address {address} is off the board"));
        self.tiles[index] = tile;
    }

    /// Iterates every address with its tile, row-major.
    pub fn iter(&self) -> impl Iterator<Item = (Address, &Tile)> {
        Address::all().zip(self.tiles.iter())
    }

    /// Whether the tile count matches the board dimensions.
    pub fn is_well_formed(&self) -> bool {
        self.tiles.len() == (BOARD_SIZE as usize) * (BOARD_SIZE as usize)
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Index<Address> for Board {
    type Output = Tile;

    fn index(&self, address: Address) -> &Tile {
        self.get(address)
            .unwrap_or_else(|| panic!("address {address} is off the board"))
    }
}

impl fmt::Display for Board {
    /// Column digits across the top, row digits down the side; `.` free,
    /// upper case built, lower case claimed.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, " ")?;
        for col in 0..BOARD_SIZE {
            write!(f, " {col}")?;
        }
        for row in 0..BOARD_SIZE {
            write!(f, "\n{row}")?;
            for col in 0..BOARD_SIZE {
                write!(f, " {}", self[Address::new(col, row)].glyph())?;
            }
        }
        Ok(())
    }
}

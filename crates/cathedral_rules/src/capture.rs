//! Enclosure search: which regions a player's move walls off.
//!
//! A region is grown from a start cell over king-move neighbors. The board
//! edge and the mover's own standing pieces are walls. Every other cell
//! reached must be free or belong to one single opposing piece; anything
//! else (the mover's claimed land, the opponent's claimed land, a second
//! opposing piece) means the region is still open and nothing is captured.

use crate::board::{Board, Tile};
use crate::geometry::Address;
use crate::owner::Owner;
use crate::piece::Piece;
use std::collections::BTreeSet;
use tracing::{instrument, trace};

/// A successfully enclosed region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region {
    /// Every cell to be claimed, including the captured piece's footprint.
    pub cells: BTreeSet<Address>,
    /// The single opposing piece inside the region, if any.
    pub captured: Option<Piece>,
}

/// Decides whether `tile` can join a region claimed by `owner`, committing
/// the region's one opposing piece the first time one is met.
fn can_claim(tile: &Tile, owner: Owner, captured: &mut Option<Piece>) -> bool {
    if tile.is_free() {
        return true;
    }
    if let Some(piece) = captured {
        return tile.piece() == Some(piece);
    }
    if tile.owner() == Some(owner) || !tile.is_built() {
        return false;
    }
    *captured = tile.piece().copied();
    true
}

/// Searches for an enclosed region containing `start`.
///
/// Returns `None` when the region reaches anything `owner` may not claim.
#[instrument(level = "debug", skip(board))]
pub fn find_region(board: &Board, owner: Owner, start: Address) -> Option<Region> {
    let mut cells = BTreeSet::new();
    let mut captured = None;
    let mut worklist = vec![start];

    while let Some(address) = worklist.pop() {
        if cells.contains(&address) {
            continue;
        }
        if !can_claim(&board[address], owner, &mut captured) {
            trace!(%address, "region is open");
            return None;
        }
        cells.insert(address);

        worklist.extend(
            address
                .board_neighbors()
                .filter(|n| !cells.contains(n) && !board[*n].is_built_by(owner)),
        );
    }

    trace!(cells = cells.len(), captured = ?captured, "region enclosed");
    Some(Region { cells, captured })
}

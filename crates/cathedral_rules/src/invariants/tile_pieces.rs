//! Tiles and standing pieces describe the same buildings.

use super::Invariant;
use crate::Game;

/// Invariant: every built tile carries a standing piece that covers it, with
/// the piece's owner, and every standing piece covers its whole footprint.
pub struct TilePiecesInvariant;

impl Invariant<Game> for TilePiecesInvariant {
    fn holds(game: &Game) -> bool {
        let tiles_agree = game.board().iter().all(|(address, tile)| match tile.piece() {
            None => true,
            Some(piece) => {
                tile.owner() == Some(piece.owner)
                    && game.built_pieces().contains(piece)
                    && piece.cells().any(|cell| cell == address)
            }
        });

        let pieces_agree = game.built_pieces().iter().all(|piece| {
            piece
                .cells()
                .all(|cell| game.board().get(cell).and_then(|t| t.piece()) == Some(piece))
        });

        tiles_agree && pieces_agree
    }

    fn description() -> &'static str {
        "Built tiles match standing pieces"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Tile;
    use crate::{Address, Building, Direction, Owner, Piece};

    #[test]
    fn test_holds_after_placement() {
        let mut game = Game::default();
        game.place(Building::Cathedral, Owner::Church, Direction::North, Address::new(4, 4));
        assert!(TilePiecesInvariant::holds(&game));
    }

    #[test]
    fn test_stray_piece_on_tile_violates() {
        let mut game = Game::default();
        let ghost = Piece::new(Owner::Light, Building::Tavern, Direction::North, Address::new(0, 0));
        game.board.set(Address::new(0, 0), Tile::built(ghost));
        assert!(!TilePiecesInvariant::holds(&game));
    }

    #[test]
    fn test_piece_missing_from_board_violates() {
        let mut game = Game::default();
        let ghost = Piece::new(Owner::Dark, Building::Stable, Direction::North, Address::new(2, 2));
        game.built_pieces.insert(ghost);
        assert!(!TilePiecesInvariant::holds(&game));
    }
}

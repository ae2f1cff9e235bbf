//! Claimed-address sets mirror the board.

use super::Invariant;
use crate::{Game, Owner};
use std::collections::BTreeSet;

/// Invariant: each player's claimed set is exactly the tiles that player
/// owns without a piece on them, and the Church claims nothing.
pub struct ClaimedTerritoryInvariant;

impl Invariant<Game> for ClaimedTerritoryInvariant {
    fn holds(game: &Game) -> bool {
        let players_agree = Owner::PLAYERS.into_iter().all(|owner| {
            let on_board: BTreeSet<_> = game
                .board()
                .iter()
                .filter(|(_, tile)| tile.is_claimed_by(owner))
                .map(|(address, _)| address)
                .collect();
            &on_board == game.claimed(owner)
        });

        let church_claims_nothing = !game
            .board()
            .iter()
            .any(|(_, tile)| tile.is_claimed_by(Owner::Church));

        players_agree && church_claims_nothing
    }

    fn description() -> &'static str {
        "Claimed sets match claimed tiles"
    }
}

//! Inventories account for every player building exactly once.

use super::Invariant;
use crate::{Building, Game, Owner};

/// Invariant: for each player, unbuilt buildings and standing buildings
/// partition the eleven player buildings.
pub struct InventoryInvariant;

impl Invariant<Game> for InventoryInvariant {
    fn holds(game: &Game) -> bool {
        Owner::PLAYERS.into_iter().all(|owner| {
            let unbuilt = game.unbuilt(owner);
            let mut standing: Vec<Building> = game
                .built_pieces()
                .iter()
                .filter(|piece| piece.owner == owner)
                .map(|piece| piece.building)
                .collect();
            let standing_count = standing.len();
            standing.sort();
            standing.dedup();

            standing.len() == standing_count
                && standing.iter().all(|b| !unbuilt.contains(b))
                && standing.len() + unbuilt.len() == Building::PLAYER_BUILDINGS.len()
                && unbuilt.iter().all(|b| b.is_player_building())
        })
    }

    fn description() -> &'static str {
        "Unbuilt and standing buildings partition each player's set"
    }
}

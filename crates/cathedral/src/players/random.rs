//! Computer player that makes random legal moves.

use super::Player;
use anyhow::{Context, Result, anyhow};
use cathedral_rules::{Building, Game, Owner, Piece};
use rand::prelude::*;
use tracing::{debug, instrument};

/// Computer player choosing uniformly among placeable buildings, then
/// uniformly among that building's legal placements.
///
/// Only buildings that still fit somewhere are candidates, so the search
/// never spins on an empty move space.
pub struct RandomComputer {
    name: String,
    rng: StdRng,
}

impl RandomComputer {
    /// Creates a random player; a seed makes its choices reproducible.
    pub fn new(name: impl Into<String>, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_os_rng(),
        };
        Self {
            name: name.into(),
            rng,
        }
    }

    fn candidates(game: &Game, owner: Owner) -> Vec<Building> {
        if owner == Owner::Church {
            return vec![Building::Cathedral];
        }
        game.unbuilt_buildings(owner)
            .into_iter()
            .filter_map(|(building, placeable)| placeable.then_some(building))
            .collect()
    }
}

impl Player for RandomComputer {
    #[instrument(skip(self, game), fields(player = %self.name))]
    fn next_move(&mut self, game: &Game) -> Result<Piece> {
        let owner = game.next_turn().context("the game is already over")?;

        let building = Self::candidates(game, owner)
            .choose(&mut self.rng)
            .copied()
            .ok_or_else(|| anyhow!("{owner} has no placeable building"))?;

        let (direction, anchor) = game
            .legal_placements(building, owner)
            .choose(&mut self.rng)
            .copied()
            .ok_or_else(|| anyhow!("{owner} cannot place a {building}"))?;

        let piece = Piece::new(owner, building, direction, anchor);
        debug!(%piece, "Chose move");
        Ok(piece)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

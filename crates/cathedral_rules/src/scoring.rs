//! End-of-game scoring.

use crate::{Game, Owner};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Result of a finished game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, derive_more::Display)]
pub enum Outcome {
    /// One player left less unbuilt area than the other.
    #[display("{winner} wins with {score}")]
    Won {
        /// The player with the lower remaining total.
        winner: Owner,
        /// The loser's remaining unbuilt area.
        score: u32,
    },
    /// Both players left the same unbuilt area.
    #[display("Tie")]
    Tie,
}

impl Outcome {
    /// The winner, or `None` for a tie.
    pub fn winner(&self) -> Option<Owner> {
        match self {
            Outcome::Won { winner, .. } => Some(*winner),
            Outcome::Tie => None,
        }
    }

    /// The reported score; 0 for a tie.
    pub fn score(&self) -> u32 {
        match self {
            Outcome::Won { score, .. } => *score,
            Outcome::Tie => 0,
        }
    }
}

impl Game {
    /// Total size of a player's unbuilt buildings. Lower is better.
    pub fn player_score(&self, owner: Owner) -> u32 {
        self.unbuilt(owner).iter().map(|b| u32::from(b.size())).sum()
    }

    /// Decides the game once neither player can move.
    ///
    /// Returns `None` while either player still has a legal placement.
    #[instrument(skip(self))]
    pub fn calculate_winner(&self) -> Option<Outcome> {
        if self.can_make_move(Owner::Dark) || self.can_make_move(Owner::Light) {
            return None;
        }

        let light = self.player_score(Owner::Light);
        let dark = self.player_score(Owner::Dark);
        let outcome = match light.cmp(&dark) {
            std::cmp::Ordering::Less => Outcome::Won {
                winner: Owner::Light,
                score: dark,
            },
            std::cmp::Ordering::Greater => Outcome::Won {
                winner: Owner::Dark,
                score: light,
            },
            std::cmp::Ordering::Equal => Outcome::Tie,
        };
        Some(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Address, Building, Direction};

    #[test]
    fn test_no_winner_while_moves_remain() {
        let mut game = Game::default();
        assert_eq!(game.calculate_winner(), None);
        game.place(Building::Cathedral, Owner::Church, Direction::North, Address::new(4, 4));
        assert_eq!(game.calculate_winner(), None);
    }

    #[test]
    fn test_opening_scores() {
        let game = Game::default();
        // 1+2+3+3+4+4+4+5+5+5+5
        assert_eq!(game.player_score(Owner::Light), 41);
        assert_eq!(game.player_score(Owner::Dark), 41);
    }

    #[test]
    fn test_outcome_accessors() {
        let won = Outcome::Won {
            winner: Owner::Dark,
            score: 25,
        };
        assert_eq!(won.winner(), Some(Owner::Dark));
        assert_eq!(won.score(), 25);
        assert_eq!(won.to_string(), "Dark wins with 25");
        assert_eq!(Outcome::Tie.winner(), None);
        assert_eq!(Outcome::Tie.score(), 0);
    }
}

//! The three actors that can own pieces and tiles.

use serde::{Deserialize, Serialize};

/// Owner of a piece or a tile.
///
/// Light and Dark are the players; Church places the Cathedral once and
/// never claims territory.
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
pub enum Owner {
    /// The light player.
    Light,
    /// The dark player (moves first after the Church).
    Dark,
    /// The neutral Church.
    Church,
}

impl Owner {
    /// The two players.
    pub const PLAYERS: [Owner; 2] = [Owner::Light, Owner::Dark];

    /// Whether this owner is Light or Dark.
    pub fn is_player(self) -> bool {
        self != Owner::Church
    }

    /// Returns the opposing player.
    ///
    /// # Panics
    ///
    /// The Church has no opponent.
    pub fn opponent(self) -> Self {
        match self {
            Owner::Light => Owner::Dark,
            Owner::Dark => Owner::Light,
            Owner::Church => panic!("the Church has no opponent"),
        }
    }

    /// Board glyph for a tile this owner has built on.
    pub fn built_glyph(self) -> char {
        match self {
            Owner::Light => 'L',
            Owner::Dark => 'D',
            Owner::Church => 'C',
        }
    }

    /// Board glyph for empty territory this owner has claimed.
    pub fn claimed_glyph(self) -> char {
        self.built_glyph().to_ascii_lowercase()
    }
}

//! Per-game rule variants, fixed when the game is created.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Rule variants captured at game creation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct GameSettings {
    /// Dark opens and the Church's placement waits until two player
    /// pieces are down.
    #[serde(default)]
    delayed_cathedral: bool,

    /// Caller-side convenience: once one player is stuck, the other's
    /// remaining placements are made automatically. The rules engine only
    /// carries the flag.
    #[serde(default)]
    auto_build: bool,
}

impl GameSettings {
    /// Creates settings with both variants chosen explicitly.
    pub fn new(delayed_cathedral: bool, auto_build: bool) -> Self {
        Self {
            delayed_cathedral,
            auto_build,
        }
    }

    /// Standard rules: the Church places first.
    pub fn standard() -> Self {
        Self::default()
    }

    /// Standard rules with the Church's turn deferred.
    pub fn delayed() -> Self {
        Self::new(true, false)
    }
}

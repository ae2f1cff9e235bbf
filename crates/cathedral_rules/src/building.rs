//! The building catalog: sizes, log codes and base footprints.
//!
//! Every shape is described once in [`CATALOG`]. Abbey and Academy are
//! mirror images between Light and Dark, so each entry carries one base
//! footprint per player; the Cathedral's Light slot is its only shape.

use crate::geometry::{Address, Direction};
use crate::owner::Owner;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::instrument;

/// One of the twelve building shapes.
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
pub enum Building {
    /// 1 tile.
    Tavern,
    /// 2 tiles in a line.
    Stable,
    /// 3 tiles in an L.
    Inn,
    /// 3 tiles in a line.
    Bridge,
    /// 2×2 block.
    Square,
    /// 4 tiles in an S, mirrored between players.
    Abbey,
    /// 4 tiles in a T.
    Manor,
    /// 5 tiles in a staircase.
    Tower,
    /// 5 tiles in a plus.
    Infirmary,
    /// 5 tiles in a U.
    Castle,
    /// 5 tiles in an F, mirrored between players.
    Academy,
    /// The Church's 6-tile cross.
    Cathedral,
}

/// Static description of a building shape.
#[derive(Debug)]
pub struct Shape {
    /// Two-letter move-log code.
    pub code: &'static str,
    /// Bounding width when facing north.
    pub width: u8,
    /// Bounding height when facing north.
    pub height: u8,
    /// Base offsets used by Light (and by the Church for the Cathedral).
    pub light: &'static [(i8, i8)],
    /// Base offsets used by Dark.
    pub dark: &'static [(i8, i8)],
}

const TAVERN: &[(i8, i8)] = &[(0, 0)];
const STABLE: &[(i8, i8)] = &[(0, 0), (0, 1)];
const INN: &[(i8, i8)] = &[(0, 0), (0, 1), (1, 0)];
const BRIDGE: &[(i8, i8)] = &[(0, 0), (0, 1), (0, 2)];
const SQUARE: &[(i8, i8)] = &[(0, 0), (0, 1), (1, 0), (1, 1)];
const ABBEY_LIGHT: &[(i8, i8)] = &[(0, 0), (0, 1), (1, 1), (1, 2)];
const ABBEY_DARK: &[(i8, i8)] = &[(0, 1), (0, 2), (1, 0), (1, 1)];
const MANOR: &[(i8, i8)] = &[(0, 0), (0, 1), (0, 2), (1, 1)];
const TOWER: &[(i8, i8)] = &[(0, 0), (0, 1), (1, 1), (1, 2), (2, 2)];
const INFIRMARY: &[(i8, i8)] = &[(0, 1), (1, 0), (1, 1), (1, 2), (2, 1)];
const CASTLE: &[(i8, i8)] = &[(0, 0), (0, 1), (0, 2), (1, 0), (1, 2)];
const ACADEMY_LIGHT: &[(i8, i8)] = &[(0, 1), (1, 0), (1, 1), (1, 2), (2, 2)];
const ACADEMY_DARK: &[(i8, i8)] = &[(0, 2), (1, 0), (1, 1), (1, 2), (2, 1)];
const CATHEDRAL: &[(i8, i8)] = &[(0, 1), (1, 0), (1, 1), (1, 2), (1, 3), (2, 1)];

/// Shape table indexed by `Building as usize`.
pub const CATALOG: [Shape; 12] = [
    Shape { code: "TA", width: 1, height: 1, light: TAVERN, dark: TAVERN },
    Shape { code: "ST", width: 1, height: 2, light: STABLE, dark: STABLE },
    Shape { code: "IN", width: 2, height: 2, light: INN, dark: INN },
    Shape { code: "BR", width: 1, height: 3, light: BRIDGE, dark: BRIDGE },
    Shape { code: "SQ", width: 2, height: 2, light: SQUARE, dark: SQUARE },
    Shape { code: "AB", width: 2, height: 3, light: ABBEY_LIGHT, dark: ABBEY_DARK },
    Shape { code: "MA", width: 2, height: 3, light: MANOR, dark: MANOR },
    Shape { code: "TO", width: 3, height: 3, light: TOWER, dark: TOWER },
    Shape { code: "IF", width: 3, height: 3, light: INFIRMARY, dark: INFIRMARY },
    Shape { code: "CS", width: 2, height: 3, light: CASTLE, dark: CASTLE },
    Shape { code: "AC", width: 3, height: 3, light: ACADEMY_LIGHT, dark: ACADEMY_DARK },
    Shape { code: "CA", width: 3, height: 4, light: CATHEDRAL, dark: CATHEDRAL },
];

impl Building {
    /// The eleven buildings each player starts with.
    pub const PLAYER_BUILDINGS: [Building; 11] = [
        Building::Tavern,
        Building::Stable,
        Building::Inn,
        Building::Bridge,
        Building::Square,
        Building::Abbey,
        Building::Manor,
        Building::Tower,
        Building::Infirmary,
        Building::Castle,
        Building::Academy,
    ];

    /// Every building in catalog order.
    pub const ALL: [Building; 12] = [
        Building::Tavern,
        Building::Stable,
        Building::Inn,
        Building::Bridge,
        Building::Square,
        Building::Abbey,
        Building::Manor,
        Building::Tower,
        Building::Infirmary,
        Building::Castle,
        Building::Academy,
        Building::Cathedral,
    ];

    /// The catalog entry for this building.
    pub fn shape(self) -> &'static Shape {
        &CATALOG[self as usize]
    }

    /// Whether Light and Dark place this building (everything but the Cathedral).
    pub fn is_player_building(self) -> bool {
        self != Building::Cathedral
    }

    /// Whether `owner` is allowed to place this building at all.
    pub fn belongs_to(self, owner: Owner) -> bool {
        owner.is_player() == self.is_player_building()
    }

    /// Number of tiles covered; also the scoring weight.
    pub fn size(self) -> u8 {
        self.shape().light.len() as u8
    }

    /// Two-letter move-log code.
    pub fn code(self) -> &'static str {
        self.shape().code
    }

    /// Looks a building up by its move-log code.
    pub fn from_code(code: &str) -> Option<Building> {
        Building::ALL.into_iter().find(|b| b.code() == code)
    }

    /// Bounding `(width, height)` for a facing; east and west swap the two.
    pub fn dimensions(self, direction: Direction) -> (u8, u8) {
        let shape = self.shape();
        if direction.is_sideways() {
            (shape.height, shape.width)
        } else {
            (shape.width, shape.height)
        }
    }

    fn base(self, owner: Owner) -> &'static [(i8, i8)] {
        let shape = self.shape();
        match owner {
            Owner::Dark => shape.dark,
            Owner::Light | Owner::Church => shape.light,
        }
    }

    /// Absolute cells covered when `owner` places this building facing
    /// `direction` with its origin at `anchor`.
    ///
    /// # Panics
    ///
    /// If `owner` may not place this building (the Church only places the
    /// Cathedral, players never do).
    pub fn cells(
        self,
        owner: Owner,
        direction: Direction,
        anchor: Address,
    ) -> impl Iterator<Item = Address> {
        assert!(
            self.belongs_to(owner),
            "{owner} cannot place a {self}"
        );
        self.base(owner)
            .iter()
            .map(move |&(col, row)| Address::new(col, row).rotated(direction) + anchor)
    }

    /// The footprint of this building as a set.
    #[instrument(level = "trace")]
    pub fn blueprint(self, owner: Owner, direction: Direction, anchor: Address) -> BTreeSet<Address> {
        self.cells(owner, direction, anchor).collect()
    }
}

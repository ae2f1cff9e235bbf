//! Cathedral rules engine.
//!
//! Pure game logic for the Cathedral board game: building shapes and
//! orientation, placement legality, territory capture, turn order and
//! scoring. No I/O happens here; a front end drives a [`Game`] by asking
//! what is legal and submitting placements.
//!
//! # Architecture
//!
//! - **Geometry**: addresses on the 10x10 board and the four facings
//! - **Buildings**: the fixed catalog of shapes and their footprints
//! - **Game**: board, inventories, claimed territory and turn order
//! - **Capture**: flood-fill regions that a placement may claim
//! - **Invariants**: consistency properties checked after every move
//! - **Notation**: the five-character move log and replay
//!
//! # Example
//!
//! ```
//! use cathedral_rules::{Address, Building, Direction, Game, Owner};
//!
//! let mut game = Game::default();
//! assert_eq!(game.next_turn(), Some(Owner::Church));
//!
//! game.try_place(Building::Cathedral, Owner::Church, Direction::East, Address::new(3, 0))?;
//! assert_eq!(game.next_turn(), Some(Owner::Dark));
//! assert_eq!(game.log(), "CAe30");
//! # Ok::<(), cathedral_rules::PlaceError>(())
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod board;
mod building;
mod capture;
mod game;
mod geometry;
pub mod invariants;
mod notation;
mod owner;
mod piece;
mod placement;
mod scoring;
mod settings;
mod snapshot;

// Crate-level exports - Geometry
pub use geometry::{Address, BOARD_SIZE, Direction};

// Crate-level exports - Pieces and owners
pub use building::{Building, CATALOG, Shape};
pub use owner::Owner;
pub use piece::Piece;

// Crate-level exports - Board and game state
pub use board::{Board, Tile};
pub use capture::{Region, find_region};
pub use game::{CAPTURE_EXEMPT_MOVES, Game};
pub use placement::{PlaceError, Placement};
pub use settings::GameSettings;

// Crate-level exports - Scoring, notation and persistence
pub use notation::{MOVE_CODE_LEN, MoveCode, NotationError, ReplayError};
pub use scoring::Outcome;
pub use snapshot::{GameSnapshot, SnapshotError};

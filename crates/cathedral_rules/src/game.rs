//! The game aggregate: board, inventories, turn order and captures.
//!
//! Every mutation goes through [`Game::place`] (or its checked twin
//! [`Game::try_place`]). A placement stamps the piece on the board, runs
//! the capture pass for players once the opening moves are down, and then
//! works out whose turn is next.

use crate::board::{Board, Tile};
use crate::building::Building;
use crate::capture::{Region, find_region};
use crate::geometry::{Address, Direction};
use crate::invariants::{InvariantSet, RulesInvariants};
use crate::owner::Owner;
use crate::piece::Piece;
use crate::placement::{PlaceError, Placement};
use crate::settings::GameSettings;
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, info, instrument};

/// Placements that never trigger captures: the Cathedral and each
/// player's opening piece.
pub const CAPTURE_EXEMPT_MOVES: usize = 3;

/// A game of Cathedral.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Game {
    pub(crate) settings: GameSettings,
    pub(crate) board: Board,
    pub(crate) light_unbuilt: BTreeSet<Building>,
    pub(crate) dark_unbuilt: BTreeSet<Building>,
    pub(crate) built_pieces: BTreeSet<Piece>,
    pub(crate) build_history: Vec<Piece>,
    pub(crate) cathedral_built: bool,
    pub(crate) light_claimed: BTreeSet<Address>,
    pub(crate) dark_claimed: BTreeSet<Address>,
    pub(crate) next_turn: Option<Owner>,
}

// ─────────────────────────────────────────────────────────────
//  Construction and read-only views
// ─────────────────────────────────────────────────────────────

impl Game {
    /// Creates an empty game.
    ///
    /// The Church moves first unless the Cathedral is delayed, in which
    /// case Dark opens.
    #[instrument]
    pub fn new(settings: GameSettings) -> Self {
        let first = if *settings.delayed_cathedral() {
            Owner::Dark
        } else {
            Owner::Church
        };
        Self {
            settings,
            board: Board::new(),
            light_unbuilt: Building::PLAYER_BUILDINGS.into_iter().collect(),
            dark_unbuilt: Building::PLAYER_BUILDINGS.into_iter().collect(),
            built_pieces: BTreeSet::new(),
            build_history: Vec::new(),
            cathedral_built: false,
            light_claimed: BTreeSet::new(),
            dark_claimed: BTreeSet::new(),
            next_turn: Some(first),
        }
    }

    /// The rule variants this game was created with.
    pub fn settings(&self) -> &GameSettings {
        &self.settings
    }

    /// The board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Pieces currently standing.
    pub fn built_pieces(&self) -> &BTreeSet<Piece> {
        &self.built_pieces
    }

    /// Every piece ever placed, oldest first.
    pub fn build_history(&self) -> &[Piece] {
        &self.build_history
    }

    /// Whether the Church has made its placement.
    pub fn is_cathedral_built(&self) -> bool {
        self.cathedral_built
    }

    /// Who moves next; `None` once neither player can move.
    pub fn next_turn(&self) -> Option<Owner> {
        self.next_turn
    }

    /// Whether the game has ended.
    pub fn is_over(&self) -> bool {
        self.next_turn.is_none()
    }

    /// Claimed but unbuilt addresses held by a player.
    ///
    /// # Panics
    ///
    /// The Church never claims territory.
    pub fn claimed(&self, owner: Owner) -> &BTreeSet<Address> {
        match owner {
            Owner::Light => &self.light_claimed,
            Owner::Dark => &self.dark_claimed,
            Owner::Church => panic!("the Church has no claimed territory"),
        }
    }

    /// Buildings a player has not placed (or has had destroyed).
    ///
    /// # Panics
    ///
    /// The Church has no inventory.
    pub fn unbuilt(&self, owner: Owner) -> &BTreeSet<Building> {
        match owner {
            Owner::Light => &self.light_unbuilt,
            Owner::Dark => &self.dark_unbuilt,
            Owner::Church => panic!("the Church has no unbuilt buildings"),
        }
    }

    fn claimed_mut(&mut self, owner: Owner) -> &mut BTreeSet<Address> {
        match owner {
            Owner::Light => &mut self.light_claimed,
            Owner::Dark => &mut self.dark_claimed,
            Owner::Church => panic!("the Church has no claimed territory"),
        }
    }

    fn unbuilt_mut(&mut self, owner: Owner) -> &mut BTreeSet<Building> {
        match owner {
            Owner::Light => &mut self.light_unbuilt,
            Owner::Dark => &mut self.dark_unbuilt,
            Owner::Church => panic!("the Church has no unbuilt buildings"),
        }
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new(GameSettings::standard())
    }
}

// ─────────────────────────────────────────────────────────────
//  Legality queries
// ─────────────────────────────────────────────────────────────

impl Game {
    /// Checks inventory and footprint for a placement, ignoring whose turn
    /// it is.
    pub fn check_place(
        &self,
        building: Building,
        owner: Owner,
        direction: Direction,
        anchor: Address,
    ) -> Result<(), PlaceError> {
        if !building.belongs_to(owner) {
            return Err(PlaceError::WrongBuilding(owner, building));
        }
        match owner {
            Owner::Church if self.cathedral_built => return Err(PlaceError::CathedralAlreadyBuilt),
            Owner::Church => {}
            player if !self.unbuilt(player).contains(&building) => {
                return Err(PlaceError::NotInInventory(player, building));
            }
            _ => {}
        }

        for address in building.cells(owner, direction, anchor) {
            let tile = self
                .board
                .get(address)
                .ok_or(PlaceError::OffBoard(address))?;
            match tile.owner() {
                Some(tile_owner) if tile_owner != owner => {
                    return Err(PlaceError::Occupied(address));
                }
                Some(_) if tile.is_built() => return Err(PlaceError::AlreadyBuilt(address)),
                _ => {}
            }
        }
        Ok(())
    }

    /// Whether `owner` may place `building` facing `direction` at `anchor`.
    pub fn can_place(
        &self,
        building: Building,
        owner: Owner,
        direction: Direction,
        anchor: Address,
    ) -> bool {
        self.check_place(building, owner, direction, anchor).is_ok()
    }

    /// Whether `owner` may place `building` anywhere on the board.
    pub fn can_place_anywhere(&self, building: Building, owner: Owner) -> bool {
        Address::all().any(|anchor| {
            Direction::CARDINAL
                .into_iter()
                .any(|direction| self.can_place(building, owner, direction, anchor))
        })
    }

    /// Every legal `(direction, anchor)` for `owner` placing `building`,
    /// anchors in row-major order.
    pub fn legal_placements(&self, building: Building, owner: Owner) -> Vec<(Direction, Address)> {
        Address::all()
            .flat_map(|anchor| Direction::CARDINAL.into_iter().map(move |d| (d, anchor)))
            .filter(|&(direction, anchor)| self.can_place(building, owner, direction, anchor))
            .collect()
    }

    /// A player's unbuilt buildings, each mapped to whether it still fits
    /// anywhere.
    pub fn unbuilt_buildings(&self, owner: Owner) -> BTreeMap<Building, bool> {
        self.unbuilt(owner)
            .iter()
            .map(|&building| (building, self.can_place_anywhere(building, owner)))
            .collect()
    }

    /// Whether a player has any legal placement at all.
    ///
    /// # Panics
    ///
    /// The Church's single move is not a player move.
    pub fn can_make_move(&self, owner: Owner) -> bool {
        assert!(owner.is_player(), "the Church does not make ordinary moves");
        self.unbuilt(owner)
            .iter()
            .any(|&building| self.can_place_anywhere(building, owner))
    }
}

// ─────────────────────────────────────────────────────────────
//  Placement and capture
// ─────────────────────────────────────────────────────────────

impl Game {
    /// Places a building for the owner whose turn it is, or explains why
    /// it cannot be placed.
    ///
    /// # Errors
    ///
    /// Any [`PlaceError`]; the game is left untouched.
    #[instrument(skip(self), fields(next_turn = ?self.next_turn))]
    pub fn try_place(
        &mut self,
        building: Building,
        owner: Owner,
        direction: Direction,
        anchor: Address,
    ) -> Result<Placement, PlaceError> {
        match self.next_turn {
            None => return Err(PlaceError::GameOver),
            Some(expected) if expected != owner => {
                return Err(PlaceError::NotYourTurn {
                    expected,
                    actual: owner,
                });
            }
            Some(_) => {}
        }
        self.check_place(building, owner, direction, anchor)?;
        Ok(self.build(Piece::new(owner, building, direction, anchor)))
    }

    /// Places a building for the owner whose turn it is.
    ///
    /// Returns the addresses claimed and the pieces destroyed by the move.
    ///
    /// # Panics
    ///
    /// If it is not `owner`'s turn or the placement is illegal; gate calls
    /// behind [`Game::can_place`].
    pub fn place(
        &mut self,
        building: Building,
        owner: Owner,
        direction: Direction,
        anchor: Address,
    ) -> Placement {
        match self.try_place(building, owner, direction, anchor) {
            Ok(placement) => placement,
            Err(e) => panic!("cannot build {owner} {building} facing {direction} at {anchor}: {e}"),
        }
    }

    /// Places an already constructed piece; see [`Game::place`].
    pub fn place_piece(&mut self, piece: Piece) -> Placement {
        self.place(piece.building, piece.owner, piece.direction, piece.anchor)
    }

    fn build(&mut self, piece: Piece) -> Placement {
        let owner = piece.owner;
        let mut placement = Placement::new(piece);

        self.built_pieces.insert(piece);
        self.build_history.push(piece);
        for address in piece.cells() {
            self.board.set(address, Tile::built(piece));
            if owner.is_player() {
                self.claimed_mut(owner).remove(&address);
            }
        }
        info!(%piece, moves = self.build_history.len(), "Piece placed");

        if owner == Owner::Church {
            self.cathedral_built = true;
            self.next_turn = Some(Owner::Dark);
            return placement;
        }

        self.unbuilt_mut(owner).remove(&piece.building);

        if self.build_history.len() > CAPTURE_EXEMPT_MOVES {
            for address in piece.cells() {
                for neighbor in address.board_neighbors() {
                    if let Some(region) = find_region(&self.board, owner, neighbor) {
                        placement.claimed.extend(region.cells.iter().copied());
                        placement.destroyed.extend(region.captured);
                        self.claim_region(owner, region);
                    }
                }
            }
        }

        self.advance_turn(owner);

        debug_assert!(
            RulesInvariants::check_all(self).is_ok(),
            "rules invariants violated after {piece}"
        );
        placement
    }

    /// Commits an enclosed region: the captured piece comes off first so
    /// its tiles are free when claimed.
    fn claim_region(&mut self, owner: Owner, region: Region) {
        if let Some(victim) = region.captured {
            self.destroy(victim);
        }
        info!(%owner, cells = region.cells.len(), "Territory claimed");
        for address in region.cells {
            debug_assert!(self.board[address].is_free(), "claiming owned tile {address}");
            self.board.set(address, Tile::claimed(owner));
            self.claimed_mut(owner).insert(address);
        }
    }

    fn destroy(&mut self, piece: Piece) {
        for address in piece.cells() {
            self.board.set(address, Tile::EMPTY);
        }
        if piece.owner.is_player() {
            self.unbuilt_mut(piece.owner).insert(piece.building);
        }
        self.built_pieces.remove(&piece);
        info!(%piece, "Piece destroyed");
    }

    fn advance_turn(&mut self, mover: Owner) {
        let opponent = mover.opponent();
        self.next_turn = if *self.settings.delayed_cathedral() && self.build_history.len() == 2 {
            Some(Owner::Church)
        } else if self.can_make_move(opponent) {
            Some(opponent)
        } else if self.can_make_move(mover) {
            debug!(%opponent, "Opponent cannot move, skipping");
            Some(mover)
        } else {
            None
        };

        if self.next_turn.is_none() {
            info!(moves = self.build_history.len(), "Game over");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opened() -> Game {
        let mut game = Game::default();
        game.place(Building::Cathedral, Owner::Church, Direction::East, Address::new(3, 0));
        game
    }

    #[test]
    fn test_new_game() {
        let game = Game::default();
        assert_eq!(game.next_turn(), Some(Owner::Church));
        assert_eq!(game.unbuilt(Owner::Light).len(), 11);
        assert_eq!(game.unbuilt(Owner::Dark).len(), 11);
        assert!(game.build_history().is_empty());
        assert!(!game.is_cathedral_built());
    }

    #[test]
    fn test_delayed_game_opens_with_dark() {
        let game = Game::new(GameSettings::delayed());
        assert_eq!(game.next_turn(), Some(Owner::Dark));
    }

    #[test]
    fn test_off_board_is_never_legal() {
        let game = Game::default();
        assert_eq!(
            game.check_place(Building::Cathedral, Owner::Church, Direction::North, Address::new(8, 0)),
            Err(PlaceError::OffBoard(Address::new(10, 1)))
        );
        assert!(!game.can_place(Building::Tavern, Owner::Light, Direction::North, Address::new(-1, 0)));
    }

    #[test]
    fn test_extreme_anchors_are_off_board() {
        let game = opened();
        for anchor in [
            Address::new(0, i8::MAX),
            Address::new(i8::MAX, i8::MAX),
            Address::new(i8::MIN, 0),
        ] {
            for direction in Direction::CARDINAL {
                assert!(!game.can_place(Building::Infirmary, Owner::Dark, direction, anchor));
                assert!(matches!(
                    game.check_place(Building::Infirmary, Owner::Dark, direction, anchor),
                    Err(PlaceError::OffBoard(_))
                ));
            }
        }
    }

    #[test]
    fn test_cannot_build_on_other_owner() {
        let game = opened();
        assert_eq!(
            game.check_place(Building::Tavern, Owner::Dark, Direction::North, Address::new(2, 0)),
            Err(PlaceError::Occupied(Address::new(2, 0)))
        );
    }

    #[test]
    fn test_cathedral_only_once() {
        let game = opened();
        assert!(game.is_cathedral_built());
        assert_eq!(game.next_turn(), Some(Owner::Dark));
        assert_eq!(
            game.check_place(Building::Cathedral, Owner::Church, Direction::North, Address::new(5, 5)),
            Err(PlaceError::CathedralAlreadyBuilt)
        );
    }

    #[test]
    fn test_wrong_building_for_owner() {
        let game = Game::default();
        assert_eq!(
            game.check_place(Building::Tower, Owner::Church, Direction::North, Address::new(5, 5)),
            Err(PlaceError::WrongBuilding(Owner::Church, Building::Tower))
        );
    }

    #[test]
    fn test_placement_leaves_inventory() {
        let mut game = opened();
        let placement = game.place(Building::Tower, Owner::Dark, Direction::West, Address::new(3, 2));
        assert!(!game.unbuilt(Owner::Dark).contains(&Building::Tower));
        assert!(game.built_pieces().contains(&placement.piece));
        assert!(!placement.captured_anything());
        assert_eq!(game.next_turn(), Some(Owner::Light));
        assert!(!game.can_place_anywhere(Building::Tower, Owner::Dark));
    }

    #[test]
    fn test_out_of_turn_is_refused() {
        let mut game = opened();
        let before = game.clone();
        assert_eq!(
            game.try_place(Building::Tavern, Owner::Light, Direction::North, Address::new(9, 9)),
            Err(PlaceError::NotYourTurn {
                expected: Owner::Dark,
                actual: Owner::Light
            })
        );
        assert_eq!(game, before);
    }

    #[test]
    #[should_panic(expected = "cannot build")]
    fn test_place_fails_fast() {
        let mut game = Game::default();
        game.place(Building::Tavern, Owner::Light, Direction::North, Address::new(0, 0));
    }

    #[test]
    fn test_unbuilt_buildings_map() {
        let game = opened();
        let map = game.unbuilt_buildings(Owner::Light);
        assert_eq!(map.len(), 11);
        assert!(map.values().all(|&placeable| placeable));
        assert!(game.can_make_move(Owner::Light));
    }

    #[test]
    fn test_legal_placements_are_all_legal() {
        let game = opened();
        let placements = game.legal_placements(Building::Castle, Owner::Dark);
        assert!(!placements.is_empty());
        for (direction, anchor) in placements {
            assert!(game.can_place(Building::Castle, Owner::Dark, direction, anchor));
        }
    }

    #[test]
    fn test_delayed_cathedral_turn_order() {
        let mut game = Game::new(GameSettings::delayed());
        game.place(Building::Tower, Owner::Dark, Direction::West, Address::new(3, 2));
        assert_eq!(game.next_turn(), Some(Owner::Light));
        game.place(Building::Academy, Owner::Light, Direction::North, Address::new(5, 7));
        assert_eq!(game.next_turn(), Some(Owner::Church));
        game.place(Building::Cathedral, Owner::Church, Direction::North, Address::new(0, 5));
        assert_eq!(game.next_turn(), Some(Owner::Dark));
    }

    #[test]
    fn test_delayed_cathedral_capture_waits_for_fourth_piece() {
        let mut game = Game::new(GameSettings::delayed());

        // Dark's staircase walls off the three corner cells on the first move.
        let first = game.place(Building::Tower, Owner::Dark, Direction::West, Address::new(0, 2));
        assert!(!first.captured_anything());
        game.place(Building::Academy, Owner::Light, Direction::North, Address::new(5, 7));
        let church = game.place(Building::Cathedral, Owner::Church, Direction::North, Address::new(0, 5));
        assert!(!church.captured_anything());
        assert_eq!(game.build_history().len(), 3);
        assert!(game.claimed(Owner::Dark).is_empty());
        assert!(game.claimed(Owner::Light).is_empty());

        let fourth = game.place(Building::Tavern, Owner::Dark, Direction::North, Address::new(0, 0));
        let expected = BTreeSet::from([Address::new(1, 0), Address::new(0, 1)]);
        assert_eq!(fourth.claimed, expected);
        assert!(fourth.destroyed.is_empty());
        assert_eq!(game.claimed(Owner::Dark), &expected);
        assert_eq!(game.board()[Address::new(1, 0)].owner(), Some(Owner::Dark));
    }
}

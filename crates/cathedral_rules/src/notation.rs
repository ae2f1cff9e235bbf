//! Move-log notation and replay.
//!
//! One move per line: a two-letter building code, a one-letter facing and
//! a column digit followed by a row digit, e.g. `CAe30` for the Cathedral
//! facing east anchored at column 3, row 0. Owners are not written; replay
//! infers them from the turn order.

use crate::building::Building;
use crate::geometry::{Address, Direction};
use crate::piece::Piece;
use crate::placement::PlaceError;
use crate::settings::GameSettings;
use crate::Game;
use std::fmt;
use std::str::FromStr;
use tracing::{debug, instrument, warn};

/// Characters in one encoded move.
pub const MOVE_CODE_LEN: usize = 5;

impl Direction {
    /// One-letter log code.
    pub fn code(self) -> char {
        match self {
            Direction::North => 'n',
            Direction::East => 'e',
            Direction::South => 's',
            Direction::West => 'w',
        }
    }

    /// Looks a direction up by its log code.
    pub fn from_code(code: char) -> Option<Direction> {
        Direction::CARDINAL.into_iter().find(|d| d.code() == code)
    }
}

impl Address {
    /// Two-digit log code: column then row.
    ///
    /// Only meaningful for on-board addresses.
    pub fn code(self) -> String {
        format!("{}{}", self.col, self.row)
    }

    /// Parses a two-digit log code.
    pub fn from_code(code: &str) -> Option<Address> {
        let mut digits = code.chars().map(|c| c.to_digit(10));
        match (digits.next(), digits.next(), digits.next()) {
            (Some(Some(col)), Some(Some(row)), None) => Some(Address::new(col as i8, row as i8)),
            _ => None,
        }
    }
}

/// Why a single move code could not be read.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum NotationError {
    /// Not exactly five ASCII characters.
    #[display("expected 5 characters, got {_0:?}")]
    WrongLength(String),
    /// First two characters are not a building code.
    #[display("unknown building code {_0:?}")]
    UnknownBuilding(String),
    /// Third character is not a facing.
    #[display("unknown direction code {_0:?}")]
    UnknownDirection(char),
    /// Last two characters are not column and row digits.
    #[display("invalid address code {_0:?}")]
    InvalidAddress(String),
}

impl std::error::Error for NotationError {}

/// A decoded log line: what was built, facing where, anchored where.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveCode {
    /// The building.
    pub building: Building,
    /// Its facing.
    pub direction: Direction,
    /// Its anchor.
    pub anchor: Address,
}

impl From<&Piece> for MoveCode {
    fn from(piece: &Piece) -> Self {
        Self {
            building: piece.building,
            direction: piece.direction,
            anchor: piece.anchor,
        }
    }
}

impl fmt::Display for MoveCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}{}",
            self.building.code(),
            self.direction.code(),
            self.anchor.code()
        )
    }
}

impl FromStr for MoveCode {
    type Err = NotationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != MOVE_CODE_LEN || !s.is_ascii() {
            return Err(NotationError::WrongLength(s.to_string()));
        }
        let (building, rest) = s.split_at(2);
        let (direction, anchor) = rest.split_at(1);

        let building = Building::from_code(building)
            .ok_or_else(|| NotationError::UnknownBuilding(building.to_string()))?;
        let direction_char = direction.chars().next().unwrap_or_default();
        let direction = Direction::from_code(direction_char)
            .ok_or(NotationError::UnknownDirection(direction_char))?;
        let anchor = Address::from_code(anchor)
            .ok_or_else(|| NotationError::InvalidAddress(anchor.to_string()))?;

        Ok(Self {
            building,
            direction,
            anchor,
        })
    }
}

impl Piece {
    /// This piece's log line.
    pub fn log(&self) -> String {
        MoveCode::from(self).to_string()
    }
}

/// Why a move log could not be replayed.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum ReplayError {
    /// A line is not a valid move code.
    #[display("line {line}: {source}")]
    Malformed {
        /// 1-based line number.
        line: usize,
        /// What was wrong with it.
        source: NotationError,
    },
    /// A move follows the end of the game.
    #[display("line {line}: the game is already over")]
    AfterGameOver {
        /// 1-based line number.
        line: usize,
    },
    /// A well-formed move that the rules refuse.
    #[display("line {line}: {code} is not legal: {source}")]
    Illegal {
        /// 1-based line number.
        line: usize,
        /// The refused move.
        code: MoveCode,
        /// Why the rules refused it.
        source: PlaceError,
    },
}

impl std::error::Error for ReplayError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ReplayError::Malformed { source, .. } => Some(source),
            ReplayError::Illegal { source, .. } => Some(source),
            ReplayError::AfterGameOver { .. } => None,
        }
    }
}

impl Game {
    /// The move log: one line per piece ever placed.
    pub fn log(&self) -> String {
        self.build_history
            .iter()
            .map(Piece::log)
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Rebuilds a game by replaying a move log from an empty board.
    ///
    /// Blank lines and surrounding whitespace are ignored.
    ///
    /// # Errors
    ///
    /// [`ReplayError`] on the first line that is malformed, follows the end
    /// of the game, or is not a legal move for whoever's turn it is.
    #[instrument(skip(log), fields(lines = log.lines().count()))]
    pub fn from_log(log: &str, settings: GameSettings) -> Result<Game, ReplayError> {
        let mut game = Game::new(settings);

        for (index, raw) in log.lines().enumerate() {
            let line = index + 1;
            let text = raw.trim();
            if text.is_empty() {
                continue;
            }

            let code: MoveCode = text.parse().map_err(|source| {
                warn!(line, text, "Malformed move code");
                ReplayError::Malformed { line, source }
            })?;
            let owner = game
                .next_turn()
                .ok_or(ReplayError::AfterGameOver { line })?;

            debug!(line, %owner, %code, "Replaying move");
            game.try_place(code.building, owner, code.direction, code.anchor)
                .map_err(|source| ReplayError::Illegal { line, code, source })?;
        }

        Ok(game)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Owner;

    #[test]
    fn test_parse_move_code() {
        let code: MoveCode = "CAe66".parse().unwrap();
        assert_eq!(code.building, Building::Cathedral);
        assert_eq!(code.direction, Direction::East);
        assert_eq!(code.anchor, Address::new(6, 6));
    }

    #[test]
    fn test_address_code_is_column_then_row() {
        let code: MoveCode = "CSw09".parse().unwrap();
        assert_eq!(code.anchor, Address::new(0, 9));
        assert_eq!(Address::new(0, 9).code(), "09");
    }

    #[test]
    fn test_malformed_codes() {
        assert_eq!(
            "CAe6".parse::<MoveCode>(),
            Err(NotationError::WrongLength("CAe6".into()))
        );
        assert_eq!(
            "XXn00".parse::<MoveCode>(),
            Err(NotationError::UnknownBuilding("XX".into()))
        );
        assert_eq!(
            "TAx00".parse::<MoveCode>(),
            Err(NotationError::UnknownDirection('x'))
        );
        assert_eq!(
            "TAn0a".parse::<MoveCode>(),
            Err(NotationError::InvalidAddress("0a".into()))
        );
        assert!(matches!(
            "TAné0".parse::<MoveCode>(),
            Err(NotationError::WrongLength(_))
        ));
    }

    #[test]
    fn test_piece_log() {
        let piece = Piece::new(Owner::Dark, Building::Tower, Direction::West, Address::new(3, 2));
        assert_eq!(piece.log(), "TOw32");
    }

    #[test]
    fn test_direction_codes() {
        for direction in Direction::CARDINAL {
            assert_eq!(Direction::from_code(direction.code()), Some(direction));
        }
        assert_eq!(Direction::from_code('N'), None);
    }

    #[test]
    fn test_replay_tolerates_blank_lines() {
        let game = Game::from_log("  CAe30\n\nTOw32  \n", GameSettings::standard()).unwrap();
        assert_eq!(game.build_history().len(), 2);
        assert_eq!(game.log(), "CAe30\nTOw32");
        assert_eq!(game.next_turn(), Some(Owner::Light));
    }

    #[test]
    fn test_replay_reports_malformed_line() {
        let err = Game::from_log("CAe30\nTOq32", GameSettings::standard()).unwrap_err();
        assert_eq!(
            err,
            ReplayError::Malformed {
                line: 2,
                source: NotationError::UnknownDirection('q')
            }
        );
        assert_eq!(err.to_string(), "line 2: unknown direction code 'q'");
    }

    #[test]
    fn test_replay_reports_illegal_move() {
        // Dark tries to build over the Cathedral.
        let err = Game::from_log("CAe30\nTAn20", GameSettings::standard()).unwrap_err();
        assert!(matches!(
            err,
            ReplayError::Illegal {
                line: 2,
                source: PlaceError::Occupied(_),
                ..
            }
        ));
    }

    #[test]
    fn test_empty_log_is_new_game() {
        let game = Game::from_log("", GameSettings::standard()).unwrap();
        assert_eq!(game, Game::default());
    }
}

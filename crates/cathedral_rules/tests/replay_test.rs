//! Tests for rebuilding games from move logs.

use cathedral_rules::{
    Address, Building, Direction, Game, GameSettings, NotationError, Outcome, Owner, PlaceError,
    ReplayError,
};

const FULL_GAME: &str = "\
CAe30
TOw32
ACn57
IFn02
CSe96
INs34
STn04
SQe28
BRs09
MAs17
TAn88
ACn36
BRe59
CSs66
STn98
BRw75
STn90
ABn70
TAn00";

#[test]
fn test_full_log_replays_to_finished_game() {
    let game = Game::from_log(FULL_GAME, GameSettings::standard()).unwrap();
    assert!(game.is_over());
    assert_eq!(game.build_history().len(), 19);
    assert_eq!(
        game.calculate_winner(),
        Some(Outcome::Won {
            winner: Owner::Dark,
            score: 25
        })
    );
    assert_eq!(game.log(), FULL_GAME);
}

#[test]
fn test_replay_matches_live_play() {
    let mut live = Game::default();
    live.place(Building::Cathedral, Owner::Church, Direction::East, Address::new(3, 0));
    live.place(Building::Tower, Owner::Dark, Direction::West, Address::new(3, 2));
    live.place(Building::Academy, Owner::Light, Direction::North, Address::new(5, 7));
    live.place(Building::Infirmary, Owner::Dark, Direction::North, Address::new(0, 2));
    live.place(Building::Castle, Owner::Light, Direction::East, Address::new(9, 6));
    live.place(Building::Inn, Owner::Dark, Direction::South, Address::new(3, 4));

    let replayed = Game::from_log(&live.log(), GameSettings::standard()).unwrap();
    assert_eq!(replayed.board().to_string(), live.board().to_string());
    assert_eq!(replayed.claimed(Owner::Dark), live.claimed(Owner::Dark));
    assert_eq!(replayed.claimed(Owner::Light), live.claimed(Owner::Light));
    assert_eq!(replayed.build_history(), live.build_history());
    assert_eq!(replayed, live);
}

#[test]
fn test_move_after_game_over_is_refused() {
    let log = format!("{FULL_GAME}\nTAn99");
    let err = Game::from_log(&log, GameSettings::standard()).unwrap_err();
    assert_eq!(err, ReplayError::AfterGameOver { line: 20 });
}

#[test]
fn test_delayed_cathedral_log() {
    let game = Game::from_log("TOw32\nACn57\nCAn05", GameSettings::delayed()).unwrap();
    assert!(game.is_cathedral_built());
    assert_eq!(game.next_turn(), Some(Owner::Dark));
    assert_eq!(game.build_history()[2].owner, Owner::Church);
}

#[test]
fn test_cathedral_first_is_wrong_when_delayed() {
    let err = Game::from_log("CAe30", GameSettings::delayed()).unwrap_err();
    match err {
        ReplayError::Illegal { line, source, .. } => {
            assert_eq!(line, 1);
            assert_eq!(source, PlaceError::WrongBuilding(Owner::Dark, Building::Cathedral));
        }
        other => panic!("expected an illegal move, got {other}"),
    }
}

#[test]
fn test_building_twice_is_refused() {
    let err = Game::from_log("CAe30\nTOw32\nACn57\nTOn77", GameSettings::standard()).unwrap_err();
    assert!(matches!(
        err,
        ReplayError::Illegal {
            line: 4,
            source: PlaceError::NotInInventory(Owner::Dark, Building::Tower),
            ..
        }
    ));
}

#[test]
fn test_malformed_line_is_reported_with_source() {
    use std::error::Error;

    let err = Game::from_log("CAe30\nZZn00", GameSettings::standard()).unwrap_err();
    assert_eq!(
        err,
        ReplayError::Malformed {
            line: 2,
            source: NotationError::UnknownBuilding("ZZ".into())
        }
    );
    assert!(err.source().is_some());
}

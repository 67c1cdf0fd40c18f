use sapper_core::*;
use tempfile::tempdir;

fn safe_cells(game: &Game<ManualScheduler, JsonFileRecordStore>) -> Vec<Coord2> {
    game.board()
        .expect("board is laid out while playing")
        .iter_cells()
        .filter(|(_, cell)| !cell.is_mine())
        .map(|(coords, _)| coords)
        .collect()
}

#[test]
fn winning_a_seeded_game_persists_the_record() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("records.json");
    let settings = GameSettings {
        seed: Some(2024),
        ..GameSettings::default()
    };
    let scheduler = ManualScheduler::new();
    let mut game = Game::new(
        &settings,
        Levels::standard(),
        scheduler.clone(),
        JsonFileRecordStore::new(&path),
    )
    .unwrap();

    game.reveal_cell((4, 4)).unwrap();
    assert!(game.state().is_playing() || game.state() == MatchState::Win);
    scheduler.advance_secs(42);

    for coords in safe_cells(&game) {
        game.reveal_cell(coords).unwrap();
    }

    assert_eq!(game.state(), MatchState::Win);
    // 42 unless the opening flood already cleared the board
    let won_in = game.elapsed_secs();
    assert_eq!(game.best_time(), Some(won_in));

    let reopened = Game::new(
        &settings,
        Levels::standard(),
        ManualScheduler::new(),
        JsonFileRecordStore::new(&path),
    )
    .unwrap();
    assert_eq!(reopened.best_time(), Some(won_in));
    assert_eq!(reopened.snapshot().best, Some(format_clock(won_in)));
}

#[test]
fn every_board_from_start_is_consistent() {
    let settings = GameSettings {
        level: Levels::INTERMEDIATE.to_owned(),
        seed: Some(99),
        ..GameSettings::default()
    };
    let mut game = Game::new(
        &settings,
        Levels::standard(),
        ManualScheduler::new(),
        MemoryRecordStore::new(),
    )
    .unwrap();

    for coords in [(0, 0), (15, 15), (7, 8), (0, 15)] {
        game.reset();
        game.start(coords).unwrap();
        let board = game.board().unwrap();

        assert!(!board.contains_mine(coords));
        assert_ne!(game.state(), MatchState::Lose);
        let mines = board.iter_cells().filter(|(_, cell)| cell.is_mine()).count();
        assert_eq!(mines, 40);
        for (pos, cell) in board.iter_cells() {
            if let CellValue::Adjacent(count) = cell.value {
                let expected = board
                    .iter_neighbors(pos)
                    .filter(|&neighbor| board.contains_mine(neighbor))
                    .count();
                assert_eq!(usize::from(count), expected);
            }
        }
    }
}

#[test]
fn win_is_declared_iff_safe_cells_are_open_and_mines_closed() {
    let mut levels = Levels::standard();
    levels.insert("strip", LevelSetting::new(1, 5, 2).unwrap());
    let settings = GameSettings {
        level: "strip".to_owned(),
        ..GameSettings::default()
    };
    let mut game = Game::new(
        &settings,
        levels,
        ManualScheduler::new(),
        MemoryRecordStore::new(),
    )
    .unwrap()
    .with_generator(FixedBoardGenerator::new((1, 5), &[(0, 1), (0, 3)]).unwrap());

    game.reveal_cell((0, 0)).unwrap();
    game.toggle_mark((0, 1)).unwrap();
    game.toggle_mark((0, 3)).unwrap();
    assert_eq!(game.state(), MatchState::Playing);
    assert_eq!(game.remaining_mines(), 0);

    game.reveal_cell((0, 2)).unwrap();
    assert_eq!(game.state(), MatchState::Playing);
    assert_eq!(game.reveal_cell((0, 4)).unwrap(), RevealOutcome::Won);
    assert_eq!(game.state(), MatchState::Win);
}

#[test]
fn snapshot_serializes_for_ui_collaborators() {
    let mut game = Game::new(
        &GameSettings {
            seed: Some(5),
            ..GameSettings::default()
        },
        Levels::standard(),
        ManualScheduler::new(),
        MemoryRecordStore::new(),
    )
    .unwrap();
    game.reveal_cell((0, 0)).unwrap();

    let json = serde_json::to_string(&game.snapshot()).unwrap();
    let restored: Snapshot = serde_json::from_str(&json).unwrap();

    assert_eq!(restored, game.snapshot());
    assert_eq!(restored.level, "beginner");
}

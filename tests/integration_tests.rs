//! Integration tests: turn loop, spawn policy, save slots and config

use std::fs;

use rand::rngs::SmallRng;
use rand::SeedableRng;
use tempfile::tempdir;
use tui_2048::core::{play_turn, Game, SpawnPolicy};
use tui_2048::store::{load_config, save_config, Config, SaveStore};
use tui_2048::types::{Direction, GameAction, MAX_TILE_VALUE};

#[test]
fn test_game_lifecycle_with_seeded_rng() {
    let mut rng = SmallRng::seed_from_u64(2048);
    let policy = SpawnPolicy::default();
    let mut game = Game::new(4);
    game.start_with(&mut rng);

    let mut turns = 0;
    let mut last_score = 0;
    while !game.game_over() && turns < 5_000 {
        let direction = Direction::ALL[turns % 4];
        let empty_before = game.board().empty_cells().len();
        let outcome = play_turn(&mut game, direction, &policy, &mut rng);

        assert!(game.score() >= last_score, "score never decreases");
        assert_eq!(outcome.gained, game.score() - last_score);
        if outcome.moved {
            let (r, c, v) = outcome.spawned.expect("a move always frees a cell");
            assert_eq!(game.board().get(r, c), Some(v));
            assert!(v == 2 || v == 4);
        } else {
            assert!(outcome.spawned.is_none());
            assert_eq!(game.board().empty_cells().len(), empty_before);
        }
        assert!(game.board().cells().iter().all(|&t| t == 0 || (t >= 2 && t.is_power_of_two())));

        last_score = game.score();
        turns += 1;
    }
    assert!(game.game_over() || game.endless_mode() || turns == 5_000);
}

#[test]
fn test_same_seed_same_game() {
    let play = |seed| {
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut game = Game::new(4);
        game.start_with(&mut rng);
        for i in 0..200 {
            play_turn(&mut game, Direction::ALL[(i * 7) % 4], &SpawnPolicy::default(), &mut rng);
        }
        (game.board().to_rows(), game.score())
    };
    assert_eq!(play(9), play(9));
}

#[test]
fn test_reaching_2048_enables_endless() {
    let mut rng = SmallRng::seed_from_u64(1);
    let mut game = Game::new(4);
    assert!(game.restore(
        &[vec![1024, 1024, 0, 0], vec![0; 4], vec![0; 4], vec![0; 4]],
        0,
        false,
        false
    ));
    let outcome = play_turn(&mut game, Direction::Left, &SpawnPolicy::default(), &mut rng);
    assert!(outcome.won_now);
    assert!(game.endless_mode());

    let again = play_turn(&mut game, Direction::Right, &SpawnPolicy::default(), &mut rng);
    assert!(!again.won_now);
}

#[test]
fn test_blocked_turn_does_not_spawn() {
    let mut rng = SmallRng::seed_from_u64(3);
    let mut game = Game::new(2);
    assert!(game.restore(&[vec![2, 4], vec![0, 0]], 0, false, false));
    let outcome = play_turn(&mut game, Direction::Left, &SpawnPolicy::default(), &mut rng);
    assert!(!outcome.moved);
    assert_eq!(game.board().to_rows(), vec![vec![2, 4], vec![0, 0]]);
}

#[test]
fn test_full_board_turn_reports_game_over() {
    let mut rng = SmallRng::seed_from_u64(3);
    let mut game = Game::new(2);
    assert!(game.restore(&[vec![2, 4], vec![4, 2]], 10, false, false));
    let outcome = play_turn(&mut game, Direction::Up, &SpawnPolicy::default(), &mut rng);
    assert!(!outcome.moved);
    assert!(outcome.game_over);
    assert!(game.game_over());
}

#[test]
fn test_spawn_policy_high_score_spawns_fours() {
    let policy = SpawnPolicy::default();
    let mut rng = SmallRng::seed_from_u64(5);
    let fours = (0..2_000)
        .filter(|_| policy.choose_value(100_000, &mut rng) == 4)
        .count();
    // Capped at 50%.
    assert!((800..1_200).contains(&fours), "fours = {}", fours);
    assert!((0..100).all(|_| policy.choose_value(1_000, &mut rng) == 2));
}

#[test]
fn test_save_load_round_trip() {
    let td = tempdir().unwrap();
    let store = SaveStore::new(td.path().join("saves"));

    let mut game = Game::new(4);
    assert!(game.restore(
        &[vec![2, 4, 8, 16], vec![0, 2, 0, 0], vec![0; 4], vec![0, 0, 0, 2048]],
        1234,
        false,
        true
    ));
    store.save(&game, 3, Some("  evening run ")).unwrap();

    let mut loaded = Game::new(4);
    store.load_into(&mut loaded, 3).unwrap();
    assert_eq!(loaded.board().to_rows(), game.board().to_rows());
    assert_eq!(loaded.score(), 1234);
    assert!(loaded.endless_mode());
    assert!(!loaded.game_over());

    let slots = store.list_slots();
    assert_eq!(slots.len(), 5);
    assert!(slots[0].entry.is_none());
    let entry = slots[2].entry.as_ref().unwrap();
    assert_eq!(entry.name.as_deref(), Some("evening run"));
    assert_eq!(entry.score, 1234);
}

#[test]
fn test_invalid_saves_leave_game_untouched() {
    let td = tempdir().unwrap();
    let store = SaveStore::new(td.path());
    let mut game = Game::new(4);
    assert!(game.restore(&[vec![2, 0, 0, 0], vec![0; 4], vec![0; 4], vec![0; 4]], 8, false, false));
    let before = (game.board().to_rows(), game.score());

    let bad = [
        r#"{"grid": [[2, 0], [0, 0]], "score": 4, "game_over": false}"#,
        r#"{"grid": [[3,0,0,0],[0,0,0,0],[0,0,0,0],[0,0,0,0]], "score": 4, "game_over": false}"#,
        r#"{"grid": [[2,0,0,0],[0,0,0,0],[0,0,0,0],[0,0,0,0]], "game_over": false}"#,
        "not json",
    ];
    for (i, text) in bad.iter().enumerate() {
        fs::write(store.slot_path(1), text).unwrap();
        assert!(store.load_into(&mut game, 1).is_err(), "case {}", i);
        assert_eq!((game.board().to_rows(), game.score()), before, "case {}", i);
    }

    assert!(store.load_into(&mut game, 4).is_err(), "missing file");
    assert!(store.load_into(&mut game, 0).is_err(), "slot out of range");
    assert!(store.save(&game, 6, None).is_err());
}

#[test]
fn test_oversized_tiles_are_rejected_on_load() {
    let td = tempdir().unwrap();
    let store = SaveStore::new(td.path());
    fs::write(
        store.slot_path(1),
        r#"{"grid": [[2147483648, 2147483648], [0, 0]], "score": 0, "game_over": false}"#,
    )
    .unwrap();

    let mut game = Game::new(2);
    assert!(game.restore(&[vec![2, 0], vec![0, 0]], 6, false, false));
    let err = format!("{:#}", store.load_into(&mut game, 1).unwrap_err());
    assert!(err.contains("larger than"), "{}", err);
    assert_eq!(game.board().to_rows(), vec![vec![2, 0], vec![0, 0]]);
    assert_eq!(game.score(), 6);

    assert!(!game.restore(&[vec![1 << 31, 0], vec![0, 0]], 0, false, false));
}

#[test]
fn test_largest_tiles_load_and_stay_put() {
    let td = tempdir().unwrap();
    let store = SaveStore::new(td.path());
    fs::write(
        store.slot_path(1),
        r#"{"grid": [[1073741824, 1073741824], [0, 0]], "score": 0, "game_over": false}"#,
    )
    .unwrap();

    let mut game = Game::new(2);
    store.load_into(&mut game, 1).unwrap();
    assert!(!game.apply_move(Direction::Left));
    assert!(game.apply_move(Direction::Down));
    assert_eq!(
        game.board().to_rows(),
        vec![vec![0, 0], vec![MAX_TILE_VALUE, MAX_TILE_VALUE]]
    );
    assert_eq!(game.score(), 0);
}

#[test]
fn test_huge_loaded_score_saturates() {
    let td = tempdir().unwrap();
    let store = SaveStore::new(td.path());
    fs::write(
        store.slot_path(1),
        r#"{"grid": [[2, 2], [0, 0]], "score": 18446744073709551615, "game_over": false}"#,
    )
    .unwrap();

    let mut game = Game::new(2);
    store.load_into(&mut game, 1).unwrap();
    let mut rng = SmallRng::seed_from_u64(11);
    let outcome = play_turn(&mut game, Direction::Left, &SpawnPolicy::default(), &mut rng);
    assert!(outcome.moved);
    assert_eq!(game.score(), u64::MAX);
    assert_eq!(game.board().get(0, 0), Some(4));
}

#[test]
fn test_loading_won_game_over_enters_endless() {
    let td = tempdir().unwrap();
    let store = SaveStore::new(td.path());
    fs::write(
        store.slot_path(2),
        r#"{"grid": [[2048,4],[4,2]], "score": 30000, "game_over": true}"#,
    )
    .unwrap();

    let mut game = Game::new(2);
    store.load_into(&mut game, 2).unwrap();
    assert!(game.endless_mode());
    assert!(!game.game_over());
    assert!(!game.is_game_over());
}

#[test]
fn test_loading_lost_game_stays_over() {
    let td = tempdir().unwrap();
    let store = SaveStore::new(td.path());
    fs::write(
        store.slot_path(2),
        r#"{"grid": [[2,4],[4,2]], "score": 12, "game_over": true}"#,
    )
    .unwrap();

    let mut game = Game::new(2);
    store.load_into(&mut game, 2).unwrap();
    assert!(game.game_over());
    assert!(!game.endless_mode());
}

#[test]
fn test_config_round_trip_and_bindings() {
    let td = tempdir().unwrap();
    let path = td.path().join("nested").join("config.json");

    let mut config = Config::default();
    config.keys.movement.up = vec!["k".into(), "KEY_UP".into()];
    config.theme = "classic".into();
    save_config(&path, &config).unwrap();

    let loaded = load_config(&path);
    assert_eq!(loaded, config);
    let bindings = loaded.bindings();
    assert_eq!(bindings.describe(GameAction::MoveUp), "k/↑");
}

#[test]
fn test_invalid_bindings_fall_back_to_defaults() {
    let td = tempdir().unwrap();
    let path = td.path().join("config.json");
    fs::write(
        &path,
        r#"{"keys": {"movement": {"up": ["w"], "down": ["w"]}}, "theme": "modern"}"#,
    )
    .unwrap();

    let config = load_config(&path);
    assert_eq!(config.keys.movement.up, vec!["w".to_string()]);
    let bindings = config.bindings();
    assert_eq!(bindings.describe(GameAction::MoveUp), "↑/w");
    assert_eq!(bindings.describe(GameAction::MoveDown), "↓/s");
}

use battleship_hunt::{
    new_duel, new_simulation, run_batch, run_game, Board, Coordinate, Duel, GameConfig, GameError,
    GameMode, HuntTargeting, ShipType, ShotResult, Side, Simulation,
};
use rand::rngs::SmallRng;
use rand::SeedableRng;

#[test]
fn test_single_side_terminates_within_board_cells() {
    let config = GameConfig::default();
    let mut total = 0;
    let games = 200;
    for seed in 0..games {
        let report = new_simulation(&config, seed).unwrap().run().unwrap();
        assert!(report.moves <= 100, "seed {} took {} moves", seed, report.moves);
        assert_eq!(report.hits, 17);
        assert_eq!(report.shots.len(), report.moves);
        total += report.moves;
    }
    let mean = total as f64 / games as f64;
    // Firing in random order averages about 96 moves on this fleet.
    assert!(mean < 85.0, "mean {} moves", mean);
}

#[test]
fn test_single_side_shots_are_distinct() {
    let report = new_simulation(&GameConfig::default(), 42).unwrap().run().unwrap();
    let mut coords: Vec<_> = report.shots.iter().map(|s| s.coord).collect();
    coords.sort();
    coords.dedup();
    assert_eq!(coords.len(), report.moves);
    assert!(report
        .shots
        .iter()
        .all(|s| s.result != ShotResult::AlreadyAttacked));
}

#[test]
fn test_reports_sinking_and_summary() {
    let report = new_simulation(&GameConfig::default(), 3).unwrap().run().unwrap();
    assert_eq!(report.shots.iter().filter(|s| s.sunk).count(), 5);
    assert_eq!(
        report.to_string(),
        format!("Game over in {} moves! All ships have been hit.", report.moves)
    );
    let hit = report.shots.iter().find(|s| s.result.is_hit()).unwrap();
    assert!(hit.to_string().starts_with(&format!("Shot at {}: Hit (Ship ", hit.coord)));
    let miss = report.shots.iter().find(|s| s.result == ShotResult::Miss).unwrap();
    assert_eq!(miss.to_string(), format!("Shot at ({}, {}): Miss", miss.coord.row, miss.coord.col));
}

#[test]
fn test_same_seed_same_game() {
    let config = GameConfig::default();
    let a = new_simulation(&config, 77).unwrap().run().unwrap();
    let b = new_simulation(&config, 77).unwrap().run().unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_manual_fire_out_of_bounds() {
    let mut game = new_simulation(&GameConfig::default(), 1).unwrap();
    let err = game.fire_at(Coordinate::new(10, 3)).unwrap_err();
    assert!(matches!(err, GameError::OutOfBounds(_)));
    assert_eq!(game.moves(), 0);

    game.fire_at(Coordinate::new(4, 4)).unwrap();
    let again = game.fire_at(Coordinate::new(4, 4)).unwrap();
    assert_eq!(again.result, ShotResult::AlreadyAttacked);
    assert_eq!(game.moves(), 2);
    assert!(game.hits() <= 1);
}

#[test]
fn test_empty_fleet_is_rejected() {
    let engine = HuntTargeting::new(4, SmallRng::seed_from_u64(0));
    assert!(matches!(
        Simulation::new(Board::new(4), engine),
        Err(GameError::EmptyFleet { .. })
    ));
}

#[test]
fn test_duel_has_a_winner() {
    let mut duel = new_duel(&GameConfig::default(), (1, 2)).unwrap();
    let mut turns = 0;
    while !duel.is_over() {
        duel.play_turn().unwrap();
        turns += 1;
        assert!(turns < 200, "duel took too many turns");
    }
    let winner = duel.winner().unwrap().to_string();
    let (won, lost) = if duel.side(0).unwrap().name == winner {
        (duel.side(0).unwrap(), duel.side(1).unwrap())
    } else {
        (duel.side(1).unwrap(), duel.side(0).unwrap())
    };
    assert!(!won.board.all_sunk());
    assert!(lost.board.all_sunk());
    let report = duel.finish().unwrap();
    assert_eq!(report.to_string(), format!("Game over! Winner: {}", winner));
    assert_eq!(report.moves, turns);
}

#[test]
fn test_duel_alternates() {
    let report = new_duel(&GameConfig::demo_duel(), (5, 6)).unwrap().run().unwrap();
    for (i, shot) in report.shots.iter().enumerate() {
        let expected = if i % 2 == 0 { "Player1" } else { "Player2" };
        assert_eq!(shot.shooter.as_deref(), Some(expected));
    }
    let last = report.shots.last().unwrap();
    assert_eq!(last.shooter, report.winner);
    assert!(last.sunk);
}

#[test]
fn test_hand_built_duel() {
    let fleet_board = || {
        let mut board = Board::new(3);
        board
            .place(ShipType::new("Dinghy", 1), vec![Coordinate::new(1, 1)])
            .unwrap();
        board
    };
    let duel = Duel::new(
        Side::new("North", fleet_board(), HuntTargeting::new(3, SmallRng::seed_from_u64(1))),
        Side::new("South", fleet_board(), HuntTargeting::new(3, SmallRng::seed_from_u64(2))),
    )
    .unwrap();
    let report = duel.run().unwrap();
    assert!(report.moves <= 17);
    assert!(report.winner.is_some());
}

#[test]
fn test_batch_summary() {
    let summary = run_batch(&GameConfig::default(), 40, 100, 4).unwrap();
    assert_eq!(summary.games, 40);
    assert!(summary.min_moves >= 17);
    assert!(summary.max_moves <= 100);
    assert!(summary.mean_moves >= summary.min_moves as f64);
    assert!(summary.mean_moves <= summary.max_moves as f64);

    let single = run_batch(&GameConfig::default(), 40, 100, 1).unwrap();
    assert_eq!(single, summary);
}

#[test]
fn test_small_board_config() {
    let config = GameConfig {
        board_size: 4,
        fleet: vec![ShipType::new("Destroyer", 2)],
        ..GameConfig::default()
    };
    for seed in 0..20 {
        let report = new_simulation(&config, seed).unwrap().run().unwrap();
        assert!(report.moves <= 16);
        assert_eq!(report.hits, 2);
    }
}

#[test]
fn test_hits_already_on_board_count_towards_the_end() {
    let mut board = Board::new(4);
    board
        .place(
            ShipType::new("Destroyer", 2),
            vec![Coordinate::new(2, 1), Coordinate::new(2, 2)],
        )
        .unwrap();
    board.receive_attack(Coordinate::new(2, 1)).unwrap();
    let engine = HuntTargeting::new(4, SmallRng::seed_from_u64(6));
    let report = Simulation::new(board, engine).unwrap().run().unwrap();
    assert_eq!(report.hits, 1);
    assert!(report.moves <= 15);
}

#[test]
fn test_finish_before_game_over_is_an_error() {
    let mut game = new_simulation(&GameConfig::default(), 8).unwrap();
    game.step().unwrap();
    assert!(matches!(game.finish(), Err(GameError::Unfinished { moves: 1 })));

    let mut duel = new_duel(&GameConfig::default(), (3, 4)).unwrap();
    duel.play_turn().unwrap();
    assert!(matches!(duel.finish(), Err(GameError::Unfinished { moves: 1 })));
}

#[test]
fn test_run_game_follows_config_mode() {
    let single = run_game(&GameConfig::default(), 12).unwrap();
    assert!(single.winner.is_none());

    let config = GameConfig {
        mode: GameMode::Duel,
        ..GameConfig::default()
    };
    let duel = run_game(&config, 12).unwrap();
    assert!(duel.winner.is_some());
    assert_eq!(duel, new_duel(&config, (12, 13)).unwrap().run().unwrap());
}

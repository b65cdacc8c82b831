use clap::Parser;
use dungeon_navigator::algorithms::{AStar, Algorithm, BidirectionalAStar, TileNavigator};
use dungeon_navigator::bot::BehaviourSet;
use dungeon_navigator::config::{Config, CostWeights};
use dungeon_navigator::level::Level;
use dungeon_navigator::simulation::Simulation;
use dungeon_navigator::{Location, Navigator, Turn};

fn config(args: &[&str]) -> Config {
    Config::parse_from(std::iter::once("dungeon_navigator").chain(args.iter().copied()))
}

#[test]
fn test_cli_arguments() {
    let config = config(&[
        "--algorithm",
        "bidirectional",
        "--behaviour",
        "aggressive",
        "--visibility",
        "3",
    ]);
    assert_eq!(config.algorithm, Algorithm::Bidirectional);
    assert_eq!(config.behaviour, BehaviourSet::Aggressive);
    assert_eq!(config.visibility, 3);
    assert_eq!(config.cost_weights(), CostWeights::default());
}

#[test]
fn test_demo_map_reaches_exit_with_a_star() {
    let mut simulation = Simulation::new(config(&["--algorithm", "a-star"])).unwrap();
    let (stats, timing) = simulation.run().unwrap();
    assert!(stats.reached_exit, "{}", stats);
    assert!(!stats.player_died);
    assert!(stats.total_moves >= stats.optimal_path_length);
    assert_eq!(stats.panics, 0);
    assert_eq!(timing.total_calls(), stats.turns);
}

#[test]
fn test_demo_map_reaches_exit_with_bidirectional() {
    let mut simulation = Simulation::new(config(&["--algorithm", "bidirectional"])).unwrap();
    let (stats, _) = simulation.run().unwrap();
    assert!(stats.reached_exit, "{}", stats);
    assert!(stats.total_moves >= stats.optimal_path_length);
}

#[test]
fn test_aggressive_bot_reaches_exit() {
    let mut simulation = Simulation::new(config(&["--behaviour", "aggressive"])).unwrap();
    let (stats, _) = simulation.run().unwrap();
    assert!(stats.reached_exit, "{}", stats);
    assert!(stats.attacks > 0);
}

#[test]
fn test_run_all_algorithms_on_same_level() {
    let results = Simulation::run_all_algorithms(config(&["--algorithm", "all"])).unwrap();
    let names: Vec<&str> = results.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, ["a_star", "bidirectional"]);
    assert!(results.iter().all(|r| r.statistics.reached_exit));
    assert_eq!(
        results[0].statistics.optimal_path_length,
        results[1].statistics.optimal_path_length
    );
}

#[test]
fn test_map_loaded_from_file() {
    let path = std::env::temp_dir().join(format!("dungeon_navigator_{}.txt", std::process::id()));
    std::fs::write(&path, "#######\n#@..#.#\n#.#...!\n#######\n").unwrap();

    let mut simulation = Simulation::new(config(&["--map", path.to_str().unwrap()])).unwrap();
    let (stats, _) = simulation.run().unwrap();
    std::fs::remove_file(&path).ok();

    assert!(stats.reached_exit, "{}", stats);
    assert_eq!(stats.optimal_path_length, 6);
}

#[test]
fn test_sealed_exit_is_rejected() {
    let path = std::env::temp_dir().join(format!("dungeon_navigator_sealed_{}.txt", std::process::id()));
    std::fs::write(&path, "@.#!\n..#.\n").unwrap();

    let result = Simulation::new(config(&["--map", path.to_str().unwrap()]));
    std::fs::remove_file(&path).ok();
    assert!(matches!(
        result,
        Err(dungeon_navigator::NavigatorError::UnreachableExit)
    ));
}

/// Walks a corridor towards a target that stays out of sight, counting searches.
fn walk_hidden_corridor(mut navigator: Navigator, turns: usize) -> (Navigator, Location) {
    let mut level = Level::parse("@...................!", 3, 0).unwrap();
    let target = Location::new(20, 0);
    for _ in 0..turns {
        let view = level.view();
        assert!(!view.field.is_visible(target));
        navigator.initialize_turn(&view, false);
        let turn = navigator.go_to(target, &view).unwrap();
        assert!(matches!(turn, Some(Turn::Step(_))));
        level.apply(turn.unwrap());
    }
    let location = level.player().location;
    (navigator, location)
}

#[test]
fn test_cached_path_rebuilt_every_window_drift() {
    let engines: [Box<dyn TileNavigator>; 2] = [
        Box::new(AStar::new()),
        Box::new(BidirectionalAStar::new()),
    ];
    for engine in engines {
        let navigator = Navigator::new(engine, CostWeights::default());
        let (navigator, location) = walk_hidden_corridor(navigator, 10);
        assert_eq!(location, Location::new(10, 0));
        // Visibility 3 rebuilds once the player drifts 2 steps from the origin.
        assert_eq!(navigator.search_calls(), 5, "{}", navigator.algorithm_name());
    }
}

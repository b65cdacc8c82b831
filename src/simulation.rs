use crate::algorithms::{AStar, Algorithm, TileNavigator};
use crate::bot::PlayerBot;
use crate::config::Config;
use crate::error::{NavigatorError, Result};
use crate::level::Level;
use crate::statistics::{Statistics, TimingData};
use crate::turn::Turn;
use log::{info, warn};
use std::time::Instant;

/// Dungeon used when no `--map` is given.
pub const DEMO_MAP: &str = "\
################################
#@.....#...........#...........#
#......#...M.......#.....$.....#
#......#...........#...........#
#..+...........*...........M...#
#......#...........#...........#
#......#####.#######...........#
#......#...........#######.#####
#......#.....M.....#...........#
#..............$...#.......+...#
#......#...........+...........!
################################
";

#[derive(Debug, Clone)]
pub struct AlgorithmResult {
    pub name: String,
    pub statistics: Statistics,
    pub timing_data: TimingData,
}

pub struct Simulation {
    level: Level,
    bot: PlayerBot,
    config: Config,
    optimal_path_length: usize,
}

impl Simulation {
    /// Builds a simulation for the configured algorithm. `All` falls back to
    /// A*; use `run_all_algorithms` to compare.
    pub fn new(config: Config) -> Result<Self> {
        let engine = config
            .algorithm
            .create()
            .unwrap_or_else(|| Box::new(AStar::new()));
        Self::with_engine(config, engine)
    }

    pub fn with_engine(config: Config, engine: Box<dyn TileNavigator>) -> Result<Self> {
        let level = Self::load_level(&config)?;
        let optimal_path_length = level
            .shortest_exit_distance()
            .ok_or(NavigatorError::UnreachableExit)?;
        let bot = PlayerBot::new(engine, config.cost_weights(), config.behaviour);

        Ok(Simulation {
            level,
            bot,
            config,
            optimal_path_length,
        })
    }

    fn load_level(config: &Config) -> Result<Level> {
        match &config.map {
            Some(path) => Level::load(path, config.visibility, config.seed),
            None => Level::parse(DEMO_MAP, config.visibility, config.seed),
        }
    }

    pub fn level(&self) -> &Level {
        &self.level
    }

    pub fn bot(&self) -> &PlayerBot {
        &self.bot
    }

    pub fn run(&mut self) -> Result<(Statistics, TimingData)> {
        let mut stats = Statistics::new(self.optimal_path_length);
        let mut timing_data = TimingData::new();

        info!(
            "simulation: {} on a {}x{} level, visibility {}",
            self.bot.navigator().algorithm_name(),
            self.level.field().width(),
            self.level.field().height(),
            self.config.visibility
        );

        while stats.turns < self.config.max_turns {
            if self.level.is_completed() || self.level.is_player_dead() {
                break;
            }

            let mut view = self.level.view();
            let start = Instant::now();
            let turn = self.bot.make_turn(&mut view)?;
            timing_data.record(start.elapsed());

            let before = self.level.player().location;
            self.level.apply(turn);
            stats.turns += 1;

            match turn {
                Turn::None => stats.waits += 1,
                Turn::Step(_) if self.level.player().location != before => stats.total_moves += 1,
                Turn::Step(_) => {}
                Turn::Attack(_) => stats.attacks += 1,
            }
        }

        if !self.level.is_completed() && !self.level.is_player_dead() {
            warn!(
                "simulation: turn limit of {} reached before the exit",
                self.config.max_turns
            );
        }

        stats.panics = self.bot.panics();
        stats.search_calls = self.bot.navigator().search_calls();
        stats.reached_exit = self.level.is_completed();
        stats.player_died = self.level.is_player_dead();
        stats.final_health = self.level.player().health;
        stats.calculate_efficiency();

        info!(
            "simulation: finished after {} turns, exit reached: {}, {} searches",
            stats.turns, stats.reached_exit, stats.search_calls
        );
        Ok((stats, timing_data))
    }

    /// Runs every search algorithm on the same level and seed.
    pub fn run_all_algorithms(config: Config) -> Result<Vec<AlgorithmResult>> {
        let algorithms = [Algorithm::AStar, Algorithm::Bidirectional];
        let mut results = Vec::new();

        for (i, algorithm) in algorithms.into_iter().enumerate() {
            let Some(engine) = algorithm.create() else {
                continue;
            };
            let name = engine.name().to_string();
            info!(
                "simulation: running algorithm {} of {}: {}",
                i + 1,
                algorithms.len(),
                name
            );

            let mut algorithm_config = config.clone();
            algorithm_config.algorithm = algorithm;
            let mut simulation = Simulation::with_engine(algorithm_config, engine)?;
            let (statistics, timing_data) = simulation.run()?;

            results.push(AlgorithmResult {
                name,
                statistics,
                timing_data,
            });
        }

        Ok(results)
    }

    pub fn print_comparison_results(results: &[AlgorithmResult]) {
        println!("\n=== ALGORITHM COMPARISON RESULTS ===\n");
        println!(
            "{:<15} {:<8} {:<8} {:<8} {:<8} {:<8} {:<12} {:<10} {:<15}",
            "Algorithm", "Exit", "Turns", "Moves", "Optimal", "Attacks", "Efficiency", "Searches", "Avg Decision"
        );
        println!("{}", "-".repeat(100));

        for result in results {
            let stats = &result.statistics;
            println!(
                "{:<15} {:<8} {:<8} {:<8} {:<8} {:<8} {:<12} {:<10} {:<15}",
                result.name,
                if stats.reached_exit { "yes" } else { "no" },
                stats.turns,
                stats.total_moves,
                stats.optimal_path_length,
                stats.attacks,
                format!("{:.3}", stats.route_efficiency),
                stats.search_calls,
                format!("{:.2?}", result.timing_data.average_decision_time()),
            );
        }

        let fewest_searches = results
            .iter()
            .filter(|r| r.statistics.reached_exit)
            .min_by_key(|r| r.statistics.search_calls);
        match fewest_searches {
            Some(best) => println!(
                "\nFewest searches: {} ({} calls)",
                best.name, best.statistics.search_calls
            ),
            None => println!("\nNo algorithm reached the exit."),
        }
    }
}

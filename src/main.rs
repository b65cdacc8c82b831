use clap::Parser;

use dungeon_navigator::algorithms::Algorithm;
use dungeon_navigator::config::Config;
use dungeon_navigator::simulation::Simulation;

fn main() {
    let config = Config::parse();

    let default_filter = if config.quiet { "warn" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    if config.algorithm == Algorithm::All {
        match Simulation::run_all_algorithms(config) {
            Ok(results) => Simulation::print_comparison_results(&results),
            Err(e) => {
                eprintln!("Error running all algorithms: {}", e);
                std::process::exit(1);
            }
        }
        return;
    }

    let mut simulation = match Simulation::new(config) {
        Ok(simulation) => simulation,
        Err(e) => {
            eprintln!("Failed to create simulation: {}", e);
            std::process::exit(1);
        }
    };

    match simulation.run() {
        Ok((stats, timing_data)) => {
            println!("\n=== FINAL RESULTS ===");
            println!("Algorithm: {}", simulation.bot().navigator().algorithm_name());
            println!("{}", stats);

            println!("=== TIMING ANALYSIS ===");
            println!("Turns decided: {}", timing_data.total_calls());
            println!(
                "Average decision time: {:.2?}",
                timing_data.average_decision_time()
            );
            println!("Total decision time: {:.2?}", timing_data.total_decision_time());
            if stats.reached_exit {
                println!(
                    "Extra moves due to limited vision and detours: {}",
                    stats.extra_moves()
                );
            }
        }
        Err(e) => {
            eprintln!("Simulation failed: {}", e);
            std::process::exit(1);
        }
    }
}

use crate::algorithms::Algorithm;
use crate::bot::BehaviourSet;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// ASCII dungeon layout; the built-in demo dungeon is used when omitted.
    #[arg(long)]
    pub map: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = Algorithm::AStar)]
    pub algorithm: Algorithm,

    #[arg(long, value_enum, default_value_t = BehaviourSet::Standard)]
    pub behaviour: BehaviourSet,

    #[arg(long, default_value_t = 0)]
    pub seed: u64,

    #[arg(long, default_value_t = 2000)]
    pub max_turns: usize,

    /// Radius of the square window the player can see.
    #[arg(long, default_value_t = 5)]
    pub visibility: i32,

    /// Cost of stepping into a cell that has never been observed.
    #[arg(long, default_value_t = 10.0)]
    pub hidden_penalty: f64,

    #[arg(long, default_value_t = false)]
    pub quiet: bool,
}

impl Config {
    pub fn cost_weights(&self) -> CostWeights {
        CostWeights {
            hidden_penalty: self.hidden_penalty,
            ..CostWeights::default()
        }
    }
}

/// Coefficients of the edge cost model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CostWeights {
    pub default_cost: f64,
    pub hidden_penalty: f64,
    pub trap: f64,
    /// Applied to health packs at distance exactly 2.
    pub health_pack_outer: f64,
    pub monster_inner: f64,
    /// Applied to monsters at distance exactly 2.
    pub monster_outer: f64,
    pub wall_inner: f64,
    /// Applied to walls at distance exactly 2.
    pub wall_outer: f64,
}

impl Default for CostWeights {
    fn default() -> Self {
        CostWeights {
            default_cost: 1.0,
            hidden_penalty: 10.0,
            trap: 0.5,
            health_pack_outer: 0.5,
            monster_inner: 2.0,
            monster_outer: 0.5,
            wall_inner: 0.25,
            wall_outer: 0.1,
        }
    }
}

/// When the bot switches to careful navigation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DangerPolicy {
    pub radius: i32,
    pub monster_threshold: usize,
    pub max_health: i32,
    /// Below this share of max health the threshold is halved.
    pub wounded_fraction: f64,
}

impl Default for DangerPolicy {
    fn default() -> Self {
        DangerPolicy {
            radius: 5,
            monster_threshold: 6,
            max_health: 100,
            wounded_fraction: 0.5,
        }
    }
}

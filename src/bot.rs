//! Per-turn decision making on top of the navigator.
//!
//! A bot walks an ordered list of behaviours and plays the first one that
//! produces a turn. The orderings are fixed tables; nothing is discovered or
//! rearranged at runtime.

use crate::algorithms::TileNavigator;
use crate::config::{CostWeights, DangerPolicy};
use crate::error::Result;
use crate::grid::CellType;
use crate::location::Location;
use crate::navigator::Navigator;
use crate::turn::{StepDirection, Turn};
use crate::view::LevelView;
use clap::ValueEnum;
use log::{info, warn};
use rand::Rng;

const BASE_DAMAGE: f32 = 10.0;
const HEALTH_SCAN_RADIUS: i32 = 10;
const EXPLORE_CANDIDATES: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Behaviour {
    CheckForHealth,
    KillWeakenedMonster,
    CheckForBestItem,
    GrindMonsters,
    GoToExit,
    Explore,
    Panic,
}

impl Behaviour {
    fn announcement(self) -> &'static str {
        match self {
            Behaviour::CheckForHealth => "Checking for health.",
            Behaviour::KillWeakenedMonster => "Killing weak monster.",
            Behaviour::CheckForBestItem => "Going for item.",
            Behaviour::GrindMonsters => "Grinding monsters.",
            Behaviour::GoToExit => "Going to exit.",
            Behaviour::Explore => "Exploring.",
            Behaviour::Panic => "DO NOT KNOW WHAT TO DO!!!",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum BehaviourSet {
    /// Heal, finish weak monsters, gear up, fight, then leave.
    Standard,
    /// Fight whatever is visible, otherwise head for the exit.
    Aggressive,
}

impl BehaviourSet {
    pub fn behaviours(self) -> &'static [Behaviour] {
        match self {
            BehaviourSet::Standard => &[
                Behaviour::CheckForHealth,
                Behaviour::KillWeakenedMonster,
                Behaviour::CheckForBestItem,
                Behaviour::GrindMonsters,
                Behaviour::GoToExit,
                Behaviour::Explore,
                Behaviour::Panic,
            ],
            BehaviourSet::Aggressive => &[
                Behaviour::GrindMonsters,
                Behaviour::GoToExit,
                Behaviour::Explore,
                Behaviour::Panic,
            ],
        }
    }
}

pub struct PlayerBot {
    navigator: Navigator,
    behaviours: &'static [Behaviour],
    danger: DangerPolicy,
    previous_health: i32,
    last_behaviour: Option<Behaviour>,
    panics: usize,
}

impl PlayerBot {
    pub fn new(engine: Box<dyn TileNavigator>, weights: CostWeights, set: BehaviourSet) -> Self {
        PlayerBot {
            navigator: Navigator::new(engine, weights),
            behaviours: set.behaviours(),
            danger: DangerPolicy::default(),
            previous_health: 0,
            last_behaviour: None,
            panics: 0,
        }
    }

    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    pub fn last_behaviour(&self) -> Option<Behaviour> {
        self.last_behaviour
    }

    pub fn panics(&self) -> usize {
        self.panics
    }

    pub fn make_turn(&mut self, level: &mut LevelView) -> Result<Turn> {
        let careful = self.danger.is_careful(level);
        self.navigator.initialize_turn(level, careful);
        if careful {
            info!("[BOT]: Being careful.");
        }

        for &behaviour in self.behaviours {
            if let Some(turn) = self.run(behaviour, level)? {
                info!("[BOT]: {}", behaviour.announcement());
                self.last_behaviour = Some(behaviour);
                return Ok(turn);
            }
        }

        self.last_behaviour = None;
        Ok(Turn::None)
    }

    fn run(&mut self, behaviour: Behaviour, level: &mut LevelView) -> Result<Option<Turn>> {
        match behaviour {
            Behaviour::CheckForHealth => self.check_for_health(level),
            Behaviour::KillWeakenedMonster => self.kill_weakened_monster(level),
            Behaviour::CheckForBestItem => self.check_for_best_item(level),
            Behaviour::GrindMonsters => self.grind_monsters(level),
            Behaviour::GoToExit => self.go_to_exit(level),
            Behaviour::Explore => self.explore(level),
            Behaviour::Panic => Ok(Some(self.panic(level))),
        }
    }

    /// Heads for a health pack once health drops below a threshold that
    /// rises with the number of monsters around, and keeps doing so until
    /// health starts going up again.
    fn check_for_health(&mut self, level: &LevelView) -> Result<Option<Turn>> {
        let player = &level.player;
        if self.previous_health >= player.health {
            return self.go_to_closest_health_pack(level);
        }
        self.previous_health = 0;

        let monsters = level
            .monsters
            .iter()
            .filter(|m| m.location.is_in_range(player.location, HEALTH_SCAN_RADIUS))
            .count() as f64;
        let multiplier = 0.3 / (1.0 + (-2.0 * (monsters - 4.0)).exp()) + 0.5;
        if player.health as f64 >= self.danger.max_health as f64 * multiplier {
            return Ok(None);
        }

        self.previous_health = player.health;
        self.go_to_closest_health_pack(level)
    }

    fn kill_weakened_monster(&mut self, level: &LevelView) -> Result<Option<Turn>> {
        let player = &level.player;
        let mut monsters: Vec<_> = level
            .monsters
            .iter()
            .map(|m| (m, m.location.manhattan_distance(player.location)))
            .collect();
        monsters.sort_by_key(|&(_, distance)| distance);

        let Some(&(closest, _)) = monsters.first() else {
            return Ok(None);
        };
        if !closest.location.is_in_range(player.location, 1) {
            return Ok(None);
        }

        let damage_per_turn =
            player.total_attack as f32 / closest.defence.max(1) as f32 * BASE_DAMAGE * 0.95;
        let turns_to_kill = (closest.health as f32 / damage_per_turn).ceil() as i32;
        if monsters.iter().filter(|&&(_, distance)| distance < turns_to_kill).count() > 2 {
            return Ok(None);
        }

        Turn::attack(closest.location - player.location).map(Some)
    }

    fn check_for_best_item(&mut self, level: &LevelView) -> Result<Option<Turn>> {
        let player_location = level.player.location;
        let Some(closest) = level
            .items
            .iter()
            .min_by_key(|i| i.location.manhattan_distance(player_location))
        else {
            return Ok(None);
        };

        let Some(equipped) = level.player.equipped else {
            return self.navigator.go_to(closest.location, level);
        };

        let best = level
            .items
            .iter()
            .max_by(|a, b| a.power().total_cmp(&b.power()))
            .unwrap_or(closest);
        if equipped.power() >= best.power() {
            return Ok(None);
        }
        self.navigator.go_to(best.location, level)
    }

    fn grind_monsters(&mut self, level: &LevelView) -> Result<Option<Turn>> {
        let player_location = level.player.location;
        let Some(closest) = level
            .monsters
            .iter()
            .min_by_key(|m| m.location.manhattan_distance(player_location))
        else {
            return Ok(None);
        };

        if closest.location.is_in_range(player_location, 1) {
            return Turn::attack(closest.location - player_location).map(Some);
        }
        self.navigator.go_to(closest.location, level)
    }

    fn go_to_exit(&mut self, level: &LevelView) -> Result<Option<Turn>> {
        if level.player.health != self.danger.max_health {
            if let Some(turn) = self.go_to_closest_health_pack(level)? {
                return Ok(Some(turn));
            }
        }

        let exit = self
            .navigator
            .map()
            .memory()
            .cells_of_type(CellType::Exit)
            .into_iter()
            .next();
        match exit {
            Some(exit) => self.navigator.go_to(exit, level),
            None => Ok(None),
        }
    }

    /// Walks towards the nearest known cells bordering unexplored ones.
    fn explore(&mut self, level: &LevelView) -> Result<Option<Turn>> {
        let player_location = level.player.location;
        let map = self.navigator.map();
        let memory = map.memory();

        let mut frontier: Vec<Location> = Vec::new();
        for x in 0..memory.width() {
            for y in 0..memory.height() {
                let location = Location::new(x, y);
                let cell = memory.cell(location);
                if cell == CellType::Hidden || cell.is_obstacle() || location == player_location {
                    continue;
                }
                let borders_unknown = [(-1, 0), (0, -1), (1, 0), (0, 1)].iter().any(|&(dx, dy)| {
                    let neighbor = Location::new(x + dx, y + dy);
                    memory.contains(neighbor) && memory.cell(neighbor) == CellType::Hidden
                });
                if borders_unknown {
                    frontier.push(location);
                }
            }
        }

        frontier.sort_by_key(|location| location.manhattan_distance(player_location));
        frontier.truncate(EXPLORE_CANDIDATES);
        self.navigator.go_to_closest(&frontier)
    }

    fn panic(&mut self, level: &mut LevelView) -> Turn {
        self.panics += 1;
        let direction = StepDirection::ALL[level.random.gen_range(0..StepDirection::ALL.len())];
        warn!("[BOT]: panicking, stepping {:?}", direction);
        Turn::Step(direction)
    }

    fn go_to_closest_health_pack(&mut self, level: &LevelView) -> Result<Option<Turn>> {
        let packs: Vec<Location> = level.health_packs.iter().map(|hp| hp.location).collect();
        if packs.is_empty() {
            return Ok(None);
        }
        self.navigator.go_to_closest(&packs)
    }
}

//! Ground-truth dungeon level for the simulation harness.
//!
//! Levels are read from ASCII layouts:
//!
//! | char | meaning        |
//! |------|----------------|
//! | `.`  | empty floor    |
//! | `#`  | wall           |
//! | `*`  | trap           |
//! | `!`  | exit           |
//! | `S`  | player start   |
//! | `@`  | player         |
//! | `M`  | monster        |
//! | `$`  | item           |
//! | `+`  | health pack    |
//!
//! The rule set is the minimum the navigator needs to be exercised:
//! stepping, picking things up, traps, attacking and retaliation from
//! adjacent monsters. Monsters never move.

use crate::error::{NavigatorError, Result};
use crate::grid::{CellType, FieldView};
use crate::location::Location;
use crate::turn::Turn;
use crate::view::{HealthPackView, ItemView, LevelView, PawnView};
use log::{debug, info};
use pathfinding::prelude::astar;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::Path;

pub const PLAYER_MAX_HEALTH: i32 = 100;
const BASE_DAMAGE: f64 = 10.0;
const TRAP_DAMAGE: i32 = 20;
const RETALIATION_SCALE: f64 = 0.5;

pub struct Level {
    field: FieldView,
    player: PawnView,
    monsters: Vec<PawnView>,
    items: Vec<ItemView>,
    health_packs: Vec<HealthPackView>,
    seed: u64,
    turn: u64,
    completed: bool,
}

fn monster(location: Location) -> PawnView {
    PawnView {
        name: "Monster".to_string(),
        attack: 4,
        defence: 5,
        total_attack: 4,
        total_defence: 5,
        health: 20,
        location,
        is_destroyed: false,
        equipped: None,
    }
}

fn player(location: Location) -> PawnView {
    PawnView {
        name: "Player".to_string(),
        attack: 10,
        defence: 10,
        total_attack: 10,
        total_defence: 10,
        health: PLAYER_MAX_HEALTH,
        location,
        is_destroyed: false,
        equipped: None,
    }
}

impl Level {
    pub fn load(path: &Path, visibility: i32, seed: u64) -> Result<Level> {
        let text = std::fs::read_to_string(path).map_err(|source| NavigatorError::MapIo {
            path: path.to_path_buf(),
            source,
        })?;
        Level::parse(&text, visibility, seed)
    }

    /// Parses an ASCII layout; `visibility` is the radius of the player's
    /// square view window.
    pub fn parse(text: &str, visibility: i32, seed: u64) -> Result<Level> {
        let rows: Vec<&str> = text
            .lines()
            .map(|line| line.trim_end_matches('\r'))
            .filter(|line| !line.is_empty())
            .collect();
        let width = rows.first().map_or(0, |row| row.chars().count());
        let height = rows.len();

        let mut cells = vec![vec![CellType::Empty; height]; width];
        let mut player_at = None;
        let mut start_at = None;
        let mut monsters = Vec::new();
        let mut items = Vec::new();
        let mut health_packs = Vec::new();

        for (y, row) in rows.iter().enumerate() {
            let row_width = row.chars().count();
            if row_width != width {
                return Err(NavigatorError::RaggedMap {
                    row: y + 1,
                    width: row_width,
                    expected: width,
                });
            }
            for (x, symbol) in row.chars().enumerate() {
                let location = Location::new(x as i32, y as i32);
                cells[x][y] = match symbol {
                    '.' => CellType::Empty,
                    '#' => CellType::Wall,
                    '*' => CellType::Trap,
                    '!' => CellType::Exit,
                    'S' => {
                        start_at.get_or_insert(location);
                        CellType::PlayerStart
                    }
                    '@' => {
                        player_at = Some(location);
                        CellType::PlayerStart
                    }
                    'M' => {
                        monsters.push(monster(location));
                        CellType::Empty
                    }
                    '$' => {
                        items.push(ItemView {
                            attack_bonus: 4,
                            defence_bonus: 2,
                            location,
                        });
                        CellType::Empty
                    }
                    '+' => {
                        health_packs.push(HealthPackView {
                            health: 50,
                            location,
                        });
                        CellType::Empty
                    }
                    found => {
                        return Err(NavigatorError::MapParse {
                            line: y + 1,
                            column: x + 1,
                            found,
                        })
                    }
                };
            }
        }

        let start = player_at.or(start_at).ok_or(NavigatorError::MissingPlayer)?;
        Ok(Level {
            field: FieldView::new(cells, visibility, visibility),
            player: player(start),
            monsters,
            items,
            health_packs,
            seed,
            turn: 0,
            completed: false,
        })
    }

    fn is_visible(&self, location: Location) -> bool {
        let offset = location - self.player.location;
        offset.dx.abs() <= self.field.visibility_width()
            && offset.dy.abs() <= self.field.visibility_height()
    }

    /// What the player can see this turn.
    pub fn view(&self) -> LevelView {
        LevelView {
            field: self.field.masked_around(self.player.location),
            player: self.player.clone(),
            monsters: self
                .monsters
                .iter()
                .filter(|m| self.is_visible(m.location))
                .cloned()
                .collect(),
            items: self
                .items
                .iter()
                .filter(|i| self.is_visible(i.location))
                .copied()
                .collect(),
            health_packs: self
                .health_packs
                .iter()
                .filter(|hp| self.is_visible(hp.location))
                .copied()
                .collect(),
            random: StdRng::seed_from_u64(self.seed.wrapping_add(self.turn)),
        }
    }

    pub fn player(&self) -> &PawnView {
        &self.player
    }

    pub fn monsters(&self) -> &[PawnView] {
        &self.monsters
    }

    pub fn field(&self) -> &FieldView {
        &self.field
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    pub fn is_player_dead(&self) -> bool {
        self.player.is_destroyed
    }

    pub fn exit(&self) -> Option<Location> {
        self.field.cells_of_type(CellType::Exit).into_iter().next()
    }

    /// Length of the shortest walk from the player to the exit on the full,
    /// unmasked field, ignoring entities.
    pub fn shortest_exit_distance(&self) -> Option<usize> {
        let exit = self.exit()?;
        let result = astar(
            &self.player.location,
            |&location| {
                let neighbors = [
                    Location::new(location.x - 1, location.y),
                    Location::new(location.x, location.y - 1),
                    Location::new(location.x + 1, location.y),
                    Location::new(location.x, location.y + 1),
                ];
                neighbors
                    .into_iter()
                    .filter(|&n| {
                        self.field.contains(n) && (n == exit || !self.field.cell(n).is_obstacle())
                    })
                    .map(|n| (n, 1u32))
                    .collect::<Vec<_>>()
            },
            |&location| location.manhattan_distance(exit) as u32,
            |&location| location == exit,
        );
        result.map(|(_, cost)| cost as usize)
    }

    /// Applies one player turn, then lets adjacent monsters strike back.
    pub fn apply(&mut self, turn: Turn) {
        self.turn += 1;
        if self.completed || self.player.is_destroyed {
            return;
        }

        match turn {
            Turn::None => {}
            Turn::Step(direction) => self.step(self.player.location + direction.offset()),
            Turn::Attack(direction) => self.attack(self.player.location + direction.offset()),
        }

        if !self.completed {
            self.retaliate();
        }
    }

    fn step(&mut self, destination: Location) {
        let cell = self.field.cell(destination);
        if !self.field.contains(destination)
            || cell == CellType::Wall
            || self.monsters.iter().any(|m| m.location == destination)
        {
            return;
        }

        self.player.location = destination;

        if let Some(index) = self.health_packs.iter().position(|hp| hp.location == destination) {
            let pack = self.health_packs.remove(index);
            self.player.health = (self.player.health + pack.health).min(PLAYER_MAX_HEALTH);
            debug!("level: picked up health pack, health {}", self.player.health);
        }

        if let Some(index) = self.items.iter().position(|i| i.location == destination) {
            let item = self.items.remove(index);
            self.player.total_attack = self.player.attack + item.attack_bonus;
            self.player.total_defence = self.player.defence + item.defence_bonus;
            self.player.equipped = Some(item);
            debug!("level: equipped item {:?}", item);
        }

        match cell {
            CellType::Trap => self.hurt_player(TRAP_DAMAGE),
            CellType::Exit => {
                self.completed = true;
                info!("level: exit reached after {} turns", self.turn);
            }
            _ => {}
        }
    }

    fn attack(&mut self, target: Location) {
        let Some(index) = self.monsters.iter().position(|m| m.location == target) else {
            return;
        };
        let damage = self.player.total_attack as f64 / self.monsters[index].total_defence as f64
            * BASE_DAMAGE;
        let monster = &mut self.monsters[index];
        monster.health -= (damage.round() as i32).max(1);
        if monster.health <= 0 {
            debug!("level: monster at {} destroyed", target);
            self.monsters.remove(index);
        }
    }

    fn retaliate(&mut self) {
        let player_location = self.player.location;
        let total_defence = self.player.total_defence.max(1) as f64;
        let damage: i32 = self
            .monsters
            .iter()
            .filter(|m| m.location.is_in_range(player_location, 1))
            .map(|m| {
                let hit = m.total_attack as f64 / total_defence * BASE_DAMAGE * RETALIATION_SCALE;
                (hit.round() as i32).max(1)
            })
            .sum();
        if damage > 0 {
            self.hurt_player(damage);
        }
    }

    fn hurt_player(&mut self, damage: i32) {
        self.player.health -= damage;
        if self.player.health <= 0 {
            self.player.health = 0;
            self.player.is_destroyed = true;
            info!("level: player died after {} turns", self.turn);
        }
    }
}

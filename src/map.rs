//! Grid adapter between the level view and the search engine.
//!
//! Keeps a fog-of-war memory of the field: once a cell has been seen it
//! keeps its last known type for the rest of the level. Only cells inside
//! the current visibility window are rewritten each turn.

use crate::algorithms::Graph;
use crate::grid::{CellType, FieldView, Tile};
use crate::location::Location;
use crate::view::LevelView;
use log::debug;
use rustc_hash::FxHashSet;

pub struct Map {
    memory: FieldView,
    occupied: FxHashSet<Location>,
    target: Option<Location>,
}

impl Default for Map {
    fn default() -> Self {
        Self::new()
    }
}

impl Map {
    pub fn new() -> Self {
        Map {
            memory: FieldView::new(Vec::new(), 0, 0),
            occupied: FxHashSet::default(),
            target: None,
        }
    }

    /// Forgets everything learned about the previous level.
    pub fn reset(&mut self, width: i32, height: i32, visibility_width: i32, visibility_height: i32) {
        let cells = vec![vec![CellType::Hidden; height.max(0) as usize]; width.max(0) as usize];
        self.memory = FieldView::new(cells, visibility_width, visibility_height);
        self.occupied.clear();
        self.target = None;
    }

    /// Merges this turn's visible window into memory and snapshots the
    /// locations occupied by visible entities.
    pub fn observe(&mut self, level: &LevelView) {
        let field = &level.field;
        if field.width() != self.memory.width() || field.height() != self.memory.height() {
            debug!(
                "map: field size changed to {}x{}, resetting memory",
                field.width(),
                field.height()
            );
            self.reset(
                field.width(),
                field.height(),
                field.visibility_width(),
                field.visibility_height(),
            );
        }

        let center = level.player.location;
        for x in (center.x - field.visibility_width())..=(center.x + field.visibility_width()) {
            for y in (center.y - field.visibility_height())..=(center.y + field.visibility_height()) {
                let location = Location::new(x, y);
                let cell = field.cell(location);
                if cell != CellType::Hidden {
                    self.memory.set(location, cell);
                }
            }
        }

        self.occupied.clear();
        self.occupied.extend(level.monsters.iter().map(|m| m.location));
        self.occupied.extend(level.items.iter().map(|i| i.location));
        self.occupied.extend(level.health_packs.iter().map(|hp| hp.location));
    }

    pub fn set_target(&mut self, target: Location) {
        self.target = Some(target);
    }

    pub fn target(&self) -> Option<Location> {
        self.target
    }

    /// Last known type of the cell; Hidden if never seen.
    pub fn cell(&self, location: Location) -> CellType {
        self.memory.cell(location)
    }

    pub fn memory(&self) -> &FieldView {
        &self.memory
    }

    pub fn is_blocked_location(&self, location: Location) -> bool {
        if self.target == Some(location) {
            return false;
        }
        if !self.memory.contains(location) {
            return true;
        }
        self.memory.cell(location).is_obstacle() || self.occupied.contains(&location)
    }
}

impl Graph for Map {
    fn is_blocked(&self, tile: Tile) -> bool {
        self.is_blocked_location(Location::from(tile))
    }

    fn neighbors(&self, tile: Tile) -> [Tile; 4] {
        [
            Tile::new(tile.x - 1, tile.y),
            Tile::new(tile.x, tile.y - 1),
            Tile::new(tile.x + 1, tile.y),
            Tile::new(tile.x, tile.y + 1),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::Level;

    fn observed(rows: &[&str], radius: i32) -> Map {
        let level = Level::parse(&rows.join("\n"), radius, 7).unwrap();
        let mut map = Map::new();
        map.observe(&level.view());
        map
    }

    #[test]
    fn test_static_obstacles_are_blocked() {
        let map = observed(&["@.#", "*.!", "..."], 3);
        assert!(!map.is_blocked(Tile::new(1, 0)));
        assert!(map.is_blocked(Tile::new(2, 0)));
        assert!(map.is_blocked(Tile::new(0, 1)));
        assert!(map.is_blocked(Tile::new(2, 1)));
    }

    #[test]
    fn test_out_of_bounds_is_blocked() {
        let map = observed(&["@.."], 3);
        assert!(map.is_blocked(Tile::new(-1, 0)));
        assert!(map.is_blocked(Tile::new(0, -1)));
        assert!(map.is_blocked(Tile::new(3, 0)));
    }

    #[test]
    fn test_entities_block_unless_targeted() {
        let mut map = observed(&["@M$+"], 4);
        assert!(map.is_blocked(Tile::new(1, 0)));
        assert!(map.is_blocked(Tile::new(2, 0)));
        assert!(map.is_blocked(Tile::new(3, 0)));

        map.set_target(Location::new(1, 0));
        assert!(!map.is_blocked(Tile::new(1, 0)));
        assert!(map.is_blocked(Tile::new(2, 0)));
    }

    #[test]
    fn test_target_wall_is_passable() {
        let mut map = observed(&["@.#"], 3);
        map.set_target(Location::new(2, 0));
        assert!(!map.is_blocked(Tile::new(2, 0)));
    }

    #[test]
    fn test_memory_is_sticky() {
        let mut level = Level::parse("@....#", 1, 7).unwrap();
        let mut map = Map::new();
        map.observe(&level.view());
        assert_eq!(map.cell(Location::new(1, 0)), CellType::Empty);
        assert_eq!(map.cell(Location::new(5, 0)), CellType::Hidden);

        for _ in 0..4 {
            level.apply(crate::turn::Turn::Step(crate::turn::StepDirection::East));
            map.observe(&level.view());
        }
        assert_eq!(map.cell(Location::new(5, 0)), CellType::Wall);
        // The start cell is out of view now but stays remembered.
        assert_eq!(map.cell(Location::new(0, 0)), CellType::PlayerStart);
    }

    #[test]
    fn test_neighbors_are_cardinal() {
        let map = Map::new();
        let neighbors = map.neighbors(Tile::new(3, 3));
        assert_eq!(
            neighbors,
            [Tile::new(2, 3), Tile::new(3, 2), Tile::new(4, 3), Tile::new(3, 4)]
        );
    }
}

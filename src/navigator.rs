//! Turns a target location into a single next-step action.
//!
//! Live searches run whenever the target is visible or the bot is careful;
//! otherwise the cached path is consumed one tile per turn until it goes
//! stale. When the target is unreachable the navigator tries to clear a way
//! to it through the entities standing next to it.

use crate::algorithms::TileNavigator;
use crate::config::{CostWeights, DangerPolicy};
use crate::error::Result;
use crate::grid::Tile;
use crate::location::Location;
use crate::map::Map;
use crate::path_cache::PathCache;
use crate::turn::Turn;
use crate::view::LevelView;
use crate::weights::CostModel;
use log::debug;
use rustc_hash::FxHashSet;

impl DangerPolicy {
    /// True when enough monsters surround the player to warrant weighted,
    /// uncached navigation. A wounded player tolerates half as many.
    pub fn is_careful(&self, level: &LevelView) -> bool {
        let player = &level.player;
        let nearby = level
            .monsters
            .iter()
            .filter(|m| m.location.is_in_range(player.location, self.radius))
            .count();
        let wounded = (player.health as f64) < self.max_health as f64 * self.wounded_fraction;
        let threshold = if wounded {
            self.monster_threshold / 2
        } else {
            self.monster_threshold
        };
        nearby >= threshold
    }
}

pub struct Navigator {
    engine: Box<dyn TileNavigator>,
    map: Map,
    costs: CostModel,
    cache: PathCache,
    player: Option<Location>,
    careful: bool,
    visibility: (i32, i32),
    fallback_visited: FxHashSet<Location>,
}

impl Navigator {
    pub fn new(engine: Box<dyn TileNavigator>, weights: CostWeights) -> Self {
        Navigator {
            engine,
            map: Map::new(),
            costs: CostModel::new(weights),
            cache: PathCache::new(),
            player: None,
            careful: false,
            visibility: (0, 0),
            fallback_visited: FxHashSet::default(),
        }
    }

    /// Forgets the current level: field memory, wall memo and cached path.
    pub fn begin_level(&mut self) {
        debug!("navigator: new level");
        self.map.reset(0, 0, 0, 0);
        self.costs.begin_level();
        self.cache.discard();
        self.player = None;
    }

    /// Refreshes the per-turn state. Must run once before any `go_to*` call
    /// of the turn.
    pub fn initialize_turn(&mut self, level: &LevelView, careful: bool) {
        let location = level.player.location;
        let resized = level.field.width() != self.map.memory().width()
            || level.field.height() != self.map.memory().height();
        let teleported = self
            .player
            .is_some_and(|previous| (location - previous).king_distance() > 1);
        if resized || teleported {
            self.begin_level();
        }

        self.player = Some(location);
        self.careful = careful;
        self.visibility = (
            level.field.visibility_width(),
            level.field.visibility_height(),
        );
        self.fallback_visited.clear();
        self.map.observe(level);
        self.costs.begin_turn(&self.map, level, careful);
    }

    pub fn is_careful(&self) -> bool {
        self.careful
    }

    pub fn search_calls(&self) -> usize {
        self.engine.search_calls()
    }

    pub fn algorithm_name(&self) -> &'static str {
        self.engine.name()
    }

    pub fn map(&self) -> &Map {
        &self.map
    }

    pub fn cache(&self) -> &PathCache {
        &self.cache
    }

    fn player(&self) -> Location {
        self.player.unwrap_or_default()
    }

    /// One step towards `target`, or `None` when it is unreachable and no
    /// fallback helped. Standing on the target also yields `None`.
    pub fn go_to(&mut self, target: Location, level: &LevelView) -> Result<Option<Turn>> {
        let player = self.player();
        if target == player {
            return Ok(None);
        }

        let tile = if level.field.is_visible(target) || self.careful {
            self.cache.discard();
            match self.navigate(target) {
                Some(path) => match path.first() {
                    Some(&tile) => tile,
                    None => return Ok(None),
                },
                None => return self.try_clear_path(target, level),
            }
        } else {
            if self.cache_is_stale(target) {
                debug!("navigator: rebuilding cached path to {}", target);
                match self.navigate(target) {
                    Some(path) => self.cache.store(path, player, target),
                    None => {
                        self.cache.discard();
                        return self.try_clear_path(target, level);
                    }
                }
            }
            match self.cache.next_tile() {
                Some(tile) => tile,
                None => return Ok(None),
            }
        };

        self.step_to(tile).map(Some)
    }

    /// Searches every candidate and steps along the shortest path found.
    pub fn go_to_closest(&mut self, targets: &[Location]) -> Result<Option<Turn>> {
        self.cache.discard();
        let player = self.player();

        let mut best: Option<Vec<Tile>> = None;
        for &target in targets.iter().filter(|&&t| t != player) {
            if let Some(path) = self.navigate(target) {
                if best.as_ref().map_or(true, |b| path.len() < b.len()) {
                    best = Some(path);
                }
            }
        }

        match best.as_ref().and_then(|path| path.first()) {
            Some(&tile) => self.step_to(tile).map(Some),
            None => Ok(None),
        }
    }

    /// Fallback for an unreachable target: try to reach, or attack, the
    /// health packs, items and monsters standing next to it.
    fn try_clear_path(&mut self, target: Location, level: &LevelView) -> Result<Option<Turn>> {
        if !self.fallback_visited.insert(target) {
            return Ok(None);
        }
        debug!("navigator: {} unreachable, trying to clear a path", target);

        let player = self.player();
        let beside_target = |location: &Location| target.is_in_step_range(*location);
        let packs = level.health_packs.iter().map(|hp| hp.location);
        let items = level.items.iter().map(|i| i.location);
        let candidates: Vec<(Location, bool)> = packs
            .chain(items)
            .filter(beside_target)
            .map(|location| (location, false))
            .chain(
                level
                    .monsters
                    .iter()
                    .map(|m| m.location)
                    .filter(beside_target)
                    .map(|location| (location, true)),
            )
            .collect();

        for (candidate, is_monster) in candidates {
            if self.fallback_visited.contains(&candidate) {
                continue;
            }
            if is_monster && candidate.is_in_range(player, 1) {
                return Turn::attack(candidate - player).map(Some);
            }
            if let Some(turn) = self.go_to(candidate, level)? {
                return Ok(Some(turn));
            }
        }

        debug!("navigator: no way to clear a path to {}", target);
        Ok(None)
    }

    fn cache_is_stale(&mut self, target: Location) -> bool {
        let player = self.player();
        self.map.set_target(target);
        if self.cache.target() != Some(target)
            || self
                .cache
                .needs_rebuild(player, self.visibility.0, self.visibility.1)
        {
            return true;
        }
        // The player did not end up where the cache expected, or something
        // now stands on the next tile.
        self.cache.peek().map_or(true, |tile| {
            !player.is_in_step_range(Location::from(tile)) || self.map.is_blocked_location(tile.into())
        })
    }

    fn navigate(&mut self, target: Location) -> Option<Vec<Tile>> {
        self.map.set_target(target);
        let from = Tile::from(self.player());
        self.engine
            .navigate(&self.map, &mut self.costs, from, Tile::from(target))
    }

    fn step_to(&self, tile: Tile) -> Result<Turn> {
        Turn::step(Location::from(tile) - self.player())
    }
}

//! Edge cost model.
//!
//! Flat mode charges the default cost, or the hidden penalty for cells never
//! observed. Weighted mode ("careful") multiplies four factors derived from
//! the neighbourhood of the destination cell: traps, health packs, walls and
//! monsters. All neighbourhood counts read a snapshot taken once per turn.

use crate::algorithms::DistanceAlgorithm;
use crate::config::CostWeights;
use crate::grid::{CellType, FieldView, Tile};
use crate::location::Location;
use crate::map::Map;
use crate::view::LevelView;
use rustc_hash::{FxHashMap, FxHashSet};

/// Neighbourhood queries the weighted cost is computed from.
pub trait DistanceContext {
    fn is_hidden(&self, location: Location) -> bool;

    /// True when every in-bounds cell within `range` has been observed.
    fn is_area_observed(&self, location: Location, range: i32) -> bool;

    fn traps_in_range(&self, location: Location, range: i32) -> usize;

    fn health_packs_in_range(&self, location: Location, range: i32) -> usize;

    fn monsters_in_range(&self, location: Location, range: i32) -> usize;

    fn walls_in_range(&self, location: Location, range: i32) -> usize;
}

/// Per-turn copy of everything the cost model looks at.
#[derive(Debug, Clone)]
pub struct TurnSnapshot {
    known: FieldView,
    traps: FxHashSet<Location>,
    walls: FxHashSet<Location>,
    health_packs: FxHashSet<Location>,
    monsters: FxHashSet<Location>,
}

impl Default for TurnSnapshot {
    fn default() -> Self {
        TurnSnapshot {
            known: FieldView::new(Vec::new(), 0, 0),
            traps: FxHashSet::default(),
            walls: FxHashSet::default(),
            health_packs: FxHashSet::default(),
            monsters: FxHashSet::default(),
        }
    }
}

impl TurnSnapshot {
    pub fn capture(map: &Map, level: &LevelView) -> Self {
        let known = map.memory().clone();
        TurnSnapshot {
            traps: known.cells_of_type(CellType::Trap).into_iter().collect(),
            walls: known.cells_of_type(CellType::Wall).into_iter().collect(),
            health_packs: level.health_packs.iter().map(|hp| hp.location).collect(),
            monsters: level.monsters.iter().map(|m| m.location).collect(),
            known,
        }
    }

    fn count_in_range(set: &FxHashSet<Location>, location: Location, range: i32) -> usize {
        let mut count = 0;
        for x in (location.x - range)..=(location.x + range) {
            for y in (location.y - range)..=(location.y + range) {
                if set.contains(&Location::new(x, y)) {
                    count += 1;
                }
            }
        }
        count
    }
}

impl DistanceContext for TurnSnapshot {
    fn is_hidden(&self, location: Location) -> bool {
        self.known.cell(location) == CellType::Hidden
    }

    fn is_area_observed(&self, location: Location, range: i32) -> bool {
        for x in (location.x - range)..=(location.x + range) {
            for y in (location.y - range)..=(location.y + range) {
                let cell = Location::new(x, y);
                if self.known.contains(cell) && self.known.cell(cell) == CellType::Hidden {
                    return false;
                }
            }
        }
        true
    }

    fn traps_in_range(&self, location: Location, range: i32) -> usize {
        Self::count_in_range(&self.traps, location, range)
    }

    fn health_packs_in_range(&self, location: Location, range: i32) -> usize {
        Self::count_in_range(&self.health_packs, location, range)
    }

    fn monsters_in_range(&self, location: Location, range: i32) -> usize {
        Self::count_in_range(&self.monsters, location, range)
    }

    fn walls_in_range(&self, location: Location, range: i32) -> usize {
        Self::count_in_range(&self.walls, location, range)
    }
}

/// Edge costs for one agent. Owns the turn snapshot and the wall-factor memo.
#[derive(Debug, Clone, Default)]
pub struct CostModel {
    weights: CostWeights,
    apply_weights: bool,
    snapshot: TurnSnapshot,
    wall_memo: FxHashMap<Location, f64>,
}

impl CostModel {
    pub fn new(weights: CostWeights) -> Self {
        CostModel {
            weights,
            ..CostModel::default()
        }
    }

    pub fn weights(&self) -> &CostWeights {
        &self.weights
    }

    pub fn apply_weights(&self) -> bool {
        self.apply_weights
    }

    /// Drops memoized wall factors; they belong to the previous level.
    pub fn begin_level(&mut self) {
        self.wall_memo.clear();
    }

    pub fn begin_turn(&mut self, map: &Map, level: &LevelView, apply_weights: bool) {
        self.apply_weights = apply_weights;
        self.snapshot = TurnSnapshot::capture(map, level);
    }

    pub fn memoized_walls(&self) -> usize {
        self.wall_memo.len()
    }

    /// Cost of entering `to`, evaluated against an arbitrary context.
    pub fn calculate_with<C: DistanceContext>(&mut self, context: &C, to: Location) -> f64 {
        cost_at(
            &self.weights,
            self.apply_weights,
            &mut self.wall_memo,
            context,
            to,
        )
    }

    pub fn set_apply_weights(&mut self, apply_weights: bool) {
        self.apply_weights = apply_weights;
    }
}

impl DistanceAlgorithm for CostModel {
    fn calculate(&mut self, _from: Tile, to: Tile) -> f64 {
        cost_at(
            &self.weights,
            self.apply_weights,
            &mut self.wall_memo,
            &self.snapshot,
            Location::from(to),
        )
    }
}

fn cost_at<C: DistanceContext>(
    weights: &CostWeights,
    apply_weights: bool,
    wall_memo: &mut FxHashMap<Location, f64>,
    context: &C,
    to: Location,
) -> f64 {
    if !apply_weights {
        return if context.is_hidden(to) {
            weights.hidden_penalty
        } else {
            weights.default_cost
        };
    }

    let traps = context.traps_in_range(to, 1) as f64;
    let trap_factor = 1.0 / (weights.trap * traps + 1.0);

    let packs_near = context.health_packs_in_range(to, 1) as f64;
    let packs_far = context.health_packs_in_range(to, 2) as f64;
    let health_factor = 1.0 / (weights.health_pack_outer * (packs_far - packs_near) + 1.0)
        * (1.0 / (packs_near + 1.0));

    let wall_factor = match wall_memo.get(&to) {
        Some(&factor) => factor,
        None => {
            let near = context.walls_in_range(to, 1) as f64;
            let far = context.walls_in_range(to, 2) as f64;
            let factor =
                (weights.wall_outer * (far - near) + 1.0) * (weights.wall_inner * near + 1.0);
            // Only final once nothing within range 2 is still unexplored.
            if context.is_area_observed(to, 2) {
                wall_memo.insert(to, factor);
            }
            factor
        }
    };

    let monsters_near = context.monsters_in_range(to, 1) as f64;
    let monsters_far = context.monsters_in_range(to, 2) as f64;
    let monster_factor = (weights.monster_outer * (monsters_far - monsters_near) + 1.0)
        * (weights.monster_inner * monsters_near + 1.0);

    trap_factor * health_factor * wall_factor * monster_factor
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Context with fixed counts for every location.
    #[derive(Default)]
    struct FixedContext {
        hidden: bool,
        observed: bool,
        traps: usize,
        packs: (usize, usize),
        monsters: (usize, usize),
        walls: (usize, usize),
    }

    fn pick(counts: (usize, usize), range: i32) -> usize {
        if range <= 1 {
            counts.0
        } else {
            counts.1
        }
    }

    impl DistanceContext for FixedContext {
        fn is_hidden(&self, _location: Location) -> bool {
            self.hidden
        }

        fn is_area_observed(&self, _location: Location, _range: i32) -> bool {
            self.observed
        }

        fn traps_in_range(&self, _location: Location, _range: i32) -> usize {
            self.traps
        }

        fn health_packs_in_range(&self, _location: Location, range: i32) -> usize {
            pick(self.packs, range)
        }

        fn monsters_in_range(&self, _location: Location, range: i32) -> usize {
            pick(self.monsters, range)
        }

        fn walls_in_range(&self, _location: Location, range: i32) -> usize {
            pick(self.walls, range)
        }
    }

    #[test]
    fn test_flat_costs() {
        let mut model = CostModel::new(CostWeights::default());
        let visible = FixedContext::default();
        let hidden = FixedContext {
            hidden: true,
            ..FixedContext::default()
        };
        assert_eq!(model.calculate_with(&visible, Location::new(1, 1)), 1.0);
        assert_eq!(model.calculate_with(&hidden, Location::new(1, 1)), 10.0);
    }

    #[test]
    fn test_adjacent_monsters_raise_cost() {
        let mut model = CostModel::new(CostWeights::default());
        model.set_apply_weights(true);
        let context = FixedContext {
            monsters: (2, 2),
            observed: true,
            ..FixedContext::default()
        };
        let cost = model.calculate_with(&context, Location::new(3, 3));
        assert!(cost > 1.0, "cost {} should exceed the flat default", cost);
        assert_eq!(cost, 2.0 * 2.0 + 1.0);
    }

    #[test]
    fn test_weighted_empty_neighbourhood_is_unit() {
        let mut model = CostModel::new(CostWeights::default());
        model.set_apply_weights(true);
        let context = FixedContext::default();
        assert_eq!(model.calculate_with(&context, Location::new(0, 0)), 1.0);
    }

    #[test]
    fn test_traps_and_packs_scale_down() {
        let weights = CostWeights::default();
        let mut model = CostModel::new(weights);
        model.set_apply_weights(true);
        let context = FixedContext {
            traps: 2,
            packs: (1, 3),
            ..FixedContext::default()
        };
        let expected = 1.0 / (weights.trap * 2.0 + 1.0)
            * (1.0 / (weights.health_pack_outer * 2.0 + 1.0))
            * (1.0 / 2.0);
        let cost = model.calculate_with(&context, Location::new(0, 0));
        assert!((cost - expected).abs() < 1e-12);
    }

    #[test]
    fn test_wall_factor_memoized_only_when_area_observed() {
        let mut model = CostModel::new(CostWeights::default());
        model.set_apply_weights(true);

        let partially_seen = FixedContext {
            walls: (2, 4),
            ..FixedContext::default()
        };
        model.calculate_with(&partially_seen, Location::new(4, 4));
        assert_eq!(model.memoized_walls(), 0);

        let fully_seen = FixedContext {
            walls: (2, 4),
            observed: true,
            ..FixedContext::default()
        };
        let first = model.calculate_with(&fully_seen, Location::new(4, 4));
        assert_eq!(model.memoized_walls(), 1);

        // A later context with different wall counts reuses the memo.
        let changed = FixedContext {
            walls: (0, 0),
            observed: true,
            ..FixedContext::default()
        };
        assert_eq!(model.calculate_with(&changed, Location::new(4, 4)), first);

        model.begin_level();
        assert_eq!(model.memoized_walls(), 0);
        assert_eq!(model.calculate_with(&changed, Location::new(4, 4)), 1.0);
    }

    #[test]
    fn test_snapshot_counts_from_level() {
        let level = crate::level::Level::parse("#.M\n.@.\n*.+", 3, 1).unwrap();
        let view = level.view();
        let mut map = Map::new();
        map.observe(&view);
        let snapshot = TurnSnapshot::capture(&map, &view);
        let center = Location::new(1, 1);

        assert_eq!(snapshot.walls_in_range(center, 1), 1);
        assert_eq!(snapshot.traps_in_range(center, 1), 1);
        assert_eq!(snapshot.monsters_in_range(center, 1), 1);
        assert_eq!(snapshot.health_packs_in_range(center, 1), 1);
        assert_eq!(snapshot.monsters_in_range(Location::new(0, 2), 1), 0);
        assert!(snapshot.is_area_observed(center, 2));
        assert!(!snapshot.is_hidden(center));
    }
}

use crate::algorithms::common::{
    walk_predecessors, DistanceAlgorithm, Graph, ManhattanHeuristic, OpenSet, TileNavigator,
};
use crate::grid::Tile;
use log::debug;
use rustc_hash::{FxHashMap, FxHashSet};

/// Unidirectional A* over a 4-connected tile graph.
#[derive(Debug, Default)]
pub struct AStar<H = ManhattanHeuristic> {
    heuristic: H,
    search_calls: usize,
}

impl AStar {
    /// Creates an A* navigator with the Manhattan heuristic.
    pub fn new() -> Self {
        AStar::with_heuristic(ManhattanHeuristic)
    }
}

impl<H: DistanceAlgorithm> AStar<H> {
    pub fn with_heuristic(heuristic: H) -> Self {
        AStar {
            heuristic,
            search_calls: 0,
        }
    }
}

impl<H: DistanceAlgorithm> TileNavigator for AStar<H> {
    fn navigate(
        &mut self,
        graph: &dyn Graph,
        costs: &mut dyn DistanceAlgorithm,
        from: Tile,
        to: Tile,
    ) -> Option<Vec<Tile>> {
        self.search_calls += 1;

        let mut open = OpenSet::new();
        let mut closed: FxHashSet<Tile> = FxHashSet::default();
        let mut came_from: FxHashMap<Tile, Tile> = FxHashMap::default();
        let mut g_score: FxHashMap<Tile, f64> = FxHashMap::default();

        g_score.insert(from, 0.0);
        open.insert(from, self.heuristic.calculate(from, to));

        while let Some(current) = open.pop_min() {
            if current == to {
                let mut path = walk_predecessors(&came_from, current);
                path.reverse();
                debug!(
                    "a_star: {:?} -> {:?} found {} steps, {} expanded",
                    from,
                    to,
                    path.len(),
                    closed.len()
                );
                return Some(path);
            }

            closed.insert(current);
            let current_g = g_score[&current];

            for neighbor in graph.neighbors(current) {
                if closed.contains(&neighbor) || graph.is_blocked(neighbor) {
                    continue;
                }

                let tentative_g = current_g + costs.calculate(current, neighbor);
                if open.contains(neighbor) && tentative_g >= g_score[&neighbor] {
                    continue;
                }

                came_from.insert(neighbor, current);
                g_score.insert(neighbor, tentative_g);
                open.insert(neighbor, tentative_g + self.heuristic.calculate(neighbor, to));
            }
        }

        debug!("a_star: {:?} -> {:?} unreachable, {} expanded", from, to, closed.len());
        None
    }

    fn search_calls(&self) -> usize {
        self.search_calls
    }

    fn name(&self) -> &'static str {
        "a_star"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::testing::{assert_valid_path, AsciiGraph, UnitCost};

    #[test]
    fn test_open_grid_corner_to_corner() {
        let graph = AsciiGraph::parse(&[".....", ".....", ".....", ".....", "....."]);
        let mut a_star = AStar::new();
        let path = a_star
            .navigate(&graph, &mut UnitCost, Tile::new(0, 0), Tile::new(4, 4))
            .expect("open grid must have a path");

        assert_eq!(path.len(), 8);
        assert_eq!(path.last(), Some(&Tile::new(4, 4)));
        assert_valid_path(&graph, Tile::new(0, 0), &path);

        let mut costs = UnitCost;
        let mut previous = Tile::new(0, 0);
        let mut g = 0.0;
        for &tile in &path {
            let next_g = g + costs.calculate(previous, tile);
            assert!(next_g >= g);
            g = next_g;
            previous = tile;
        }
        assert_eq!(g, 8.0);
    }

    #[test]
    fn test_routes_through_gap_in_wall() {
        // Wall column at x = 2 with a single gap at (2, 2).
        let graph = AsciiGraph::parse(&["..#..", "..#..", ".....", "..#..", "..#.."]);
        let mut a_star = AStar::new();
        let path = a_star
            .navigate(&graph, &mut UnitCost, Tile::new(0, 0), Tile::new(4, 0))
            .unwrap();

        assert!(path.contains(&Tile::new(2, 2)));
        assert_eq!(path.len(), 8);
        assert_valid_path(&graph, Tile::new(0, 0), &path);
    }

    #[test]
    fn test_enclosed_destination_has_no_path() {
        let graph = AsciiGraph::parse(&[".....", "..#..", ".#.#.", "..#..", "....."]);
        let mut a_star = AStar::new();
        assert!(a_star
            .navigate(&graph, &mut UnitCost, Tile::new(0, 0), Tile::new(2, 2))
            .is_none());
        assert_eq!(a_star.search_calls(), 1);
    }

    #[test]
    fn test_same_tile_is_empty_path() {
        let graph = AsciiGraph::parse(&["..."]);
        let mut a_star = AStar::new();
        assert_eq!(
            a_star.navigate(&graph, &mut UnitCost, Tile::new(1, 0), Tile::new(1, 0)),
            Some(vec![])
        );
    }

    #[test]
    fn test_repeated_search_is_deterministic() {
        let graph = AsciiGraph::parse(&["......", ".##.#.", "...#..", ".#...."]);
        let mut a_star = AStar::new();
        let first = a_star.navigate(&graph, &mut UnitCost, Tile::new(0, 0), Tile::new(5, 3));
        let second = a_star.navigate(&graph, &mut UnitCost, Tile::new(0, 0), Tile::new(5, 3));
        assert_eq!(first, second);
        assert_eq!(a_star.search_calls(), 2);
    }
}

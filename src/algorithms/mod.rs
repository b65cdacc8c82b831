pub mod a_star;
pub mod bidirectional_a_star;
pub mod common;

pub use a_star::AStar;
pub use bidirectional_a_star::BidirectionalAStar;
pub use common::{DistanceAlgorithm, Graph, ManhattanHeuristic, TileNavigator};

use clap::ValueEnum;

/// Selectable search strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Algorithm {
    AStar,
    Bidirectional,
    /// Run every strategy on the same dungeon and compare.
    All,
}

impl Algorithm {
    /// Builds the navigator for a single strategy; `All` has none of its own.
    pub fn create(self) -> Option<Box<dyn TileNavigator>> {
        match self {
            Algorithm::AStar => Some(Box::new(AStar::new())),
            Algorithm::Bidirectional => Some(Box::new(BidirectionalAStar::new())),
            Algorithm::All => None,
        }
    }
}


#[cfg(test)]
mod property_tests {
    use super::testing::{assert_valid_path, AsciiGraph, UnitCost};
    use super::*;
    use crate::grid::Tile;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn open_grid_lengths_agree(
            width in 1i32..12,
            height in 1i32..12,
            seed in any::<(u8, u8, u8, u8)>(),
        ) {
            let graph = AsciiGraph::open(width, height);
            let from = Tile::new(seed.0 as i32 % width, seed.1 as i32 % height);
            let to = Tile::new(seed.2 as i32 % width, seed.3 as i32 % height);
            let manhattan = ((from.x - to.x).abs() + (from.y - to.y).abs()) as usize;

            let single = AStar::new().navigate(&graph, &mut UnitCost, from, to).unwrap();
            let double = BidirectionalAStar::new().navigate(&graph, &mut UnitCost, from, to).unwrap();

            prop_assert_eq!(single.len(), manhattan);
            prop_assert_eq!(double.len(), manhattan);
            assert_valid_path(&graph, from, &single);
            assert_valid_path(&graph, from, &double);
        }

        #[test]
        fn paths_on_random_walls_are_valid_and_repeatable(
            walls in proptest::collection::vec(any::<bool>(), 64),
        ) {
            let rows: Vec<String> = walls
                .chunks(8)
                .enumerate()
                .map(|(y, row)| {
                    row.iter()
                        .enumerate()
                        .map(|(x, &wall)| if wall && (x, y) != (0, 0) && (x, y) != (7, 7) { '#' } else { '.' })
                        .collect()
                })
                .collect();
            let rows: Vec<&str> = rows.iter().map(String::as_str).collect();
            let graph = AsciiGraph::parse(&rows);
            let from = Tile::new(0, 0);
            let to = Tile::new(7, 7);

            let mut a_star = AStar::new();
            let first = a_star.navigate(&graph, &mut UnitCost, from, to);
            let second = a_star.navigate(&graph, &mut UnitCost, from, to);
            prop_assert_eq!(first.as_ref().map(Vec::len), second.as_ref().map(Vec::len));

            let double = BidirectionalAStar::new().navigate(&graph, &mut UnitCost, from, to);
            prop_assert_eq!(first.is_some(), double.is_some());
            if let Some(path) = &first {
                assert_valid_path(&graph, from, path);
                prop_assert_eq!(path.last(), Some(&to));
            }
            if let Some(path) = &double {
                assert_valid_path(&graph, from, path);
                prop_assert_eq!(path.last(), Some(&to));
            }
        }
    }
}

use crate::grid::Tile;
use rustc_hash::FxHashMap;
use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// Blocked and neighbour queries the search runs against.
pub trait Graph {
    fn is_blocked(&self, tile: Tile) -> bool;

    /// The four axis-aligned neighbours. No bounds filtering happens here.
    fn neighbors(&self, tile: Tile) -> [Tile; 4];
}

/// Distance between two tiles. Used both for edge costs and heuristics.
pub trait DistanceAlgorithm {
    fn calculate(&mut self, from: Tile, to: Tile) -> f64;
}

/// Manhattan distance, in units of one cardinal step.
#[derive(Debug, Default, Clone, Copy)]
pub struct ManhattanHeuristic;

impl DistanceAlgorithm for ManhattanHeuristic {
    fn calculate(&mut self, from: Tile, to: Tile) -> f64 {
        ((from.x - to.x).abs() + (from.y - to.y).abs()) as f64
    }
}

pub trait TileNavigator {
    /// Finds a path from `from` (exclusive) to `to` (inclusive).
    ///
    /// Returns `None` when no path exists and an empty path when the two
    /// tiles are the same.
    fn navigate(
        &mut self,
        graph: &dyn Graph,
        costs: &mut dyn DistanceAlgorithm,
        from: Tile,
        to: Tile,
    ) -> Option<Vec<Tile>>;

    /// Number of `navigate` invocations since construction.
    fn search_calls(&self) -> usize;

    fn name(&self) -> &'static str;
}

/// Follows predecessor links from `current` back to the tile without one.
/// The returned chain starts at `current` and excludes that final tile.
pub(crate) fn walk_predecessors(came_from: &FxHashMap<Tile, Tile>, mut current: Tile) -> Vec<Tile> {
    let mut chain = vec![current];
    while let Some(&previous) = came_from.get(&current) {
        chain.push(previous);
        current = previous;
    }
    chain.pop();
    chain
}

#[derive(Debug, Clone, Copy)]
struct OpenEntry {
    f_score: f64,
    sequence: u64,
    tile: Tile,
}

impl PartialEq for OpenEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for OpenEntry {}

impl PartialOrd for OpenEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for OpenEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed for min-heap behaviour; earlier insertion wins ties.
        other
            .f_score
            .total_cmp(&self.f_score)
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

/// Open set ordered by f-score, ties broken by first insertion.
///
/// Re-scoring a member pushes a fresh heap entry that keeps its original
/// sequence number; stale entries are skipped lazily.
#[derive(Debug, Default)]
pub(crate) struct OpenSet {
    heap: BinaryHeap<OpenEntry>,
    members: FxHashMap<Tile, (f64, u64)>,
    next_sequence: u64,
}

impl OpenSet {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn contains(&self, tile: Tile) -> bool {
        self.members.contains_key(&tile)
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub(crate) fn insert(&mut self, tile: Tile, f_score: f64) {
        let sequence = match self.members.get(&tile) {
            Some(&(_, sequence)) => sequence,
            None => {
                let sequence = self.next_sequence;
                self.next_sequence += 1;
                sequence
            }
        };
        self.members.insert(tile, (f_score, sequence));
        self.heap.push(OpenEntry {
            f_score,
            sequence,
            tile,
        });
    }

    pub(crate) fn peek_min(&mut self) -> Option<Tile> {
        while let Some(entry) = self.heap.peek() {
            let live = self
                .members
                .get(&entry.tile)
                .is_some_and(|&(f_score, sequence)| {
                    sequence == entry.sequence && f_score.to_bits() == entry.f_score.to_bits()
                });
            if live {
                return Some(entry.tile);
            }
            self.heap.pop();
        }
        None
    }

    pub(crate) fn pop_min(&mut self) -> Option<Tile> {
        let tile = self.peek_min()?;
        self.remove(tile);
        Some(tile)
    }

    pub(crate) fn remove(&mut self, tile: Tile) {
        self.members.remove(&tile);
    }
}

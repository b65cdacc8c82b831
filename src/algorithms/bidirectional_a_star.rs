use crate::algorithms::common::{
    walk_predecessors, DistanceAlgorithm, Graph, ManhattanHeuristic, OpenSet, TileNavigator,
};
use crate::grid::Tile;
use log::debug;
use rustc_hash::{FxHashMap, FxHashSet};

/// One search direction: its own open/closed sets, scores and heuristic target.
struct Frontier {
    target: Tile,
    open: OpenSet,
    closed: FxHashSet<Tile>,
    came_from: FxHashMap<Tile, Tile>,
    g_score: FxHashMap<Tile, f64>,
}

impl Frontier {
    fn new(start: Tile, target: Tile, heuristic: &mut dyn DistanceAlgorithm) -> Self {
        let mut frontier = Frontier {
            target,
            open: OpenSet::new(),
            closed: FxHashSet::default(),
            came_from: FxHashMap::default(),
            g_score: FxHashMap::default(),
        };
        frontier.g_score.insert(start, 0.0);
        frontier.open.insert(start, heuristic.calculate(start, target));
        frontier
    }

    /// Closes `current` and relaxes its neighbours.
    fn expand(
        &mut self,
        current: Tile,
        graph: &dyn Graph,
        costs: &mut dyn DistanceAlgorithm,
        heuristic: &mut dyn DistanceAlgorithm,
    ) {
        self.open.remove(current);
        self.closed.insert(current);
        let current_g = self.g_score[&current];

        for neighbor in graph.neighbors(current) {
            if self.closed.contains(&neighbor) || graph.is_blocked(neighbor) {
                continue;
            }

            // Backward frontiers also charge entering `neighbor`, not `current`.
            let tentative_g = current_g + costs.calculate(current, neighbor);
            if self.open.contains(neighbor) && tentative_g >= self.g_score[&neighbor] {
                continue;
            }

            self.came_from.insert(neighbor, current);
            self.g_score.insert(neighbor, tentative_g);
            self.open
                .insert(neighbor, tentative_g + heuristic.calculate(neighbor, self.target));
        }
    }
}

/// A* run simultaneously from both endpoints, one expansion per side per
/// iteration, stopping as soon as the frontiers touch.
#[derive(Debug, Default)]
pub struct BidirectionalAStar<H = ManhattanHeuristic> {
    heuristic: H,
    search_calls: usize,
}

impl BidirectionalAStar {
    pub fn new() -> Self {
        BidirectionalAStar::with_heuristic(ManhattanHeuristic)
    }
}

impl<H: DistanceAlgorithm> BidirectionalAStar<H> {
    pub fn with_heuristic(heuristic: H) -> Self {
        BidirectionalAStar {
            heuristic,
            search_calls: 0,
        }
    }
}

impl<H: DistanceAlgorithm> TileNavigator for BidirectionalAStar<H> {
    fn navigate(
        &mut self,
        graph: &dyn Graph,
        costs: &mut dyn DistanceAlgorithm,
        from: Tile,
        to: Tile,
    ) -> Option<Vec<Tile>> {
        self.search_calls += 1;

        let mut forward = Frontier::new(from, to, &mut self.heuristic);
        let mut backward = Frontier::new(to, from, &mut self.heuristic);

        loop {
            let current_from = forward.open.peek_min()?;
            let current_to = backward.open.peek_min()?;

            let meeting = if current_from == current_to || forward.closed.contains(&current_to) {
                Some(current_to)
            } else if backward.closed.contains(&current_from) {
                Some(current_from)
            } else {
                None
            };

            if let Some(meeting) = meeting {
                let mut path = walk_predecessors(&forward.came_from, meeting);
                path.reverse();
                // The backward chain runs meeting -> destination; drop the meeting tile.
                if meeting != to {
                    let towards_destination = walk_predecessors(&backward.came_from, meeting);
                    path.extend(towards_destination.into_iter().skip(1));
                    path.push(to);
                }
                debug!(
                    "bidirectional: {:?} -> {:?} met at {:?}, {} steps, {} + {} expanded",
                    from,
                    to,
                    meeting,
                    path.len(),
                    forward.closed.len(),
                    backward.closed.len()
                );
                return Some(path);
            }

            forward.expand(current_from, graph, costs, &mut self.heuristic);
            backward.expand(current_to, graph, costs, &mut self.heuristic);
        }
    }

    fn search_calls(&self) -> usize {
        self.search_calls
    }

    fn name(&self) -> &'static str {
        "bidirectional"
    }
}

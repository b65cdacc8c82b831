use crate::grid::Tile;
use crate::location::Location;

/// The last computed path, consumed one tile per turn until invalidated.
#[derive(Debug, Clone)]
pub struct PathCache {
    path: Vec<Tile>,
    cursor: usize,
    origin: Location,
    target: Option<Location>,
    discarded: bool,
}

impl Default for PathCache {
    fn default() -> Self {
        PathCache {
            path: Vec::new(),
            cursor: 0,
            origin: Location::default(),
            target: None,
            discarded: true,
        }
    }
}

impl PathCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn discard(&mut self) {
        self.discarded = true;
    }

    pub fn is_discarded(&self) -> bool {
        self.discarded
    }

    /// True when the cached path can no longer be trusted for `player`.
    ///
    /// Paths are rebuilt once the player has drifted to the edge of the
    /// visibility window it was computed from, since everything beyond that
    /// window was planned through unobserved cells.
    pub fn needs_rebuild(
        &self,
        player: Location,
        visibility_width: i32,
        visibility_height: i32,
    ) -> bool {
        if self.discarded || self.cursor >= self.path.len() {
            return true;
        }
        let drift = player - self.origin;
        drift.dx.abs() >= visibility_width - 1 || drift.dy.abs() >= visibility_height - 1
    }

    pub fn store(&mut self, path: Vec<Tile>, origin: Location, target: Location) {
        self.path = path;
        self.cursor = 0;
        self.origin = origin;
        self.target = Some(target);
        self.discarded = false;
    }

    /// Next tile to step onto, without consuming it.
    pub fn peek(&self) -> Option<Tile> {
        self.path.get(self.cursor).copied()
    }

    pub fn next_tile(&mut self) -> Option<Tile> {
        let tile = self.peek()?;
        self.cursor += 1;
        Some(tile)
    }

    pub fn remaining(&self) -> usize {
        self.path.len().saturating_sub(self.cursor)
    }

    pub fn origin(&self) -> Location {
        self.origin
    }

    /// Destination the cached path was computed for.
    pub fn target(&self) -> Option<Location> {
        self.target
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn straight_path(length: i32) -> Vec<Tile> {
        (1..=length).map(|x| Tile::new(x, 0)).collect()
    }

    #[test]
    fn test_new_cache_needs_rebuild() {
        let cache = PathCache::new();
        assert!(cache.is_discarded());
        assert!(cache.needs_rebuild(Location::new(0, 0), 5, 5));
    }

    #[test]
    fn test_consumes_tiles_in_order() {
        let mut cache = PathCache::new();
        cache.store(straight_path(3), Location::new(0, 0), Location::new(3, 0));
        assert!(!cache.needs_rebuild(Location::new(0, 0), 5, 5));
        assert_eq!(cache.next_tile(), Some(Tile::new(1, 0)));
        assert_eq!(cache.next_tile(), Some(Tile::new(2, 0)));
        assert_eq!(cache.remaining(), 1);
        assert_eq!(cache.next_tile(), Some(Tile::new(3, 0)));
        assert_eq!(cache.next_tile(), None);
        assert!(cache.needs_rebuild(Location::new(3, 0), 5, 5));
    }

    #[test]
    fn test_drift_to_window_edge_invalidates() {
        let mut cache = PathCache::new();
        cache.store(straight_path(10), Location::new(0, 0), Location::new(10, 0));
        assert!(!cache.needs_rebuild(Location::new(3, 0), 5, 5));
        assert!(cache.needs_rebuild(Location::new(4, 0), 5, 5));
        assert!(cache.needs_rebuild(Location::new(0, -4), 5, 5));
    }

    #[test]
    fn test_discard_forces_rebuild() {
        let mut cache = PathCache::new();
        cache.store(straight_path(4), Location::new(0, 0), Location::new(4, 0));
        cache.discard();
        assert!(cache.needs_rebuild(Location::new(0, 0), 5, 5));
    }
}

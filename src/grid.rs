use crate::location::Location;
use std::fmt;

/// Search-space cell coordinate. Maps 1:1 onto [`Location`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Tile {
    pub x: i32,
    pub y: i32,
}

impl Tile {
    pub const fn new(x: i32, y: i32) -> Self {
        Tile { x, y }
    }
}

impl From<Location> for Tile {
    fn from(location: Location) -> Self {
        Tile::new(location.x, location.y)
    }
}

impl From<Tile> for Location {
    fn from(tile: Tile) -> Self {
        Location::new(tile.x, tile.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellType {
    Empty,
    Wall,
    Trap,
    Exit,
    PlayerStart,
    Hidden,
}

impl CellType {
    /// Cell types the player can never walk through.
    pub fn is_obstacle(self) -> bool {
        matches!(self, CellType::Wall | CellType::Trap | CellType::Exit)
    }

    pub fn symbol(self) -> char {
        match self {
            CellType::Empty => '.',
            CellType::Wall => '#',
            CellType::Trap => '*',
            CellType::Exit => '!',
            CellType::PlayerStart => 'S',
            CellType::Hidden => '?',
        }
    }
}

/// Read-only snapshot of the dungeon field as the player sees it.
///
/// Cells are stored column-major (`cells[x][y]`). Lookups outside the field
/// return [`CellType::Hidden`].
#[derive(Debug, Clone, PartialEq)]
pub struct FieldView {
    cells: Vec<Vec<CellType>>,
    width: i32,
    height: i32,
    visibility_width: i32,
    visibility_height: i32,
}

impl FieldView {
    /// Builds a field from column-major cells. `visibility_*` are the radii of
    /// the square window the player can see around itself.
    pub fn new(cells: Vec<Vec<CellType>>, visibility_width: i32, visibility_height: i32) -> Self {
        let width = cells.len() as i32;
        let height = cells.first().map_or(0, |column| column.len()) as i32;
        FieldView {
            cells,
            width,
            height,
            visibility_width,
            visibility_height,
        }
    }

    pub fn cell(&self, location: Location) -> CellType {
        if !self.contains(location) {
            return CellType::Hidden;
        }
        self.cells[location.x as usize][location.y as usize]
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn visibility_width(&self) -> i32 {
        self.visibility_width
    }

    pub fn visibility_height(&self) -> i32 {
        self.visibility_height
    }

    pub fn contains(&self, location: Location) -> bool {
        location.x >= 0 && location.y >= 0 && location.x < self.width && location.y < self.height
    }

    pub fn is_visible(&self, location: Location) -> bool {
        self.cell(location) != CellType::Hidden
    }

    pub fn cells_of_type(&self, cell_type: CellType) -> Vec<Location> {
        let mut found = Vec::new();
        for x in 0..self.width {
            for y in 0..self.height {
                if self.cells[x as usize][y as usize] == cell_type {
                    found.push(Location::new(x, y));
                }
            }
        }
        found
    }

    /// Returns a copy where every cell outside the visibility window around
    /// `center` is Hidden.
    pub fn masked_around(&self, center: Location) -> FieldView {
        let mut cells = vec![vec![CellType::Hidden; self.height as usize]; self.width as usize];
        let min_x = (center.x - self.visibility_width).max(0);
        let max_x = (center.x + self.visibility_width).min(self.width - 1);
        let min_y = (center.y - self.visibility_height).max(0);
        let max_y = (center.y + self.visibility_height).min(self.height - 1);

        for x in min_x..=max_x {
            for y in min_y..=max_y {
                cells[x as usize][y as usize] = self.cells[x as usize][y as usize];
            }
        }

        FieldView {
            cells,
            width: self.width,
            height: self.height,
            visibility_width: self.visibility_width,
            visibility_height: self.visibility_height,
        }
    }

    pub(crate) fn set(&mut self, location: Location, cell_type: CellType) {
        if self.contains(location) {
            self.cells[location.x as usize][location.y as usize] = cell_type;
        }
    }
}

impl fmt::Display for FieldView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.height {
            for x in 0..self.width {
                write!(f, "{}", self.cells[x as usize][y as usize].symbol())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

use std::fmt;
use std::ops::{Add, Sub};

/// World-space cell coordinate used by the agent-facing API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Location {
    pub x: i32,
    pub y: i32,
}

/// Signed delta between two locations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Offset {
    pub dx: i32,
    pub dy: i32,
}

impl Location {
    pub const fn new(x: i32, y: i32) -> Self {
        Location { x, y }
    }

    pub fn manhattan_distance(self, other: Location) -> i32 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }

    /// True when `other` lies inside the square of radius `range` centred here.
    pub fn is_in_range(self, other: Location, range: i32) -> bool {
        (self - other).king_distance() <= range
    }

    /// True when `other` is exactly one cardinal step away.
    pub fn is_in_step_range(self, other: Location) -> bool {
        (other - self).is_step()
    }
}

impl Offset {
    pub const fn new(dx: i32, dy: i32) -> Self {
        Offset { dx, dy }
    }

    pub fn is_zero(self) -> bool {
        self.dx == 0 && self.dy == 0
    }

    /// Chebyshev length of the offset.
    pub fn king_distance(self) -> i32 {
        self.dx.abs().max(self.dy.abs())
    }

    pub fn is_step(self) -> bool {
        self.dx.abs() + self.dy.abs() == 1
    }

    /// Reduces the offset to a single cardinal unit step along its dominant axis.
    /// Ties between the axes resolve to the x axis; a zero offset stays zero.
    pub fn snap_to_step(self) -> Offset {
        if self.is_zero() {
            self
        } else if self.dx.abs() >= self.dy.abs() {
            Offset::new(self.dx.signum(), 0)
        } else {
            Offset::new(0, self.dy.signum())
        }
    }

    /// Reduces the offset to one of the eight unit directions.
    pub fn normalize(self) -> Offset {
        Offset::new(self.dx.signum(), self.dy.signum())
    }
}

impl Sub for Location {
    type Output = Offset;

    fn sub(self, rhs: Location) -> Offset {
        Offset::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Add<Offset> for Location {
    type Output = Location;

    fn add(self, rhs: Offset) -> Location {
        Location::new(self.x + rhs.dx, self.y + rhs.dy)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl fmt::Display for Offset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:+}, {:+}]", self.dx, self.dy)
    }
}

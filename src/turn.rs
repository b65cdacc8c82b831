use crate::error::{NavigatorError, Result};
use crate::location::Offset;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StepDirection {
    North,
    East,
    South,
    West,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttackDirection {
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
}

/// One action for the game-rules layer to execute. The navigator only
/// produces turns; it never applies them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Turn {
    None,
    Step(StepDirection),
    Attack(AttackDirection),
}

impl StepDirection {
    pub const ALL: [StepDirection; 4] = [
        StepDirection::North,
        StepDirection::East,
        StepDirection::South,
        StepDirection::West,
    ];

    pub fn offset(self) -> Offset {
        match self {
            StepDirection::North => Offset::new(0, -1),
            StepDirection::East => Offset::new(1, 0),
            StepDirection::South => Offset::new(0, 1),
            StepDirection::West => Offset::new(-1, 0),
        }
    }
}

impl AttackDirection {
    pub fn offset(self) -> Offset {
        match self {
            AttackDirection::North => Offset::new(0, -1),
            AttackDirection::NorthEast => Offset::new(1, -1),
            AttackDirection::East => Offset::new(1, 0),
            AttackDirection::SouthEast => Offset::new(1, 1),
            AttackDirection::South => Offset::new(0, 1),
            AttackDirection::SouthWest => Offset::new(-1, 1),
            AttackDirection::West => Offset::new(-1, 0),
            AttackDirection::NorthWest => Offset::new(-1, -1),
        }
    }
}

impl Turn {
    /// Builds a one-step move in the dominant direction of `offset`.
    ///
    /// A zero offset has no direction and is rejected.
    pub fn step(offset: Offset) -> Result<Turn> {
        let snapped = offset.snap_to_step();
        let direction = match (snapped.dx, snapped.dy) {
            (-1, 0) => StepDirection::West,
            (0, -1) => StepDirection::North,
            (1, 0) => StepDirection::East,
            (0, 1) => StepDirection::South,
            _ => return Err(NavigatorError::InvalidStep(offset)),
        };
        Ok(Turn::Step(direction))
    }

    /// Builds an attack towards the normalized direction of `offset`.
    pub fn attack(offset: Offset) -> Result<Turn> {
        let normalized = offset.normalize();
        let direction = match (normalized.dx, normalized.dy) {
            (-1, 0) => AttackDirection::West,
            (-1, -1) => AttackDirection::NorthWest,
            (0, -1) => AttackDirection::North,
            (1, -1) => AttackDirection::NorthEast,
            (1, 0) => AttackDirection::East,
            (1, 1) => AttackDirection::SouthEast,
            (0, 1) => AttackDirection::South,
            (-1, 1) => AttackDirection::SouthWest,
            _ => return Err(NavigatorError::InvalidAttack(offset)),
        };
        Ok(Turn::Attack(direction))
    }
}

//! Snapshots of the level handed to the bot each turn.

use crate::grid::FieldView;
use crate::location::Location;
use rand::rngs::StdRng;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemView {
    pub attack_bonus: i32,
    pub defence_bonus: i32,
    pub location: Location,
}

impl ItemView {
    /// Combined bonus, with a tiny preference for balanced items.
    pub fn power(&self) -> f32 {
        (self.attack_bonus + self.defence_bonus) as f32
            - (self.attack_bonus - self.defence_bonus).abs() as f32 / 1000.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HealthPackView {
    pub health: i32,
    pub location: Location,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PawnView {
    pub name: String,
    pub attack: i32,
    pub defence: i32,
    pub total_attack: i32,
    pub total_defence: i32,
    pub health: i32,
    pub location: Location,
    pub is_destroyed: bool,
    pub equipped: Option<ItemView>,
}

/// Everything the bot may know about the level on one turn.
///
/// Entity collections only hold what lies inside the visibility window.
#[derive(Debug, Clone)]
pub struct LevelView {
    pub field: FieldView,
    pub player: PawnView,
    pub monsters: Vec<PawnView>,
    pub items: Vec<ItemView>,
    pub health_packs: Vec<HealthPackView>,
    pub random: StdRng,
}

impl LevelView {
    pub fn monster_at(&self, location: Location) -> Option<&PawnView> {
        self.monsters.iter().find(|m| m.location == location)
    }

    pub fn item_at(&self, location: Location) -> Option<&ItemView> {
        self.items.iter().find(|i| i.location == location)
    }

    pub fn health_pack_at(&self, location: Location) -> Option<&HealthPackView> {
        self.health_packs.iter().find(|hp| hp.location == location)
    }
}

//! Health carried by the player and by mobs.

use bevy::prelude::*;

#[derive(Component, Debug, Clone)]
pub struct Health {
    pub hp: i32,
    pub max: i32,
}

impl Health {
    pub fn full(max: i32) -> Self {
        debug_assert!(max > 0);
        Self { hp: max, max }
    }

    /// Damage never drives health below zero.
    #[inline]
    pub fn take_damage(&mut self, amount: i32) {
        self.hp = (self.hp - amount).max(0);
    }

    /// Remaining fraction in [0, 1]; the health-bar fullness source.
    #[inline]
    pub fn ratio(&self) -> f32 {
        self.hp as f32 / self.max as f32
    }

    #[inline]
    pub fn is_depleted(&self) -> bool {
        self.hp <= 0
    }
}

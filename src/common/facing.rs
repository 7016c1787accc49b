//! Discrete four-way direction.
//!
//! One value serves two roles: the player's facing (written exclusively by
//! input handling, read by the melee trigger) and the edge a room boundary
//! crossing happened on. No diagonal variant exists; before any movement
//! input the facing is `Up`.

use bevy::prelude::*;

#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Facing {
    #[default]
    Up,
    Down,
    Left,
    Right,
}

impl Facing {
    #[inline]
    pub fn unit(self) -> Vec2 {
        match self {
            Facing::Up => Vec2::Y,
            Facing::Down => Vec2::NEG_Y,
            Facing::Left => Vec2::NEG_X,
            Facing::Right => Vec2::X,
        }
    }
}

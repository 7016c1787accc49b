//! Tunable gameplay constants.

use bevy::prelude::*;

#[derive(Resource, Debug, Clone)]
pub struct Tunables {
    pub pixels_per_meter: f32,
    pub player_speed: f32,
    pub player_max_hp: i32,
    pub mob_max_hp: i32,
    /// Seconds between volleys, per mob.
    pub attack_cooldown: f32,
    pub bolt_speed: f32,
    pub bolt_damage: i32,
    pub sword_speed: f32,
    pub sword_damage: i32,
    /// Per-axis travel limit from the player before a swing retires.
    pub sword_range: f32,
}

impl Default for Tunables {
    fn default() -> Self {
        Self {
            pixels_per_meter: 20.0,
            player_speed: 240.0,
            player_max_hp: 10,
            mob_max_hp: 3,
            attack_cooldown: 1.0,
            bolt_speed: 150.0,
            bolt_damage: 1,
            sword_speed: 480.0,
            sword_damage: 1,
            sword_range: 50.0,
        }
    }
}

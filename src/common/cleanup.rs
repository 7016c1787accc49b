//! Deferred entity removal.
//!
//! Combat systems never despawn while collision results are still being
//! consumed; they insert `PendingDespawn` and this PostUpdate commit does
//! the structural change. Swings, mobs and health bars all go through it.

use bevy::prelude::*;

/// Marker: entity should be removed from the world.
#[derive(Component, Debug, Clone, Copy)]
pub struct PendingDespawn;

pub fn despawn_marked(mut commands: Commands, q: Query<Entity, With<PendingDespawn>>) {
    for e in &q {
        commands.entity(e).despawn();
    }
}

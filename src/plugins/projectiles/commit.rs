//! Return commit: recycle bolts back into the pool.
//!
//! This system owns the Inactive invariants. An inactive bolt is hidden,
//! has zero velocity, and collides with nothing (filters empty).
//! Centralizing these writes here prevents inconsistencies.

use avian2d::prelude::*;
use bevy::prelude::*;

use super::components::{BoltEntity, BoltState, PooledBolt};
use super::pool::{BoltPool, inactive_bolt_layers};

pub fn return_to_pool_commit(
    mut pool: ResMut<BoltPool>,
    mut q: Query<
        (
            Entity,
            &mut BoltState,
            &mut Visibility,
            &mut LinearVelocity,
            &mut CollisionLayers,
        ),
        With<PooledBolt>,
    >,
) {
    for (e, mut state, mut vis, mut vel, mut layers) in &mut q {
        if *state != BoltState::PendingReturn {
            continue;
        }

        *state = BoltState::Inactive;
        *vis = Visibility::Hidden;
        vel.0 = Vec2::ZERO;
        *layers = inactive_bolt_layers();

        pool.push_free(BoltEntity(e));
    }
}

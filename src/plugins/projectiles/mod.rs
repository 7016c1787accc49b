//! Projectiles plugin: enemy bolts as a message-based producer -> consumer
//! pipeline over a pre-spawned pool.
//!
//! # Data flow
//! ```text
//!   FixedUpdate
//! ┌──────────────────────────────────────────────────────────────┐
//! │  Producer: enemies::volley_on_cooldown                       │
//! │      - reads: player Transform, per-mob AttackTimer          │
//! │      - writes: SpawnBoltRequest message (aimed velocity)     │
//! │                                                              │
//! │  Consumer: allocator::allocate_bolts_from_pool               │
//! │      - reads: SpawnBoltRequest messages                      │
//! │      - mutates: BoltPool free list + bolt components         │
//! └──────────────────────────────────────────────────────────────┘
//!                │
//!                v
//!   FixedPostUpdate
//! ┌──────────────────────────────────────────────────────────────┐
//! │  Physics emits CollisionStart messages (Avian)               │
//! │                                                              │
//! │  collision::process_bolt_collisions                          │
//! │      - player health -= damage (clamped at 0)                │
//! │      - BoltState -> PendingReturn                            │
//! │                                                              │
//! │  retire_offscreen_bolts                                      │
//! │      - AABB fully outside the room -> PendingReturn          │
//! │                                                              │
//! │  commit::return_to_pool_commit                               │
//! │      - writes Inactive invariants, pushes back to the pool   │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! The producer never borrows the pool; the allocator is its single writer.
//! Capacity exhaustion drops the request. Everything else is treated as an
//! invariant violation.

pub mod allocator;
pub mod collision;
pub mod commit;
pub mod components;
pub mod messages;
pub mod pool;

use avian2d::collision::narrow_phase::CollisionEventSystems;
use bevy::ecs::message::Messages;
use bevy::prelude::*;

use crate::common::state::GameState;
use crate::plugins::world::rooms::{HALF_H, HALF_W};

use components::{BoltState, PooledBolt};

pub struct ProjectilesPlugin;

/// Maintain spawn request message buffers.
///
/// Messages are double-buffered; `update()` advances buffers.
fn update_spawn_messages(mut msgs: ResMut<Messages<messages::SpawnBoltRequest>>) {
    msgs.update();
}

impl Plugin for ProjectilesPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(pool::BoltPool::new(64))
            .add_systems(Startup, pool::init_bolt_pool);

        app.init_resource::<Messages<messages::SpawnBoltRequest>>();
        app.add_systems(PostUpdate, update_spawn_messages);

        // Requests produced by the enemy volley are consumed the same step.
        app.add_systems(
            FixedUpdate,
            allocator::allocate_bolts_from_pool
                .after(crate::plugins::enemies::volley_on_cooldown)
                .run_if(in_state(GameState::InGame)),
        );

        app.add_systems(
            FixedPostUpdate,
            (
                collision::process_bolt_collisions.after(CollisionEventSystems),
                retire_offscreen_bolts.after(collision::process_bolt_collisions),
                commit::return_to_pool_commit.after(retire_offscreen_bolts),
            )
                .run_if(in_state(GameState::InGame)),
        );
    }
}

/// True once the bounding box has fully left the room bounds.
///
/// Pure and side-effect free: evaluating it twice on an unmoved position
/// yields the same answer.
#[inline]
pub fn fully_off_bounds(pos: Vec2, half_extent: Vec2) -> bool {
    pos.y + half_extent.y < -HALF_H
        || pos.y - half_extent.y > HALF_H
        || pos.x + half_extent.x < -HALF_W
        || pos.x - half_extent.x > HALF_W
}

/// A bolt absent from the room on step N is out of the active set by N+1.
pub fn retire_offscreen_bolts(
    mut q: Query<(&Transform, &mut BoltState), With<PooledBolt>>,
) {
    let half = pool::BOLT_SIZE / 2.0;
    for (tf, mut state) in &mut q {
        if *state != BoltState::Active {
            continue;
        }
        if fully_off_bounds(tf.translation.truncate(), half) {
            *state = BoltState::PendingReturn;
        }
    }
}

#[cfg(test)]
mod tests;

//! Spawn consumer: activate bolts from the pool.
//!
//! Invariant: the pool free list contains only valid pooled bolt entities,
//! so a popped entity must match the bolt query. A violation is a bug and
//! fails fast. An empty pool is a capacity decision, not a failure: the
//! request is dropped.

use avian2d::prelude::*;
use bevy::ecs::message::MessageReader;
use bevy::prelude::*;

use super::components::{Bolt, BoltEntity, BoltState, PooledBolt};
use super::messages::SpawnBoltRequest;
use super::pool::{BoltPool, active_layers_for};

pub fn allocate_bolts_from_pool(
    mut pool: ResMut<BoltPool>,
    mut reader: MessageReader<SpawnBoltRequest>,
    mut q: Query<
        (
            &mut BoltState,
            &mut Bolt,
            &mut Transform,
            &mut LinearVelocity,
            &mut Visibility,
            &mut CollisionLayers,
        ),
        With<PooledBolt>,
    >,
) {
    for req in reader.read() {
        let Some(BoltEntity(e)) = pool.pop_free() else {
            debug!("bolt pool exhausted; dropping spawn request");
            continue;
        };

        let (mut state, mut bolt, mut tf, mut vel, mut vis, mut layers) = q
            .get_mut(e)
            .expect("BoltPool contained an entity missing pooled bolt components");

        *state = BoltState::Active;
        bolt.damage = req.damage;
        tf.translation = req.pos.extend(2.0);
        tf.rotation = Quat::from_rotation_z(req.vel.y.atan2(req.vel.x));
        vel.0 = req.vel;
        *vis = Visibility::Visible;
        *layers = active_layers_for(req.owner);
    }
}

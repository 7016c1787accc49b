use avian2d::prelude::*;
use bevy::prelude::*;

use super::components::{Bolt, BoltEntity, BoltState, PooledBolt};
use super::messages::BoltOwner;
use crate::common::layers::Layer;

pub const BOLT_SIZE: Vec2 = Vec2::new(18.0, 6.0);

#[derive(Resource, Debug)]
pub struct BoltPool {
    free: Vec<BoltEntity>,
    pub capacity: usize,
}

impl BoltPool {
    pub fn new(capacity: usize) -> Self {
        Self {
            free: Vec::with_capacity(capacity),
            capacity,
        }
    }

    pub fn pop_free(&mut self) -> Option<BoltEntity> {
        self.free.pop()
    }

    pub fn push_free(&mut self, e: BoltEntity) {
        self.free.push(e);
    }

    pub fn free_len(&self) -> usize {
        self.free.len()
    }
}

/// Collision filters encode the bolt's owner: a mob's bolt may only hit the
/// player, a player's bolt only enemies.
pub fn active_layers_for(owner: BoltOwner) -> CollisionLayers {
    match owner {
        BoltOwner::Mob => CollisionLayers::new(Layer::EnemyBolt, [Layer::Player]),
        BoltOwner::Player => CollisionLayers::new(Layer::PlayerSword, [Layer::Enemy]),
    }
}

/// Disabled without structural changes: empty filters collide with nothing.
pub fn inactive_bolt_layers() -> CollisionLayers {
    CollisionLayers::new(Layer::EnemyBolt, [] as [Layer; 0])
}

/// Pre-spawn pooled bolts (inactive).
///
/// Physics components stay present for the bolt's whole lifetime; only
/// layers, visibility and velocity change when it is fired or recycled.
pub fn init_bolt_pool(mut commands: Commands, mut pool: ResMut<BoltPool>) {
    for _ in 0..pool.capacity {
        let e = commands
            .spawn((
                Name::new("Bolt(Pooled)"),
                PooledBolt,
                BoltState::Inactive,
                Bolt { damage: 0 },
                Sprite {
                    color: Color::srgb(0.35, 0.7, 1.0),
                    custom_size: Some(BOLT_SIZE),
                    ..default()
                },
                Transform::from_xyz(0.0, 0.0, 2.0),
                Visibility::Hidden,
                RigidBody::Kinematic,
                Collider::rectangle(BOLT_SIZE.x, BOLT_SIZE.y),
                inactive_bolt_layers(),
                LinearVelocity(Vec2::ZERO),
                // Always present; inactive bolts never collide because their
                // filters are empty.
                CollisionEventsEnabled,
            ))
            .id();

        pool.push_free(BoltEntity(e));
    }
}

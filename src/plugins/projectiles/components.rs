use bevy::prelude::*;

/// Marker for entities pre-spawned into the bolt pool.
#[derive(Component)]
pub struct PooledBolt;

#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BoltState {
    #[default]
    Inactive,
    Active,
    PendingReturn,
}

#[derive(Component, Debug, Clone)]
pub struct Bolt {
    pub damage: i32,
}

/// An entity the pool vouches for: it carries the pooled bolt component set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoltEntity(pub Entity);

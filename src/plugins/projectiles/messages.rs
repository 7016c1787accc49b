//! Buffered spawn requests.
//!
//! Producers (the enemy volley system) only enqueue intent; the allocator
//! is the single writer that mutates the pool. Producer and consumer never
//! share a borrow of `BoltPool`.

use bevy::prelude::*;

/// Who fired the bolt; decides which targets it may hit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BoltOwner {
    Mob,
    Player,
}

#[derive(Message, Clone, Copy, Debug)]
pub struct SpawnBoltRequest {
    pub owner: BoltOwner,
    pub pos: Vec2,
    pub vel: Vec2,
    pub damage: i32,
}

//! Collision layers.
//!
//! Offensive hitboxes carry their owner in the layer itself: a sword only
//! filters against `Enemy`, a bolt only against `Player`. Target validity
//! is therefore settled in the broad phase, not re-checked per hit.

use avian2d::prelude::*;

#[derive(PhysicsLayer, Default, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Layer {
    #[default]
    Default,
    World,
    Player,
    Enemy,
    PlayerSword,
    EnemyBolt,
}

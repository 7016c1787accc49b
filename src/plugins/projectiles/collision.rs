use avian2d::prelude::*;
use bevy::platform::collections::HashSet;
use bevy::prelude::*;

use super::components::{Bolt, BoltState, PooledBolt};
use crate::common::health::Health;
use crate::common::layers::Layer;
use crate::plugins::player::Player;

#[derive(Clone, Copy, Debug)]
struct CollisionTarget {
    collider: Entity,
    body: Option<Entity>,
}

impl CollisionTarget {
    #[inline]
    fn gameplay_owner(self) -> Entity {
        self.body.unwrap_or(self.collider)
    }
}

#[inline]
fn targets(ev: &CollisionStart) -> (CollisionTarget, CollisionTarget) {
    (
        CollisionTarget {
            collider: ev.collider1,
            body: ev.body1,
        },
        CollisionTarget {
            collider: ev.collider2,
            body: ev.body2,
        },
    )
}

#[inline]
fn is_in_layer(layers: &CollisionLayers, layer: Layer) -> bool {
    layers.memberships.has_all(layer)
}

/// Resolve bolt hits on the player.
///
/// Exactly one side of a qualifying contact is an Active pooled bolt; the
/// other side's layer membership names the target. Damage clamps at zero
/// health, the bolt is marked for return, and the bar fullness is
/// recomputed downstream from the mutated health.
pub fn process_bolt_collisions(
    mut started: MessageReader<CollisionStart>,
    q_is_bolt: Query<(), With<PooledBolt>>,
    mut q_bolts: Query<(&Bolt, &mut BoltState), With<PooledBolt>>,
    q_layers: Query<&CollisionLayers>,
    mut q_player: Query<&mut Health, With<Player>>,
    // Per-step dedupe: one hit per bolt.
    mut seen: Local<HashSet<Entity>>,
) {
    seen.clear();

    for ev in started.read() {
        let (t1, t2) = targets(ev);

        let b1 = q_is_bolt.contains(t1.collider);
        let b2 = q_is_bolt.contains(t2.collider);
        if !(b1 ^ b2) {
            continue; // must be exactly one bolt
        }
        let (bolt_side, other_side) = if b1 { (t1, t2) } else { (t2, t1) };

        if !seen.insert(bolt_side.collider) {
            continue;
        }

        let Ok(other_layers) = q_layers.get(other_side.collider) else {
            continue;
        };

        let Ok((bolt, mut state)) = q_bolts.get_mut(bolt_side.collider) else {
            continue;
        };

        if *state != BoltState::Active {
            continue;
        }

        if is_in_layer(other_layers, Layer::Player) {
            if let Ok(mut hp) = q_player.get_mut(other_side.gameplay_owner()) {
                hp.take_damage(bolt.damage);
            }
            *state = BoltState::PendingReturn;
        }
    }
}

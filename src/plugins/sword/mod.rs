//! Sword plugin: the facing-driven melee attack.
//!
//! Pipeline:
//! - Update: mouse trigger spawns a swing, unless one is already live
//! - FixedPostUpdate: resolve swing x mob contacts, then retire swings that
//!   travelled out of reach
//!
//! The `ActiveSwing` resource is the at-most-one-swing invariant: the
//! trigger rejects while it holds an entity, and the retire pass despawns
//! any swing the tracker does not name (duplicates lose to the tracked
//! one). Contacts and travel both retire through `PendingDespawn`, never a
//! direct despawn inside the fixed step.

use avian2d::collision::narrow_phase::CollisionEventSystems;
use avian2d::prelude::*;
use bevy::ecs::message::MessageWriter;
use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;

use crate::common::cleanup::PendingDespawn;
use crate::common::facing::Facing;
use crate::common::health::Health;
use crate::common::layers::Layer;
use crate::common::state::GameState;
use crate::common::tunables::Tunables;
use crate::plugins::enemies::Mob;
use crate::plugins::player::Player;
use crate::plugins::sfx::Sfx;

/// Blade sprite points up at zero rotation; the long axis is y.
pub const SWING_SIZE: Vec2 = Vec2::new(14.0, 30.0);
/// Spawn offset from the player centre along the facing direction.
pub const SWING_STANDOFF: f32 = 26.0;

#[derive(Component, Debug, Clone)]
pub struct SwordSwing {
    pub damage: i32,
}

/// The single swing allowed to exist, if any.
#[derive(Resource, Debug, Default)]
pub struct ActiveSwing(pub Option<Entity>);

pub fn plugin(app: &mut App) {
    app.insert_resource(ActiveSwing::default());

    app.add_systems(Update, trigger_swing.run_if(in_state(GameState::InGame)));

    app.add_systems(
        FixedPostUpdate,
        (
            process_sword_hits.after(CollisionEventSystems),
            retire_swings.after(process_sword_hits),
        )
            .run_if(in_state(GameState::InGame)),
    );
}

/// Rotation that visually matches the strike direction.
fn swing_rotation(facing: Facing) -> Quat {
    use std::f32::consts::{FRAC_PI_2, PI};
    let angle = match facing {
        Facing::Up => 0.0,
        Facing::Down => PI,
        Facing::Left => FRAC_PI_2,
        Facing::Right => -FRAC_PI_2,
    };
    Quat::from_rotation_z(angle)
}

/// Producer: spawn a swing on the melee trigger.
///
/// `Option<Res<ButtonInput>>` makes this a no-op in headless apps with no
/// input plugin. A trigger while a swing is live is rejected here, not by
/// the retire pass. The player's facing aims the strike; before any
/// movement input that is `Up` by default, so the swing never spawns with
/// zero velocity.
pub fn trigger_swing(
    mut commands: Commands,
    buttons: Option<Res<ButtonInput<MouseButton>>>,
    mut active: ResMut<ActiveSwing>,
    q_player: Query<(&Transform, &Facing), With<Player>>,
    tunables: Res<Tunables>,
    mut sfx: MessageWriter<Sfx>,
) {
    let Some(buttons) = buttons else {
        return;
    };
    if !buttons.just_pressed(MouseButton::Left) {
        return;
    }
    if active.0.is_some() {
        return;
    }

    let Ok((player_tf, facing)) = q_player.single() else {
        return;
    };

    let dir = facing.unit();
    let origin = player_tf.translation.truncate() + dir * SWING_STANDOFF;

    let e = commands
        .spawn((
            Name::new("SwordSwing"),
            SwordSwing {
                damage: tunables.sword_damage,
            },
            Sprite {
                color: Color::srgb(0.85, 0.8, 0.5),
                custom_size: Some(SWING_SIZE),
                ..default()
            },
            Transform::from_translation(origin.extend(2.0)).with_rotation(swing_rotation(*facing)),
            RigidBody::Kinematic,
            Collider::rectangle(SWING_SIZE.x, SWING_SIZE.y),
            CollisionLayers::new(Layer::PlayerSword, [Layer::Enemy]),
            LinearVelocity(dir * tunables.sword_speed),
            CollisionEventsEnabled,
            DespawnOnExit(GameState::InGame),
        ))
        .id();

    active.0 = Some(e);
    sfx.write(Sfx::SwordSwing);
}

/// Resolve swing x mob contacts.
///
/// Every mob the swing started touching this step takes the damage
/// (multi-target cleave); the swing itself is spent by the first contact
/// and marked once. It does not pierce into later steps.
pub fn process_sword_hits(
    mut commands: Commands,
    mut started: MessageReader<CollisionStart>,
    mut active: ResMut<ActiveSwing>,
    q_swings: Query<&SwordSwing, Without<PendingDespawn>>,
    mut q_mobs: Query<&mut Health, (With<Mob>, Without<PendingDespawn>)>,
    mut sfx: MessageWriter<Sfx>,
) {
    let mut spent: Option<Entity> = None;

    for ev in started.read() {
        let s1 = q_swings.contains(ev.collider1);
        let s2 = q_swings.contains(ev.collider2);
        if !(s1 ^ s2) {
            continue; // must be exactly one swing
        }
        let (swing_e, other) = if s1 {
            (ev.collider1, ev.collider2)
        } else {
            (ev.collider2, ev.collider1)
        };

        // The swing only filters against Layer::Enemy, so `other` is a mob
        // unless it died earlier this step.
        let Ok(mut hp) = q_mobs.get_mut(other) else {
            continue;
        };

        let Ok(swing) = q_swings.get(swing_e) else {
            continue;
        };

        hp.take_damage(swing.damage);
        sfx.write(Sfx::SwordHit);
        spent = Some(swing_e);
    }

    if let Some(e) = spent {
        commands.entity(e).insert(PendingDespawn);
        if active.0 == Some(e) {
            active.0 = None;
        }
    }
}

/// Retire swings that left the player's reach, and prune duplicates.
///
/// Travel is measured per axis from the player's *current* position; a
/// swing more than `sword_range` away on either axis is done. Any swing
/// the tracker does not name is a duplicate and retires immediately.
pub fn retire_swings(
    mut commands: Commands,
    mut active: ResMut<ActiveSwing>,
    tunables: Res<Tunables>,
    q_player: Query<&Transform, With<Player>>,
    q_swings: Query<(Entity, &Transform), (With<SwordSwing>, Without<PendingDespawn>)>,
) {
    let Ok(player_tf) = q_player.single() else {
        return;
    };
    let player = player_tf.translation.truncate();

    for (e, tf) in &q_swings {
        let pos = tf.translation.truncate();
        let out_of_reach = (pos.x - player.x).abs() > tunables.sword_range
            || (pos.y - player.y).abs() > tunables.sword_range;
        let duplicate = active.0 != Some(e);

        if out_of_reach || duplicate {
            commands.entity(e).insert(PendingDespawn);
            if active.0 == Some(e) {
                active.0 = None;
            }
        }
    }
}

//! Enemies plugin: per-room mob populations, the ranged-attack producer and
//! the death lifecycle.
//!
//! Mobs for every room are spawned up front, tagged with their room, and
//! kept dormant (empty collision filters, hidden, frozen attack timer)
//! until the room transition activates them. Death never despawns inside
//! the fixed step: the trigger clears collision filters and marks
//! `PendingDespawn`; the central PostUpdate commit removes the entity the
//! same frame.
//!
//! Each mob owns its attack cooldown. When the timer expires it emits a
//! `SpawnBoltRequest` aimed at the player's current position; the
//! projectiles allocator is the only consumer.

use avian2d::prelude::*;
use bevy::ecs::message::MessageWriter;
use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;
use bevy::time::Fixed;
use bevy_firefly::prelude::Occluder2d;

use crate::common::cleanup::PendingDespawn;
use crate::common::health::Health;
use crate::common::layers::Layer;
use crate::common::state::GameState;
use crate::common::tunables::Tunables;
use crate::plugins::projectiles::messages::{BoltOwner, SpawnBoltRequest};
use crate::plugins::world::CurrentRoom;
use crate::plugins::world::rooms::{ROOMS, RoomId, START_ROOM};

#[derive(Component)]
pub struct Mob;

/// Which room's population this mob belongs to.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct InRoom(pub RoomId);

/// Per-mob ranged-attack cooldown.
#[derive(Component, Deref, DerefMut)]
pub struct AttackTimer(pub Timer);

// -----------------------------------------------------------------------------
// Presentation: hit flash
// -----------------------------------------------------------------------------

/// Clamped [0..1] intensity. Clamp once on write, not at every read.
#[derive(Clone, Copy, Debug, Default)]
struct UnitF32(f32);

impl UnitF32 {
    #[inline]
    fn new_clamped(v: f32) -> Self {
        Self(v.clamp(0.0, 1.0))
    }
    #[inline]
    fn get(self) -> f32 {
        self.0
    }
    #[inline]
    fn decay_to_zero(&mut self, rate_per_sec: f32, dt: f32) {
        self.0 = (self.0 - rate_per_sec * dt).max(0.0);
    }
}

/// Presentation-only feedback state; gameplay truth stays in `Health`.
///
/// Health changes are detected by comparing the last seen value, so the
/// combat systems never have to know this component exists.
#[derive(Component, Debug, Clone)]
pub struct HitFx {
    last_hp: i32,
    flash: UnitF32,
}

impl HitFx {
    fn new(initial_hp: i32) -> Self {
        Self {
            last_hp: initial_hp,
            flash: UnitF32::default(),
        }
    }
}

// -----------------------------------------------------------------------------
// Collision intent
// -----------------------------------------------------------------------------

pub fn active_mob_layers() -> CollisionLayers {
    CollisionLayers::new(Layer::Enemy, [Layer::Player, Layer::PlayerSword])
}

/// Dormant or dying: membership stays `Enemy`, filters are cleared, so the
/// mob stops interacting immediately without a structural change.
pub fn dormant_mob_layers() -> CollisionLayers {
    CollisionLayers::new(Layer::Enemy, [] as [Layer; 0])
}

pub fn plugin(app: &mut App) {
    app.add_systems(OnEnter(GameState::InGame), spawn_room_mobs);

    app.add_systems(
        FixedUpdate,
        volley_on_cooldown.run_if(in_state(GameState::InGame)),
    );

    // Runs after melee resolution so it sees this step's damage.
    app.add_systems(
        FixedPostUpdate,
        mob_death_trigger
            .after(crate::plugins::sword::process_sword_hits)
            .run_if(in_state(GameState::InGame)),
    );

    app.add_systems(
        FixedPostUpdate,
        hit_flash_update
            .after(mob_death_trigger)
            .run_if(in_state(GameState::InGame)),
    );
}

// -----------------------------------------------------------------------------
// Spawn
// -----------------------------------------------------------------------------

/// Spawn every room's mobs at their descriptor positions.
///
/// Only the starting room's mobs begin active; the rest wait, dormant, for
/// a room transition.
pub fn spawn_room_mobs(mut commands: Commands, tunables: Res<Tunables>) {
    for (idx, def) in ROOMS.iter().enumerate() {
        let room = RoomId(idx);
        let active = room == START_ROOM;

        for (i, spawn) in def.mob_spawns.iter().enumerate() {
            commands.spawn((
                Name::new(format!("{}Mob{i}", def.name)),
                Mob,
                InRoom(room),
                Health::full(tunables.mob_max_hp),
                AttackTimer(Timer::from_seconds(
                    tunables.attack_cooldown,
                    TimerMode::Repeating,
                )),
                HitFx::new(tunables.mob_max_hp),
                Sprite {
                    color: Color::srgb(0.9, 0.25, 0.25),
                    custom_size: Some(Vec2::splat(32.0)),
                    ..default()
                },
                Transform::from_translation(spawn.extend(1.0)),
                RigidBody::Static,
                Collider::circle(16.0),
                if active {
                    active_mob_layers()
                } else {
                    dormant_mob_layers()
                },
                if active {
                    Visibility::Visible
                } else {
                    Visibility::Hidden
                },
                Occluder2d::circle(16.0),
                DespawnOnExit(GameState::InGame),
            ));
        }
    }
}

// -----------------------------------------------------------------------------
// Ranged attack producer
// -----------------------------------------------------------------------------

/// Tick the current room's attack timers and emit aimed bolt requests.
///
/// Velocity is speed x the unit vector toward the player at fire time:
/// angle = atan2(dy, dx). Dormant rooms hold their cadence; their timers do
/// not elapse.
pub fn volley_on_cooldown(
    time: Res<Time<Fixed>>,
    current: Res<CurrentRoom>,
    tunables: Res<Tunables>,
    q_player: Query<&Transform, With<crate::plugins::player::Player>>,
    mut q_mobs: Query<
        (&Transform, &InRoom, &mut AttackTimer),
        (With<Mob>, Without<PendingDespawn>),
    >,
    mut writer: MessageWriter<SpawnBoltRequest>,
) {
    let Ok(player_tf) = q_player.single() else {
        return;
    };
    let target = player_tf.translation.truncate();

    for (tf, in_room, mut timer) in &mut q_mobs {
        if in_room.0 != current.0 {
            continue;
        }

        timer.tick(time.delta());
        if !timer.just_finished() {
            continue;
        }

        let origin = tf.translation.truncate();
        let angle = (target.y - origin.y).atan2(target.x - origin.x);
        writer.write(SpawnBoltRequest {
            owner: BoltOwner::Mob,
            pos: origin,
            vel: Vec2::new(angle.cos(), angle.sin()) * tunables.bolt_speed,
            damage: tunables.bolt_damage,
        });
    }
}

// -----------------------------------------------------------------------------
// Death lifecycle
// -----------------------------------------------------------------------------

/// Mark depleted mobs for removal and stop their collision interaction.
///
/// The room keeps running with fewer mobs; only the player's depletion ends
/// the session (handled by the player plugin).
pub fn mob_death_trigger(
    mut commands: Commands,
    mut q: Query<(Entity, &Health, &mut CollisionLayers), (With<Mob>, Without<PendingDespawn>)>,
) {
    for (e, hp, mut layers) in &mut q {
        if hp.is_depleted() {
            *layers = dormant_mob_layers();
            commands.entity(e).insert(PendingDespawn);
        }
    }
}

// -----------------------------------------------------------------------------
// Presentation
// -----------------------------------------------------------------------------

/// Flash a mob white when its health drops, then decay back to base colour.
fn hit_flash_update(
    time: Res<Time<Fixed>>,
    mut q: Query<(&Health, &mut HitFx, &mut Sprite), (With<Mob>, Without<PendingDespawn>)>,
) {
    let dt = time.delta_secs();

    for (hp, mut fx, mut sprite) in &mut q {
        if hp.hp < fx.last_hp {
            fx.flash = UnitF32::new_clamped(1.0);
        }
        fx.last_hp = hp.hp;
        fx.flash.decay_to_zero(6.0, dt);

        let base = Color::srgb(0.9, 0.25, 0.25);
        let f = fx.flash.get();
        if f <= 0.001 {
            sprite.color = base;
            continue;
        }

        let mut out = base.to_srgba();
        out.red = (out.red + f * 0.6).min(1.0);
        out.green = (out.green + f * 0.6).min(1.0);
        out.blue = (out.blue + f * 0.6).min(1.0);
        sprite.color = out.into();
    }
}

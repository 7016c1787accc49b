//! HUD plugin: floating health bars.
//!
//! Every entity with `Health` gets a bar pair at spawn: a backdrop box and
//! a left-anchored fill. The fill's `fullness` is gameplay-derived
//! (hp / max, recomputed after the combat passes each fixed step) and its
//! setter hard-fails outside [0, 1]: an out-of-range value means the
//! damage accounting upstream is broken, and that should surface, not be
//! clamped away.
//!
//! When an owner dies the bar is retired off-screen first, then despawned
//! by the central commit; the bar collection is never mutated while the
//! combat passes iterate it.

use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;

use crate::common::cleanup::PendingDespawn;
use crate::common::health::Health;
use crate::common::state::GameState;
use crate::plugins::{enemies, player, projectiles, sword};

pub const BAR_WIDTH: f32 = 48.0;
pub const BAR_HEIGHT: f32 = 5.0;
pub const BAR_BORDER: f32 = 2.0;
/// Vertical offset above the owner's centre.
pub const BAR_OFFSET: f32 = 32.0;
/// Parking position for retired bars, far outside any room.
pub const RETIRED_POS: Vec3 = Vec3::new(-2000.0, -2000.0, 4.0);

/// Which entity's health this bar mirrors.
#[derive(Component, Debug, Clone, Copy)]
pub struct BarOwner(pub Entity);

/// The fill box; the backdrop carries only `BarOwner`.
#[derive(Component, Debug)]
pub struct HealthBar {
    fullness: f32,
}

impl HealthBar {
    pub fn new() -> Self {
        Self { fullness: 1.0 }
    }

    pub fn fullness(&self) -> f32 {
        self.fullness
    }

    /// Fullness must be a valid fraction; anything else is a programmer
    /// error upstream.
    pub fn set_fullness(&mut self, fullness: f32) {
        assert!(
            (0.0..=1.0).contains(&fullness),
            "got {fullness}, but fullness must be between 0.0 and 1.0"
        );
        self.fullness = fullness;
    }
}

impl Default for HealthBar {
    fn default() -> Self {
        Self::new()
    }
}

pub fn plugin(app: &mut App) {
    app.add_systems(
        OnEnter(GameState::InGame),
        spawn_bars
            .after(player::spawn)
            .after(enemies::spawn_room_mobs),
    );

    app.add_systems(
        FixedPostUpdate,
        (
            recompute_fullness
                .after(sword::process_sword_hits)
                .after(projectiles::collision::process_bolt_collisions),
            retire_bars.after(enemies::mob_death_trigger),
        )
            .run_if(in_state(GameState::InGame)),
    );

    app.add_systems(PostUpdate, position_bars.run_if(in_state(GameState::InGame)));
}

/// Spawn a backdrop + fill pair for every health-carrying entity.
pub fn spawn_bars(mut commands: Commands, q_owners: Query<Entity, With<Health>>) {
    for owner in &q_owners {
        commands.spawn((
            Name::new("BarBackdrop"),
            BarOwner(owner),
            Sprite {
                color: Color::BLACK,
                custom_size: Some(Vec2::new(
                    BAR_WIDTH + BAR_BORDER * 2.0,
                    BAR_HEIGHT + BAR_BORDER * 2.0,
                )),
                ..default()
            },
            Transform::from_translation(RETIRED_POS),
            DespawnOnExit(GameState::InGame),
        ));
        commands.spawn((
            Name::new("BarFill"),
            BarOwner(owner),
            HealthBar::new(),
            Sprite {
                color: Color::srgb(0.2, 0.8, 0.3),
                custom_size: Some(Vec2::new(BAR_WIDTH, BAR_HEIGHT)),
                ..default()
            },
            Transform::from_translation(RETIRED_POS + Vec3::Z * 0.1),
            DespawnOnExit(GameState::InGame),
        ));
    }
}

/// fullness = hp / max, refreshed after every damage pass.
pub fn recompute_fullness(
    q_health: Query<&Health>,
    mut q_bars: Query<(&BarOwner, &mut HealthBar)>,
) {
    for (owner, mut bar) in &mut q_bars {
        let Ok(hp) = q_health.get(owner.0) else {
            continue;
        };
        bar.set_fullness(hp.ratio());
    }
}

/// Push bar transforms to the renderer.
///
/// The fill shrinks toward the bar's left edge as fullness drops, mirrors
/// its owner's visibility (dormant-room mobs keep hidden bars), and
/// disappears entirely at zero.
pub fn position_bars(
    q_owners: Query<(&Transform, &Visibility), (With<Health>, Without<BarOwner>)>,
    mut q_bars: Query<
        (
            &BarOwner,
            &mut Transform,
            &mut Sprite,
            &mut Visibility,
            Option<&HealthBar>,
        ),
        Without<Health>,
    >,
) {
    for (owner, mut tf, mut sprite, mut visibility, bar) in &mut q_bars {
        let Ok((owner_tf, owner_vis)) = q_owners.get(owner.0) else {
            continue;
        };

        let center_x = owner_tf.translation.x;
        let center_y = owner_tf.translation.y + BAR_OFFSET;

        match bar {
            Some(bar) => {
                let width = BAR_WIDTH * bar.fullness();
                sprite.custom_size = Some(Vec2::new(width.max(0.001), BAR_HEIGHT));
                // Left edge stays put; only the right edge recedes.
                tf.translation.x = center_x - (BAR_WIDTH - width) * 0.5;
                tf.translation.y = center_y;

                *visibility = if *owner_vis == Visibility::Hidden || bar.fullness() == 0.0 {
                    Visibility::Hidden
                } else {
                    Visibility::Visible
                };
            }
            None => {
                tf.translation.x = center_x;
                tf.translation.y = center_y;
                *visibility = if *owner_vis == Visibility::Hidden {
                    Visibility::Hidden
                } else {
                    Visibility::Visible
                };
            }
        }
    }
}

/// Retire the bars of dying owners: park them off-screen, then let the
/// despawn commit reclaim them alongside the owner.
pub fn retire_bars(
    mut commands: Commands,
    q_dying: Query<(), (With<Health>, With<PendingDespawn>)>,
    mut q_bars: Query<(Entity, &BarOwner, &mut Transform), Without<PendingDespawn>>,
) {
    for (bar_e, owner, mut tf) in &mut q_bars {
        if q_dying.get(owner.0).is_ok() {
            tf.translation = RETIRED_POS;
            commands.entity(bar_e).insert(PendingDespawn);
        }
    }
}

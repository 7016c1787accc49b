//! Player plugin.
//!
//! Pipeline:
//! - Update: sample input, write the PlayerInput resource and the facing
//! - FixedUpdate: apply velocity to the rigid body
//! - FixedPostUpdate: end the session when health is depleted
//!
//! Facing is last-pressed-wins on key press only and persists across
//! releases; the melee trigger reads it, nothing else writes it. The body
//! is dynamic with rotation locked so the active room's wall colliders
//! block it.

use avian2d::prelude::*;
use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;

use crate::common::facing::Facing;
use crate::common::health::Health;
use crate::common::layers::Layer;
use crate::common::state::GameState;
use crate::common::tunables::Tunables;

#[derive(Component)]
pub struct Player;

#[derive(Resource, Default, Debug)]
pub struct PlayerInput {
    pub move_axis: Vec2,
}

pub fn plugin(app: &mut App) {
    app.insert_resource(PlayerInput::default())
        .add_systems(OnEnter(GameState::InGame), spawn)
        .add_systems(Update, gather_input.run_if(in_state(GameState::InGame)))
        .add_systems(
            FixedUpdate,
            apply_movement.run_if(in_state(GameState::InGame)),
        )
        .add_systems(
            FixedPostUpdate,
            check_player_defeat
                .after(crate::plugins::projectiles::collision::process_bolt_collisions)
                .run_if(in_state(GameState::InGame)),
        );
}

pub fn spawn(mut commands: Commands, tunables: Res<Tunables>) {
    let layers = CollisionLayers::new(
        Layer::Player,
        [Layer::World, Layer::Enemy, Layer::EnemyBolt],
    );

    commands.spawn((
        Name::new("Player"),
        Player,
        Facing::default(),
        Health::full(tunables.player_max_hp),
        Sprite {
            color: Color::srgb(0.2, 0.75, 0.9),
            custom_size: Some(Vec2::splat(26.0)),
            ..default()
        },
        Transform::from_xyz(0.0, -192.0, 1.0),
        RigidBody::Dynamic,
        LockedAxes::ROTATION_LOCKED,
        Collider::circle(13.0),
        layers,
        Friction::ZERO,
        LinearVelocity::ZERO,
        DespawnOnExit(GameState::InGame),
    ));
}

/// Sample the AZERTY movement keys (Z/Q/S/D = up/left/down/right).
///
/// Opposing keys cancel; diagonals are normalized. Facing changes only on a
/// fresh press, so the last direction pressed wins and holding two keys
/// keeps whichever came last.
pub fn gather_input(
    keys: Res<ButtonInput<KeyCode>>,
    mut input: ResMut<PlayerInput>,
    mut q_facing: Query<&mut Facing, With<Player>>,
) {
    let mut axis = Vec2::ZERO;

    if keys.pressed(KeyCode::KeyZ) {
        axis.y += 1.0;
    }
    if keys.pressed(KeyCode::KeyS) {
        axis.y -= 1.0;
    }
    if keys.pressed(KeyCode::KeyQ) {
        axis.x -= 1.0;
    }
    if keys.pressed(KeyCode::KeyD) {
        axis.x += 1.0;
    }

    input.move_axis = if axis.length_squared() > 0.0 {
        axis.normalize()
    } else {
        Vec2::ZERO
    };

    let Ok(mut facing) = q_facing.single_mut() else {
        return;
    };
    if keys.just_pressed(KeyCode::KeyZ) {
        *facing = Facing::Up;
    } else if keys.just_pressed(KeyCode::KeyS) {
        *facing = Facing::Down;
    } else if keys.just_pressed(KeyCode::KeyQ) {
        *facing = Facing::Left;
    } else if keys.just_pressed(KeyCode::KeyD) {
        *facing = Facing::Right;
    }
}

pub fn apply_movement(
    tunables: Res<Tunables>,
    input: Res<PlayerInput>,
    mut q_player: Query<&mut LinearVelocity, With<Player>>,
) {
    let Ok(mut vel) = q_player.single_mut() else {
        return;
    };
    vel.0 = input.move_axis * tunables.player_speed;
}

/// Depleted player health ends the session.
///
/// Mob death never reaches here; it only shrinks a room's population.
pub fn check_player_defeat(
    q_player: Query<&Health, With<Player>>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    let Ok(hp) = q_player.single() else {
        return;
    };
    if hp.is_depleted() {
        next_state.set(GameState::GameOver);
    }
}

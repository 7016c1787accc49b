//! Lighting plugin (Firefly) (render-only).
//!
//! A single lamp rides with the player through the station; mobs carry
//! occluders, so corridors darken behind them.

use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;
use bevy_firefly::prelude::*;

use crate::common::state::GameState;
use crate::plugins::player::Player;

#[derive(Component)]
pub struct StationLamp;

pub fn plugin(app: &mut App) {
    if !app.is_plugin_added::<FireflyPlugin>() {
        app.add_plugins(FireflyPlugin);
    }

    app.add_systems(OnEnter(GameState::InGame), setup)
        .add_systems(Update, lamp_follows_player);
}

fn setup(mut commands: Commands) {
    commands.spawn((
        Name::new("StationLamp"),
        StationLamp,
        PointLight2d {
            color: Color::srgb(0.95, 0.93, 0.8),
            radius: 520.0,
            ..default()
        },
        Transform::from_xyz(0.0, -192.0, 10.0),
        DespawnOnExit(GameState::InGame),
    ));
}

fn lamp_follows_player(
    q_player: Query<&Transform, (With<Player>, Without<StationLamp>)>,
    mut q_lamp: Query<&mut Transform, (With<StationLamp>, Without<Player>)>,
) {
    let Ok(tf_player) = q_player.single() else {
        return;
    };
    let Ok(mut tf_lamp) = q_lamp.single_mut() else {
        return;
    };

    tf_lamp.translation.x = tf_player.translation.x;
    tf_lamp.translation.y = tf_player.translation.y;
}

//! World plugin: room geometry and the room transition state machine.
//!
//! Pipeline:
//! - OnEnter(InGame): build the starting room from its descriptor
//! - FixedPostUpdate (after physics): evaluate a boundary crossing and, if
//!   the adjacency table defines a neighbor, perform the transition
//!
//! A transition is atomic within one system run: the current-room resource,
//! the player's crossed coordinate, the active wall set and mob dormancy all
//! change together, so no other system ever observes geometry from one room
//! with a player position implying another.

use avian2d::collision::narrow_phase::CollisionEventSystems;
use avian2d::prelude::*;
use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;

use crate::common::cleanup::PendingDespawn;
use crate::common::facing::Facing;
use crate::common::layers::Layer;
use crate::common::state::GameState;
use crate::plugins::enemies::{self, InRoom, Mob};
use crate::plugins::player::Player;

pub mod rooms;

use rooms::{DoorSpan, HALF_H, HALF_W, ROOMS, RoomId, START_ROOM, TILE, TILES_X, TILES_Y};

/// Marker for everything the room builder spawns; the transition despawns
/// the whole set before building the destination.
#[derive(Component, Debug, Clone, Copy)]
pub struct RoomGeometry;

#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrentRoom(pub RoomId);

pub fn plugin(app: &mut App) {
    app.insert_resource(CurrentRoom(START_ROOM));
    app.add_systems(OnEnter(GameState::InGame), spawn_start_room);
    app.add_systems(
        FixedPostUpdate,
        evaluate_room_transition
            .after(CollisionEventSystems)
            .run_if(in_state(GameState::InGame)),
    );
}

fn spawn_start_room(mut commands: Commands) {
    spawn_room_geometry(&mut commands, START_ROOM);
}

fn wall_layers() -> CollisionLayers {
    CollisionLayers::new(Layer::World, [Layer::Player])
}

/// Build one room's static geometry from its descriptor.
///
/// Boundary walls are one tile thick and leave the descriptor's door spans
/// open; inner blocks are single tiles. The floor is a checkerboard tinted
/// by the backdrop identifier.
pub fn spawn_room_geometry(commands: &mut Commands, room: RoomId) {
    let def = &ROOMS[room.0];
    let wall_color = Color::srgb(0.25, 0.27, 0.33);

    let mut spawn_wall = |name: String, pos: Vec2, size: Vec2| {
        commands.spawn((
            Name::new(name),
            RoomGeometry,
            Sprite {
                color: wall_color,
                custom_size: Some(size),
                ..default()
            },
            Transform::from_translation(pos.extend(0.5)),
            RigidBody::Static,
            Collider::rectangle(size.x, size.y),
            wall_layers(),
            DespawnOnExit(GameState::InGame),
        ));
    };

    // Top and bottom rows span the full width, corners included.
    for (ty, side) in [(TILES_Y - 1, Facing::Up), (0, Facing::Down)] {
        for (i, (t0, t1)) in edge_runs(0, TILES_X, def.door(side)).into_iter().enumerate() {
            let size = Vec2::new((t1 - t0) as f32 * TILE, TILE);
            let pos = Vec2::new(
                (t0 + t1) as f32 * 0.5 * TILE - HALF_W,
                (ty as f32 + 0.5) * TILE - HALF_H,
            );
            spawn_wall(format!("Wall{side:?}{i}"), pos, size);
        }
    }

    // Side columns run between the corner rows.
    for (tx, side) in [(0, Facing::Left), (TILES_X - 1, Facing::Right)] {
        for (i, (t0, t1)) in edge_runs(1, TILES_Y - 1, def.door(side)).into_iter().enumerate() {
            let size = Vec2::new(TILE, (t1 - t0) as f32 * TILE);
            let pos = Vec2::new(
                (tx as f32 + 0.5) * TILE - HALF_W,
                (t0 + t1) as f32 * 0.5 * TILE - HALF_H,
            );
            spawn_wall(format!("Wall{side:?}{i}"), pos, size);
        }
    }

    for (i, &(tx, ty)) in def.blocks.iter().enumerate() {
        let pos = Vec2::new(
            (tx as f32 + 0.5) * TILE - HALF_W,
            (ty as f32 + 0.5) * TILE - HALF_H,
        );
        spawn_wall(format!("Block{i}"), pos, Vec2::splat(TILE));
    }

    spawn_floor(commands, room);
}

/// Split an edge's tile range around its door span, if any.
///
/// Returns up to two `(start, end)` half-open tile runs.
fn edge_runs(start: usize, end: usize, door: Option<DoorSpan>) -> Vec<(usize, usize)> {
    let Some(span) = door else {
        return vec![(start, end)];
    };
    let mut runs = Vec::with_capacity(2);
    if span.first > start {
        runs.push((start, span.first));
    }
    if span.last + 1 < end {
        runs.push((span.last + 1, end));
    }
    runs
}

fn spawn_floor(commands: &mut Commands, room: RoomId) {
    let backdrop = ROOMS[room.0].backdrop;
    (0..TILES_Y)
        .flat_map(|y| (0..TILES_X).map(move |x| (x, y)))
        .for_each(|(x, y)| {
            let pos = Vec2::new(
                (x as f32 + 0.5) * TILE - HALF_W,
                (y as f32 + 0.5) * TILE - HALF_H,
            );
            commands.spawn((
                RoomGeometry,
                Sprite::from_color(backdrop.tint((x + y) % 2 == 0), Vec2::splat(TILE)),
                Transform::from_translation(pos.extend(0.0)),
                DespawnOnExit(GameState::InGame),
            ));
        });
}

/// Detect a boundary crossing and run the transition, if one is defined.
///
/// Evaluated once per fixed step; per-step movement is a few units against
/// room half-extents of several hundred, so at most one boundary can be
/// crossed per step. An edge with no adjacency entry leaves the player
/// where physics put them and fires nothing.
pub fn evaluate_room_transition(
    mut commands: Commands,
    mut current: ResMut<CurrentRoom>,
    mut q_player: Query<&mut Transform, With<Player>>,
    q_geometry: Query<Entity, With<RoomGeometry>>,
    mut q_mobs: Query<
        (&InRoom, &mut CollisionLayers, &mut Visibility),
        (With<Mob>, Without<PendingDespawn>),
    >,
) {
    let Ok(mut tf) = q_player.single_mut() else {
        return;
    };

    let pos = tf.translation;
    let crossing = if pos.y > HALF_H {
        Facing::Up
    } else if pos.y < -HALF_H {
        Facing::Down
    } else if pos.x > HALF_W {
        Facing::Right
    } else if pos.x < -HALF_W {
        Facing::Left
    } else {
        return;
    };

    let Some((dest, entry)) = rooms::neighbor(current.0, crossing) else {
        return;
    };

    current.0 = dest;
    match crossing {
        Facing::Up | Facing::Down => tf.translation.y = entry,
        Facing::Left | Facing::Right => tf.translation.x = entry,
    }

    // Rebind the active collision geometry.
    for e in &q_geometry {
        commands.entity(e).despawn();
    }
    spawn_room_geometry(&mut commands, dest);

    // Only the destination room's mobs take part in the simulation.
    for (in_room, mut layers, mut visibility) in &mut q_mobs {
        if in_room.0 == dest {
            *layers = enemies::active_mob_layers();
            *visibility = Visibility::Visible;
        } else {
            *layers = enemies::dormant_mob_layers();
            *visibility = Visibility::Hidden;
        }
    }
}

#[cfg(test)]
mod tests;

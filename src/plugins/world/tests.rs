use avian2d::prelude::*;
use bevy::prelude::*;

use super::rooms::{self, HALF_H, HALF_W, ROOMS, RoomId};
use super::*;
use crate::common::test_utils::run_system_once;
use crate::plugins::enemies;

fn build_room(world: &mut World, room: RoomId) {
    run_system_once(world, move |mut commands: Commands| {
        spawn_room_geometry(&mut commands, room);
    });
}

// --------------------------------------------------------------------------------------
// Adjacency table
// --------------------------------------------------------------------------------------

#[test]
fn adjacency_defines_the_reference_edges() {
    assert_eq!(rooms::neighbor(RoomId(0), Facing::Up), Some((RoomId(1), -HALF_H)));
    assert_eq!(rooms::neighbor(RoomId(1), Facing::Down), Some((RoomId(0), HALF_H)));
    assert_eq!(rooms::neighbor(RoomId(3), Facing::Up), Some((RoomId(8), -HALF_H)));
    assert_eq!(rooms::neighbor(RoomId(7), Facing::Left), Some((RoomId(8), HALF_W)));
    assert_eq!(rooms::neighbor(RoomId(11), Facing::Right), Some((RoomId(10), -HALF_W)));
}

#[test]
fn antechamber_top_exit_drops_back_to_the_hall_mid_room() {
    assert_eq!(rooms::neighbor(RoomId(10), Facing::Up), Some((RoomId(0), 0.0)));
}

#[test]
fn edges_without_doorways_have_no_entry() {
    assert_eq!(rooms::neighbor(RoomId(0), Facing::Down), None);
    assert_eq!(rooms::neighbor(RoomId(0), Facing::Left), None);
    assert_eq!(rooms::neighbor(RoomId(2), Facing::Up), None);
    assert_eq!(rooms::neighbor(RoomId(11), Facing::Left), None);
}

#[test]
fn every_edge_targets_a_valid_room() {
    for idx in 0..ROOMS.len() {
        for dir in [Facing::Up, Facing::Down, Facing::Left, Facing::Right] {
            if let Some((dest, entry)) = rooms::neighbor(RoomId(idx), dir) {
                assert!(dest.0 < ROOMS.len());
                assert!(entry.abs() <= HALF_W.max(HALF_H));
            }
        }
    }
}

// --------------------------------------------------------------------------------------
// Room builder
// --------------------------------------------------------------------------------------

fn wall_count(world: &mut World) -> usize {
    world
        .query::<(&Name, &RigidBody)>()
        .iter(world)
        .filter(|(n, rb)| n.as_str().starts_with("Wall") && matches!(**rb, RigidBody::Static))
        .count()
}

#[test]
fn hall_builds_a_single_doorway() {
    let mut world = World::new();
    build_room(&mut world, RoomId(0));

    // Top edge splits around its door; the other three edges are solid.
    assert_eq!(wall_count(&mut world), 5);

    let blocks = world
        .query::<(&Name, &RigidBody)>()
        .iter(&world)
        .filter(|(n, _)| n.as_str().starts_with("Block"))
        .count();
    assert_eq!(blocks, 0);
}

#[test]
fn junction_builds_four_doorways_and_inner_blocks() {
    let mut world = World::new();
    build_room(&mut world, RoomId(3));

    // Every edge splits in two around its door.
    assert_eq!(wall_count(&mut world), 8);

    let blocks = world
        .query::<(&Name, &RigidBody)>()
        .iter(&world)
        .filter(|(n, _)| n.as_str().starts_with("Block"))
        .count();
    assert_eq!(blocks, 2);
}

#[test]
fn builder_tags_everything_as_room_geometry() {
    let mut world = World::new();
    build_room(&mut world, RoomId(0));

    let geometry = world.query::<&RoomGeometry>().iter(&world).count();
    let colliders = world.query::<&Collider>().iter(&world).count();
    // Walls plus a full floor; nothing untagged.
    assert!(geometry > colliders);
    let sprites = world.query::<&Sprite>().iter(&world).count();
    assert_eq!(geometry, sprites);
}

// --------------------------------------------------------------------------------------
// Transition system
// --------------------------------------------------------------------------------------

fn transition_world(room: RoomId) -> World {
    let mut world = World::new();
    world.insert_resource(CurrentRoom(room));
    build_room(&mut world, room);
    world
}

#[test]
fn crossing_the_top_edge_transitions_and_resets_entry() {
    let mut world = transition_world(RoomId(0));
    // Inside the hall's doorway column, one step past the top edge.
    let player = world
        .spawn((
            crate::plugins::player::Player,
            Transform::from_xyz(-64.0, HALF_H + 2.0, 1.0),
        ))
        .id();

    run_system_once(&mut world, evaluate_room_transition);

    assert_eq!(world.resource::<CurrentRoom>().0, RoomId(1));
    let tf = world.get::<Transform>(player).unwrap();
    assert_eq!(tf.translation.y, -HALF_H);
    assert_eq!(tf.translation.x, -64.0);

    // The destination's geometry replaced the hall's: room 1 has one block.
    let blocks = world
        .query::<(&Name, &RigidBody)>()
        .iter(&world)
        .filter(|(n, _)| n.as_str().starts_with("Block"))
        .count();
    assert_eq!(blocks, 1);
}

#[test]
fn crossing_an_edge_without_a_neighbor_is_a_noop() {
    let mut world = transition_world(RoomId(0));
    let player = world
        .spawn((
            crate::plugins::player::Player,
            Transform::from_xyz(HALF_W + 5.0, 0.0, 1.0),
        ))
        .id();

    run_system_once(&mut world, evaluate_room_transition);

    // No doorway on the hall's right edge: no transition, no reset.
    assert_eq!(world.resource::<CurrentRoom>().0, RoomId(0));
    let tf = world.get::<Transform>(player).unwrap();
    assert_eq!(tf.translation.x, HALF_W + 5.0);
}

#[test]
fn player_inside_the_room_never_transitions() {
    let mut world = transition_world(RoomId(0));
    world.spawn((
        crate::plugins::player::Player,
        Transform::from_xyz(100.0, 100.0, 1.0),
    ));

    run_system_once(&mut world, evaluate_room_transition);

    assert_eq!(world.resource::<CurrentRoom>().0, RoomId(0));
}

#[test]
fn transition_flips_mob_dormancy_to_the_destination() {
    let mut world = transition_world(RoomId(0));
    world.spawn((
        crate::plugins::player::Player,
        Transform::from_xyz(-64.0, HALF_H + 2.0, 1.0),
    ));

    let woken = world
        .spawn((
            enemies::Mob,
            enemies::InRoom(RoomId(1)),
            enemies::dormant_mob_layers(),
            Visibility::Hidden,
        ))
        .id();
    let still_dormant = world
        .spawn((
            enemies::Mob,
            enemies::InRoom(RoomId(3)),
            enemies::dormant_mob_layers(),
            Visibility::Hidden,
        ))
        .id();

    run_system_once(&mut world, evaluate_room_transition);

    assert_eq!(
        *world.get::<CollisionLayers>(woken).unwrap(),
        enemies::active_mob_layers()
    );
    assert_eq!(*world.get::<Visibility>(woken).unwrap(), Visibility::Visible);

    assert_eq!(
        *world.get::<CollisionLayers>(still_dormant).unwrap(),
        enemies::dormant_mob_layers()
    );
    assert_eq!(
        *world.get::<Visibility>(still_dormant).unwrap(),
        Visibility::Hidden
    );
}

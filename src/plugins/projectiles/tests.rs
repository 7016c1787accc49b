//! Projectiles plugin tests, deterministic.
//!
//! These tests avoid the full physics pipeline: they inject `CollisionStart`
//! messages directly and run the systems under test once.

use avian2d::prelude::*;
use bevy::ecs::message::Messages;
use bevy::prelude::*;

use super::{allocator, collision, commit, components, messages, pool};
use crate::common::health::Health;
use crate::common::layers::Layer;
use crate::common::test_utils::run_system_once;
use crate::plugins::player::Player;
use crate::plugins::world::rooms::{HALF_H, HALF_W};

fn write_collision_start(world: &mut World, a: Entity, b: Entity) {
    if world.get_resource::<Messages<CollisionStart>>().is_none() {
        world.init_resource::<Messages<CollisionStart>>();
    }
    world.write_message(CollisionStart {
        collider1: a,
        collider2: b,
        body1: None,
        body2: None,
    });
}

fn request_bolt(world: &mut World, req: messages::SpawnBoltRequest) {
    if world
        .get_resource::<Messages<messages::SpawnBoltRequest>>()
        .is_none()
    {
        world.init_resource::<Messages<messages::SpawnBoltRequest>>();
    }
    world.write_message(req);
}

// --------------------------------------------------------------------------------------
// Pooling
// --------------------------------------------------------------------------------------

#[test]
fn init_bolt_pool_spawns_capacity_bolts_inactive() {
    let mut world = World::new();
    world.insert_resource(pool::BoltPool::new(8));

    run_system_once(&mut world, pool::init_bolt_pool);

    assert_eq!(world.resource::<pool::BoltPool>().free_len(), 8);

    let mut q = world.query::<(
        &components::PooledBolt,
        &components::BoltState,
        &Visibility,
        &CollisionLayers,
    )>();
    assert_eq!(q.iter(&world).count(), 8);

    for (_, state, vis, layers) in q.iter(&world) {
        assert_eq!(*state, components::BoltState::Inactive);
        assert_eq!(*vis, Visibility::Hidden);
        assert!(layers.memberships.has_all(Layer::EnemyBolt));
        // Inactive bolts collide with nothing.
        assert!(!layers.filters.has_all(Layer::Player));
    }
}

#[test]
fn allocator_activates_a_bolt_from_a_request() {
    let mut world = World::new();
    world.insert_resource(pool::BoltPool::new(1));
    run_system_once(&mut world, pool::init_bolt_pool);

    request_bolt(
        &mut world,
        messages::SpawnBoltRequest {
            owner: messages::BoltOwner::Mob,
            pos: Vec2::new(10.0, 20.0),
            vel: Vec2::new(100.0, 0.0),
            damage: 2,
        },
    );

    run_system_once(&mut world, allocator::allocate_bolts_from_pool);

    let mut q = world.query::<(
        &components::Bolt,
        &components::BoltState,
        &Transform,
        &LinearVelocity,
        &Visibility,
        &CollisionLayers,
    )>();
    let (bolt, state, tf, vel, vis, layers) = q.iter(&world).next().unwrap();

    assert_eq!(*state, components::BoltState::Active);
    assert_eq!(bolt.damage, 2);
    assert_eq!(tf.translation.truncate(), Vec2::new(10.0, 20.0));
    assert_eq!(vel.0, Vec2::new(100.0, 0.0));
    assert_eq!(*vis, Visibility::Visible);
    assert!(layers.filters.has_all(Layer::Player));
    assert_eq!(world.resource::<pool::BoltPool>().free_len(), 0);
}

#[test]
fn allocator_drops_requests_when_the_pool_is_empty() {
    let mut world = World::new();
    world.insert_resource(pool::BoltPool::new(0));

    request_bolt(
        &mut world,
        messages::SpawnBoltRequest {
            owner: messages::BoltOwner::Mob,
            pos: Vec2::ZERO,
            vel: Vec2::X,
            damage: 1,
        },
    );

    // Capacity decision, not a panic.
    run_system_once(&mut world, allocator::allocate_bolts_from_pool);

    let count = world.query::<&components::PooledBolt>().iter(&world).count();
    assert_eq!(count, 0);
}

// --------------------------------------------------------------------------------------
// Collision
// --------------------------------------------------------------------------------------

fn spawn_active_bolt(world: &mut World, damage: i32) -> Entity {
    world
        .spawn((
            components::PooledBolt,
            components::BoltState::Active,
            components::Bolt { damage },
            pool::active_layers_for(messages::BoltOwner::Mob),
        ))
        .id()
}

fn spawn_player_collider(world: &mut World, hp: i32) -> Entity {
    world
        .spawn((
            Player,
            Health::full(hp),
            CollisionLayers::new(Layer::Player, [Layer::EnemyBolt]),
        ))
        .id()
}

#[test]
fn bolt_hit_damages_player_and_is_returned() {
    let mut world = World::new();
    let bolt = spawn_active_bolt(&mut world, 1);
    let player = spawn_player_collider(&mut world, 10);

    write_collision_start(&mut world, bolt, player);
    run_system_once(&mut world, collision::process_bolt_collisions);

    assert_eq!(world.get::<Health>(player).unwrap().hp, 9);
    assert_eq!(
        *world.get::<components::BoltState>(bolt).unwrap(),
        components::BoltState::PendingReturn
    );
}

#[test]
fn bolt_damage_never_drives_health_below_zero() {
    let mut world = World::new();
    let bolt = spawn_active_bolt(&mut world, 5);
    let player = spawn_player_collider(&mut world, 1);

    write_collision_start(&mut world, bolt, player);
    run_system_once(&mut world, collision::process_bolt_collisions);

    assert_eq!(world.get::<Health>(player).unwrap().hp, 0);
}

#[test]
fn inactive_bolt_contacts_are_ignored() {
    let mut world = World::new();
    let bolt = world
        .spawn((
            components::PooledBolt,
            components::BoltState::Inactive,
            components::Bolt { damage: 1 },
            pool::inactive_bolt_layers(),
        ))
        .id();
    let player = spawn_player_collider(&mut world, 10);

    write_collision_start(&mut world, bolt, player);
    run_system_once(&mut world, collision::process_bolt_collisions);

    assert_eq!(world.get::<Health>(player).unwrap().hp, 10);
    assert_eq!(
        *world.get::<components::BoltState>(bolt).unwrap(),
        components::BoltState::Inactive
    );
}

// --------------------------------------------------------------------------------------
// Off-bounds retirement
// --------------------------------------------------------------------------------------

#[test]
fn off_bounds_check_is_pure_and_idempotent() {
    let half = pool::BOLT_SIZE / 2.0;
    let inside = Vec2::new(0.0, HALF_H - 1.0);
    let outside = Vec2::new(HALF_W + half.x + 1.0, 0.0);

    assert!(!super::fully_off_bounds(inside, half));
    assert!(!super::fully_off_bounds(inside, half));
    assert!(super::fully_off_bounds(outside, half));
    assert!(super::fully_off_bounds(outside, half));

    // Straddling the edge is not "fully exited".
    let straddling = Vec2::new(HALF_W, 0.0);
    assert!(!super::fully_off_bounds(straddling, half));
}

#[test]
fn bolt_fully_outside_the_room_is_marked_for_return() {
    let mut world = World::new();

    let gone = world
        .spawn((
            components::PooledBolt,
            components::BoltState::Active,
            Transform::from_xyz(HALF_W + 100.0, 0.0, 2.0),
        ))
        .id();
    let flying = world
        .spawn((
            components::PooledBolt,
            components::BoltState::Active,
            Transform::from_xyz(0.0, 0.0, 2.0),
        ))
        .id();

    run_system_once(&mut world, super::retire_offscreen_bolts);

    assert_eq!(
        *world.get::<components::BoltState>(gone).unwrap(),
        components::BoltState::PendingReturn
    );
    assert_eq!(
        *world.get::<components::BoltState>(flying).unwrap(),
        components::BoltState::Active
    );
}

// --------------------------------------------------------------------------------------
// Return commit
// --------------------------------------------------------------------------------------

#[test]
fn return_commit_restores_inactive_invariants_and_recycles() {
    let mut world = World::new();
    world.insert_resource(pool::BoltPool::new(1));

    let bolt = world
        .spawn((
            components::PooledBolt,
            components::BoltState::PendingReturn,
            Visibility::Visible,
            LinearVelocity(Vec2::new(50.0, 50.0)),
            pool::active_layers_for(messages::BoltOwner::Mob),
        ))
        .id();

    run_system_once(&mut world, commit::return_to_pool_commit);

    assert_eq!(
        *world.get::<components::BoltState>(bolt).unwrap(),
        components::BoltState::Inactive
    );
    assert_eq!(*world.get::<Visibility>(bolt).unwrap(), Visibility::Hidden);
    assert_eq!(world.get::<LinearVelocity>(bolt).unwrap().0, Vec2::ZERO);

    let layers = world.get::<CollisionLayers>(bolt).unwrap();
    assert!(!layers.filters.has_all(Layer::Player));

    assert_eq!(world.resource::<pool::BoltPool>().free_len(), 1);
}

//! Projectile pipeline tests: producers and the consumer run on a bare `World`
//! with messages injected or drained directly.

use avian2d::prelude::*;
use bevy::ecs::message::Messages;
use bevy::prelude::*;
use pretty_assertions::assert_eq;

use super::messages::{BulletKind, SpawnBulletRequest};
use super::{components, request, spawn};
use crate::common::layers::{CollisionClass, Layer};
use crate::common::test_utils::run_system_once;
use crate::common::tunables::Tunables;
use crate::plugins::behaviors::{Armed, Attack, AttackSpec, Movable, Movement, Pattern};
use crate::plugins::combat::components::{Enemy, LifeState};
use crate::plugins::core::{FrameDelta, SpawnCounter, SpawnOrder};

fn world_with_dt(dt: f32) -> World {
    let mut world = World::new();
    world.insert_resource(FrameDelta::from_secs(dt));
    world.init_resource::<Messages<SpawnBulletRequest>>();
    world.init_resource::<SpawnCounter>();
    world.init_resource::<Tunables>();
    world
}

fn drain_requests(world: &mut World) -> Vec<SpawnBulletRequest> {
    world.resource_mut::<Messages<SpawnBulletRequest>>().drain().collect()
}

fn shooter(world: &mut World, order: u64, pos: Vec2, spec: &AttackSpec, life: LifeState) -> Entity {
    world
        .spawn((
            Enemy,
            SpawnOrder(order),
            Armed(Attack::from_spec(spec)),
            Transform::from_translation(pos.extend(0.0)),
            life,
        ))
        .id()
}

#[test]
fn active_enemy_fires_one_volley_per_elapsed_window() {
    let mut world = world_with_dt(1.0);
    let spec = AttackSpec::new(Pattern::forward(Vec2::NEG_Y), 0.25, 100.0);
    shooter(&mut world, 1, Vec2::new(10.0, 20.0), &spec, LifeState::Active);

    run_system_once(&mut world, request::fire_enemy_volleys);

    let requests = drain_requests(&mut world);
    assert_eq!(requests.len(), 4);
    for req in requests {
        assert_eq!(req.kind, BulletKind::Enemy);
        assert_eq!(req.pos, Vec2::new(10.0, 20.0));
        assert_eq!(req.vel, Vec2::new(0.0, -100.0));
        assert_eq!(req.damage, 1);
    }
}

#[test]
fn spiral_volley_writes_one_request_per_bullet() {
    let mut world = world_with_dt(0.5);
    let spec = AttackSpec::new(Pattern::spiral(6, 0.0).unwrap(), 0.5, 50.0);
    shooter(&mut world, 1, Vec2::ZERO, &spec, LifeState::Active);

    run_system_once(&mut world, request::fire_enemy_volleys);

    let requests = drain_requests(&mut world);
    assert_eq!(requests.len(), 6);
    assert!(requests.iter().all(|r| (r.vel.length() - 50.0).abs() < 1e-3));
}

#[test]
fn off_screen_and_destroyed_enemies_hold_fire() {
    let mut world = world_with_dt(1.0);
    let spec = AttackSpec::new(Pattern::forward(Vec2::NEG_Y), 0.1, 100.0);
    let waiting = shooter(&mut world, 1, Vec2::ZERO, &spec, LifeState::Spawned);
    shooter(&mut world, 2, Vec2::ZERO, &spec, LifeState::Destroyed);

    run_system_once(&mut world, request::fire_enemy_volleys);
    assert!(drain_requests(&mut world).is_empty());

    // Timers do not bank shots while waiting off screen.
    *world.get_mut::<LifeState>(waiting).unwrap() = LifeState::Active;
    world.insert_resource(FrameDelta::from_secs(0.0));
    run_system_once(&mut world, request::fire_enemy_volleys);
    assert!(drain_requests(&mut world).is_empty());
}

#[test]
fn volleys_are_written_in_spawn_order() {
    let mut world = world_with_dt(0.5);
    let spec = AttackSpec::new(Pattern::forward(Vec2::NEG_Y), 0.5, 10.0);
    // Spawned into the world out of order on purpose.
    shooter(&mut world, 3, Vec2::new(3.0, 0.0), &spec, LifeState::Active);
    shooter(&mut world, 1, Vec2::new(1.0, 0.0), &spec, LifeState::Active);
    shooter(&mut world, 2, Vec2::new(2.0, 0.0), &spec, LifeState::Active);

    run_system_once(&mut world, request::fire_enemy_volleys);

    let xs: Vec<f32> = drain_requests(&mut world).iter().map(|r| r.pos.x).collect();
    assert_eq!(xs, vec![1.0, 2.0, 3.0]);
}

#[test]
fn consumer_spawns_bullets_with_class_layers_and_lifetime() {
    let mut world = world_with_dt(0.0);
    world.write_message(SpawnBulletRequest {
        kind: BulletKind::Player,
        pos: Vec2::new(0.0, -100.0),
        vel: Vec2::new(0.0, 720.0),
        damage: 2,
    });
    world.write_message(SpawnBulletRequest {
        kind: BulletKind::Enemy,
        pos: Vec2::ZERO,
        vel: Vec2::new(0.0, -80.0),
        damage: 1,
    });

    run_system_once(&mut world, spawn::spawn_requested_bullets);

    let mut q = world.query::<(
        &SpawnOrder,
        &CollisionClass,
        &CollisionLayers,
        &components::Bullet,
        &Movable,
        &LifeState,
    )>();
    let mut bullets: Vec<_> = q
        .iter(&world)
        .map(|(o, c, l, b, m, s)| (*o, *c, *l, *b, m.0.clone(), *s))
        .collect();
    bullets.sort_by_key(|b| b.0);

    assert_eq!(bullets.len(), 2);

    let (order, class, layers, bullet, movement, life) = &bullets[0];
    assert_eq!(*order, SpawnOrder(1));
    assert_eq!(*class, CollisionClass::PlayerBullet);
    assert!(layers.memberships.has_all(Layer::PlayerBullet));
    assert!(layers.filters.has_all(Layer::Enemy));
    assert!(!layers.filters.has_all(Layer::Player));
    assert_eq!(bullet.damage, 2);
    assert_eq!(*movement, Movement::straight(Vec2::Y, 720.0));
    assert_eq!(*life, LifeState::Spawned);

    let (order, class, layers, ..) = &bullets[1];
    assert_eq!(*order, SpawnOrder(2));
    assert_eq!(*class, CollisionClass::EnemyBullet);
    assert!(layers.memberships.has_all(Layer::EnemyBullet));
    assert!(layers.filters.has_all(Layer::Player));
    assert!(!layers.filters.has_all(Layer::Enemy));
}

#[test]
fn lifetime_expiry_destroys_bullet() {
    let mut world = world_with_dt(0.5);
    let bullet = world
        .spawn((components::Lifetime::from_secs(1.0), LifeState::Active))
        .id();

    run_system_once(&mut world, spawn::bullet_lifetime);
    assert_eq!(*world.get::<LifeState>(bullet).unwrap(), LifeState::Active);

    run_system_once(&mut world, spawn::bullet_lifetime);
    assert_eq!(*world.get::<LifeState>(bullet).unwrap(), LifeState::Destroyed);
}

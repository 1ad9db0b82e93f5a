//! Enemy template resolution and the spawn consumer.

use bevy::ecs::message::Messages;
use bevy::prelude::*;
use pretty_assertions::assert_eq;

use super::*;
use crate::common::error::{ConfigError, SpawnError};
use crate::common::test_utils::run_system_once;
use crate::plugins::behaviors::{AttackSpec, Movement, Pattern};
use crate::plugins::combat::{Health, LifeState, PointValue};
use crate::plugins::core::SpawnOrder;

fn library() -> BehaviorLibrary {
    BehaviorLibrary::default()
        .with_movement("drift", Movement::straight(Vec2::NEG_Y, 60.0))
        .with_attack("peashooter", AttackSpec::new(Pattern::forward(Vec2::NEG_Y), 1.0, 150.0))
}

fn scout() -> EnemyTemplate {
    EnemyTemplate {
        health: 3,
        point_value: 100,
        hitbox_radius: 12.0,
        movement: "drift".into(),
        attack: Some("peashooter".into()),
    }
}

fn spawn_world(bestiary: Bestiary) -> World {
    let mut world = World::new();
    world.insert_resource(bestiary);
    world.insert_resource(library());
    world.init_resource::<SpawnCounter>();
    world.init_resource::<Messages<SpawnEnemyRequest>>();
    world
}

#[test]
fn loadout_resolves_patterns_with_fresh_state() {
    let bestiary = Bestiary::default().with_template("scout", scout());
    let loadout = bestiary.loadout("scout", &library()).unwrap();

    assert_eq!(loadout.health, Health::new(3));
    assert_eq!(loadout.points, PointValue(100));
    assert_eq!(loadout.movement, Movement::straight(Vec2::NEG_Y, 60.0));
    let attack = loadout.attack.unwrap();
    assert_eq!(attack.fire.interval_secs(), 1.0);
    assert_eq!(attack.bullet_speed, 150.0);
}

#[test]
fn loadout_reports_missing_collaborators() {
    let mut broken = scout();
    broken.attack = Some("laser".into());
    let bestiary = Bestiary::default().with_template("broken", broken);

    assert_eq!(
        bestiary.loadout("ghost", &library()).unwrap_err(),
        SpawnError::MissingTemplate("ghost".into())
    );
    assert_eq!(
        bestiary.loadout("broken", &library()).unwrap_err(),
        SpawnError::MissingPattern("laser".into())
    );
}

#[test]
fn validate_rejects_bad_templates() {
    let mut zero = scout();
    zero.health = 0;
    assert_eq!(
        zero.validate("zero", &library()),
        Err(ConfigError::ZeroHealth("zero".into()))
    );

    let mut lost = scout();
    lost.movement = "teleport".into();
    assert_eq!(
        Bestiary::default().with_template("lost", lost).validate(&library()),
        Err(ConfigError::UnknownMovementPattern("teleport".into()))
    );

    assert_eq!(Bestiary::default().with_template("scout", scout()).validate(&library()), Ok(()));
}

#[test]
fn consumer_spawns_known_templates_and_skips_unknown() {
    let mut world = spawn_world(Bestiary::default().with_template("scout", scout()));
    world.write_message(SpawnEnemyRequest { template: "ghost".into(), position: Vec2::ZERO });
    world.write_message(SpawnEnemyRequest { template: "scout".into(), position: Vec2::new(40.0, 340.0) });

    run_system_once(&mut world, spawn_requested_enemies);

    let mut q = world.query_filtered::<(&SpawnOrder, &Transform, &Health, &LifeState, Has<Armed>), With<Enemy>>();
    let spawned: Vec<_> = q.iter(&world).map(|(o, tf, hp, life, armed)| (*o, tf.translation, *hp, *life, armed)).collect();

    assert_eq!(
        spawned,
        vec![(SpawnOrder(1), Vec3::new(40.0, 340.0, 0.0), Health::new(3), LifeState::Spawned, true)]
    );
}

#[test]
fn template_loads_from_json() {
    let json = r#"{ "health": 5, "point_value": 300, "hitbox_radius": 14.0, "movement": "drift" }"#;
    let template: EnemyTemplate = serde_json::from_str(json).unwrap();
    assert_eq!(template.attack, None);
    assert_eq!(template.validate("json", &library()), Ok(()));
}

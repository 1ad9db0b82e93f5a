mod common;

use bevy::prelude::*;
use shmup_core::common::layers::CollisionClass;
use shmup_core::plugins::combat::Player;
use shmup_core::plugins::session::{GameEvent, GameSession};
use shmup_core::plugins::stage::{StageController, StagePhase};

#[test]
fn boots_and_ticks() {
    let mut app = common::app_headless();

    for _ in 0..3 {
        app.update();
    }
    common::run_ticks(&mut app, 120, 1.0 / 60.0);
}

#[test]
fn entering_game_spawns_player_and_starts_first_stage() {
    let mut app = common::app_headless();

    let players = app.world_mut().query::<&Player>().iter(app.world()).count();
    assert_eq!(players, 1);

    let controller = app.world().resource::<StageController>();
    assert_eq!(controller.phase(), StagePhase::Running);
    assert_eq!(controller.stage_name(), Some("Outer Approach"));

    let session = app.world().resource::<GameSession>();
    assert_eq!((session.score(), session.lives(), session.bombs()), (0, 3, 3));

    let events = common::drain_events(&mut app);
    assert!(events.contains(&GameEvent::StageStarted("Outer Approach".into())));
}

#[test]
fn first_tick_spawns_opening_wave() {
    let mut app = common::app_headless();
    common::drain_events(&mut app);

    common::run_ticks(&mut app, 1, 1.0 / 60.0);

    assert_eq!(common::count_class(app.world_mut(), CollisionClass::Enemy), 5);
    assert!(common::drain_events(&mut app).contains(&GameEvent::WaveSpawned(0)));
}

#[test]
fn held_fire_produces_player_bullets() {
    let mut app = common::app_headless();
    app.world_mut()
        .resource_mut::<shmup_core::plugins::player::PlayerInput>()
        .fire_held = true;

    // 0.1 s interval: four or five windows in half a second, none culled yet.
    common::run_ticks(&mut app, 30, 1.0 / 60.0);

    let bullets = common::count_class(app.world_mut(), CollisionClass::PlayerBullet);
    assert!((4..=5).contains(&bullets), "{bullets} bullets in flight");
}

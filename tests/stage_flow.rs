//! A two-stage campaign played end to end: waves, warning, boss entrance,
//! phase change, boss kill, stage clear, next stage, campaign complete.

mod common;

use bevy::prelude::*;

use shmup_core::common::tunables::Tunables;
use shmup_core::plugins::behaviors::{AttackSpec, BehaviorLibrary, Movement, Pattern};
use shmup_core::plugins::boss::{BossEncounter, BossPhase, BossPhaseController};
use shmup_core::plugins::combat::{Boss, Health};
use shmup_core::plugins::enemies::{Bestiary, EnemyTemplate};
use shmup_core::plugins::projectiles::{BulletKind, SpawnBulletRequest};
use shmup_core::plugins::session::{GameEvent, GameSession};
use shmup_core::plugins::stage::{Campaign, EnemyWave, Formation, StageController, StageDefinition, StagePhase};

const DT: f32 = 0.1;

fn library() -> BehaviorLibrary {
    BehaviorLibrary::default()
        .with_movement("hold", Movement::Stationary)
        .with_attack("ring", AttackSpec::new(Pattern::spiral(4, 0.0).unwrap(), 30.0, 50.0))
}

fn bestiary() -> Bestiary {
    Bestiary::default().with_template(
        "dummy",
        EnemyTemplate { health: 1, point_value: 100, hitbox_radius: 10.0, movement: "hold".into(), attack: None },
    )
}

fn stage(name: &str) -> StageDefinition {
    let wave = |spawn_time, count| EnemyWave {
        spawn_time,
        enemy: "dummy".into(),
        count,
        formation: Formation::Line,
        spawn_interval: 0.0,
        spawn_width: 0.8,
    };
    StageDefinition {
        name: name.into(),
        duration: 2.0,
        waves: vec![wave(0.0, 2), wave(1.0, 1)],
        boss: BossEncounter {
            name: format!("{name} Boss"),
            health: 2,
            point_value: 5_000,
            hitbox_radius: 30.0,
            spawn_position: Vec2::new(0.0, 300.0),
            arena_position: Vec2::new(0.0, 150.0),
            entrance_duration: 0.5,
            invulnerable_during_entrance: true,
            phases: vec![
                BossPhase {
                    name: "Calm".into(),
                    health_threshold: 1.0,
                    attack_pattern: "ring".into(),
                    fire_rate_multiplier: 1.0,
                    bullet_speed_multiplier: 1.0,
                    movement_pattern: None,
                },
                BossPhase {
                    name: "Angry".into(),
                    health_threshold: 0.5,
                    attack_pattern: "ring".into(),
                    fire_rate_multiplier: 2.0,
                    bullet_speed_multiplier: 1.0,
                    movement_pattern: Some("hold".into()),
                },
            ],
        },
        seed: 7,
    }
}

fn app() -> App {
    let mut app = common::app_configured();
    let (library, bestiary) = (library(), bestiary());
    let campaign = Campaign::new(vec![stage("First"), stage("Second")], &bestiary, &library).unwrap();
    app.insert_resource(library)
        .insert_resource(bestiary)
        .insert_resource(campaign)
        .insert_resource(Tunables { boss_warning_secs: 0.5, stage_transition_secs: 0.5, ..Default::default() });
    common::boot(app)
}

fn boss_ready(world: &mut World) -> bool {
    world
        .query_filtered::<&BossPhaseController, With<Boss>>()
        .iter(world)
        .any(|ctrl| !ctrl.is_entering())
}

fn shoot_boss(app: &mut App) {
    app.world_mut().write_message(SpawnBulletRequest {
        kind: BulletKind::Player,
        pos: Vec2::new(0.0, 60.0),
        vel: Vec2::new(0.0, 600.0),
        damage: 1,
    });
    common::run_ticks(app, 3, DT);
}

fn play_stage(app: &mut App) -> Vec<GameEvent> {
    common::run_until(app, DT, 100, boss_ready);
    let boss = app
        .world_mut()
        .query_filtered::<Entity, With<Boss>>()
        .single(app.world())
        .unwrap();

    shoot_boss(app);
    assert_eq!(app.world().get::<Health>(boss).map(|h| h.current), Some(1));
    let phase = app.world().get::<BossPhaseController>(boss).map(|c| c.current_index());
    assert_eq!(phase, Some(1));

    shoot_boss(app);
    assert!(app.world().get_entity(boss).is_err(), "boss should be gone");
    common::drain_events(app)
}

#[test]
fn campaign_runs_through_both_bosses() {
    let mut app = app();

    let first = play_stage(&mut app);
    let expected_order = [
        GameEvent::StageStarted("First".into()),
        GameEvent::WaveSpawned(0),
        GameEvent::WaveSpawned(1),
        GameEvent::BossWarning,
        GameEvent::BossPhaseChanged("Calm".into()),
        GameEvent::BossPhaseChanged("Angry".into()),
        GameEvent::BossDefeated(5_000),
    ];
    let mut cursor = first.iter();
    for expected in &expected_order {
        assert!(cursor.any(|e| e == expected), "missing {expected:?} in {first:?}");
    }
    let bonus = first.iter().find_map(|e| match e {
        GameEvent::StageCleared(bonus) => Some(*bonus),
        _ => None,
    });
    assert!(bonus.is_some_and(|b| b > 10_000), "stage clear bonus: {bonus:?}");
    assert_eq!(app.world().resource::<StageController>().phase(), StagePhase::Cleared);

    // Transition delay, then the second stage starts on its own.
    common::run_until(&mut app, DT, 20, |w| w.resource::<StageController>().phase() == StagePhase::Running);
    assert_eq!(app.world().resource::<Campaign>().current_index(), 1);
    assert_eq!(app.world().resource::<StageController>().stage_name(), Some("Second"));

    let second = play_stage(&mut app);
    assert!(second.contains(&GameEvent::StageStarted("Second".into())));
    assert!(second.contains(&GameEvent::BossDefeated(5_000)));

    common::run_until(&mut app, DT, 20, |w| w.resource::<Campaign>().is_complete());
    assert!(common::drain_events(&mut app).contains(&GameEvent::CampaignComplete));

    // Two boss kills plus two clear bonuses cross the first extend at 100k.
    let session = app.world().resource::<GameSession>();
    assert!(session.score() > 100_000 && session.score() < 200_000, "score {}", session.score());
    assert_eq!(session.lives(), 4);
}

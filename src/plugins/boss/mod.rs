//! Boss plugin: entrance, health-threshold phases and defeat.
//!
//! ```text
//!   Spawn       SpawnBossRequest -> boss entity gliding in (MoveTo), maybe invulnerable
//!   Behaviors   run_boss_entrance: timer elapses -> vulnerable, phase 0 behaviors attached
//!   Collisions  check_boss_phases (after resolve): advance through crossed thresholds,
//!               announce each, attach the last one's behaviors
//! ```
//!
//! Defeat itself is ordinary collision resolution; the resolver writes
//! `BossDefeated` for entities carrying the `Boss` marker.

pub mod controller;
pub mod encounter;

use bevy::prelude::*;

use crate::common::layers::CollisionClass;
use crate::plugins::behaviors::{Armed, BehaviorLibrary, Movable, Movement, apply_movement};
use crate::plugins::combat::collision::resolve_collisions;
use crate::plugins::combat::{Boss, Enemy, Health, HitFlash, LifeState, PointValue, combatant};
use crate::plugins::core::{FrameDelta, SimSet, SimulationTick, SpawnCounter};
use crate::plugins::enemies::spawn_requested_enemies;
use crate::plugins::session::GameEvent;

pub use controller::BossPhaseController;
pub use encounter::{BossEncounter, BossPhase};

/// Entrance glide speed is computed against at least this many seconds.
const MIN_ENTRANCE_SECS: f32 = 0.001;

#[derive(Message, Debug, Clone, PartialEq)]
pub struct SpawnBossRequest {
    pub encounter: BossEncounter,
}

pub fn plugin(app: &mut App) {
    app.add_message::<SpawnBossRequest>();

    app.add_systems(SimulationTick, run_boss_entrance.before(apply_movement).in_set(SimSet::Behaviors))
        .add_systems(
            SimulationTick,
            check_boss_phases.after(resolve_collisions).in_set(SimSet::Collisions),
        )
        .add_systems(
            SimulationTick,
            spawn_requested_bosses.after(spawn_requested_enemies).in_set(SimSet::Spawn),
        );
}

pub fn spawn_requested_bosses(
    mut commands: Commands,
    mut requests: MessageReader<SpawnBossRequest>,
    mut counter: ResMut<SpawnCounter>,
) {
    for SpawnBossRequest { encounter } in requests.read() {
        let mut health = Health::new(encounter.health);
        health.invulnerable = encounter.invulnerable_during_entrance;

        let distance = encounter.spawn_position.distance(encounter.arena_position);
        let glide = distance / encounter.entrance_duration.max(MIN_ENTRANCE_SECS);

        info!("boss '{}' entering", encounter.name);
        commands.spawn((
            Name::new(format!("Boss({})", encounter.name)),
            combatant(CollisionClass::Enemy, encounter.spawn_position, encounter.hitbox_radius, counter.next()),
            Enemy,
            Boss,
            health,
            PointValue(encounter.point_value),
            HitFlash::default(),
            Movable(Movement::move_to(encounter.arena_position, glide)),
            BossPhaseController::new(encounter),
        ));
    }
}

pub fn run_boss_entrance(
    mut commands: Commands,
    delta: Res<FrameDelta>,
    library: Res<BehaviorLibrary>,
    mut events: MessageWriter<GameEvent>,
    mut q: Query<(Entity, &mut BossPhaseController, &mut Health, &LifeState), With<Boss>>,
) {
    for (entity, mut ctrl, mut health, life) in &mut q {
        if !life.is_live() || !ctrl.tick_entrance(delta.duration()) {
            continue;
        }
        health.invulnerable = false;
        enter_current_phase(&mut commands, &mut events, &library, entity, &ctrl);
    }
}

pub fn check_boss_phases(
    mut commands: Commands,
    library: Res<BehaviorLibrary>,
    mut events: MessageWriter<GameEvent>,
    mut q: Query<(Entity, &mut BossPhaseController, &Health, &LifeState), With<Boss>>,
) {
    for (entity, mut ctrl, health, life) in &mut q {
        if !life.is_live() {
            continue;
        }
        let entered = ctrl.advance(health.fraction());
        let Some((_, skipped)) = entered.split_last() else {
            continue;
        };
        for phase in skipped.iter().filter_map(|&i| ctrl.phase(i)) {
            info!("boss phase '{}' skipped through", phase.name);
            events.write(GameEvent::BossPhaseChanged(phase.name.clone()));
        }
        enter_current_phase(&mut commands, &mut events, &library, entity, &ctrl);
    }
}

fn enter_current_phase(
    commands: &mut Commands,
    events: &mut MessageWriter<GameEvent>,
    library: &BehaviorLibrary,
    entity: Entity,
    ctrl: &BossPhaseController,
) {
    let Some(phase) = ctrl.current_phase() else {
        return;
    };
    info!("boss phase '{}'", phase.name);
    events.write(GameEvent::BossPhaseChanged(phase.name.clone()));

    match phase.loadout(library) {
        Ok((attack, movement)) => {
            let mut boss = commands.entity(entity);
            boss.insert(Armed(attack));
            if let Some(movement) = movement {
                boss.insert(Movable(movement));
            }
        }
        Err(err) => warn!("boss phase '{}' keeps its previous behaviors: {err}", phase.name),
    }
}

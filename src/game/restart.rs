use avian2d::prelude::*;
use bevy::ecs::message::Messages;
use bevy::prelude::*;

use crate::common::layers::CollisionClass;
use crate::common::{playfield::Playfield, tunables::Tunables};
use crate::plugins::behaviors::FireTimer;
use crate::plugins::boss::SpawnBossRequest;
use crate::plugins::combat::{BossDefeated, Invulnerability, LifeState, OverlapPairs, Player};
use crate::plugins::enemies::SpawnEnemyRequest;
use crate::plugins::player::{self, PlayerGun, PlayerInput};
use crate::plugins::projectiles::SpawnBulletRequest;
use crate::plugins::session::{GameEvent, GameSession};
use crate::plugins::stage::{self, StageController};

/// Throw the current run away and start the campaign over.
///
/// Every non-player combat entity goes, pending spawn requests go, and the
/// player, session and stage controller return to their starting state in the
/// same call. Nothing observes a half-reset world.
pub fn restart(world: &mut World) {
    let doomed: Vec<Entity> = world
        .query_filtered::<Entity, (With<CollisionClass>, Without<Player>)>()
        .iter(world)
        .collect();
    let cleared = doomed.len();
    for entity in doomed {
        world.despawn(entity);
    }

    clear_messages::<SpawnBulletRequest>(world);
    clear_messages::<SpawnEnemyRequest>(world);
    clear_messages::<SpawnBossRequest>(world);
    clear_messages::<BossDefeated>(world);
    if let Some(mut pairs) = world.get_resource_mut::<OverlapPairs>() {
        pairs.0.clear();
    }
    if let Some(mut input) = world.get_resource_mut::<PlayerInput>() {
        *input = PlayerInput::default();
    }

    reset_player(world);

    world.resource_mut::<GameSession>().reset();
    world.resource_mut::<StageController>().reset();
    if let Err(err) = world.run_system_cached(stage::begin_campaign) {
        warn!("campaign did not restart: {err}");
    }

    let session = world.resource::<GameSession>().clone();
    world.write_message(GameEvent::ScoreChanged(session.score()));
    world.write_message(GameEvent::LivesChanged(session.lives()));
    world.write_message(GameEvent::BombsChanged(session.bombs()));
    info!("restarted, {cleared} entities cleared");
}

fn reset_player(world: &mut World) {
    let spawn_at = world.resource::<Playfield>().player_spawn();
    let fire_interval = world.resource::<Tunables>().player_fire_interval;

    let mut q = world.query_filtered::<(
        &CollisionClass,
        &mut Transform,
        &mut LifeState,
        &mut CollisionLayers,
        &mut Invulnerability,
        &mut PlayerGun,
    ), With<Player>>();

    let mut found = false;
    for (class, mut tf, mut life, mut layers, mut invulnerability, mut gun) in q.iter_mut(world) {
        tf.translation.x = spawn_at.x;
        tf.translation.y = spawn_at.y;
        *life = LifeState::Active;
        *layers = class.active_layers();
        invulnerability.clear();
        gun.0 = FireTimer::new(fire_interval);
        found = true;
    }

    if !found {
        if let Err(err) = world.run_system_cached(player::spawn) {
            warn!("player could not be respawned: {err}");
        }
    }
}

fn clear_messages<M: Message>(world: &mut World) {
    if let Some(mut messages) = world.get_resource_mut::<Messages<M>>() {
        messages.clear();
    }
}

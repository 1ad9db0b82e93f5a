//! Enemies plugin: regular enemies built from named templates.
//!
//! The stage controller only writes `SpawnEnemyRequest { template, position }`;
//! this plugin resolves the template against the `Bestiary` and the
//! `BehaviorLibrary` and spawns the entity. A request naming something that
//! does not exist is logged and skipped; the simulation carries on.

pub mod template;

use bevy::prelude::*;

use crate::common::layers::CollisionClass;
use crate::plugins::behaviors::{Armed, BehaviorLibrary, Movable};
use crate::plugins::combat::{Enemy, HitFlash, combatant};
use crate::plugins::core::{SimSet, SimulationTick, SpawnCounter};
use crate::plugins::projectiles::spawn::spawn_requested_bullets;

pub use template::{Bestiary, EnemyLoadout, EnemyTemplate};

#[derive(Message, Debug, Clone, PartialEq)]
pub struct SpawnEnemyRequest {
    pub template: String,
    pub position: Vec2,
}

pub fn plugin(app: &mut App) {
    app.init_resource::<Bestiary>().add_message::<SpawnEnemyRequest>();

    // Bullets first, then enemies: spawn order must not depend on the executor.
    app.add_systems(
        SimulationTick,
        spawn_requested_enemies.after(spawn_requested_bullets).in_set(SimSet::Spawn),
    );
}

pub fn spawn_requested_enemies(
    mut commands: Commands,
    mut requests: MessageReader<SpawnEnemyRequest>,
    mut counter: ResMut<SpawnCounter>,
    bestiary: Res<Bestiary>,
    library: Res<BehaviorLibrary>,
) {
    for req in requests.read() {
        let loadout = match bestiary.loadout(&req.template, &library) {
            Ok(loadout) => loadout,
            Err(err) => {
                warn!("skipping enemy spawn at {}: {err}", req.position);
                continue;
            }
        };

        let mut enemy = commands.spawn((
            Name::new(format!("Enemy({})", req.template)),
            combatant(CollisionClass::Enemy, req.position, loadout.hitbox_radius, counter.next()),
            Enemy,
            loadout.health,
            loadout.points,
            HitFlash::default(),
            Movable(loadout.movement),
        ));
        if let Some(attack) = loadout.attack {
            enemy.insert(Armed(attack));
        }
    }
}

#[cfg(test)]
mod tests;

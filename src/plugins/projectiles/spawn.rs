//! Consumer: the only place bullet entities are created.

use bevy::prelude::*;

use crate::common::tunables::Tunables;
use crate::plugins::behaviors::{Movable, Movement};
use crate::plugins::combat::components::{LifeState, combatant};
use crate::plugins::core::{FrameDelta, SpawnCounter};

use super::components::{Bullet, Lifetime};
use super::messages::{BulletKind, SpawnBulletRequest};

pub fn spawn_requested_bullets(
    mut commands: Commands,
    mut requests: MessageReader<SpawnBulletRequest>,
    mut counter: ResMut<SpawnCounter>,
    tunables: Res<Tunables>,
) {
    for req in requests.read() {
        let (name, radius) = match req.kind {
            BulletKind::Player => ("PlayerBullet", tunables.player_bullet_radius),
            BulletKind::Enemy => ("EnemyBullet", tunables.enemy_bullet_radius),
        };
        let direction = req.vel.normalize_or(Vec2::NEG_Y);

        commands.spawn((
            Name::new(name),
            combatant(req.kind.class(), req.pos, radius, counter.next()),
            Bullet { damage: req.damage },
            Lifetime::from_secs(tunables.bullet_lifetime),
            Movable(Movement::straight(direction, req.vel.length())),
        ));
    }
}

/// Expired bullets are marked destroyed; cleanup despawns them.
pub fn bullet_lifetime(delta: Res<FrameDelta>, mut q: Query<(&mut Lifetime, &mut LifeState)>) {
    for (mut lt, mut life) in &mut q {
        if !life.is_live() {
            continue;
        }
        lt.tick(delta.duration());
        if lt.is_finished() {
            *life = LifeState::Destroyed;
        }
    }
}

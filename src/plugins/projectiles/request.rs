//! Producers: entities whose attack timers elapsed write `SpawnBulletRequest`s.

use bevy::prelude::*;

use crate::plugins::behaviors::Armed;
use crate::plugins::combat::components::{Enemy, LifeState};
use crate::plugins::core::{FrameDelta, SpawnOrder};

use super::messages::{BulletKind, SpawnBulletRequest};

/// Enemies (bosses included) fire once they are on screen. Volleys are written
/// in spawn order so the resulting bullets get a stable order too.
pub fn fire_enemy_volleys(
    delta: Res<FrameDelta>,
    mut q_shooters: Query<(&SpawnOrder, &mut Armed, &Transform, &LifeState), With<Enemy>>,
    mut writer: MessageWriter<SpawnBulletRequest>,
) {
    let mut shooters: Vec<_> = q_shooters
        .iter_mut()
        .filter(|(_, _, _, life)| **life == LifeState::Active)
        .map(|(order, armed, tf, _)| (*order, armed, tf.translation.truncate()))
        .collect();
    shooters.sort_unstable_by_key(|(order, ..)| *order);

    for (_, mut armed, origin) in shooters {
        let attack = &mut armed.0;
        attack.update(delta.duration());
        while attack.try_consume_fire_ready() {
            for dir in attack.compute_bullet_directions(origin) {
                writer.write(SpawnBulletRequest {
                    kind: BulletKind::Enemy,
                    pos: origin,
                    vel: dir * attack.bullet_speed,
                    damage: attack.bullet_damage,
                });
            }
        }
    }
}

//! End-of-tick garbage collection.

use bevy::prelude::*;

use crate::common::playfield::Playfield;
use crate::plugins::core::FrameDelta;

use super::components::{HitFlash, LifeState, Player};

/// How many cull margins a not-yet-entered entity may stray before it is dropped.
const SPAWNED_CULL_FACTOR: f32 = 4.0;

/// `Spawned -> Active` on first entering the playfield; `Active -> Destroyed`
/// once past the cull margin. The player is clamped and never culled.
pub fn track_playfield(playfield: Res<Playfield>, mut q: Query<(&Transform, &mut LifeState), Without<Player>>) {
    for (tf, mut life) in &mut q {
        let p = tf.translation.truncate();
        match *life {
            LifeState::Spawned if playfield.contains(p) => *life = LifeState::Active,
            LifeState::Spawned if playfield.is_outside_by(p, playfield.cull_margin * SPAWNED_CULL_FACTOR) => {
                *life = LifeState::Destroyed;
            }
            LifeState::Active if playfield.is_outside_margin(p) => *life = LifeState::Destroyed,
            _ => {}
        }
    }
}

pub fn despawn_destroyed(mut commands: Commands, q: Query<(Entity, &LifeState), Without<Player>>) {
    for (e, life) in &q {
        if *life == LifeState::Destroyed {
            commands.entity(e).despawn();
        }
    }
}

pub fn tick_hit_flash(delta: Res<FrameDelta>, mut q: Query<&mut HitFlash>) {
    let dt = delta.secs();
    for mut flash in &mut q {
        if flash.is_active() {
            flash.tick(dt);
        }
    }
}

//! Behavior library: movement and attack patterns, and the system that moves things.
//!
//! Behaviors are closed enums dispatched with `match`, held in the `Movable`
//! and `Armed` capability components. Firing lives in `projectiles::request`.

pub mod attack;
pub mod library;
pub mod movement;

use bevy::prelude::*;

use crate::plugins::combat::components::LifeState;
use crate::plugins::core::{FrameDelta, SimSet, SimulationTick};

pub use attack::{Attack, AttackSpec, FireTimer, MIN_FIRE_INTERVAL_SECS, Pattern};
pub use library::BehaviorLibrary;
pub use movement::Movement;

/// Capability: moved by its own movement pattern each tick.
#[derive(Component, Debug, Clone)]
pub struct Movable(pub Movement);

/// Capability: fires volleys from its own attack.
#[derive(Component, Debug, Clone)]
pub struct Armed(pub Attack);

pub fn plugin(app: &mut App) {
    app.init_resource::<BehaviorLibrary>();
    app.add_systems(SimulationTick, apply_movement.in_set(SimSet::Behaviors));
}

pub fn apply_movement(delta: Res<FrameDelta>, mut q: Query<(&mut Movable, &mut Transform, &LifeState)>) {
    let dt = delta.secs();
    for (mut movable, mut tf, life) in &mut q {
        if *life == LifeState::Destroyed {
            continue;
        }
        let step = movable.0.compute_delta(dt, tf.translation.truncate());
        tf.translation += step.extend(0.0);
    }
}

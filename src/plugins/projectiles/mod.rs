//! Projectiles plugin: message-based producer -> consumer bullet spawning.
//!
//! ```text
//!   Behaviors  fire_enemy_volleys / player::fire_player_gun
//!                -> SpawnBulletRequest
//!   Spawn      spawn_requested_bullets
//!                -> Bullet + Lifetime + Movable(Straight) + combatant bundle
//!   Cleanup    bullet_lifetime -> LifeState::Destroyed
//! ```
//!
//! Producers never spawn; the consumer is the single writer of bullet
//! entities and hands out their `SpawnOrder`.

pub mod components;
pub mod messages;
pub mod request;
pub mod spawn;

use bevy::prelude::*;

use crate::plugins::behaviors::apply_movement;
use crate::plugins::combat::cleanup::track_playfield;
use crate::plugins::core::{SimSet, SimulationTick};

pub use components::{Bullet, Lifetime};
pub use messages::{BulletKind, SpawnBulletRequest};

pub fn plugin(app: &mut App) {
    app.add_message::<SpawnBulletRequest>();

    // Volleys read post-movement positions.
    app.add_systems(
        SimulationTick,
        request::fire_enemy_volleys.after(apply_movement).in_set(SimSet::Behaviors),
    )
    .add_systems(SimulationTick, spawn::spawn_requested_bullets.in_set(SimSet::Spawn))
    .add_systems(
        SimulationTick,
        spawn::bullet_lifetime.before(track_playfield).in_set(SimSet::Cleanup),
    );
}

#[cfg(test)]
mod tests;

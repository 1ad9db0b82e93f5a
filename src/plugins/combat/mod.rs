//! Combat plugin: entity lifecycle, damage model and collision resolution.

pub mod cleanup;
pub mod collision;
pub mod components;

use bevy::prelude::*;

use crate::plugins::core::{SimSet, SimulationTick};

pub use collision::{BossDefeated, OverlapPairs};
pub use components::{
    Boss, DamageOutcome, Enemy, Health, HitFlash, Hitbox, Invulnerability, LifeState, Player, PointValue, combatant,
};

pub fn plugin(app: &mut App) {
    app.init_resource::<OverlapPairs>().add_message::<BossDefeated>();

    app.add_systems(SimulationTick, cleanup::tick_hit_flash.in_set(SimSet::Behaviors))
        .add_systems(
            SimulationTick,
            (collision::detect_overlaps, collision::resolve_collisions)
                .chain()
                .in_set(SimSet::Collisions),
        )
        .add_systems(
            SimulationTick,
            (cleanup::track_playfield, cleanup::despawn_destroyed)
                .chain()
                .in_set(SimSet::Cleanup),
        );
}

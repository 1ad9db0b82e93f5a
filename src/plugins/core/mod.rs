//! Core plugin: shared resources and the simulation tick.
//!
//! One call to [`step`] is one simulation tick. The tick is its own schedule so
//! tests can drive it with exact `dt` values; the full app drives it from
//! `FixedUpdate`.
//!
//! ```text
//! SimulationTick
//!   Behaviors   input, boss entrance, movement, attack timers -> bullet requests
//!   Collisions  overlap detection -> resolution -> boss phase checks
//!   Stage       boss defeat bonus, wave/boss scheduling -> spawn requests
//!   Spawn       requests -> entities
//!   Cleanup     lifetimes, playfield culling, despawn
//! ```

use std::time::Duration;

use bevy::ecs::schedule::ScheduleLabel;
use bevy::prelude::*;

use crate::common::{playfield::Playfield, state::GameState, tunables::Tunables};
use crate::plugins::session::game_in_progress;

#[derive(ScheduleLabel, Debug, Clone, PartialEq, Eq, Hash)]
pub struct SimulationTick;

#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SimSet {
    Behaviors,
    Collisions,
    Stage,
    Spawn,
    Cleanup,
}

/// Duration of the tick being simulated.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameDelta(Duration);

impl FrameDelta {
    /// Negative or non-finite input counts as a zero-length tick.
    pub fn from_secs(secs: f32) -> Self {
        let secs = if secs.is_finite() { secs.clamp(0.0, 3600.0) } else { 0.0 };
        Self(Duration::from_secs_f32(secs))
    }

    #[inline]
    pub fn secs(&self) -> f32 {
        self.0.as_secs_f32()
    }

    #[inline]
    pub fn duration(&self) -> Duration {
        self.0
    }
}

/// Monotonic spawn sequence. Sorting by it gives a stable evaluation order.
#[derive(Resource, Debug, Default)]
pub struct SpawnCounter(u64);

impl SpawnCounter {
    pub fn next(&mut self) -> SpawnOrder {
        self.0 += 1;
        SpawnOrder(self.0)
    }
}

#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SpawnOrder(pub u64);

pub fn plugin(app: &mut App) {
    app.init_resource::<Tunables>()
        .init_resource::<Playfield>()
        .init_resource::<FrameDelta>()
        .init_resource::<SpawnCounter>();

    app.init_schedule(SimulationTick);
    app.configure_sets(
        SimulationTick,
        (SimSet::Behaviors, SimSet::Collisions, SimSet::Stage, SimSet::Spawn, SimSet::Cleanup).chain(),
    );

    // Once the game is over the world freezes; cleanup still runs.
    app.configure_sets(SimulationTick, SimSet::Behaviors.run_if(game_in_progress))
        .configure_sets(SimulationTick, SimSet::Collisions.run_if(game_in_progress))
        .configure_sets(SimulationTick, SimSet::Stage.run_if(game_in_progress))
        .configure_sets(SimulationTick, SimSet::Spawn.run_if(game_in_progress));

    app.add_systems(FixedUpdate, drive_simulation.run_if(in_state(GameState::InGame)));
}

/// Run exactly one simulation tick of `dt` seconds.
pub fn step(world: &mut World, dt: f32) {
    world.insert_resource(FrameDelta::from_secs(dt));
    world.run_schedule(SimulationTick);
}

/// Inside `FixedUpdate`, `Time` is the fixed clock.
fn drive_simulation(world: &mut World) {
    let dt = world.resource::<Time>().delta_secs();
    step(world, dt);
}

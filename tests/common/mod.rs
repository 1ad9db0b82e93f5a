//! Integration test harness.
//!
//! Keep integration tests headless:
//! - `MinimalPlugins` provides core ECS runtime, `StatesPlugin` the game state.
//! - we then call `shmup_core::game::configure_headless` to install gameplay plugins.
//! - virtual time never advances, so `FixedUpdate` never ticks on its own;
//!   tests drive the simulation with `step` and exact `dt` values.

#![allow(dead_code)]

use std::time::Duration;

use bevy::ecs::message::Messages;
use bevy::prelude::*;
use bevy::state::app::StatesPlugin;
use bevy::time::TimeUpdateStrategy;

use shmup_core::common::layers::CollisionClass;
use shmup_core::plugins::core::{SpawnOrder, step};
use shmup_core::plugins::session::GameEvent;

/// Configured but not yet booted: resources may still be swapped out.
pub fn app_configured() -> App {
    let mut app = App::new();
    app.add_plugins((MinimalPlugins, StatesPlugin))
        .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::ZERO));

    shmup_core::game::configure_headless(&mut app);
    app
}

/// One `update` enters `InGame`: player spawned, first stage started.
pub fn boot(mut app: App) -> App {
    app.update();
    app
}

pub fn app_headless() -> App {
    boot(app_configured())
}

pub fn run_ticks(app: &mut App, ticks: usize, dt: f32) {
    for _ in 0..ticks {
        step(app.world_mut(), dt);
    }
}

/// Step until `done` holds; panics after `max_ticks`.
pub fn run_until(app: &mut App, dt: f32, max_ticks: usize, mut done: impl FnMut(&mut World) -> bool) {
    for _ in 0..max_ticks {
        if done(app.world_mut()) {
            return;
        }
        step(app.world_mut(), dt);
    }
    assert!(done(app.world_mut()), "condition not reached within {max_ticks} ticks");
}

pub fn drain_events(app: &mut App) -> Vec<GameEvent> {
    app.world_mut().resource_mut::<Messages<GameEvent>>().drain().collect()
}

pub fn count_class(world: &mut World, class: CollisionClass) -> usize {
    world
        .query::<&CollisionClass>()
        .iter(world)
        .filter(|c| **c == class)
        .count()
}

/// Every combat entity as `(spawn order, class, position)`, in spawn order.
pub fn snapshot(world: &mut World) -> Vec<(u64, CollisionClass, Vec2)> {
    let mut all: Vec<_> = world
        .query::<(&SpawnOrder, &CollisionClass, &Transform)>()
        .iter(world)
        .map(|(order, class, tf)| (order.0, *class, tf.translation.truncate()))
        .collect();
    all.sort_by_key(|(order, ..)| *order);
    all
}

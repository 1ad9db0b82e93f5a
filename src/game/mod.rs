//! Game composition root.
//!
//! Provides two public configuration functions:
//! - `configure_full`: DefaultPlugins (window/render/input) + game plugins + presentation.
//! - `configure_headless`: simulation only, for integration tests and embedding.

mod restart;

use bevy::prelude::*;
use bevy::window::WindowResolution;

use crate::common::state::GameState;
use crate::content;
use crate::plugins;

pub use restart::restart;

/// Simulation rate of the full app.
const TICK_HZ: f64 = 60.0;

pub fn run() {
    App::new().add_plugins(configure_full).run();
}

/// Full configuration for `cargo run`.
pub fn configure_full(app: &mut App) {
    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: "Shmup".into(),
            resolution: WindowResolution::new(480, 640),
            resizable: false,
            ..default()
        }),
        ..default()
    }))
    .insert_resource(Time::<Fixed>::from_hz(TICK_HZ));

    configure_game(app);
    plugins::register_render(app);
}

/// Headless configuration.
///
/// Notes:
/// - Do NOT add DefaultPlugins.
/// - Do NOT add the presentation plugin (camera, sprites, keyboard).
/// - Nothing ticks by itself unless `Time<Fixed>` advances; tests call
///   `plugins::core::step` directly.
pub fn configure_headless(app: &mut App) {
    configure_game(app);
}

/// Configuration shared by both full and headless apps.
fn configure_game(app: &mut App) {
    app.init_state::<GameState>();
    plugins::register_gameplay(app);
    content::plugin(app);
}

//! Feature plugins.

use bevy::prelude::*;

pub mod behaviors;
pub mod boss;
pub mod combat;
pub mod core;
pub mod enemies;
pub mod player;
pub mod projectiles;
pub mod session;
pub mod stage;

// Render-only
pub mod presentation;

/// Register gameplay plugins that work in headless tests.
pub fn register_gameplay(app: &mut App) {
    core::plugin(app);
    session::plugin(app);
    behaviors::plugin(app);
    combat::plugin(app);
    projectiles::plugin(app);
    enemies::plugin(app);
    boss::plugin(app);
    stage::plugin(app);
    player::plugin(app);
}

/// Register render-only plugins (requires DefaultPlugins / render infra).
pub fn register_render(app: &mut App) {
    presentation::plugin(app);
}

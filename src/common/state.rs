//! Global state machine.

use bevy::prelude::*;

/// Only `InGame` exists today; game over is a session flag, not a state,
/// so a restart never leaves the state and never re-runs `OnEnter`.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, States, Default)]
pub enum GameState {
    #[default]
    InGame,
}

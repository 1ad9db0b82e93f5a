//! Time-driven stage progression.
//!
//! `NotStarted -> Running -> BossWarning -> BossActive -> Cleared`
//!
//! The controller never touches the world. `advance` returns what should
//! happen this tick as `StageAction`s and the stage systems turn those into
//! spawn requests and events.

use bevy::prelude::*;

use crate::common::error::ConfigError;
use crate::common::playfield::Playfield;
use crate::common::tunables::ScoreTuning;
use crate::plugins::behaviors::BehaviorLibrary;
use crate::plugins::boss::BossEncounter;
use crate::plugins::enemies::Bestiary;

use super::definition::StageDefinition;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StagePhase {
    #[default]
    NotStarted,
    Running,
    BossWarning,
    BossActive,
    Cleared,
}

#[derive(Debug, Clone, PartialEq)]
pub enum StageAction {
    WaveSpawned(usize),
    SpawnEnemy { template: String, position: Vec2 },
    BossWarning,
    SpawnBoss(BossEncounter),
}

/// One wave member waiting for its slot (`spawn_interval > 0`).
#[derive(Debug, Clone, PartialEq)]
struct PendingSpawn {
    due: f32,
    template: String,
    position: Vec2,
}

#[derive(Resource, Debug, Clone, Default)]
pub struct StageController {
    phase: StagePhase,
    stage: Option<StageDefinition>,
    stage_time: f32,
    wave_cursor: usize,
    pending: Vec<PendingSpawn>,
    warning_elapsed: f32,
}

impl StageController {
    /// Validate, sort the waves once, and start from `stage_time = 0`.
    /// A rejected definition leaves the controller untouched.
    pub fn start_stage(
        &mut self,
        definition: &StageDefinition,
        bestiary: &Bestiary,
        library: &BehaviorLibrary,
    ) -> Result<(), ConfigError> {
        definition.validate(bestiary, library)?;
        let mut stage = definition.clone();
        stage.sort_waves();
        *self = Self { phase: StagePhase::Running, stage: Some(stage), ..default() };
        Ok(())
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    #[inline]
    pub fn phase(&self) -> StagePhase {
        self.phase
    }

    #[inline]
    pub fn stage_time(&self) -> f32 {
        self.stage_time
    }

    #[inline]
    pub fn wave_cursor(&self) -> usize {
        self.wave_cursor
    }

    pub fn stage_name(&self) -> Option<&str> {
        self.stage.as_ref().map(|s| s.name.as_str())
    }

    pub fn advance(&mut self, dt: f32, warning_secs: f32, playfield: &Playfield) -> Vec<StageAction> {
        let mut actions = Vec::new();
        if matches!(self.phase, StagePhase::NotStarted | StagePhase::Cleared) {
            return actions;
        }
        let Some(stage) = &self.stage else {
            return actions;
        };
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        self.stage_time += dt;

        // Every due wave, in order, even when several fall in one tick.
        while let Some(wave) = stage.waves.get(self.wave_cursor) {
            if self.stage_time < wave.spawn_time {
                break;
            }
            let index = self.wave_cursor;
            self.wave_cursor += 1;
            actions.push(StageAction::WaveSpawned(index));

            let seed = stage.seed ^ (index as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15);
            let positions = wave.formation.positions(wave.count, wave.spawn_width, playfield, seed);
            for (k, position) in positions.into_iter().enumerate() {
                self.pending.push(PendingSpawn {
                    due: wave.spawn_time + k as f32 * wave.spawn_interval,
                    template: wave.enemy.clone(),
                    position,
                });
            }
        }

        // Stable: equal due times keep wave order.
        self.pending.sort_by(|a, b| a.due.total_cmp(&b.due));
        let now = self.stage_time;
        let due = self.pending.partition_point(|p| p.due <= now);
        actions.extend(
            self.pending
                .drain(..due)
                .map(|p| StageAction::SpawnEnemy { template: p.template, position: p.position }),
        );

        match self.phase {
            StagePhase::Running if self.stage_time >= stage.duration => {
                self.phase = StagePhase::BossWarning;
                self.warning_elapsed = 0.0;
                actions.push(StageAction::BossWarning);
            }
            // The warning counts from the tick after it was raised.
            StagePhase::BossWarning => {
                self.warning_elapsed += dt;
                if self.warning_elapsed >= warning_secs {
                    self.phase = StagePhase::BossActive;
                    actions.push(StageAction::SpawnBoss(stage.boss.clone()));
                }
            }
            _ => {}
        }
        actions
    }

    /// Clear the stage; returns the bonus to award. Only the active boss counts.
    pub fn boss_defeated(&mut self, tuning: &ScoreTuning) -> Option<u64> {
        if self.phase != StagePhase::BossActive {
            return None;
        }
        self.phase = StagePhase::Cleared;
        Some(tuning.stage_bonus(self.stage_time))
    }
}

//! Boss encounter configuration.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::common::error::ConfigError;
use crate::plugins::behaviors::{Attack, BehaviorLibrary, Movement};

fn one() -> f32 {
    1.0
}

fn yes() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BossPhase {
    pub name: String,
    /// Phase starts once `health / max` drops to this fraction or below.
    pub health_threshold: f32,
    pub attack_pattern: String,
    #[serde(default = "one")]
    pub fire_rate_multiplier: f32,
    #[serde(default = "one")]
    pub bullet_speed_multiplier: f32,
    /// Keeps the current movement when absent.
    #[serde(default)]
    pub movement_pattern: Option<String>,
}

impl BossPhase {
    /// Fresh behaviors for this phase, multipliers applied.
    pub fn loadout(&self, library: &BehaviorLibrary) -> Result<(Attack, Option<Movement>), ConfigError> {
        let spec = library.attack(&self.attack_pattern)?;
        let attack = Attack::scaled(spec, self.fire_rate_multiplier, self.bullet_speed_multiplier);
        let movement = self.movement_pattern.as_deref().map(|id| library.movement(id)).transpose()?;
        Ok((attack, movement))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BossEncounter {
    pub name: String,
    pub health: u32,
    pub point_value: u64,
    pub hitbox_radius: f32,
    pub spawn_position: Vec2,
    /// Where the entrance glide ends.
    pub arena_position: Vec2,
    pub entrance_duration: f32,
    #[serde(default = "yes")]
    pub invulnerable_during_entrance: bool,
    /// Ordered by strictly decreasing threshold, starting at 1.0.
    pub phases: Vec<BossPhase>,
}

impl BossEncounter {
    pub fn validate(&self, library: &BehaviorLibrary) -> Result<(), ConfigError> {
        if self.phases.is_empty() {
            return Err(ConfigError::NoPhases(self.name.clone()));
        }
        if self.health == 0 {
            return Err(ConfigError::ZeroHealth(self.name.clone()));
        }
        if !(self.entrance_duration.is_finite() && self.entrance_duration >= 0.0) {
            return Err(ConfigError::NegativeTime { what: "entrance duration", value: self.entrance_duration });
        }

        let mut previous: Option<f32> = None;
        for phase in &self.phases {
            let threshold = phase.health_threshold;
            if !(threshold > 0.0 && threshold <= 1.0) {
                return Err(ConfigError::ThresholdOutOfRange { phase: phase.name.clone(), threshold });
            }
            match previous {
                None if threshold != 1.0 => return Err(ConfigError::FirstThresholdNotFull(threshold)),
                Some(previous) if threshold >= previous => {
                    return Err(ConfigError::ThresholdNotDecreasing {
                        phase: phase.name.clone(),
                        threshold,
                        previous,
                    });
                }
                _ => {}
            }
            previous = Some(threshold);

            for value in [phase.fire_rate_multiplier, phase.bullet_speed_multiplier] {
                if !(value.is_finite() && value > 0.0) {
                    return Err(ConfigError::InvalidMultiplier { phase: phase.name.clone(), value });
                }
            }
            phase.loadout(library)?;
        }
        Ok(())
    }
}

//! Named movement and attack patterns.
//!
//! Templates refer to patterns by id; ids are resolved when a stage or
//! encounter is loaded, so a typo fails the load rather than a spawn.

use std::collections::BTreeMap;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use super::attack::AttackSpec;
use super::movement::Movement;
use crate::common::error::ConfigError;

#[derive(Resource, Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BehaviorLibrary {
    #[serde(default)]
    pub movements: BTreeMap<String, Movement>,
    #[serde(default)]
    pub attacks: BTreeMap<String, AttackSpec>,
}

impl BehaviorLibrary {
    pub fn with_movement(mut self, id: impl Into<String>, movement: Movement) -> Self {
        self.movements.insert(id.into(), movement);
        self
    }

    pub fn with_attack(mut self, id: impl Into<String>, attack: AttackSpec) -> Self {
        self.attacks.insert(id.into(), attack);
        self
    }

    /// A fresh copy of the movement, with its accumulators at zero.
    pub fn movement(&self, id: &str) -> Result<Movement, ConfigError> {
        self.movements
            .get(id)
            .cloned()
            .ok_or_else(|| ConfigError::UnknownMovementPattern(id.to_owned()))
    }

    pub fn attack(&self, id: &str) -> Result<&AttackSpec, ConfigError> {
        self.attacks
            .get(id)
            .ok_or_else(|| ConfigError::UnknownAttackPattern(id.to_owned()))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (id, movement) in &self.movements {
            movement.validate().map_err(|e| e.in_pattern(id))?;
        }
        for (id, attack) in &self.attacks {
            attack.validate().map_err(|e| e.in_pattern(id))?;
        }
        Ok(())
    }
}

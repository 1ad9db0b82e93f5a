//! Enemy templates and the bestiary that names them.

use std::collections::BTreeMap;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::common::error::{ConfigError, SpawnError};
use crate::plugins::behaviors::{Attack, BehaviorLibrary, Movement};
use crate::plugins::combat::{Health, PointValue};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemyTemplate {
    pub health: u32,
    pub point_value: u64,
    pub hitbox_radius: f32,
    /// Movement pattern id in the `BehaviorLibrary`.
    pub movement: String,
    /// Attack pattern id; unarmed when absent.
    #[serde(default)]
    pub attack: Option<String>,
}

impl EnemyTemplate {
    pub fn validate(&self, id: &str, library: &BehaviorLibrary) -> Result<(), ConfigError> {
        if self.health == 0 {
            return Err(ConfigError::ZeroHealth(id.to_owned()));
        }
        if !(self.hitbox_radius.is_finite() && self.hitbox_radius >= 0.0) {
            return Err(ConfigError::NonFinite(self.hitbox_radius));
        }
        library.movement(&self.movement)?;
        if let Some(attack) = &self.attack {
            library.attack(attack)?;
        }
        Ok(())
    }
}

/// Everything needed to put one enemy in the world, with fresh behavior state.
#[derive(Debug, Clone)]
pub struct EnemyLoadout {
    pub health: Health,
    pub points: PointValue,
    pub hitbox_radius: f32,
    pub movement: Movement,
    pub attack: Option<Attack>,
}

#[derive(Resource, Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Bestiary {
    pub templates: BTreeMap<String, EnemyTemplate>,
}

impl Bestiary {
    pub fn with_template(mut self, id: impl Into<String>, template: EnemyTemplate) -> Self {
        self.templates.insert(id.into(), template);
        self
    }

    pub fn get(&self, id: &str) -> Option<&EnemyTemplate> {
        self.templates.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.templates.contains_key(id)
    }

    pub fn validate(&self, library: &BehaviorLibrary) -> Result<(), ConfigError> {
        for (id, template) in &self.templates {
            template.validate(id, library)?;
        }
        Ok(())
    }

    pub fn loadout(&self, id: &str, library: &BehaviorLibrary) -> Result<EnemyLoadout, SpawnError> {
        let template = self.get(id).ok_or_else(|| SpawnError::MissingTemplate(id.to_owned()))?;
        let movement = library
            .movement(&template.movement)
            .map_err(|_| SpawnError::MissingPattern(template.movement.clone()))?;
        let attack = match &template.attack {
            Some(attack_id) => {
                let spec = library
                    .attack(attack_id)
                    .map_err(|_| SpawnError::MissingPattern(attack_id.clone()))?;
                Some(Attack::from_spec(spec))
            }
            None => None,
        };

        Ok(EnemyLoadout {
            health: Health::new(template.health),
            points: PointValue(template.point_value),
            hitbox_radius: template.hitbox_radius,
            movement,
            attack,
        })
    }
}

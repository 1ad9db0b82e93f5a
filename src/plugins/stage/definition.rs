//! Declarative stage records.

use serde::{Deserialize, Serialize};

use crate::common::error::ConfigError;
use crate::plugins::behaviors::BehaviorLibrary;
use crate::plugins::boss::BossEncounter;
use crate::plugins::enemies::Bestiary;

use super::formation::Formation;

fn full_width() -> f32 {
    0.8
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemyWave {
    /// Seconds from stage start.
    pub spawn_time: f32,
    /// Template id in the `Bestiary`.
    pub enemy: String,
    pub count: u32,
    #[serde(default)]
    pub formation: Formation,
    /// Seconds between consecutive members; zero spawns the whole wave at once.
    #[serde(default)]
    pub spawn_interval: f32,
    /// Fraction of the playfield width, in `[0, 1]`.
    #[serde(default = "full_width")]
    pub spawn_width: f32,
}

impl EnemyWave {
    pub fn validate(&self, index: usize, bestiary: &Bestiary) -> Result<(), ConfigError> {
        if self.count == 0 {
            return Err(ConfigError::ZeroWaveCount { wave: index });
        }
        non_negative("spawn time", self.spawn_time)?;
        non_negative("spawn interval", self.spawn_interval)?;
        if !(0.0..=1.0).contains(&self.spawn_width) {
            return Err(ConfigError::SpawnWidthOutOfRange { wave: index, value: self.spawn_width });
        }
        if !bestiary.contains(&self.enemy) {
            return Err(ConfigError::UnknownEnemyTemplate(self.enemy.clone()));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageDefinition {
    pub name: String,
    /// Stage time at which the boss warning starts.
    pub duration: f32,
    pub waves: Vec<EnemyWave>,
    pub boss: BossEncounter,
    /// Seeds scattered formations.
    #[serde(default)]
    pub seed: u64,
}

impl StageDefinition {
    pub fn validate(&self, bestiary: &Bestiary, library: &BehaviorLibrary) -> Result<(), ConfigError> {
        self.check(bestiary, library).map_err(|e| e.in_stage(&self.name))
    }

    fn check(&self, bestiary: &Bestiary, library: &BehaviorLibrary) -> Result<(), ConfigError> {
        non_negative("stage duration", self.duration)?;
        for (index, wave) in self.waves.iter().enumerate() {
            wave.validate(index, bestiary)?;
        }
        self.boss.validate(library)
    }

    /// Waves in non-decreasing spawn time. Stable, so equal times keep authoring order.
    pub fn sort_waves(&mut self) {
        self.waves.sort_by(|a, b| a.spawn_time.total_cmp(&b.spawn_time));
    }
}

fn non_negative(what: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NegativeTime { what, value })
    }
}

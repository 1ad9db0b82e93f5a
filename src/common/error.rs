//! Error types.
//!
//! `ConfigError` rejects malformed templates at load time. `SpawnError` covers
//! a missing collaborator at spawn time; callers log it and skip that spawn.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("bullet count must be at least 1")]
    ZeroBulletCount,

    #[error("fire interval must be positive, got {0}")]
    NonPositiveFireInterval(f32),

    #[error("speed must be finite and non-negative, got {0}")]
    InvalidSpeed(f32),

    #[error("value must be finite, got {0}")]
    NonFinite(f32),

    #[error("boss encounter '{0}' has no phases")]
    NoPhases(String),

    #[error("first phase threshold must be 1.0, got {0}")]
    FirstThresholdNotFull(f32),

    #[error("phase '{phase}' threshold {threshold} is outside (0, 1]")]
    ThresholdOutOfRange { phase: String, threshold: f32 },

    #[error("phase '{phase}' threshold {threshold} does not fall below the previous {previous}")]
    ThresholdNotDecreasing { phase: String, threshold: f32, previous: f32 },

    #[error("phase '{phase}' multiplier must be positive, got {value}")]
    InvalidMultiplier { phase: String, value: f32 },

    #[error("'{0}' must have positive health")]
    ZeroHealth(String),

    #[error("unknown movement pattern '{0}'")]
    UnknownMovementPattern(String),

    #[error("unknown attack pattern '{0}'")]
    UnknownAttackPattern(String),

    #[error("unknown enemy template '{0}'")]
    UnknownEnemyTemplate(String),

    #[error("wave {wave} spawns zero enemies")]
    ZeroWaveCount { wave: usize },

    #[error("{what} must be non-negative, got {value}")]
    NegativeTime { what: &'static str, value: f32 },

    #[error("wave {wave} spawn width {value} is outside [0, 1]")]
    SpawnWidthOutOfRange { wave: usize, value: f32 },

    #[error("campaign has no stages")]
    EmptyCampaign,

    #[error("pattern '{id}': {source}")]
    Pattern {
        id: String,
        #[source]
        source: Box<ConfigError>,
    },

    #[error("stage '{stage}': {source}")]
    Stage {
        stage: String,
        #[source]
        source: Box<ConfigError>,
    },
}

impl ConfigError {
    pub fn in_pattern(self, id: &str) -> Self {
        Self::Pattern { id: id.to_owned(), source: Box::new(self) }
    }

    pub fn in_stage(self, stage: &str) -> Self {
        Self::Stage { stage: stage.to_owned(), source: Box::new(self) }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SpawnError {
    #[error("no enemy template named '{0}'")]
    MissingTemplate(String),

    #[error("no behavior pattern named '{0}'")]
    MissingPattern(String),
}

//! Attack patterns and the fire-rate timer.

use std::time::Duration;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::common::error::ConfigError;

/// Runtime floor for the fire interval. Authored intervals of zero or less
/// are rejected at load; this only guards scaled intervals (phase multipliers)
/// against a fire-every-tick loop.
pub const MIN_FIRE_INTERVAL_SECS: f32 = 0.001;

/// Bullet direction generator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Pattern {
    /// One bullet along a fixed direction.
    Forward { direction: Vec2 },
    /// `bullet_count` bullets spread evenly over `spread_degrees`, centred on `direction`.
    Fan { bullet_count: u32, spread_degrees: f32, direction: Vec2 },
    /// `bullet_count` bullets `360 / bullet_count` degrees apart, rotating by
    /// `angular_velocity` degrees per second.
    Spiral {
        bullet_count: u32,
        angular_velocity: f32,
        #[serde(skip)]
        rotation: f32,
    },
}

impl Pattern {
    pub fn forward(direction: Vec2) -> Self {
        Self::Forward { direction }
    }

    pub fn fan(bullet_count: u32, spread_degrees: f32, direction: Vec2) -> Result<Self, ConfigError> {
        let pattern = Self::Fan { bullet_count, spread_degrees, direction };
        pattern.validate()?;
        Ok(pattern)
    }

    pub fn spiral(bullet_count: u32, angular_velocity: f32) -> Result<Self, ConfigError> {
        let pattern = Self::Spiral { bullet_count, angular_velocity, rotation: 0.0 };
        pattern.validate()?;
        Ok(pattern)
    }

    /// Advance the rotating phase. The angle is never wrapped; the trig
    /// functions are periodic so it does not need to be.
    pub fn advance(&mut self, dt: f32) {
        if let Self::Spiral { angular_velocity, rotation, .. } = self {
            *rotation += *angular_velocity * dt;
        }
    }

    /// Unit directions for one volley; never empty.
    pub fn compute_bullet_directions(&self, _position: Vec2) -> Vec<Vec2> {
        match self {
            Self::Forward { direction } => vec![unit_or_down(*direction)],
            Self::Fan { bullet_count, spread_degrees, direction } => {
                let count = (*bullet_count).max(1);
                let base = unit_or_down(*direction);
                if count == 1 {
                    return vec![base];
                }
                let base_angle = base.to_angle().to_degrees();
                let step = spread_degrees / (count - 1) as f32;
                let start = base_angle - spread_degrees * 0.5;
                (0..count)
                    .map(|i| Vec2::from_angle((start + step * i as f32).to_radians()))
                    .collect()
            }
            Self::Spiral { bullet_count, rotation, .. } => {
                let count = (*bullet_count).max(1);
                let step = 360.0 / count as f32;
                (0..count)
                    .map(|i| Vec2::from_angle((rotation + step * i as f32).to_radians()))
                    .collect()
            }
        }
    }

    /// Degrees the pattern has rotated, wrapped to `[0, 360)`. Display only.
    pub fn rotation_degrees(&self) -> f32 {
        match self {
            Self::Spiral { rotation, .. } => rotation.rem_euclid(360.0),
            _ => 0.0,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        match self {
            Self::Forward { direction } => finite_vec(*direction),
            Self::Fan { bullet_count, spread_degrees, direction } => {
                if *bullet_count == 0 {
                    return Err(ConfigError::ZeroBulletCount);
                }
                if !spread_degrees.is_finite() {
                    return Err(ConfigError::NonFinite(*spread_degrees));
                }
                finite_vec(*direction)
            }
            Self::Spiral { bullet_count, angular_velocity, .. } => {
                if *bullet_count == 0 {
                    return Err(ConfigError::ZeroBulletCount);
                }
                if !angular_velocity.is_finite() {
                    return Err(ConfigError::NonFinite(*angular_velocity));
                }
                Ok(())
            }
        }
    }
}

fn unit_or_down(direction: Vec2) -> Vec2 {
    direction.try_normalize().unwrap_or(Vec2::NEG_Y)
}

fn finite_vec(v: Vec2) -> Result<(), ConfigError> {
    match [v.x, v.y].into_iter().find(|c| !c.is_finite()) {
        Some(bad) => Err(ConfigError::NonFinite(bad)),
        None => Ok(()),
    }
}

/// Authored attack: pattern plus firing parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttackSpec {
    pub pattern: Pattern,
    /// Seconds between volleys.
    pub fire_interval: f32,
    pub bullet_speed: f32,
    #[serde(default = "default_bullet_damage")]
    pub bullet_damage: u32,
}

fn default_bullet_damage() -> u32 {
    1
}

impl AttackSpec {
    pub fn new(pattern: Pattern, fire_interval: f32, bullet_speed: f32) -> Self {
        Self { pattern, fire_interval, bullet_speed, bullet_damage: default_bullet_damage() }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.pattern.validate()?;
        if !(self.fire_interval.is_finite() && self.fire_interval > 0.0) {
            return Err(ConfigError::NonPositiveFireInterval(self.fire_interval));
        }
        if !(self.bullet_speed.is_finite() && self.bullet_speed >= 0.0) {
            return Err(ConfigError::InvalidSpeed(self.bullet_speed));
        }
        Ok(())
    }
}

/// Counts completed fire windows.
///
/// Every full interval that elapses banks one shot; `try_consume` spends one.
/// Over a run of `T` seconds this yields exactly `floor(T / interval)` shots.
#[derive(Debug, Clone)]
pub struct FireTimer {
    timer: Timer,
    ready: u32,
}

impl FireTimer {
    pub fn new(interval_secs: f32) -> Self {
        let interval = if interval_secs.is_finite() {
            interval_secs.max(MIN_FIRE_INTERVAL_SECS)
        } else {
            MIN_FIRE_INTERVAL_SECS
        };
        Self { timer: Timer::from_seconds(interval, TimerMode::Repeating), ready: 0 }
    }

    pub fn tick(&mut self, delta: Duration) {
        self.timer.tick(delta);
        self.ready = self.ready.saturating_add(self.timer.times_finished_this_tick());
    }

    pub fn try_consume(&mut self) -> bool {
        if self.ready == 0 {
            return false;
        }
        self.ready -= 1;
        true
    }

    /// Bank a shot right away (trigger just pulled).
    pub fn prime(&mut self) {
        self.ready = self.ready.max(1);
    }

    pub fn reset(&mut self) {
        self.timer.reset();
        self.ready = 0;
    }

    pub fn interval_secs(&self) -> f32 {
        self.timer.duration().as_secs_f32()
    }
}

/// Live attack state owned by one entity.
#[derive(Debug, Clone)]
pub struct Attack {
    pub pattern: Pattern,
    pub fire: FireTimer,
    pub bullet_speed: f32,
    pub bullet_damage: u32,
}

impl Attack {
    pub fn from_spec(spec: &AttackSpec) -> Self {
        Self::scaled(spec, 1.0, 1.0)
    }

    /// `fire_rate_multiplier` > 1 fires faster; `bullet_speed_multiplier` scales speed.
    pub fn scaled(spec: &AttackSpec, fire_rate_multiplier: f32, bullet_speed_multiplier: f32) -> Self {
        let rate = if fire_rate_multiplier > 0.0 { fire_rate_multiplier } else { 1.0 };
        Self {
            pattern: spec.pattern.clone(),
            fire: FireTimer::new(spec.fire_interval / rate),
            bullet_speed: spec.bullet_speed * bullet_speed_multiplier.max(0.0),
            bullet_damage: spec.bullet_damage,
        }
    }

    pub fn update(&mut self, delta: Duration) {
        self.fire.tick(delta);
        self.pattern.advance(delta.as_secs_f32());
    }

    pub fn try_consume_fire_ready(&mut self) -> bool {
        self.fire.try_consume()
    }

    pub fn compute_bullet_directions(&self, position: Vec2) -> Vec<Vec2> {
        self.pattern.compute_bullet_directions(position)
    }
}

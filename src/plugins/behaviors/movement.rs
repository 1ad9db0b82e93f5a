//! Movement patterns.
//!
//! One closed enum; the stateful variants carry their accumulators inline and
//! only reset when a fresh copy is attached.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::common::error::ConfigError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Movement {
    Stationary,
    /// Constant velocity along a fixed unit direction.
    Straight { direction: Vec2, speed: f32 },
    /// Horizontal oscillation on top of a constant vertical advance.
    /// `speed` is signed along +Y; enemies use negative values to descend.
    SineWave {
        speed: f32,
        amplitude: f32,
        frequency: f32,
        #[serde(skip)]
        elapsed: f32,
    },
    /// Glide to `target` and stop there.
    MoveTo { target: Vec2, speed: f32 },
    /// Horizontal ping-pong of `half_width` around the x where it was attached.
    Strafe {
        speed: f32,
        half_width: f32,
        #[serde(skip)]
        anchor_x: Option<f32>,
        #[serde(skip)]
        moving_left: bool,
    },
    /// Circle `center`; `angular_velocity` in degrees per second.
    /// The entity chases the orbit point at no more than `speed`.
    Orbit {
        center: Vec2,
        radius: f32,
        angular_velocity: f32,
        speed: f32,
        #[serde(skip)]
        angle: f32,
    },
}

impl Movement {
    /// A zero direction falls back to `-Y`, toward the bottom exit.
    pub fn straight(direction: Vec2, speed: f32) -> Self {
        Self::Straight { direction: direction.try_normalize().unwrap_or(Vec2::NEG_Y), speed }
    }

    pub fn sine_wave(speed: f32, amplitude: f32, frequency: f32) -> Self {
        Self::SineWave { speed, amplitude, frequency, elapsed: 0.0 }
    }

    pub fn move_to(target: Vec2, speed: f32) -> Self {
        Self::MoveTo { target, speed }
    }

    pub fn strafe(speed: f32, half_width: f32) -> Self {
        Self::Strafe { speed, half_width, anchor_x: None, moving_left: false }
    }

    pub fn orbit(center: Vec2, radius: f32, angular_velocity: f32, speed: f32) -> Self {
        Self::Orbit { center, radius, angular_velocity, speed, angle: 0.0 }
    }

    /// Displacement for this tick.
    pub fn compute_delta(&mut self, dt: f32, position: Vec2) -> Vec2 {
        match self {
            Self::Stationary => Vec2::ZERO,
            Self::Straight { direction, speed } => *direction * *speed * dt,
            Self::SineWave { speed, amplitude, frequency, elapsed } => {
                *elapsed += dt;
                Vec2::new((*elapsed * *frequency).sin() * *amplitude * dt, *speed * dt)
            }
            Self::MoveTo { target, speed } => step_toward(position, *target, *speed * dt),
            Self::Strafe { speed, half_width, anchor_x, moving_left } => {
                let anchor = *anchor_x.get_or_insert(position.x);
                if *moving_left && position.x <= anchor - *half_width {
                    *moving_left = false;
                } else if !*moving_left && position.x >= anchor + *half_width {
                    *moving_left = true;
                }
                let sign = if *moving_left { -1.0 } else { 1.0 };
                Vec2::new(sign * *speed * dt, 0.0)
            }
            Self::Orbit { center, radius, angular_velocity, speed, angle } => {
                *angle += *angular_velocity * dt;
                let target = *center + Vec2::from_angle(angle.to_radians()) * *radius;
                step_toward(position, target, *speed * dt)
            }
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        match self {
            Self::Stationary => Ok(()),
            Self::Straight { direction, speed } => {
                finite(direction.x)?;
                finite(direction.y)?;
                non_negative_speed(*speed)
            }
            Self::SineWave { speed, amplitude, frequency, .. } => {
                finite(*speed)?;
                finite(*amplitude)?;
                finite(*frequency)
            }
            Self::MoveTo { target, speed } => {
                finite(target.x)?;
                finite(target.y)?;
                non_negative_speed(*speed)
            }
            Self::Strafe { speed, half_width, .. } => {
                finite(*half_width)?;
                non_negative_speed(*speed)
            }
            Self::Orbit { center, radius, angular_velocity, speed, .. } => {
                finite(center.x)?;
                finite(center.y)?;
                finite(*radius)?;
                finite(*angular_velocity)?;
                non_negative_speed(*speed)
            }
        }
    }
}

/// Move up to `max_step` toward `target`, landing on it exactly when close enough.
fn step_toward(from: Vec2, target: Vec2, max_step: f32) -> Vec2 {
    let to = target - from;
    let distance = to.length();
    if distance <= max_step || distance <= f32::EPSILON {
        to
    } else {
        to / distance * max_step
    }
}

fn finite(v: f32) -> Result<(), ConfigError> {
    if v.is_finite() { Ok(()) } else { Err(ConfigError::NonFinite(v)) }
}

fn non_negative_speed(speed: f32) -> Result<(), ConfigError> {
    if speed.is_finite() && speed >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidSpeed(speed))
    }
}

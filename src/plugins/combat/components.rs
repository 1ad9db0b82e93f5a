use bevy::prelude::*;

use crate::common::layers::CollisionClass;
use crate::plugins::core::SpawnOrder;

#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Player;

#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Enemy;

#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Boss;

/// Entity lifecycle. No resurrection: `Destroyed` is terminal.
///
/// `Spawned` entities have not entered the playfield yet and are only culled
/// once they stray far away; `Active` ones are culled past the normal margin.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LifeState {
    #[default]
    Spawned,
    Active,
    Destroyed,
}

impl LifeState {
    #[inline]
    pub fn is_live(self) -> bool {
        !matches!(self, Self::Destroyed)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageOutcome {
    Ignored,
    Damaged,
    /// This hit took health to zero. Reported once per entity.
    Killed,
}

/// Capability: can be damaged. Stored health never goes below zero.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Health {
    pub current: u32,
    pub max: u32,
    /// Damage is ignored while set (boss entrance).
    pub invulnerable: bool,
}

impl Health {
    pub fn new(max: u32) -> Self {
        let max = max.max(1);
        Self { current: max, max, invulnerable: false }
    }

    #[inline]
    pub fn is_depleted(&self) -> bool {
        self.current == 0
    }

    #[inline]
    pub fn fraction(&self) -> f32 {
        self.current as f32 / self.max.max(1) as f32
    }

    pub fn apply_damage(&mut self, amount: u32) -> DamageOutcome {
        if self.current == 0 || self.invulnerable {
            return DamageOutcome::Ignored;
        }
        self.current = self.current.saturating_sub(amount);
        if self.current == 0 { DamageOutcome::Killed } else { DamageOutcome::Damaged }
    }
}

/// Score awarded when the entity is destroyed.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointValue(pub u64);

/// Circular overlap area.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Hitbox {
    pub radius: f32,
}

/// Visual-only "just damaged" countdown.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq)]
pub struct HitFlash {
    remaining: f32,
}

impl HitFlash {
    pub fn trigger(&mut self, secs: f32) {
        self.remaining = self.remaining.max(secs);
    }

    pub fn tick(&mut self, dt: f32) {
        self.remaining = (self.remaining - dt).max(0.0);
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.remaining > 0.0
    }
}

/// While active the holder collides with nothing.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq)]
pub struct Invulnerability {
    remaining: f32,
}

impl Invulnerability {
    /// Extends, never shortens, the current window.
    pub fn grant(&mut self, secs: f32) {
        self.remaining = self.remaining.max(secs);
    }

    pub fn tick(&mut self, dt: f32) {
        self.remaining = (self.remaining - dt).max(0.0);
    }

    pub fn clear(&mut self) {
        self.remaining = 0.0;
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.remaining > 0.0
    }

    #[inline]
    pub fn remaining(&self) -> f32 {
        self.remaining
    }
}

/// Components every collidable entity carries.
pub fn combatant(class: CollisionClass, position: Vec2, radius: f32, order: SpawnOrder) -> impl Bundle {
    (
        class,
        class.active_layers(),
        Hitbox { radius },
        Transform::from_translation(position.extend(0.0)),
        LifeState::Spawned,
        order,
    )
}

//! Playfield bounds.
//!
//! World space is y-up with the origin at the playfield centre, so "forward"
//! for enemies is `-Y` and waves enter from above the top edge.

use bevy::prelude::*;

#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct Playfield {
    pub half_extents: Vec2,
    /// How far past the edge an entity may travel before it is culled.
    pub cull_margin: f32,
}

impl Default for Playfield {
    fn default() -> Self {
        Self::from_viewport(480.0, 640.0)
    }
}

impl Playfield {
    pub fn from_viewport(width: f32, height: f32) -> Self {
        Self {
            half_extents: Vec2::new(width * 0.5, height * 0.5),
            cull_margin: 96.0,
        }
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.half_extents.x * 2.0
    }

    #[inline]
    pub fn contains(&self, p: Vec2) -> bool {
        p.x.abs() <= self.half_extents.x && p.y.abs() <= self.half_extents.y
    }

    /// Past the edge by more than the cull margin.
    #[inline]
    pub fn is_outside_margin(&self, p: Vec2) -> bool {
        self.is_outside_by(p, self.cull_margin)
    }

    #[inline]
    pub fn is_outside_by(&self, p: Vec2, margin: f32) -> bool {
        p.x.abs() > self.half_extents.x + margin || p.y.abs() > self.half_extents.y + margin
    }

    /// Clamp to the playfield, shrunk by `inset` on every side.
    pub fn clamp(&self, p: Vec2, inset: f32) -> Vec2 {
        let limit = (self.half_extents - Vec2::splat(inset)).max(Vec2::ZERO);
        p.clamp(-limit, limit)
    }

    /// Height at which waves appear, just above the visible top edge.
    #[inline]
    pub fn spawn_line(&self) -> f32 {
        self.half_extents.y + self.cull_margin * 0.25
    }

    #[inline]
    pub fn player_spawn(&self) -> Vec2 {
        Vec2::new(0.0, -self.half_extents.y * 0.75)
    }
}

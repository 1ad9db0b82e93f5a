//! Wave formations: tag + count + width -> spawn positions. No side effects.

use bevy::prelude::*;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::common::playfield::Playfield;

/// Vertical spacing between ranks in V and Sides formations.
const RANK_SPACING: f32 = 28.0;
/// How far behind the centre the arc's ends trail.
const ARC_DEPTH: f32 = 60.0;
/// Depth band that scattered enemies are spread over.
const SCATTER_DEPTH: f32 = 80.0;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Formation {
    #[default]
    Line,
    V,
    Arc,
    Scattered,
    Sides,
}

impl Formation {
    /// `spawn_width` is the fraction of the playfield width the wave spans.
    /// Positions sit on or above the spawn line so enemies enter from the top.
    /// `Scattered` draws from `seed`, so a given wave always lands the same way.
    pub fn positions(self, count: u32, spawn_width: f32, playfield: &Playfield, seed: u64) -> Vec<Vec2> {
        let count = count as usize;
        let half_span = playfield.half_extents.x * spawn_width.clamp(0.0, 1.0);
        let top = playfield.spawn_line();

        // -1..=1 across the wave; a lone enemy sits in the middle.
        let lane = |i: usize| -> f32 {
            if count <= 1 { 0.0 } else { -1.0 + 2.0 * i as f32 / (count - 1) as f32 }
        };

        match self {
            Self::Line => (0..count).map(|i| Vec2::new(lane(i) * half_span, top)).collect(),
            Self::V => {
                let centre = (count as f32 - 1.0) * 0.5;
                (0..count)
                    .map(|i| Vec2::new(lane(i) * half_span, top + (i as f32 - centre).abs() * RANK_SPACING))
                    .collect()
            }
            Self::Arc => (0..count)
                .map(|i| {
                    let t = lane(i);
                    Vec2::new(t * half_span, top + t * t * ARC_DEPTH)
                })
                .collect(),
            Self::Scattered => {
                let mut rng = ChaCha8Rng::seed_from_u64(seed);
                (0..count)
                    .map(|_| {
                        let x = if half_span > 0.0 { rng.random_range(-half_span..=half_span) } else { 0.0 };
                        Vec2::new(x, top + rng.random_range(0.0..=SCATTER_DEPTH))
                    })
                    .collect()
            }
            Self::Sides => (0..count)
                .map(|i| {
                    let side = if i % 2 == 0 { -1.0 } else { 1.0 };
                    Vec2::new(side * half_span, top + (i / 2) as f32 * RANK_SPACING)
                })
                .collect(),
        }
    }
}

//! Tunable gameplay constants.

use bevy::prelude::*;

#[derive(Resource, Debug, Clone)]
pub struct Tunables {
    pub player_speed: f32,
    pub player_hitbox_radius: f32,
    pub player_fire_interval: f32,
    pub player_bullet_speed: f32,
    pub player_bullet_damage: u32,
    pub player_bullet_radius: f32,
    pub enemy_bullet_radius: f32,
    /// Seconds a bullet may live before it is removed.
    pub bullet_lifetime: f32,
    /// Post-hit window during which the player collides with nothing.
    pub invulnerability_secs: f32,
    pub bomb_invulnerability_secs: f32,
    pub hit_flash_secs: f32,
    pub boss_warning_secs: f32,
    /// Pause between a stage clear and the next stage start.
    pub stage_transition_secs: f32,
    pub score: ScoreTuning,
}

impl Default for Tunables {
    fn default() -> Self {
        Self {
            player_speed: 260.0,
            player_hitbox_radius: 6.0,
            player_fire_interval: 0.1,
            player_bullet_speed: 720.0,
            player_bullet_damage: 1,
            player_bullet_radius: 4.0,
            enemy_bullet_radius: 5.0,
            bullet_lifetime: 6.0,
            invulnerability_secs: 1.0,
            bomb_invulnerability_secs: 2.0,
            hit_flash_secs: 0.1,
            boss_warning_secs: 3.0,
            stage_transition_secs: 4.0,
            score: ScoreTuning::default(),
        }
    }
}

/// Stage-clear scoring knobs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreTuning {
    pub stage_clear_bonus: u64,
    pub time_bonus_cap: u64,
    /// Points shaved off the time bonus per second of stage time.
    pub time_bonus_decay_per_sec: f32,
}

impl Default for ScoreTuning {
    fn default() -> Self {
        Self {
            stage_clear_bonus: 10_000,
            time_bonus_cap: 50_000,
            time_bonus_decay_per_sec: 250.0,
        }
    }
}

impl ScoreTuning {
    /// `max(0, cap - stage_time * decay)`, floored to whole points.
    pub fn time_bonus(&self, stage_time: f32) -> u64 {
        let decayed = self.time_bonus_cap as f64 - f64::from(stage_time.max(0.0)) * f64::from(self.time_bonus_decay_per_sec);
        decayed.max(0.0).floor() as u64
    }

    pub fn stage_bonus(&self, stage_time: f32) -> u64 {
        self.stage_clear_bonus.saturating_add(self.time_bonus(stage_time))
    }
}

//! Game session: score, lives, bombs and game over, plus the outbound event queue.
//!
//! The simulation owns exactly one `GameSession`. Collision resolution and the
//! stage controller mutate it through the helpers below, which also write the
//! matching `GameEvent`s. The embedding layer drains `Messages<GameEvent>` once
//! per frame.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// One-way notifications for HUD, audio and VFX.
#[derive(Message, Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    ScoreChanged(u64),
    LivesChanged(u8),
    BombsChanged(u8),
    GameOver,
    StageStarted(String),
    WaveSpawned(usize),
    BossWarning,
    BossPhaseChanged(String),
    BossDefeated(u64),
    StageCleared(u64),
    CampaignComplete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    pub starting_lives: u8,
    pub starting_bombs: u8,
    /// Upper bound for both lives and bombs.
    pub cap: u8,
    /// Grant one life every this many points; `None` disables extends.
    pub extra_life_step: Option<u64>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            starting_lives: 3,
            starting_bombs: 3,
            cap: 9,
            extra_life_step: Some(100_000),
        }
    }
}

#[derive(Resource, Debug, Clone, PartialEq, Eq)]
pub struct GameSession {
    score: u64,
    lives: u8,
    bombs: u8,
    game_over: bool,
    next_extra_life: Option<u64>,
    config: SessionConfig,
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new(SessionConfig::default())
    }
}

impl GameSession {
    pub fn new(config: SessionConfig) -> Self {
        Self {
            score: 0,
            lives: config.starting_lives.min(config.cap),
            bombs: config.starting_bombs.min(config.cap),
            game_over: config.starting_lives == 0,
            next_extra_life: config.extra_life_step.filter(|step| *step > 0),
            config,
        }
    }

    #[inline]
    pub fn score(&self) -> u64 {
        self.score
    }

    #[inline]
    pub fn lives(&self) -> u8 {
        self.lives
    }

    #[inline]
    pub fn bombs(&self) -> u8 {
        self.bombs
    }

    #[inline]
    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    #[inline]
    pub fn config(&self) -> SessionConfig {
        self.config
    }

    /// Adds points and returns how many extra lives the new total earned.
    pub fn add_score(&mut self, points: u64) -> u8 {
        self.score = self.score.saturating_add(points);

        let Some(step) = self.config.extra_life_step.filter(|step| *step > 0) else {
            return 0;
        };
        let mut granted = 0;
        while let Some(threshold) = self.next_extra_life {
            if self.score < threshold {
                break;
            }
            if self.lives < self.config.cap {
                self.lives += 1;
                granted += 1;
            }
            self.next_extra_life = threshold.checked_add(step);
        }
        granted
    }

    /// Returns `true` when this hit ended the game. Irreversible until `reset`.
    pub fn lose_life(&mut self) -> bool {
        if self.game_over {
            return false;
        }
        self.lives = self.lives.saturating_sub(1);
        if self.lives == 0 {
            self.game_over = true;
        }
        self.game_over
    }

    pub fn use_bomb(&mut self) -> bool {
        if self.game_over || self.bombs == 0 {
            return false;
        }
        self.bombs -= 1;
        true
    }

    pub fn reset(&mut self) {
        *self = Self::new(self.config);
    }
}

/// Run condition: gameplay sets stop once the game is over.
pub fn game_in_progress(session: Option<Res<GameSession>>) -> bool {
    session.is_some_and(|s| !s.is_game_over())
}

pub fn award_points(session: &mut GameSession, events: &mut MessageWriter<GameEvent>, points: u64) {
    if points == 0 {
        return;
    }
    let extends = session.add_score(points);
    events.write(GameEvent::ScoreChanged(session.score()));
    if extends > 0 {
        info!("extra life at {} points", session.score());
        events.write(GameEvent::LivesChanged(session.lives()));
    }
}

/// Take one hit. Returns `true` if that was the last life.
pub fn lose_life(session: &mut GameSession, events: &mut MessageWriter<GameEvent>) -> bool {
    let ended = session.lose_life();
    events.write(GameEvent::LivesChanged(session.lives()));
    if ended {
        info!("game over at {} points", session.score());
        events.write(GameEvent::GameOver);
    }
    ended
}

pub fn plugin(app: &mut App) {
    app.init_resource::<GameSession>().add_message::<GameEvent>();
}

#[cfg(test)]
mod tests;

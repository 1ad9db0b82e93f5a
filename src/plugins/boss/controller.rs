use std::time::Duration;

use bevy::prelude::*;

use super::encounter::{BossEncounter, BossPhase};

/// Entrance timer plus the health-threshold phase machine.
#[derive(Component, Debug, Clone)]
pub struct BossPhaseController {
    phases: Vec<BossPhase>,
    current: usize,
    entrance: Timer,
    entering: bool,
}

impl BossPhaseController {
    pub fn new(encounter: &BossEncounter) -> Self {
        Self {
            phases: encounter.phases.clone(),
            current: 0,
            entrance: Timer::from_seconds(encounter.entrance_duration.max(0.0), TimerMode::Once),
            entering: true,
        }
    }

    #[inline]
    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn phase(&self, index: usize) -> Option<&BossPhase> {
        self.phases.get(index)
    }

    pub fn current_phase(&self) -> Option<&BossPhase> {
        self.phase(self.current)
    }

    #[inline]
    pub fn is_entering(&self) -> bool {
        self.entering
    }

    /// Returns `true` on the tick the entrance ends. Purely time driven.
    pub fn tick_entrance(&mut self, delta: Duration) -> bool {
        if !self.entering {
            return false;
        }
        self.entrance.tick(delta);
        if self.entrance.is_finished() {
            self.entering = false;
            return true;
        }
        false
    }

    /// Move past every threshold `health_fraction` has reached and return the
    /// indices of the phases entered, in order. Several may be crossed at once.
    pub fn advance(&mut self, health_fraction: f32) -> Vec<usize> {
        let mut entered = Vec::new();
        if self.entering {
            return entered;
        }
        while let Some(next) = self.phases.get(self.current + 1) {
            if health_fraction > next.health_threshold {
                break;
            }
            self.current += 1;
            entered.push(self.current);
        }
        entered
    }
}

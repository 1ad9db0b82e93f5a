use std::time::Duration;

use bevy::prelude::*;

use crate::common::error::ConfigError;
use crate::plugins::behaviors::BehaviorLibrary;
use crate::plugins::enemies::Bestiary;

use super::definition::StageDefinition;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CampaignStep {
    Waiting,
    NextStage(usize),
    Complete,
}

/// Ordered stages, played back to back with a pause after each clear.
#[derive(Resource, Debug, Clone, Default)]
pub struct Campaign {
    stages: Vec<StageDefinition>,
    current: usize,
    transition: Option<Timer>,
    complete: bool,
}

impl Campaign {
    /// Every stage is validated up front.
    pub fn new(
        stages: Vec<StageDefinition>,
        bestiary: &Bestiary,
        library: &BehaviorLibrary,
    ) -> Result<Self, ConfigError> {
        if stages.is_empty() {
            return Err(ConfigError::EmptyCampaign);
        }
        for stage in &stages {
            stage.validate(bestiary, library)?;
        }
        Ok(Self { stages, ..default() })
    }

    pub fn stages(&self) -> &[StageDefinition] {
        &self.stages
    }

    #[inline]
    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_stage(&self) -> Option<&StageDefinition> {
        self.stages.get(self.current)
    }

    #[inline]
    pub fn is_complete(&self) -> bool {
        self.complete
    }

    pub fn restart(&mut self) {
        self.current = 0;
        self.transition = None;
        self.complete = false;
    }

    pub fn begin_transition(&mut self, secs: f32) {
        if !self.complete {
            self.transition = Some(Timer::from_seconds(secs.max(0.0), TimerMode::Once));
        }
    }

    pub fn tick_transition(&mut self, delta: Duration) -> CampaignStep {
        let Some(timer) = self.transition.as_mut() else {
            return CampaignStep::Waiting;
        };
        if !timer.tick(delta).is_finished() {
            return CampaignStep::Waiting;
        }
        self.transition = None;

        if self.current + 1 < self.stages.len() {
            self.current += 1;
            CampaignStep::NextStage(self.current)
        } else {
            self.complete = true;
            CampaignStep::Complete
        }
    }
}

//! Stage plugin: wave scheduling, boss triggering and the campaign around it.
//!
//! ```text
//!   OnEnter(InGame)  begin_campaign -> stage 0 started
//!   Stage set        handle_boss_defeat  BossDefeated -> bonus, StageCleared
//!                    advance_stage       StageController::advance -> spawn requests + events
//!                    advance_campaign    transition delay -> next stage / CampaignComplete
//! ```

pub mod campaign;
pub mod controller;
pub mod definition;
pub mod formation;

use bevy::prelude::*;

use crate::common::playfield::Playfield;
use crate::common::state::GameState;
use crate::common::tunables::Tunables;
use crate::plugins::behaviors::BehaviorLibrary;
use crate::plugins::boss::SpawnBossRequest;
use crate::plugins::combat::BossDefeated;
use crate::plugins::core::{FrameDelta, SimSet, SimulationTick};
use crate::plugins::enemies::{Bestiary, SpawnEnemyRequest};
use crate::plugins::session::{self, GameEvent, GameSession};

pub use campaign::{Campaign, CampaignStep};
pub use controller::{StageAction, StageController, StagePhase};
pub use definition::{EnemyWave, StageDefinition};
pub use formation::Formation;

pub fn plugin(app: &mut App) {
    app.init_resource::<StageController>().init_resource::<Campaign>();

    app.add_systems(OnEnter(GameState::InGame), begin_campaign);
    app.add_systems(
        SimulationTick,
        (handle_boss_defeat, advance_stage, advance_campaign)
            .chain()
            .in_set(SimSet::Stage),
    );
}

/// Start (or restart) the campaign from its first stage.
pub fn begin_campaign(
    mut campaign: ResMut<Campaign>,
    mut controller: ResMut<StageController>,
    bestiary: Res<Bestiary>,
    library: Res<BehaviorLibrary>,
    mut events: MessageWriter<GameEvent>,
) {
    campaign.restart();
    controller.reset();
    start_current_stage(&campaign, &mut controller, &bestiary, &library, &mut events);
}

fn start_current_stage(
    campaign: &Campaign,
    controller: &mut StageController,
    bestiary: &Bestiary,
    library: &BehaviorLibrary,
    events: &mut MessageWriter<GameEvent>,
) {
    let Some(definition) = campaign.current_stage() else {
        debug!("no stage to start");
        return;
    };
    match controller.start_stage(definition, bestiary, library) {
        Ok(()) => {
            info!("stage '{}' started", definition.name);
            events.write(GameEvent::StageStarted(definition.name.clone()));
        }
        Err(err) => error!("stage rejected: {err}"),
    }
}

pub fn handle_boss_defeat(
    mut defeats: MessageReader<BossDefeated>,
    tunables: Res<Tunables>,
    mut controller: ResMut<StageController>,
    mut campaign: ResMut<Campaign>,
    mut session: ResMut<GameSession>,
    mut events: MessageWriter<GameEvent>,
) {
    for _ in defeats.read() {
        let Some(bonus) = controller.boss_defeated(&tunables.score) else {
            continue;
        };
        info!("stage cleared at {:.1}s, bonus {bonus}", controller.stage_time());
        session::award_points(&mut session, &mut events, bonus);
        events.write(GameEvent::StageCleared(bonus));
        campaign.begin_transition(tunables.stage_transition_secs);
    }
}

pub fn advance_stage(
    delta: Res<FrameDelta>,
    tunables: Res<Tunables>,
    playfield: Res<Playfield>,
    mut controller: ResMut<StageController>,
    mut enemies: MessageWriter<SpawnEnemyRequest>,
    mut bosses: MessageWriter<SpawnBossRequest>,
    mut events: MessageWriter<GameEvent>,
) {
    for action in controller.advance(delta.secs(), tunables.boss_warning_secs, &playfield) {
        match action {
            StageAction::WaveSpawned(index) => {
                debug!("wave {index} spawned");
                events.write(GameEvent::WaveSpawned(index));
            }
            StageAction::SpawnEnemy { template, position } => {
                enemies.write(SpawnEnemyRequest { template, position });
            }
            StageAction::BossWarning => {
                info!("boss approaching");
                events.write(GameEvent::BossWarning);
            }
            StageAction::SpawnBoss(encounter) => {
                bosses.write(SpawnBossRequest { encounter });
            }
        }
    }
}

pub fn advance_campaign(
    delta: Res<FrameDelta>,
    mut campaign: ResMut<Campaign>,
    mut controller: ResMut<StageController>,
    bestiary: Res<Bestiary>,
    library: Res<BehaviorLibrary>,
    mut events: MessageWriter<GameEvent>,
) {
    if controller.phase() != StagePhase::Cleared {
        return;
    }
    match campaign.tick_transition(delta.duration()) {
        CampaignStep::Waiting => {}
        CampaignStep::NextStage(_) => {
            start_current_stage(&campaign, &mut controller, &bestiary, &library, &mut events);
        }
        CampaignStep::Complete => {
            info!("campaign complete");
            events.write(GameEvent::CampaignComplete);
        }
    }
}

use bevy::ecs::message::Messages;
use bevy::prelude::*;
use pretty_assertions::assert_eq;

use super::*;
use crate::common::test_utils::run_system_once;

fn drain(world: &mut World) -> Vec<GameEvent> {
    world.resource_mut::<Messages<GameEvent>>().drain().collect()
}

#[test]
fn new_session_uses_config() {
    let session = GameSession::default();
    assert_eq!(session.score(), 0);
    assert_eq!(session.lives(), 3);
    assert_eq!(session.bombs(), 3);
    assert!(!session.is_game_over());
}

#[test]
fn starting_values_are_capped() {
    let session = GameSession::new(SessionConfig {
        starting_lives: 20,
        starting_bombs: 12,
        cap: 9,
        extra_life_step: None,
    });
    assert_eq!(session.lives(), 9);
    assert_eq!(session.bombs(), 9);
}

#[test]
fn losing_last_life_sets_game_over_once() {
    let mut session = GameSession::new(SessionConfig { starting_lives: 2, ..default() });
    assert!(!session.lose_life());
    assert!(session.lose_life());
    assert!(session.is_game_over());
    assert_eq!(session.lives(), 0);

    // Lives never underflow; the game stays over.
    assert!(!session.lose_life());
    assert_eq!(session.lives(), 0);
    assert!(session.is_game_over());
}

#[test]
fn extra_life_granted_per_step_crossed() {
    let mut session = GameSession::new(SessionConfig {
        starting_lives: 3,
        extra_life_step: Some(1_000),
        ..default()
    });

    assert_eq!(session.add_score(999), 0);
    assert_eq!(session.lives(), 3);

    assert_eq!(session.add_score(1), 1);
    assert_eq!(session.lives(), 4);

    // One award can cross several steps.
    assert_eq!(session.add_score(2_500), 2);
    assert_eq!(session.lives(), 6);
    assert_eq!(session.score(), 3_500);
}

#[test]
fn extra_lives_respect_cap() {
    let mut session = GameSession::new(SessionConfig {
        starting_lives: 9,
        extra_life_step: Some(10),
        ..default()
    });
    assert_eq!(session.add_score(100), 0);
    assert_eq!(session.lives(), 9);
}

#[test]
fn bombs_run_out() {
    let mut session = GameSession::new(SessionConfig { starting_bombs: 1, ..default() });
    assert!(session.use_bomb());
    assert!(!session.use_bomb());
    assert_eq!(session.bombs(), 0);
}

#[test]
fn reset_restores_starting_state() {
    let mut session = GameSession::new(SessionConfig { starting_lives: 1, ..default() });
    session.add_score(500);
    session.use_bomb();
    session.lose_life();
    assert!(session.is_game_over());

    session.reset();
    assert_eq!(session, GameSession::new(SessionConfig { starting_lives: 1, ..default() }));
}

#[test]
fn award_points_writes_score_event() {
    let mut world = World::new();
    world.init_resource::<GameSession>();
    world.init_resource::<Messages<GameEvent>>();

    run_system_once(&mut world, |mut session: ResMut<GameSession>, mut events: MessageWriter<GameEvent>| {
        award_points(&mut session, &mut events, 100);
        award_points(&mut session, &mut events, 0);
    });

    assert_eq!(drain(&mut world), vec![GameEvent::ScoreChanged(100)]);
}

#[test]
fn final_hit_writes_lives_then_game_over() {
    let mut world = World::new();
    world.insert_resource(GameSession::new(SessionConfig { starting_lives: 1, ..default() }));
    world.init_resource::<Messages<GameEvent>>();

    let ended = run_system_once(&mut world, |mut session: ResMut<GameSession>, mut events: MessageWriter<GameEvent>| {
        lose_life(&mut session, &mut events)
    });

    assert!(ended);
    assert_eq!(drain(&mut world), vec![GameEvent::LivesChanged(0), GameEvent::GameOver]);
}

#[test]
fn game_in_progress_tracks_session() {
    let mut world = World::new();
    assert!(!run_system_once(&mut world, game_in_progress));

    world.init_resource::<GameSession>();
    assert!(run_system_once(&mut world, game_in_progress));

    world.resource_mut::<GameSession>().lose_life();
    world.resource_mut::<GameSession>().lose_life();
    world.resource_mut::<GameSession>().lose_life();
    assert!(!run_system_once(&mut world, game_in_progress));
}

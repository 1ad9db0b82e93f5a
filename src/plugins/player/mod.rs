//! Player plugin.
//!
//! Pipeline:
//! - embedding layer: fills the `PlayerInput` resource (keyboard, replay, test)
//! - SimulationTick / Behaviors, before anything else moves:
//!   invulnerability countdown -> bomb -> movement (clamped) -> gun
//! - SimulationTick / Cleanup: edge-triggered inputs are consumed
//!
//! Invulnerability is modelled as empty collision filters, so an invulnerable
//! player is not even reported as overlapping.

use avian2d::prelude::*;
use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;

use crate::common::layers::CollisionClass;
use crate::common::{playfield::Playfield, state::GameState, tunables::Tunables};
use crate::plugins::behaviors::{FireTimer, apply_movement};
use crate::plugins::combat::{Invulnerability, LifeState, Player, combatant};
use crate::plugins::core::{FrameDelta, SimSet, SimulationTick, SpawnCounter};
use crate::plugins::projectiles::{BulletKind, SpawnBulletRequest};
use crate::plugins::session::{GameEvent, GameSession};

/// Abstract input feed. `move_axis` is an intent; lengths above 1 are clamped.
#[derive(Resource, Default, Debug, Clone, PartialEq)]
pub struct PlayerInput {
    pub move_axis: Vec2,
    pub fire_held: bool,
    pub fire_just_pressed: bool,
    pub bomb_just_pressed: bool,
}

#[derive(Component, Debug, Clone)]
pub struct PlayerGun(pub FireTimer);

pub fn plugin(app: &mut App) {
    app.init_resource::<PlayerInput>()
        .add_systems(OnEnter(GameState::InGame), spawn)
        .add_systems(
            SimulationTick,
            (tick_invulnerability, trigger_bomb, move_player, fire_player_gun)
                .chain()
                .before(apply_movement)
                .in_set(SimSet::Behaviors),
        )
        .add_systems(SimulationTick, consume_edge_inputs.in_set(SimSet::Cleanup));
}

pub fn spawn(
    mut commands: Commands,
    tunables: Res<Tunables>,
    playfield: Res<Playfield>,
    mut counter: ResMut<SpawnCounter>,
) {
    commands
        .spawn((
            Name::new("Player"),
            combatant(
                CollisionClass::Player,
                playfield.player_spawn(),
                tunables.player_hitbox_radius,
                counter.next(),
            ),
            Player,
            Invulnerability::default(),
            PlayerGun(FireTimer::new(tunables.player_fire_interval)),
            DespawnOnExit(GameState::InGame),
        ))
        .insert(LifeState::Active);
}

pub fn tick_invulnerability(
    delta: Res<FrameDelta>,
    mut q: Query<(&CollisionClass, &mut Invulnerability, &mut CollisionLayers, &LifeState)>,
) {
    for (class, mut invulnerability, mut layers, life) in &mut q {
        if !invulnerability.is_active() {
            continue;
        }
        invulnerability.tick(delta.secs());
        if !invulnerability.is_active() && life.is_live() {
            *layers = class.active_layers();
        }
    }
}

/// Spend a bomb: every live enemy bullet is destroyed and the player gets a
/// grace window. Bosses and enemies are untouched.
pub fn trigger_bomb(
    input: Res<PlayerInput>,
    tunables: Res<Tunables>,
    mut session: ResMut<GameSession>,
    mut events: MessageWriter<GameEvent>,
    mut q_player: Query<(&CollisionClass, &mut Invulnerability, &mut CollisionLayers), With<Player>>,
    mut q_others: Query<(&CollisionClass, &mut LifeState, &mut CollisionLayers), Without<Player>>,
) {
    if !input.bomb_just_pressed || !session.use_bomb() {
        return;
    }
    events.write(GameEvent::BombsChanged(session.bombs()));

    let mut cleared = 0usize;
    for (class, mut life, mut layers) in &mut q_others {
        if *class == CollisionClass::EnemyBullet && life.is_live() {
            *life = LifeState::Destroyed;
            *layers = class.inert_layers();
            cleared += 1;
        }
    }

    if let Ok((class, mut invulnerability, mut layers)) = q_player.single_mut() {
        invulnerability.grant(tunables.bomb_invulnerability_secs);
        if invulnerability.is_active() {
            *layers = class.inert_layers();
        }
    }
    info!("bomb cleared {cleared} bullets, {} left", session.bombs());
}

pub fn move_player(
    delta: Res<FrameDelta>,
    tunables: Res<Tunables>,
    playfield: Res<Playfield>,
    input: Res<PlayerInput>,
    mut q_player: Query<&mut Transform, With<Player>>,
) {
    let Ok(mut tf) = q_player.single_mut() else {
        return;
    };
    let axis = if input.move_axis.is_finite() { input.move_axis.clamp_length_max(1.0) } else { Vec2::ZERO };

    let next = tf.translation.truncate() + axis * tunables.player_speed * delta.secs();
    let clamped = playfield.clamp(next, tunables.player_hitbox_radius);
    tf.translation.x = clamped.x;
    tf.translation.y = clamped.y;
}

/// Just pressed fires right away; held keeps firing every interval; released
/// resets the gun so the next press is immediate again.
pub fn fire_player_gun(
    delta: Res<FrameDelta>,
    tunables: Res<Tunables>,
    input: Res<PlayerInput>,
    mut q_player: Query<(&Transform, &mut PlayerGun, &LifeState), With<Player>>,
    mut writer: MessageWriter<SpawnBulletRequest>,
) {
    let Ok((tf, mut gun, life)) = q_player.single_mut() else {
        return;
    };
    if !life.is_live() {
        return;
    }

    let gun = &mut gun.0;
    if !(input.fire_held || input.fire_just_pressed) {
        gun.reset();
        return;
    }
    if input.fire_just_pressed {
        gun.prime();
    }
    gun.tick(delta.duration());

    let muzzle = tf.translation.truncate() + Vec2::Y * tunables.player_hitbox_radius;
    while gun.try_consume() {
        writer.write(SpawnBulletRequest {
            kind: BulletKind::Player,
            pos: muzzle,
            vel: Vec2::Y * tunables.player_bullet_speed,
            damage: tunables.player_bullet_damage,
        });
    }
}

pub fn consume_edge_inputs(mut input: ResMut<PlayerInput>) {
    input.fire_just_pressed = false;
    input.bomb_just_pressed = false;
}

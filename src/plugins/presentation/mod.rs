//! Presentation plugin (full app only).
//!
//! A thin adapter around the simulation: keyboard -> `PlayerInput`, a fixed
//! 2D camera, flat-colour sprites on freshly spawned combat entities, and a
//! log line per outbound `GameEvent`. Nothing here feeds back into gameplay
//! except the input resource and the restart key.
//!
//! ```text
//! OnEnter(InGame): spawn camera
//! PreUpdate:       gather_input (edge flags are OR-ed until a tick consumes them)
//! Update:          restart_on_key, attach_sprites, tint_hit_flash, report_events
//! ```

use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;

use crate::common::layers::CollisionClass;
use crate::common::state::GameState;
use crate::game;
use crate::plugins::combat::{Boss, HitFlash, Hitbox};
use crate::plugins::player::PlayerInput;
use crate::plugins::session::GameEvent;

const BACKGROUND: Color = Color::srgb(0.04, 0.04, 0.09);
const FLASH: Color = Color::WHITE;

pub fn plugin(app: &mut App) {
    app.insert_resource(ClearColor(BACKGROUND))
        .add_systems(OnEnter(GameState::InGame), spawn_camera)
        .add_systems(PreUpdate, gather_input.run_if(in_state(GameState::InGame)))
        .add_systems(
            Update,
            (restart_on_key, attach_sprites, tint_hit_flash, report_events).run_if(in_state(GameState::InGame)),
        );
}

fn spawn_camera(mut commands: Commands) {
    commands.spawn((
        Name::new("MainCamera"),
        Camera2d,
        Transform::from_xyz(0.0, 0.0, 999.0),
        DespawnOnExit(GameState::InGame),
    ));
}

fn gather_input(keys: Res<ButtonInput<KeyCode>>, mut input: ResMut<PlayerInput>) {
    let mut axis = Vec2::ZERO;

    if keys.any_pressed([KeyCode::KeyW, KeyCode::ArrowUp]) {
        axis.y += 1.0;
    }
    if keys.any_pressed([KeyCode::KeyS, KeyCode::ArrowDown]) {
        axis.y -= 1.0;
    }
    if keys.any_pressed([KeyCode::KeyA, KeyCode::ArrowLeft]) {
        axis.x -= 1.0;
    }
    if keys.any_pressed([KeyCode::KeyD, KeyCode::ArrowRight]) {
        axis.x += 1.0;
    }

    input.move_axis = axis.normalize_or_zero();
    input.fire_held = keys.any_pressed([KeyCode::Space, KeyCode::KeyJ]);
    // Frames can outpace fixed ticks; keep the press until a tick sees it.
    input.fire_just_pressed |= keys.any_just_pressed([KeyCode::Space, KeyCode::KeyJ]);
    input.bomb_just_pressed |= keys.any_just_pressed([KeyCode::KeyX, KeyCode::KeyK]);
}

fn restart_on_key(world: &mut World) {
    let pressed = world
        .get_resource::<ButtonInput<KeyCode>>()
        .is_some_and(|keys| keys.just_pressed(KeyCode::KeyR));
    if pressed {
        game::restart(world);
    }
}

fn base_color(class: CollisionClass, is_boss: bool) -> Color {
    match (class, is_boss) {
        (CollisionClass::Enemy, true) => Color::srgb(0.75, 0.3, 0.95),
        (CollisionClass::Enemy, false) => Color::srgb(0.9, 0.25, 0.25),
        (CollisionClass::Player, _) => Color::srgb(0.3, 0.7, 1.0),
        (CollisionClass::PlayerBullet, _) => Color::srgb(0.6, 1.0, 0.9),
        (CollisionClass::EnemyBullet, _) => Color::srgb(1.0, 0.8, 0.3),
    }
}

fn attach_sprites(
    mut commands: Commands,
    q: Query<(Entity, &CollisionClass, &Hitbox, Has<Boss>), Added<CollisionClass>>,
) {
    for (e, class, hitbox, is_boss) in &q {
        let size = if class.is_bullet() { hitbox.radius * 2.0 } else { hitbox.radius * 2.4 };
        commands.entity(e).insert(Sprite {
            color: base_color(*class, is_boss),
            custom_size: Some(Vec2::splat(size)),
            ..default()
        });
    }
}

fn tint_hit_flash(mut q: Query<(&HitFlash, &CollisionClass, Has<Boss>, &mut Sprite)>) {
    for (flash, class, is_boss, mut sprite) in &mut q {
        sprite.color = if flash.is_active() { FLASH } else { base_color(*class, is_boss) };
    }
}

/// The embedding layer's end of the event queue.
fn report_events(mut events: MessageReader<GameEvent>) {
    for event in events.read() {
        match event {
            GameEvent::GameOver => info!("GAME OVER, press R to restart"),
            GameEvent::CampaignComplete => info!("all stages cleared"),
            other => debug!("{other:?}"),
        }
    }
}

//! Overlap detection and the collision rule table.
//!
//! ```text
//! PlayerBullet  x Enemy/Boss   damage target, absorb bullet, award points on the kill edge
//! EnemyBullet   x Player       player loses a life, bullet destroyed
//! Enemy body    x Player       player loses a life, enemy untouched
//! same faction                 filtered out by CollisionLayers
//! ```
//!
//! Pairs are gathered and sorted by `SpawnOrder` first, then resolved one by
//! one against live state, so a pair whose member died earlier in the same
//! tick is skipped.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::common::layers::CollisionClass;
use crate::common::tunables::Tunables;
use crate::plugins::core::SpawnOrder;
use crate::plugins::projectiles::Bullet;
use crate::plugins::session::{self, GameEvent, GameSession};

use super::components::{Boss, DamageOutcome, Health, HitFlash, Hitbox, Invulnerability, LifeState, PointValue};

/// Overlapping pairs found this tick, in resolution order.
#[derive(Resource, Debug, Default)]
pub struct OverlapPairs(pub Vec<(Entity, Entity)>);

/// Internal stage-clear trigger, distinct from the outbound `GameEvent`.
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct BossDefeated {
    pub boss: Entity,
    pub points: u64,
}

pub fn detect_overlaps(
    mut pairs: ResMut<OverlapPairs>,
    q: Query<(Entity, &SpawnOrder, &Transform, &Hitbox, &CollisionLayers, &LifeState)>,
) {
    pairs.0.clear();

    let mut bodies: Vec<_> = q
        .iter()
        .filter(|(.., life)| life.is_live())
        .map(|(e, order, tf, hitbox, layers, _)| (*order, e, tf.translation.truncate(), hitbox.radius, *layers))
        .collect();
    bodies.sort_unstable_by_key(|(order, ..)| *order);

    for (i, (_, a, pos_a, r_a, layers_a)) in bodies.iter().enumerate() {
        for (_, b, pos_b, r_b, layers_b) in &bodies[i + 1..] {
            if !layers_a.interacts_with(*layers_b) {
                continue;
            }
            let reach = r_a + r_b;
            if pos_a.distance_squared(*pos_b) <= reach * reach {
                pairs.0.push((*a, *b));
            }
        }
    }
}

type Combatant = (
    &'static CollisionClass,
    &'static mut LifeState,
    &'static mut CollisionLayers,
    Option<&'static mut Health>,
    Option<&'static Bullet>,
    Option<&'static PointValue>,
    Option<&'static mut HitFlash>,
    Option<&'static mut Invulnerability>,
    Has<Boss>,
);

enum Outcome {
    Nothing,
    EnemyKilled { enemy: Entity, points: u64, boss: bool },
    PlayerHit,
}

pub fn resolve_collisions(
    pairs: Res<OverlapPairs>,
    tunables: Res<Tunables>,
    mut session: ResMut<GameSession>,
    mut events: MessageWriter<GameEvent>,
    mut defeats: MessageWriter<BossDefeated>,
    mut q: Query<Combatant>,
) {
    for &(a, b) in &pairs.0 {
        if session.is_game_over() {
            break;
        }
        let (Ok(class_a), Ok(class_b)) = (q.get(a).map(|c| *c.0), q.get(b).map(|c| *c.0)) else {
            continue;
        };

        use CollisionClass as C;
        let outcome = match (class_a, class_b) {
            (C::PlayerBullet, C::Enemy) => bullet_hits_enemy(&mut q, a, b, tunables.hit_flash_secs),
            (C::Enemy, C::PlayerBullet) => bullet_hits_enemy(&mut q, b, a, tunables.hit_flash_secs),
            (C::EnemyBullet, C::Player) => player_struck(&mut q, b, Some(a), tunables.invulnerability_secs),
            (C::Player, C::EnemyBullet) => player_struck(&mut q, a, Some(b), tunables.invulnerability_secs),
            (C::Enemy, C::Player) => player_struck(&mut q, b, None, tunables.invulnerability_secs),
            (C::Player, C::Enemy) => player_struck(&mut q, a, None, tunables.invulnerability_secs),
            _ => Outcome::Nothing,
        };

        match outcome {
            Outcome::Nothing => {}
            Outcome::EnemyKilled { enemy, points, boss } => {
                session::award_points(&mut session, &mut events, points);
                if boss {
                    info!("boss defeated for {points} points");
                    events.write(GameEvent::BossDefeated(points));
                    defeats.write(BossDefeated { boss: enemy, points });
                } else {
                    debug!("enemy {enemy} destroyed for {points} points");
                }
            }
            Outcome::PlayerHit => {
                session::lose_life(&mut session, &mut events);
            }
        }
    }
}

fn destroy(q: &mut Query<Combatant>, entity: Entity) {
    if let Ok((class, mut life, mut layers, ..)) = q.get_mut(entity) {
        *life = LifeState::Destroyed;
        *layers = class.inert_layers();
    }
}

fn bullet_hits_enemy(q: &mut Query<Combatant>, bullet: Entity, enemy: Entity, flash_secs: f32) -> Outcome {
    let damage = match q.get(bullet) {
        Ok((_, life, _, _, data, ..)) if life.is_live() => data.map_or(1, |b| b.damage),
        _ => return Outcome::Nothing,
    };

    let outcome = {
        let Ok((class, mut life, mut layers, health, _, points, flash, _, is_boss)) = q.get_mut(enemy) else {
            return Outcome::Nothing;
        };
        // A target already killed this tick does not soak further bullets.
        if !life.is_live() {
            return Outcome::Nothing;
        }

        let result = health.map_or(DamageOutcome::Ignored, |mut hp| hp.apply_damage(damage));
        if let (true, Some(mut flash)) = (result != DamageOutcome::Ignored, flash) {
            flash.trigger(flash_secs);
        }

        if result == DamageOutcome::Killed {
            *life = LifeState::Destroyed;
            *layers = class.inert_layers();
            Outcome::EnemyKilled { enemy, points: points.map_or(0, |p| p.0), boss: is_boss }
        } else {
            Outcome::Nothing
        }
    };

    destroy(q, bullet);
    outcome
}

fn player_struck(q: &mut Query<Combatant>, player: Entity, bullet: Option<Entity>, invuln_secs: f32) -> Outcome {
    if let Some(bullet) = bullet {
        match q.get(bullet) {
            Ok((_, life, ..)) if life.is_live() => {}
            _ => return Outcome::Nothing,
        }
    }

    {
        let Ok((class, life, mut layers, .., invulnerability, _)) = q.get_mut(player) else {
            return Outcome::Nothing;
        };
        if !life.is_live() || invulnerability.as_ref().is_some_and(|i| i.is_active()) {
            return Outcome::Nothing;
        }
        // Collide with nothing until the window closes.
        if let Some(mut invulnerability) = invulnerability {
            invulnerability.grant(invuln_secs);
            if invulnerability.is_active() {
                *layers = class.inert_layers();
            }
        }
    }

    if let Some(bullet) = bullet {
        destroy(q, bullet);
    }
    Outcome::PlayerHit
}

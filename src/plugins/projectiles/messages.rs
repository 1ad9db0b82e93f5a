//! Buffered bullet spawn requests.
//!
//! Firing entities only write intent; `spawn::spawn_requested_bullets` is the
//! single consumer that turns requests into entities.

use bevy::prelude::*;

use crate::common::layers::CollisionClass;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BulletKind {
    Player,
    Enemy,
}

impl BulletKind {
    #[inline]
    pub fn class(self) -> CollisionClass {
        match self {
            Self::Player => CollisionClass::PlayerBullet,
            Self::Enemy => CollisionClass::EnemyBullet,
        }
    }
}

#[derive(Message, Clone, Copy, Debug, PartialEq)]
pub struct SpawnBulletRequest {
    pub kind: BulletKind,
    pub pos: Vec2,
    pub vel: Vec2,
    pub damage: u32,
}

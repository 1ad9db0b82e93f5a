//! Collision layers.
//!
//! `CollisionClass` is the gameplay role of an entity. `Layer` is the avian
//! membership it maps to, and the filters encode who may touch whom:
//!
//! ```text
//! Player       <-> Enemy, EnemyBullet
//! Enemy        <-> Player, PlayerBullet
//! PlayerBullet <-> Enemy
//! EnemyBullet  <-> Player
//! ```

use avian2d::prelude::*;
use bevy::prelude::*;

#[derive(PhysicsLayer, Default, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Layer {
    #[default]
    Default,
    Player,
    Enemy,
    PlayerBullet,
    EnemyBullet,
}

/// Role of a combat entity. Bosses use `Enemy`; the `Boss` marker tells them apart.
#[derive(Component, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CollisionClass {
    Player,
    PlayerBullet,
    Enemy,
    EnemyBullet,
}

impl CollisionClass {
    #[inline]
    pub fn layer(self) -> Layer {
        match self {
            Self::Player => Layer::Player,
            Self::PlayerBullet => Layer::PlayerBullet,
            Self::Enemy => Layer::Enemy,
            Self::EnemyBullet => Layer::EnemyBullet,
        }
    }

    /// Layers while the entity takes part in collisions.
    pub fn active_layers(self) -> CollisionLayers {
        match self {
            Self::Player => CollisionLayers::new(Layer::Player, [Layer::Enemy, Layer::EnemyBullet]),
            Self::PlayerBullet => CollisionLayers::new(Layer::PlayerBullet, [Layer::Enemy]),
            Self::Enemy => CollisionLayers::new(Layer::Enemy, [Layer::Player, Layer::PlayerBullet]),
            Self::EnemyBullet => CollisionLayers::new(Layer::EnemyBullet, [Layer::Player]),
        }
    }

    /// Keep membership, clear filters: the entity collides with nothing.
    #[inline]
    pub fn inert_layers(self) -> CollisionLayers {
        CollisionLayers::new(self.layer(), [] as [Layer; 0])
    }

    #[inline]
    pub fn is_bullet(self) -> bool {
        matches!(self, Self::PlayerBullet | Self::EnemyBullet)
    }
}

use bevy::prelude::*;

/// Marker + payload for bullet entities. Bullets have no `Health`.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bullet {
    pub damage: u32,
}

#[derive(Component, Debug, Clone, Deref, DerefMut)]
pub struct Lifetime(pub Timer);

impl Lifetime {
    pub fn from_secs(secs: f32) -> Self {
        Self(Timer::from_seconds(secs.max(0.0), TimerMode::Once))
    }
}

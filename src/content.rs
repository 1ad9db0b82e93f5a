//! Built-in content: behavior patterns, enemy templates and the campaign.
//!
//! Everything here is plain data built through the same records an embedding
//! layer would deserialize, and goes through the same validation.

use bevy::prelude::*;

use crate::common::error::ConfigError;
use crate::plugins::behaviors::{AttackSpec, BehaviorLibrary, Movement, Pattern};
use crate::plugins::boss::{BossEncounter, BossPhase};
use crate::plugins::enemies::{Bestiary, EnemyTemplate};
use crate::plugins::stage::{Campaign, EnemyWave, Formation, StageDefinition};

pub fn plugin(app: &mut App) {
    match builtin() {
        Ok((library, bestiary, campaign)) => {
            app.insert_resource(library).insert_resource(bestiary).insert_resource(campaign);
        }
        Err(err) => error!("built-in content rejected: {err}"),
    }
}

/// Library, bestiary and campaign, validated together.
pub fn builtin() -> Result<(BehaviorLibrary, Bestiary, Campaign), ConfigError> {
    let library = behavior_library()?;
    library.validate()?;
    let bestiary = bestiary();
    bestiary.validate(&library)?;
    let campaign = Campaign::new(vec![outer_approach(), inner_ring()], &bestiary, &library)?;
    Ok((library, bestiary, campaign))
}

pub fn behavior_library() -> Result<BehaviorLibrary, ConfigError> {
    Ok(BehaviorLibrary::default()
        .with_movement("drift", Movement::straight(Vec2::NEG_Y, 90.0))
        .with_movement("dive", Movement::straight(Vec2::NEG_Y, 170.0))
        .with_movement("lumber", Movement::straight(Vec2::NEG_Y, 45.0))
        .with_movement("weave", Movement::sine_wave(-70.0, 120.0, 3.0))
        .with_movement("hold", Movement::Stationary)
        .with_movement("strafe", Movement::strafe(80.0, 140.0))
        .with_movement("orbit", Movement::orbit(Vec2::new(0.0, 150.0), 60.0, 60.0, 200.0))
        .with_attack("peashooter", AttackSpec::new(Pattern::forward(Vec2::NEG_Y), 1.2, 180.0))
        .with_attack("fan3", AttackSpec::new(Pattern::fan(3, 40.0, Vec2::NEG_Y)?, 1.5, 160.0))
        .with_attack("fan7", AttackSpec::new(Pattern::fan(7, 90.0, Vec2::NEG_Y)?, 0.8, 200.0))
        .with_attack("spiral6", AttackSpec::new(Pattern::spiral(6, 60.0)?, 0.4, 140.0))
        .with_attack("spiral12", AttackSpec::new(Pattern::spiral(12, -90.0)?, 0.3, 150.0)))
}

pub fn bestiary() -> Bestiary {
    let template = |health, point_value, hitbox_radius, movement: &str, attack: Option<&str>| EnemyTemplate {
        health,
        point_value,
        hitbox_radius,
        movement: movement.to_owned(),
        attack: attack.map(str::to_owned),
    };

    Bestiary::default()
        .with_template("scout", template(1, 100, 12.0, "drift", None))
        .with_template("diver", template(1, 150, 10.0, "dive", None))
        .with_template("weaver", template(2, 200, 14.0, "weave", Some("peashooter")))
        .with_template("gunship", template(6, 500, 20.0, "lumber", Some("fan3")))
}

fn wave(spawn_time: f32, enemy: &str, count: u32, formation: Formation) -> EnemyWave {
    EnemyWave {
        spawn_time,
        enemy: enemy.to_owned(),
        count,
        formation,
        spawn_interval: 0.0,
        spawn_width: 0.8,
    }
}

fn phase(name: &str, health_threshold: f32, attack: &str, rate: f32, speed: f32, movement: Option<&str>) -> BossPhase {
    BossPhase {
        name: name.to_owned(),
        health_threshold,
        attack_pattern: attack.to_owned(),
        fire_rate_multiplier: rate,
        bullet_speed_multiplier: speed,
        movement_pattern: movement.map(str::to_owned),
    }
}

pub fn outer_approach() -> StageDefinition {
    StageDefinition {
        name: "Outer Approach".into(),
        duration: 45.0,
        waves: vec![
            wave(0.0, "scout", 5, Formation::Line),
            wave(4.0, "weaver", 4, Formation::V),
            EnemyWave { spawn_interval: 0.3, ..wave(8.0, "scout", 6, Formation::Scattered) },
            wave(12.0, "gunship", 2, Formation::Sides),
            wave(16.0, "weaver", 5, Formation::Arc),
            EnemyWave { spawn_interval: 0.25, ..wave(22.0, "diver", 8, Formation::Line) },
            wave(28.0, "gunship", 3, Formation::Line),
            wave(34.0, "weaver", 6, Formation::Scattered),
        ],
        boss: BossEncounter {
            name: "Sentinel".into(),
            health: 300,
            point_value: 20_000,
            hitbox_radius: 36.0,
            spawn_position: Vec2::new(0.0, 420.0),
            arena_position: Vec2::new(0.0, 180.0),
            entrance_duration: 3.0,
            invulnerable_during_entrance: true,
            phases: vec![
                phase("Opening", 1.0, "spiral6", 1.0, 1.0, Some("strafe")),
                phase("Crossfire", 0.66, "fan7", 1.2, 1.1, None),
                phase("Frenzy", 0.33, "spiral12", 1.5, 1.25, Some("orbit")),
            ],
        },
        seed: 0x5EED,
    }
}

pub fn inner_ring() -> StageDefinition {
    StageDefinition {
        name: "Inner Ring".into(),
        duration: 50.0,
        waves: vec![
            wave(0.0, "weaver", 6, Formation::Arc),
            EnemyWave { spawn_interval: 0.2, ..wave(5.0, "diver", 10, Formation::Scattered) },
            wave(10.0, "gunship", 4, Formation::Sides),
            wave(18.0, "weaver", 7, Formation::V),
            EnemyWave { spawn_width: 1.0, ..wave(26.0, "scout", 9, Formation::Line) },
            wave(32.0, "gunship", 3, Formation::Arc),
            EnemyWave { spawn_interval: 0.15, ..wave(40.0, "diver", 12, Formation::Scattered) },
        ],
        boss: BossEncounter {
            name: "Warden".into(),
            health: 450,
            point_value: 35_000,
            hitbox_radius: 40.0,
            spawn_position: Vec2::new(0.0, 420.0),
            arena_position: Vec2::new(0.0, 160.0),
            entrance_duration: 3.5,
            invulnerable_during_entrance: true,
            phases: vec![
                phase("Lockdown", 1.0, "fan7", 1.0, 1.0, Some("hold")),
                phase("Patrol", 0.75, "spiral6", 1.3, 1.1, Some("strafe")),
                phase("Overload", 0.4, "spiral12", 1.6, 1.2, Some("orbit")),
                phase("Last Stand", 0.15, "fan7", 2.0, 1.4, Some("strafe")),
            ],
        },
        seed: 0xC0FFEE,
    }
}

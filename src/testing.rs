//! Shared fixtures for unit tests.

use crate::arena::Arena;
use crate::config::ArenaConfig;
use crate::creature::CreatureSpec;
use crate::services::{AttackClip, AttackSpriteTable, GridTransform};
use glam::Vec2;

/// 100px cells with the origin at (0, 0): board (x, y) lands on (100x, 100y)
pub fn transform() -> GridTransform {
    GridTransform::new(Vec2::ZERO, Vec2::splat(100.0))
}

pub fn sprites() -> AttackSpriteTable {
    let mut table = AttackSpriteTable::new();
    table.insert("FIRE", Vec2::new(2.0, 2.0), AttackClip::looping(8));
    table.insert("ROCK", Vec2::new(1.5, 1.5), AttackClip::looping(4));
    table
}

pub fn config() -> ArenaConfig {
    ArenaConfig {
        board: transform(),
        ..ArenaConfig::default()
    }
}

pub fn arena() -> Arena {
    Arena::new(config(), sprites())
}

/// A creature standing on (2, 3)
pub fn spec(id: &str, range: u32, atk_speed: f32) -> CreatureSpec {
    CreatureSpec {
        index: "0004".to_string(),
        name: "Charmander".to_string(),
        id: id.to_string(),
        hp: 120,
        atk: 12,
        def: 4,
        spe_def: 3,
        range,
        atk_speed,
        attack_type: "SPECIAL".to_string(),
        kind: "FIRE".to_string(),
        attack_sprite: "FIRE".to_string(),
        position_x: 2,
        position_y: 3,
        orientation: None,
        action: None,
        life: None,
        team: 0,
        rarity: "COMMON".to_string(),
        effects: Vec::new(),
    }
}

//! Headless arena replay: spawns a ranged and a melee creature, drives a few
//! combat ticks against them and logs every visual event.
//!
//! Usage: `arena-demo [sprites.json]` (set `RUST_LOG=debug` for lifecycle detail)

use arena_creature::services::AttackSpriteTable;
use arena_creature::{ActionStatus, Arena, ArenaConfig, ArenaEvent, CreatureSpec};
use glam::IVec2;
use log::{error, info};
use rand::Rng;
use std::path::Path;

/// Frame length driving the replay (~60 FPS)
const FRAME_MS: f32 = 16.0;
/// Frames per combat tick
const FRAMES_PER_TICK: u32 = 30;
const TICKS: u32 = 12;

const BUILTIN_SPRITES: &str = r#"{
    "FIRE": { "scale": [2.0, 2.0], "frames": 8, "frame_rate": 20.0 },
    "ROCK": { "scale": [1.5, 1.5], "frames": 4, "frame_rate": 12.0 }
}"#;

const RANGED: &str = r#"{
    "index": "0004", "name": "Charmander", "id": "charmander-1",
    "hp": 120, "atk": 12, "def": 4, "speDef": 3, "range": 3, "atkSpeed": 450,
    "attackType": "SPECIAL", "type": "FIRE", "attackSprite": "FIRE",
    "positionX": 2, "positionY": 3, "life": 120, "team": 0, "rarity": "COMMON",
    "effects": []
}"#;

const MELEE: &str = r#"{
    "index": "0074", "name": "Geodude", "id": "geodude-1",
    "hp": 160, "atk": 10, "def": 8, "speDef": 2, "range": 1, "atkSpeed": 700,
    "attackType": "PHYSICAL", "type": "ROCK", "attackSprite": "ROCK",
    "positionX": 5, "positionY": 4, "orientation": "DOWN", "life": 160, "team": 1,
    "rarity": "UNCOMMON", "effects": ["POISON"]
}"#;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let sprites = match std::env::args().nth(1) {
        Some(path) => AttackSpriteTable::load(Path::new(&path))?,
        None => AttackSpriteTable::from_json(BUILTIN_SPRITES)?,
    };
    info!("loaded {} attack sprites", sprites.len());

    let mut arena = Arena::new(ArenaConfig::default(), sprites);
    arena.spawn_creature(CreatureSpec::from_json(RANGED)?, false)?;
    arena.spawn_creature(CreatureSpec::from_json(MELEE)?, true)?;

    let mut rng = rand::thread_rng();
    let mut roster = vec!["charmander-1", "geodude-1"];
    for tick in 0..TICKS {
        // The melee creature shuffles along its row; the ranged one chases it
        let melee_cell = IVec2::new(rng.gen_range(4..=6), 4);
        arena.move_creature("geodude-1", melee_cell)?;
        arena.set_target("geodude-1", 2, 3)?;
        if roster.contains(&"charmander-1") {
            arena.set_target("charmander-1", melee_cell.x, melee_cell.y)?;
        }

        let attacking = tick < TICKS - 3;
        let action = if attacking {
            ActionStatus::Attacking
        } else {
            ActionStatus::Moving
        };
        for &id in &roster {
            arena.set_action(id, action)?;
        }
        if attacking {
            for &id in &roster {
                if let Err(e) = arena.start_attack(id) {
                    error!("tick {}: {} could not attack: {}", tick, id, e);
                }
            }
        }

        if tick == TICKS - 5 {
            arena.hover_enter("geodude-1")?;
        }
        if tick == TICKS - 4 {
            arena.hover_exit("geodude-1")?;
            // Board wipe mid-flight for the ranged attacker
            arena.despawn_creature("charmander-1")?;
            roster.retain(|&id| id != "charmander-1");
        }

        for _ in 0..FRAMES_PER_TICK {
            arena.update(FRAME_MS);
        }
        for event in arena.drain_events() {
            log_event(tick, &event);
        }
    }

    info!(
        "done: {} creatures, {} flights outstanding",
        arena.creatures().count(),
        arena.flights().len()
    );
    Ok(())
}

fn log_event(tick: u32, event: &ArenaEvent) {
    match event {
        ArenaEvent::FlightScheduled {
            owner,
            source,
            destination,
            duration,
            ..
        } => info!(
            "[{}] {} flight {:?} -> {:?} ({}ms)",
            tick, owner, source, destination, duration
        ),
        other => info!("[{}] {:?}", tick, other),
    }
}

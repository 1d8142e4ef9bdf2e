//! Arena event system for decoupled communication with the host.
//!
//! The creature core pushes events as it spawns, flies and recycles
//! projectiles; audio, logging and debug overlays drain them each frame.

use crate::flight::FlightId;
use glam::Vec2;
use hecs::Entity;

/// Why a projectile was destroyed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DestroyReason {
    /// The owner stopped attacking
    Finished,
    /// The owner's rendering context was torn down
    StaleContext,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ArenaEvent {
    CreatureSpawned {
        id: String,
        container: Entity,
    },
    ProjectileSpawned {
        owner: String,
        projectile: Entity,
        at: Vec2,
    },
    FlightScheduled {
        owner: String,
        flight: FlightId,
        source: Vec2,
        destination: Vec2,
        duration: f32,
    },
    /// The same projectile was relaunched for another attack cycle
    ProjectileReplayed {
        owner: String,
        projectile: Entity,
    },
    ProjectileDestroyed {
        owner: String,
        projectile: Entity,
        reason: DestroyReason,
    },
    CreatureDespawned {
        id: String,
    },
}

/// Simple event queue - events are pushed during update, drained by the host
#[derive(Debug, Default)]
pub struct EventQueue {
    events: Vec<ArenaEvent>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn push(&mut self, event: ArenaEvent) {
        self.events.push(event);
    }

    pub fn drain(&mut self) -> impl Iterator<Item = ArenaEvent> + '_ {
        self.events.drain(..)
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Peek at pending events without draining
    pub fn iter(&self) -> impl Iterator<Item = &ArenaEvent> {
        self.events.iter()
    }
}

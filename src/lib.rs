//! Battle creature visuals for a real-time arena view.
//!
//! The crate sequences the visual consequence of combat decisions made
//! elsewhere: creature containers, their hover cards, a move-to binding,
//! and the attack projectile that loops while a creature keeps attacking.
//!
//! Modules:
//! - `arena`: frame driver and tick-facing API
//! - `creature`: creature state, range classification, construction
//! - `attack`: the attack projectile state machine
//! - `flight`: timed projectile tweens
//! - `movement`: move-to capability
//! - `scene`: hecs-backed scene graph
//! - `services`: coordinate transform and attack sprite lookups

pub mod arena;
pub mod attack;
pub mod components;
pub mod config;
pub mod constants;
pub mod creature;
pub mod error;
pub mod events;
pub mod flight;
pub mod movement;
pub mod scene;
pub mod services;

#[cfg(test)]
mod testing;

pub use arena::Arena;
pub use config::ArenaConfig;
pub use creature::{ActionStatus, Creature, CreatureSpec, Orientation, RangeType};
pub use error::{ArenaError, Result};
pub use events::{ArenaEvent, DestroyReason};

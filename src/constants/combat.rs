//! Creature stat constants.

/// Ranges above this are ranged attackers, everything else is melee
pub const MELEE_MAX_RANGE: u32 = 1;
/// Movement speed bound to every creature (pixels per second)
pub const CREATURE_MOVE_SPEED: f32 = 300.0;
/// Team index drawn with the friendly life bar colour
pub const HOME_TEAM: u32 = 0;

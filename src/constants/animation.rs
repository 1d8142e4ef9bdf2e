//! Attack animation constants.

/// Depth the projectile is raised to whenever it (re)launches
pub const PROJECTILE_DEPTH: i32 = 7;
/// Frame suffix of the first frame of an attack clip
pub const ATTACK_FIRST_FRAME: &str = "000";
/// Texture atlas holding every attack clip
pub const ATTACK_ATLAS: &str = "attacks";
/// Default playback rate for clips that don't specify one (frames per second)
pub const DEFAULT_CLIP_FRAME_RATE: f32 = 20.0;
/// Loop forever
pub const CLIP_REPEAT_FOREVER: i32 = -1;

//! Creature container layout constants.

/// Depth of every creature container
pub const CREATURE_DEPTH: i32 = 5;
/// Scale applied to the body sprite
pub const BODY_SCALE: f32 = 2.0;
/// Body sprite height in atlas pixels before scaling
pub const BODY_FRAME_HEIGHT: f32 = 32.0;
/// Offset of the hover detail card from the container origin
pub const DETAIL_OFFSET_X: f32 = 20.0;
pub const DETAIL_OFFSET_Y: f32 = -130.0;
/// Life bar x offset from the container origin
pub const LIFE_BAR_OFFSET_X: f32 = -15.0;
/// Life bar colours (0xRRGGBB)
pub const LIFE_BAR_FRIENDLY_COLOR: u32 = 0x00ff00;
pub const LIFE_BAR_HOSTILE_COLOR: u32 = 0xff0000;
/// Horizontal spacing between status effect icons
pub const EFFECT_ICON_SPACING: f32 = 20.0;
/// Scale of status effect icons and their borders
pub const EFFECT_ICON_SCALE: f32 = 0.5;
/// Extra drop below the body for the effect row
pub const EFFECT_ROW_OFFSET: f32 = 30.0;

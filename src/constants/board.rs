//! Board to screen mapping constants.

/// Screen position of board cell (0, 0)
pub const BOARD_ORIGIN_X: f32 = 328.0;
pub const BOARD_ORIGIN_Y: f32 = 808.0;
/// Screen distance between adjacent cells (y grows upward on the board)
pub const BOARD_CELL_WIDTH: f32 = 96.0;
pub const BOARD_CELL_HEIGHT: f32 = -96.0;

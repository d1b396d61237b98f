#![warn(clippy::all, clippy::pedantic)]

// Playfield dimensions, fixed for the lifetime of a game
pub const ROWS: usize = 20;
pub const COLS: usize = 10;

// Terminal columns used to draw a single grid cell
pub const CELL_SIZE: u16 = 2;

// Where each new shape appears (top-left corner of its footprint)
pub const SPAWN_X: i32 = (COLS / 2) as i32 - 1;
pub const SPAWN_Y: i32 = 0;

// Game timing
pub const GRAVITY_INTERVAL_MS: u64 = 1000; // One gravity tick per second
pub const FRAME_INTERVAL_MS: u64 = 33; // ~30 FPS
pub const UPDATE_INTERVAL_MS: u64 = 50; // Game logic updates less often than frames

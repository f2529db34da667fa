//! Tunables for the game simulation, all in logical units. The playfield is
//! 400x600 with the origin at the top-left and y growing downward.

pub const SCREEN_WIDTH: f32 = 400.0;
pub const SCREEN_HEIGHT: f32 = 600.0;

// Per-tick velocity change; a flap overwrites the velocity outright.
pub const GRAVITY: f32 = 0.5;
pub const FLAP_STRENGTH: f32 = -10.0;

pub const BIRD_X: f32 = 100.0;
pub const BIRD_WIDTH: f32 = 40.0;
pub const BIRD_HEIGHT: f32 = 30.0;

pub const PIPE_SPEED: f32 = -5.0;
pub const PIPE_WIDTH: f32 = 60.0;
pub const PIPE_GAP: f32 = 150.0;
// Both pipe segments keep at least this much height next to the gap.
pub const PIPE_MIN_CLEARANCE: i32 = 50;

// The first pipe starts further out to give the player a moment to settle.
pub const FIRST_PIPE_X: f32 = SCREEN_WIDTH + 200.0;
pub const RESPAWN_PIPE_X: f32 = SCREEN_WIDTH;

// How long the game-over frame stays up before the process exits, in ticks.
pub const GAME_OVER_HOLD_TICKS: u16 = 120;

pub const GAME_OVER_TEXT: &str = "Game Over!";

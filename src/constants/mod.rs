pub mod game;

// Playfield size in terminal cells. Cells are roughly twice as tall as they
// are wide, so 40x30 keeps the 400x600 logical playfield's portrait shape.
pub const WIDTH: u16 = 40;
pub const HEIGHT: u16 = 30;

pub const TICK_RATE: f64 = 60.0;
pub const FRAME_RATE: f64 = 60.0;

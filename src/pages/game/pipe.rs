use rand::Rng;

use crate::{constants::game, pages::game::hitbox::Hitbox};

/// One obstacle: a top and a bottom segment separated by a fixed gap, sliding
/// left at constant speed.
#[derive(Debug)]
pub struct Pipe {
    x: f32,
    top_height: f32,
    bottom_height: f32,
}

impl Pipe {
    /// Spawns a pipe at `x` with the gap position drawn uniformly at random.
    /// The sample is an integer so the two segment heights and the gap always
    /// add up to the screen height exactly.
    pub fn new(x: f32) -> Self {
        let max_top = (game::SCREEN_HEIGHT - game::PIPE_GAP) as i32 - game::PIPE_MIN_CLEARANCE;
        let top_height = rand::thread_rng().gen_range(game::PIPE_MIN_CLEARANCE..=max_top);
        Self::with_top_height(x, top_height as f32)
    }

    pub(super) fn with_top_height(x: f32, top_height: f32) -> Self {
        let bottom_height = game::SCREEN_HEIGHT - top_height - game::PIPE_GAP;
        Pipe { x, top_height, bottom_height }
    }

    pub fn step(&mut self) {
        self.x += game::PIPE_SPEED;
    }

    /// True once the trailing edge has scrolled past the left screen edge.
    pub fn is_off_screen(&self) -> bool {
        self.x + game::PIPE_WIDTH < 0.0
    }

    pub fn x(&self) -> f32 {
        self.x
    }

    /// The (top, bottom) segment rectangles at the current position.
    pub fn hitboxes(&self) -> (Hitbox, Hitbox) {
        let top = Hitbox::new(self.x, 0.0, game::PIPE_WIDTH, self.top_height);
        let bottom = Hitbox::new(
            self.x,
            game::SCREEN_HEIGHT - self.bottom_height,
            game::PIPE_WIDTH,
            self.bottom_height,
        );
        (top, bottom)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_segments_and_gap_fill_the_screen_exactly() {
        for _ in 0..200 {
            let pipe = Pipe::new(game::FIRST_PIPE_X);
            assert_eq!(pipe.top_height + game::PIPE_GAP + pipe.bottom_height, game::SCREEN_HEIGHT);
        }
    }

    #[test]
    fn test_top_height_stays_in_range() {
        for _ in 0..200 {
            let pipe = Pipe::new(game::FIRST_PIPE_X);
            assert!(pipe.top_height >= 50.0);
            assert!(pipe.top_height <= 400.0);
            assert!(pipe.bottom_height >= 50.0);
        }
    }

    #[test]
    fn test_step_moves_left_at_constant_speed() {
        let mut pipe = Pipe::with_top_height(600.0, 200.0);
        pipe.step();
        assert_eq!(pipe.x(), 595.0);
        pipe.step();
        assert_eq!(pipe.x(), 590.0);
    }

    #[test]
    fn test_off_screen_boundary_is_strict() {
        // Spawned at 600 and moving 5 per step, the trailing edge (x + 60)
        // reaches exactly 0 after 132 steps; that is not yet off screen.
        let mut pipe = Pipe::with_top_height(600.0, 200.0);
        for _ in 0..132 {
            pipe.step();
        }
        assert_eq!(pipe.x(), -60.0);
        assert!(!pipe.is_off_screen());

        pipe.step();
        assert_eq!(pipe.x(), -65.0);
        assert!(pipe.is_off_screen());
    }

    #[test]
    fn test_hitboxes_are_idempotent() {
        let mut pipe = Pipe::with_top_height(300.0, 250.0);
        assert_eq!(pipe.hitboxes(), pipe.hitboxes());

        let before = pipe.hitboxes();
        pipe.step();
        assert!(pipe.hitboxes() != before);
    }

    #[test]
    fn test_hitboxes_span_everything_but_the_gap() {
        let pipe = Pipe::with_top_height(100.0, 250.0);
        let (top, bottom) = pipe.hitboxes();

        assert_eq!(top.x, 100.0);
        assert_eq!(top.y, 0.0);
        assert_eq!(top.height, 250.0);

        assert_eq!(bottom.x, 100.0);
        assert_eq!(bottom.y, 400.0);
        assert_eq!(bottom.bottom(), game::SCREEN_HEIGHT);

        assert_eq!(bottom.y - top.bottom(), game::PIPE_GAP);
    }
}

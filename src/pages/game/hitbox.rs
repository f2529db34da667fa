/// Axis-aligned rectangle in logical playfield units, used for overlap tests
/// between the bird and the pipe segments.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Hitbox {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Hitbox {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Hitbox { x, y, width, height }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// True when the two rectangles share area. Rectangles that only touch
    /// along an edge do not overlap.
    pub fn overlaps(&self, other: &Hitbox) -> bool {
        self.x < other.right() && self.right() > other.x && self.y < other.bottom() && self.bottom() > other.y
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_overlap_by_one_unit() {
        let a = Hitbox::new(0.0, 0.0, 10.0, 10.0);
        let b = Hitbox::new(9.0, 9.0, 10.0, 10.0);
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
    }

    #[test]
    fn test_edge_touching_is_not_overlap() {
        let a = Hitbox::new(0.0, 0.0, 10.0, 10.0);
        let right = Hitbox::new(10.0, 0.0, 10.0, 10.0);
        let below = Hitbox::new(0.0, 10.0, 10.0, 10.0);
        assert!(!a.overlaps(&right));
        assert!(!a.overlaps(&below));
    }

    #[test]
    fn test_disjoint() {
        let a = Hitbox::new(0.0, 0.0, 10.0, 10.0);
        let b = Hitbox::new(100.0, 100.0, 10.0, 10.0);
        assert!(!a.overlaps(&b));
    }

    #[test]
    fn test_containment_is_overlap() {
        let outer = Hitbox::new(0.0, 0.0, 100.0, 100.0);
        let inner = Hitbox::new(40.0, 40.0, 10.0, 10.0);
        assert!(outer.overlaps(&inner));
        assert!(inner.overlaps(&outer));
    }

    #[test]
    fn test_edges() {
        let hb = Hitbox::new(2.0, 3.0, 10.0, 20.0);
        assert_eq!(hb.right(), 12.0);
        assert_eq!(hb.bottom(), 23.0);
    }
}

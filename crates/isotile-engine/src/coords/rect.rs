use super::Vec2;

/// Sprite rectangle in screen space (top-left origin, +Y down).
///
/// Negative sizes are allowed and describe the same area as their mirrored
/// positive form.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Rect {
    pub origin: Vec2,
    pub size: Vec2,
}

impl Rect {
    #[inline]
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { origin: Vec2::new(x, y), size: Vec2::new(w, h) }
    }

    /// Opposite corner of `origin`.
    #[inline]
    pub fn corner(self) -> Vec2 {
        self.origin + self.size
    }

    #[inline]
    pub fn translated(self, offset: Vec2) -> Self {
        Self { origin: self.origin + offset, size: self.size }
    }

    /// `true` when the two rectangles share a region of non-zero area.
    /// Rectangles that only touch along an edge do not overlap.
    pub fn intersects(self, other: Rect) -> bool {
        let (a_lo, a_hi) = self.span();
        let (b_lo, b_hi) = other.span();

        a_lo.x.max(b_lo.x) < a_hi.x.min(b_hi.x) && a_lo.y.max(b_lo.y) < a_hi.y.min(b_hi.y)
    }

    fn span(self) -> (Vec2, Vec2) {
        let c = self.corner();
        (
            Vec2::new(self.origin.x.min(c.x), self.origin.y.min(c.y)),
            Vec2::new(self.origin.x.max(c.x), self.origin.y.max(c.y)),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn r(x: f32, y: f32, w: f32, h: f32) -> Rect {
        Rect::new(x, y, w, h)
    }

    #[test]
    fn overlapping_sprites_intersect() {
        assert!(r(0.0, 0.0, 10.0, 10.0).intersects(r(5.0, 5.0, 10.0, 10.0)));
        assert!(r(0.0, 0.0, 100.0, 100.0).intersects(r(10.0, 10.0, 1.0, 1.0)));
    }

    #[test]
    fn touching_edges_do_not_intersect() {
        assert!(!r(0.0, 0.0, 5.0, 5.0).intersects(r(5.0, 0.0, 5.0, 5.0)));
        assert!(!r(0.0, 0.0, 5.0, 5.0).intersects(r(20.0, 20.0, 5.0, 5.0)));
    }

    #[test]
    fn negative_size_is_mirrored() {
        let flipped = r(10.0, 0.0, -4.0, 5.0);
        assert!(flipped.intersects(r(7.0, 1.0, 1.0, 1.0)));
        assert!(!flipped.intersects(r(10.5, 1.0, 1.0, 1.0)));
    }

    #[test]
    fn zero_area_never_intersects() {
        assert!(!r(2.0, 2.0, 0.0, 5.0).intersects(r(0.0, 0.0, 10.0, 10.0)));
    }

    #[test]
    fn translated_keeps_size() {
        let moved = r(1.0, 2.0, 3.0, 4.0).translated(Vec2::new(10.0, -2.0));
        assert_eq!(moved, r(11.0, 0.0, 3.0, 4.0));
        assert_eq!(moved.corner(), Vec2::new(14.0, 4.0));
    }
}

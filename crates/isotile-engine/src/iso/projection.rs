use crate::coords::{Vec2, Vec3};

/// Fixed linear mapping from iso space to screen space.
///
/// `screen.x = scale.x * 0.5 * (x - y)`
/// `screen.y = scale.y * 0.5 * (x + y) - scale.z * z`
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct IsoProjection {
    pub scale: Vec3,
}

impl IsoProjection {
    #[inline]
    pub const fn new(scale: Vec3) -> Self {
        Self { scale }
    }

    #[inline]
    pub fn project(self, p: Vec3) -> Vec2 {
        Vec2::new(
            0.5 * self.scale.x * (p.x - p.y),
            0.5 * self.scale.y * (p.x + p.y) - self.scale.z * p.z,
        )
    }
}

impl Default for IsoProjection {
    /// 32 px tile width, 24 px tile depth, 8 px per height unit.
    fn default() -> Self {
        Self::new(Vec3::new(32.0, 24.0, 8.0))
    }
}

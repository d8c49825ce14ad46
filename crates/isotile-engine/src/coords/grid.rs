use core::fmt;

use super::{Vec2, Vec3};

/// Integer tile cell on the ground grid.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct GridPos {
    pub x: i32,
    pub y: i32,
}

impl GridPos {
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Nearest cell to a planar position.
    #[inline]
    pub fn from_planar(p: Vec2) -> Self {
        Self::new(p.x.round() as i32, p.y.round() as i32)
    }

    /// 4-connected neighbours in search order: west (+x), east (-x), north (+y), south (-y).
    #[inline]
    pub const fn neighbors(self) -> [GridPos; 4] {
        [
            GridPos::new(self.x + 1, self.y),
            GridPos::new(self.x - 1, self.y),
            GridPos::new(self.x, self.y + 1),
            GridPos::new(self.x, self.y - 1),
        ]
    }

    #[inline]
    pub fn manhattan(self, other: GridPos) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    #[inline]
    pub fn planar(self) -> Vec2 {
        Vec2::new(self.x as f32, self.y as f32)
    }

    /// Lifts the cell into iso space at height `z`.
    #[inline]
    pub fn at_height(self, z: f32) -> Vec3 {
        Vec3::new(self.x as f32, self.y as f32, z)
    }
}

impl fmt::Display for GridPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

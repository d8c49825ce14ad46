//! Ground height providers.
//!
//! Movers only ever ask "how high is the ground here?". Tile storage, stacking
//! and occupancy belong to whatever map implementation sits behind [`Ground`].

mod height_field;

pub use height_field::HeightField;

use crate::coords::GridPos;

/// Surface a grounded entity follows.
pub trait Ground {
    /// Top of the ground at planar position `(x, y)`, or `None` where there is no tile.
    fn height_at(&self, x: f32, y: f32) -> Option<f32>;

    #[inline]
    fn cell_height(&self, cell: GridPos) -> Option<f32> {
        self.height_at(cell.x as f32, cell.y as f32)
    }
}

impl<G: Ground + ?Sized> Ground for &G {
    #[inline]
    fn height_at(&self, x: f32, y: f32) -> Option<f32> {
        (**self).height_at(x, y)
    }
}

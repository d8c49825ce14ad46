use crate::coords::GridPos;
use crate::terrain::Ground;

/// Walking limits.
///
/// `jump` is the largest height difference between neighbouring cells a walker
/// will cross; `move_range` caps the number of steps of a single path.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct WalkingConfig {
    pub jump: f32,
    pub move_range: usize,
}

impl Default for WalkingConfig {
    fn default() -> Self {
        Self { jump: 2.0, move_range: usize::MAX }
    }
}

/// How `move_to` reaches a destination.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub enum MobilityPolicy {
    /// One straight linear move; no path search.
    #[default]
    Direct,
    /// Cell-by-cell over the ground, hopping or jumping height changes.
    Walking(WalkingConfig),
}

/// Kind of movement used for one cell-to-cell stride.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Stride {
    Walk,
    Hop,
    Jump,
}

impl Stride {
    /// Classifies a stride by the height change it covers.
    pub fn classify(dz: f32) -> Self {
        let dz = dz.abs();
        if dz <= 1.0 {
            Stride::Walk
        } else if dz <= 2.0 {
            Stride::Hop
        } else {
            Stride::Jump
        }
    }

    #[inline]
    pub fn is_airborne(self) -> bool {
        !matches!(self, Stride::Walk)
    }
}

impl WalkingConfig {
    /// Whether a walker may step from `from` onto the adjacent `to`.
    pub(crate) fn can_step(&self, ground: &dyn Ground, from: GridPos, to: GridPos) -> bool {
        match (ground.cell_height(from), ground.cell_height(to)) {
            (Some(a), Some(b)) => (b - a).abs() <= self.jump,
            _ => false,
        }
    }
}

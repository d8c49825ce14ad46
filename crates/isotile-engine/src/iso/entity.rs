use core::fmt;
use std::sync::Arc;

use crate::coords::{Rect, Vec2, Vec3};

use super::IsoProjection;

/// Vertical extent of an entity as a function of the horizontal offset from its center.
#[derive(Clone)]
pub enum HeightProfile {
    Constant(f32),
    Custom(Arc<dyn Fn(Vec2) -> f32 + Send + Sync>),
}

impl HeightProfile {
    #[inline]
    pub fn at(&self, offset: Vec2) -> f32 {
        match self {
            HeightProfile::Constant(h) => *h,
            HeightProfile::Custom(f) => f(offset),
        }
    }

    pub fn custom(f: impl Fn(Vec2) -> f32 + Send + Sync + 'static) -> Self {
        HeightProfile::Custom(Arc::new(f))
    }
}

impl Default for HeightProfile {
    fn default() -> Self {
        HeightProfile::Constant(1.0)
    }
}

impl fmt::Debug for HeightProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HeightProfile::Constant(h) => f.debug_tuple("Constant").field(h).finish(),
            HeightProfile::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// Anything placed in iso space: a tile, an actor, an effect.
///
/// `bounds` is the sprite rectangle relative to the entity's projected anchor,
/// as reported by whatever renders it.
///
/// `revision` increments on every effective position or bounds change; owners
/// poll it instead of subscribing to change events.
#[derive(Debug, Clone, Default)]
pub struct Entity {
    position: Vec3,
    height: HeightProfile,
    bounds: Rect,
    revision: u64,
}

impl Entity {
    pub fn new(position: Vec3) -> Self {
        Self { position, ..Self::default() }
    }

    pub fn with_height(mut self, height: HeightProfile) -> Self {
        self.height = height;
        self
    }

    pub fn with_bounds(mut self, bounds: Rect) -> Self {
        self.bounds = bounds;
        self
    }

    #[inline]
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Moves the entity. Returns `false` (and leaves the revision alone) when
    /// `position` equals the current one.
    pub fn set_position(&mut self, position: Vec3) -> bool {
        if self.position == position {
            return false;
        }
        self.position = position;
        self.revision = self.revision.wrapping_add(1);
        true
    }

    #[inline]
    pub fn height(&self, offset: Vec2) -> f32 {
        self.height.at(offset)
    }

    #[inline]
    pub fn local_bounds(&self) -> Rect {
        self.bounds
    }

    pub fn set_local_bounds(&mut self, bounds: Rect) {
        if self.bounds != bounds {
            self.bounds = bounds;
            self.revision = self.revision.wrapping_add(1);
        }
    }

    #[inline]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    #[inline]
    pub fn screen_position(&self, projection: IsoProjection) -> Vec2 {
        projection.project(self.position)
    }

    /// Sprite rectangle in screen space.
    #[inline]
    pub fn global_bounds(&self, projection: IsoProjection) -> Rect {
        self.bounds.translated(self.screen_position(projection))
    }
}

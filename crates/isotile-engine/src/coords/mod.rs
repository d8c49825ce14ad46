//! Coordinate and geometry types shared across the engine.
//!
//! Two spaces are in play:
//! - iso space: `Vec3` world coordinates and `GridPos` tile cells, +Z up
//! - screen space: `Vec2` / `Rect` in logical pixels, origin top-left, +Y down
//!
//! `iso::IsoProjection` maps the former onto the latter.

mod grid;
mod rect;
mod vec2;
mod vec3;

pub use grid::GridPos;
pub use rect::Rect;
pub use vec2::Vec2;
pub use vec3::Vec3;

//! Depth-ordered scene buffer.
//!
//! Responsibilities:
//! - keep a "draws-before" graph over registered entities whose screen bounds overlap
//! - resolve moved entities incrementally (partial sort) or wholesale (full sort)
//! - hand the resulting back-to-front order to a `DrawTarget`
//!
//! Known limitation: the occlusion test is not a strict total order, so a set of
//! entities with custom height profiles can in principle produce a cycle. Cycles
//! are detected and reported in `SortStats::cycles`; the affected entities are
//! still emitted, but their relative order is whatever the traversal reached first.

mod buffer;
mod draw;
mod node;
mod order;
mod topo;

pub use buffer::{SceneBuffer, SceneBufferConfig, SortKind, SortStats};
pub use draw::{DrawInstance, DrawTarget, InstanceBuffer, Transform};
pub use order::draws_over;

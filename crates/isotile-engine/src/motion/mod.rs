//! Time-parametrized motion curves.
//!
//! A curve maps relative time `t ∈ [0, 1]` to an iso-space position. The
//! endpoints are returned verbatim, so a mover that plays a curve to `t = 1`
//! lands exactly on its destination.

mod arc;
mod function;

pub use arc::{ParabolicArc, ARC_CLEARANCE};
pub use function::{Linear, MotionFunction};

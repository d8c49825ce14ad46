//! Frame-driven movement of one entity.
//!
//! Responsibilities:
//! - advance a target entity one frame at a time towards a destination or along a curve
//! - keep grounded movers glued to the terrain surface
//! - turn `move_to` requests into strides through a movement policy (direct or walking)
//!
//! Entities and ground are not owned here: every call that moves something takes a
//! [`MoveCtx`] borrowing them for its duration.

mod driver;
mod error;
mod policy;

pub use driver::{Mobility, MobilityConfig, MobilityEvent, MoveCtx};
pub use error::MobilityError;
pub use policy::{MobilityPolicy, Stride, WalkingConfig};

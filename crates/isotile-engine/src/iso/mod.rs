//! Positionable entities and the isometric projection.
//!
//! Entities live in an [`EntityStore`] owned by the scene. Nothing outside the
//! store holds an entity by reference; buffers and movers refer to entities by
//! [`EntityId`] and look them up when they need them.

mod entity;
mod projection;
mod store;

pub use entity::{Entity, HeightProfile};
pub use projection::IsoProjection;
pub use store::{EntityId, EntityStore};

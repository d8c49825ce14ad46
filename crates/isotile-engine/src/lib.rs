//! Isotile engine crate.
//!
//! Headless core of an isometric tile scene: entities in iso space, the
//! depth-ordered buffer that decides painter's order, grid path search, motion
//! curves, and the frame-driven movers that walk entities over terrain.
//!
//! Rendering is not done here. `scene::DrawTarget` receives the ordered draw
//! calls; `scene::InstanceBuffer` packs them for an upload.

pub mod coords;
pub mod iso;
pub mod logging;
pub mod mobility;
pub mod motion;
pub mod path;
pub mod scene;
pub mod terrain;
pub mod time;

mod stage;

pub use stage::{MoverId, Stage, StageConfig};

//! Time subsystem.
//!
//! Three layers, each usable on its own:
//! - `FrameClock` turns wall-clock time into clamped per-frame deltas
//! - `Ticker` turns deltas into whole logical steps at a fixed framerate
//! - `Scheduler` decides which tick sources receive a delta, and in what order

mod frame_clock;
mod scheduler;
mod ticker;

pub use frame_clock::{FrameClock, FrameTime};
pub use scheduler::Scheduler;
pub use ticker::{Ticker, DEFAULT_FRAMERATE};

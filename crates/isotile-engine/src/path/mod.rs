//! Grid path search.
//!
//! Breadth-first over 4-connected integer cells. Validity of each step is
//! entirely up to the caller, which keeps terrain rules (height, occupancy,
//! map bounds) out of the search itself.

mod search;

pub use search::{shortest_path, shortest_path_unbounded};

//! Axis-facing layout surface.

pub mod layout;

pub use layout::{MAX_MAJOR_TICKS, MIN_MAJOR_TICKS, TickLayout};

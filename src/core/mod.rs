//! Core tick arithmetic: nice numbers, bound snapping, unit resolution and
//! tick generation.

pub mod format;
pub mod generator;
pub mod nice;
pub mod provider;
pub mod range;
pub mod snap;
pub(crate) mod unit;

pub use format::{FormatSpec, TickFormat, TimeUnit};
pub use generator::{Tick, TickFactory};
pub use provider::{LabelExtent, ScaleProvider};
pub use range::Range;

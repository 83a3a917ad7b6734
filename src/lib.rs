//! Axis tick generation and layout.
//!
//! `ticks-rs` computes "nice" major and minor tick marks for chart axes:
//! linear, logarithmic, date and index-based scales, forward or reversed,
//! with label formatting, pixel placement and collision handling. The
//! engine is renderer-agnostic; the host axis describes itself through the
//! [`ScaleProvider`] trait and receives values, labels and pixel positions
//! back from [`TickLayout`].
//!
//! ```
//! use ticks_rs::{LabelExtent, Range, ScaleProvider, TickLayout};
//!
//! struct FixedFont;
//!
//! impl ScaleProvider for FixedFont {
//!     fn measure_label(&self, text: &str) -> LabelExtent {
//!         LabelExtent::new(7 * text.len() as i32, 12)
//!     }
//! }
//!
//! let scale = FixedFont;
//! let mut layout = TickLayout::new(&scale);
//! layout.update(Range::new(0.0, 1.0), 400).unwrap();
//! assert!(layout.major_count() >= 2);
//! ```

pub mod api;
pub mod core;
pub mod error;
pub mod telemetry;

pub use crate::api::{MAX_MAJOR_TICKS, MIN_MAJOR_TICKS, TickLayout};
pub use crate::core::{
    FormatSpec, LabelExtent, Range, ScaleProvider, Tick, TickFactory, TickFormat, TimeUnit,
};
pub use crate::error::{ScaleError, ScaleResult};

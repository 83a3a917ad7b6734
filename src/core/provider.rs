//! Host-scale capability surface.
//!
//! The layout engine is deliberately ignorant of any particular widget
//! toolkit. Everything it needs from the axis it is ticking, geometry,
//! label measurement and mode flags, comes through [`ScaleProvider`].

use super::format::{TimeUnit, format_default};

/// Pixel extent of a rendered label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LabelExtent {
    pub width: i32,
    pub height: i32,
}

impl LabelExtent {
    #[must_use]
    pub fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }
}

/// What the host axis tells the tick engine about itself.
///
/// Only [`measure_label`](Self::measure_label) is mandatory; every other
/// method defaults to the behavior of a plain horizontal linear axis.
pub trait ScaleProvider {
    /// Pixel extent of `text` in the axis font.
    fn measure_label(&self, text: &str) -> LabelExtent;

    /// Logarithmic value axis. Requires strictly positive bounds.
    fn is_log_scale_enabled(&self) -> bool {
        false
    }

    /// Values are unix timestamps in seconds.
    fn is_date_enabled(&self) -> bool {
        false
    }

    /// Values are category indices; ticks land on whole numbers only.
    fn is_index_based(&self) -> bool {
        false
    }

    fn is_horizontal(&self) -> bool {
        true
    }

    /// Whether the effective range may widen so ticks land exactly on both
    /// ends of the axis.
    fn has_ticks_at_ends(&self) -> bool {
        false
    }

    /// Minimum pixel spacing between neighbouring major ticks.
    fn major_tick_step_hint(&self) -> i32 {
        if self.is_horizontal() { 40 } else { 30 }
    }

    /// Minimum pixel spacing between neighbouring minor ticks.
    fn minor_tick_step_hint(&self) -> i32 {
        4
    }

    /// Whether tick values pass through [`label_value`](Self::label_value)
    /// before formatting.
    fn is_label_customised(&self) -> bool {
        false
    }

    /// Maps a tick value to the value actually labelled, for axes whose
    /// displayed quantity differs from the plotted one.
    fn label_value(&self, value: f64) -> f64 {
        value
    }

    /// Formats a tick label in the host's own style.
    fn format(&self, value: f64) -> String {
        format_default(value)
    }

    /// Preferred unit for date-mode format patterns.
    fn time_unit(&self) -> TimeUnit {
        TimeUnit::default()
    }
}

//! Tick unit resolution: choosing a nice spacing and graph bounds for a
//! requested range and tick budget.

use tracing::debug;

use super::format::FormatSpec;
use super::nice::{floor_log10, integral_ratio, max_magnitude, nice_num, sci_parts};
use super::snap::{round_down, round_up};

/// Relative precision floor: a unit at or below this fraction of the bound
/// magnitude cannot separate adjacent f64 values into distinct ticks.
pub(crate) const REL_ERROR: f64 = 1e-15;

/// A range smaller than this fraction of its magnitude is treated as
/// collapsed.
const RANGE_EPSILON: f64 = 1e-20;

/// Bound order of magnitude beyond which labels switch to exponential
/// notation.
pub(crate) const DIGITS_UPPER_LIMIT: i32 = 6;
pub(crate) const DIGITS_LOWER_LIMIT: i32 = -6;

/// Decade clamps keeping log ticks inside f64 territory.
const LOWEST_LOG_10: i32 = -323;
const HIGHEST_LOG_10: i32 = 308;

/// Stand-in order of magnitude for a zero bound, acting as log10(0).
const ZERO_ORDER: i32 = -1_000;

/// Resolved spacing for a linear axis.
#[derive(Debug, Clone, Copy)]
pub(crate) struct UnitResolution {
    /// Signed step between consecutive ticks; negative on a reversed range.
    pub tick_unit: f64,
    /// Bound of the first tick, in axis order.
    pub graph_min: f64,
    /// Bound of the last tick, in axis order.
    pub graph_max: f64,
    /// Number of steps between `graph_min` and `graph_max`.
    pub intervals: i64,
    pub format: FormatSpec,
    pub reversed: bool,
}

/// Resolved spacing for a logarithmic axis, expressed in decade exponents.
#[derive(Debug, Clone, Copy)]
pub(crate) struct LogUnitResolution {
    /// Signed decade step between consecutive ticks.
    pub decade_unit: i64,
    /// Decade exponent of the first tick, in axis order.
    pub graph_min: f64,
    /// Decade exponent of the last tick, in axis order.
    pub graph_max: f64,
    pub intervals: i64,
    pub format: FormatSpec,
    pub reversed: bool,
}

/// Chooses a nice tick unit and snapped bounds for a linear range.
///
/// With `allow_bounds_override` the bounds extend outward to clean
/// multiples of the unit; otherwise the requested bounds are kept and ticks
/// may start off-grid.
///
/// Returns `None` when no usable ticks exist: non-finite input, a range
/// collapsed below f64 resolution, or a unit too small to separate
/// adjacent representable values.
pub(crate) fn resolve_linear(
    min: f64,
    mut max: f64,
    max_ticks: i64,
    allow_bounds_override: bool,
) -> Option<UnitResolution> {
    if !min.is_finite() || !max.is_finite() {
        return None;
    }
    if min == max {
        max += 1.0;
        if min == max {
            return None;
        }
        debug!(min, "degenerate range widened upward by one unit");
    }

    let reversed = max < min;
    let (lo, hi) = if reversed { (max, min) } else { (min, max) };
    // Both bounds are finite, so an infinite span can only mean the
    // subtraction itself overflowed.
    let range = hi - lo;
    let range = if range.is_finite() { range } else { f64::MAX };
    let magnitude = max_magnitude(min, max);
    if magnitude <= f64::MIN_POSITIVE || range < RANGE_EPSILON * magnitude {
        return None;
    }

    let nice_range = nice_num(range, false);
    let mut n_ticks = (max_ticks - 1).max(1);
    // Sign comparison, not a product: the product of two subnormal-scale
    // bounds underflows to zero.
    if (min < 0.0 && max > 0.0) || (min > 0.0 && max < 0.0) {
        // A straddling range earns one extra tick for the second snapped
        // boundary.
        n_ticks += 1;
    }

    let mut unit;
    let mut graph_min;
    let mut graph_max;
    let mut intervals;
    loop {
        loop {
            unit = nice_num(nice_range.divided_by(n_ticks), true);
            if integral_ratio(nice_range, unit) > max_ticks && n_ticks > 1 {
                n_ticks -= 1;
            } else {
                break;
            }
        }
        let unit_f = unit.as_f64();
        if unit_f <= REL_ERROR * magnitude {
            debug!(unit = unit_f, magnitude, "tick unit below f64 resolution");
            return None;
        }
        if allow_bounds_override {
            graph_min = round_down(lo, unit_f);
            graph_max = round_up(hi, unit_f);
            // Normalize a negative zero out of the snapped bounds.
            if graph_min == 0.0 {
                graph_min = 0.0;
            }
            if graph_max == 0.0 {
                graph_max = 0.0;
            }
        } else {
            graph_min = lo;
            graph_max = hi;
        }

        let factor = match max_magnitude(graph_min, graph_max) {
            0.0 => 1.0,
            f => f,
        };
        intervals = ((graph_max / factor - graph_min / factor) / (unit_f / factor)).round() as i64;
        if intervals > max_ticks && n_ticks > 1 {
            n_ticks -= 1;
        } else {
            break;
        }
    }

    let unit_f = unit.as_f64();
    let (graph_min, graph_max) = if reversed {
        (graph_max, graph_min)
    } else {
        (graph_min, graph_max)
    };
    let tick_unit = if reversed { -unit_f } else { unit_f };

    let d = unit.label_scale();
    let p = order_of(graph_min).max(order_of(graph_max));
    let format = if p <= DIGITS_LOWER_LIMIT || p >= DIGITS_UPPER_LIMIT {
        FormatSpec {
            precision: (d + p).max(0) as u32,
            exponential: true,
        }
    } else {
        FormatSpec {
            precision: d.max(0) as u32,
            exponential: false,
        }
    };

    debug!(
        tick_unit,
        graph_min, graph_max, intervals, "resolved linear tick unit"
    );
    Some(UnitResolution {
        tick_unit,
        graph_min,
        graph_max,
        intervals,
        format,
        reversed,
    })
}

fn order_of(bound: f64) -> i32 {
    if bound == 0.0 {
        ZERO_ORDER
    } else {
        floor_log10(bound)
    }
}

/// Chooses a decade unit and decade bounds for a logarithmic range.
///
/// Both bounds must be positive; the caller checks that before taking
/// logarithms here.
pub(crate) fn resolve_log(
    min: f64,
    max: f64,
    max_ticks: i64,
    allow_bounds_override: bool,
) -> LogUnitResolution {
    let reversed = min > max;
    let (lo, hi) = if reversed { (max, min) } else { (min, max) };

    let mut graph_min = lo.log10();
    let mut graph_max = hi.log10();
    let lo_decade = floor_log10(lo).max(LOWEST_LOG_10);
    let hi_decade = ceil_log10(hi).min(HIGHEST_LOG_10);
    let decades = i64::from(hi_decade) - i64::from(lo_decade);

    let mut unit = ((decades + max_ticks - 1) / max_ticks.max(1)).max(1);
    let intervals;
    if allow_bounds_override {
        graph_min = f64::from(lo_decade);
        intervals = (decades + unit - 1) / unit;
        if hi_decade < HIGHEST_LOG_10 {
            graph_max = (intervals * unit + i64::from(lo_decade)) as f64;
        } else if lo_decade > LOWEST_LOG_10 {
            graph_max = f64::from(hi_decade);
        } else {
            // Clamped on both ends: shrink the unit instead of pushing a
            // bound past the representable decades.
            graph_max = f64::from(hi_decade);
            unit = (decades / intervals.max(1)).max(1);
            graph_min = (i64::from(hi_decade) - intervals * unit) as f64;
        }
    } else {
        intervals = ((graph_max - graph_min).floor() as i64) / unit;
    }

    let (graph_min, graph_max) = if reversed {
        (graph_max, graph_min)
    } else {
        (graph_min, graph_max)
    };
    let decade_unit = if reversed { -unit } else { unit };

    let format = if lo_decade < -3 || hi_decade > 3 || decades > 6 {
        FormatSpec {
            precision: 0,
            exponential: true,
        }
    } else {
        FormatSpec {
            precision: (-lo_decade).max(0) as u32,
            exponential: false,
        }
    };

    debug!(
        decade_unit,
        graph_min, graph_max, intervals, "resolved log tick unit"
    );
    LogUnitResolution {
        decade_unit,
        graph_min,
        graph_max,
        intervals,
        format,
        reversed,
    }
}

fn ceil_log10(value: f64) -> i32 {
    let parts = sci_parts(value);
    if parts.digits == "1" {
        parts.exponent
    } else {
        parts.exponent + 1
    }
}

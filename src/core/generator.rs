//! Tick generation for linear, logarithmic and index-based axes.

use tracing::trace;

use crate::error::{ScaleError, ScaleResult};

use super::format::{self, FormatSpec, TickFormat};
use super::nice::{max_magnitude, nice_num};
use super::provider::ScaleProvider;
use super::unit::{
    DIGITS_LOWER_LIMIT, DIGITS_UPPER_LIMIT, REL_ERROR, resolve_linear, resolve_log,
};

/// One generated major tick.
#[derive(Debug, Clone, PartialEq)]
pub struct Tick {
    value: f64,
    text: String,
    position: f64,
    text_position: i32,
}

impl Tick {
    pub(crate) fn new(value: f64, text: String) -> Self {
        Self {
            value,
            text,
            position: 0.0,
            text_position: 0,
        }
    }

    /// Data-space value the tick marks.
    #[must_use]
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Rendered label; empty when the label is suppressed.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Normalized position along the axis, `0.0` at the head end.
    #[must_use]
    pub fn position(&self) -> f64 {
        self.position
    }

    /// Pixel coordinate of the label origin along the axis.
    #[must_use]
    pub fn text_position(&self) -> i32 {
        self.text_position
    }

    pub(crate) fn set_text(&mut self, text: String) {
        self.text = text;
    }

    pub(crate) fn clear_text(&mut self) {
        self.text.clear();
    }

    pub(crate) fn set_text_position(&mut self, position: i32) {
        self.text_position = position;
    }
}

/// Generates major ticks for one axis configuration.
///
/// A factory is cheap and single-purpose; the layout engine creates one per
/// update and queries it for the reversal flag afterwards.
pub struct TickFactory<'a> {
    format: TickFormat,
    scale: Option<&'a dyn ScaleProvider>,
    spec: Option<FormatSpec>,
    reversed: bool,
}

impl<'a> TickFactory<'a> {
    #[must_use]
    pub fn new(format: TickFormat, scale: Option<&'a dyn ScaleProvider>) -> Self {
        Self {
            format,
            scale,
            spec: None,
            reversed: false,
        }
    }

    /// Whether the last generated range ran high-to-low.
    #[must_use]
    pub fn is_reversed(&self) -> bool {
        self.reversed
    }

    fn tick_text(&self, value: f64) -> String {
        if value.is_nan() {
            return String::new();
        }
        match self.format {
            TickFormat::Auto => match self.spec {
                Some(spec) => spec.apply(value),
                None => format::format_default(value),
            },
            TickFormat::Exponent => {
                let precision = self.spec.map_or(6, |spec| spec.precision);
                format::format_exponential(value, precision)
            }
            TickFormat::RoundAndChop => format::format_round_chop(value),
            TickFormat::SiUnits => format::format_si(value),
            TickFormat::Custom => match self.scale {
                Some(scale) => scale.format(value),
                None => format::format_default(value),
            },
        }
    }

    /// Generates linear ticks for the range `min..max` under a budget of
    /// `max_ticks`.
    ///
    /// `allow_bounds_override` lets the first and last tick land outside the
    /// requested range on clean multiples of the unit; `tight` drops any
    /// tick outside the range instead. Returns an empty list when the range
    /// cannot produce usable ticks.
    #[must_use]
    pub fn generate_ticks(
        &mut self,
        min: f64,
        max: f64,
        max_ticks: usize,
        allow_bounds_override: bool,
        tight: bool,
    ) -> Vec<Tick> {
        self.reversed = max < min;
        let Some(res) = resolve_linear(min, max, max_ticks as i64, allow_bounds_override) else {
            return Vec::new();
        };
        self.reversed = res.reversed;
        self.spec = Some(res.format);

        let mut ticks: Vec<Tick> = Vec::with_capacity(res.intervals.max(0) as usize + 1);
        for i in 0..=res.intervals {
            let mut p = res.graph_min + i as f64 * res.tick_unit;
            if (p / res.tick_unit).abs() < REL_ERROR {
                // Keep zero positive so it labels as "0", not "-0".
                p = 0.0;
            }
            if p.is_infinite() {
                continue;
            }
            if !tight || in_range(p, min, max, res.reversed) {
                ticks.push(Tick::new(p, self.tick_text(p)));
            }
        }

        let imax = ticks.len();
        if imax > 1 {
            if !tight && allow_bounds_override {
                let last = &mut ticks[imax - 1];
                let short = if res.reversed {
                    last.value > max
                } else {
                    last.value < max
                };
                if short {
                    last.value = res.graph_max;
                    last.text = self.tick_text(res.graph_max);
                }
            }
        } else if max_ticks > 1 {
            if ticks.is_empty() {
                ticks.push(Tick::new(min, self.tick_text(min)));
            }
            if ticks.len() == 1 {
                let text = self.tick_text(max);
                if ticks[0].text != text {
                    ticks.push(Tick::new(max, text));
                }
            }
        }

        if ticks.is_empty() {
            return ticks;
        }
        let imax = ticks.len();
        let lo = if tight || cmp(res.reversed, min, res.graph_min) {
            min
        } else {
            ticks[0].value
        };
        let hi = if tight || cmp(!res.reversed, max, res.graph_max) {
            max
        } else if imax > 1 {
            ticks[imax - 1].value
        } else {
            lo
        };
        let factor = match max_magnitude(lo, hi) {
            0.0 => 1.0,
            f => f,
        };
        let lo = lo / factor;
        let mut span = if imax > 1 { hi / factor - lo } else { 1.0 };
        if span == 0.0 || !span.is_finite() {
            span = 1.0;
        }
        for tick in &mut ticks {
            tick.position = (tick.value / factor - lo) / span;
        }
        trace!(count = imax, "generated linear ticks");
        ticks
    }

    /// Generates decade ticks for a logarithmic axis.
    ///
    /// # Errors
    ///
    /// Returns [`ScaleError::NonPositiveLogRange`] when either bound is zero
    /// or negative.
    pub fn generate_log_ticks(
        &mut self,
        min: f64,
        max: f64,
        max_ticks: usize,
        allow_bounds_override: bool,
        tight: bool,
    ) -> ScaleResult<Vec<Tick>> {
        if min <= 0.0 || max <= 0.0 || !min.is_finite() || !max.is_finite() {
            return Err(ScaleError::NonPositiveLogRange {
                lower: min,
                upper: max,
            });
        }
        let res = resolve_log(min, max, max_ticks as i64, allow_bounds_override);
        self.reversed = res.reversed;
        self.spec = Some(res.format);

        let mut ticks: Vec<Tick> = Vec::new();
        let mut p = res.graph_min;
        for _ in 0..=res.intervals {
            let x = 10f64.powf(p);
            if !tight || in_range_log(x, min, max, res.reversed) {
                ticks.push(Tick::new(x, self.tick_text(x)));
            }
            p += res.decade_unit as f64;
        }

        if (ticks.len() as i64) < res.intervals {
            let x = 10f64.powf(p);
            if !tight || in_range_log(x, min, max, res.reversed) {
                ticks.push(Tick::new(x, self.tick_text(x)));
            }
        }
        if ticks.is_empty() && max_ticks > 1 {
            let decade = if res.reversed {
                res.graph_max
            } else {
                res.graph_min
            };
            let x = 10f64.powf(decade);
            ticks.push(Tick::new(x, self.tick_text(x)));
        }
        if ticks.len() == 1 && !tight && allow_bounds_override {
            let end = 10f64.powf(if res.reversed {
                res.graph_min
            } else {
                res.graph_max
            });
            let text = self.tick_text(end);
            if ticks[0].text != text {
                ticks.push(Tick::new(end, text));
            }
        }

        if !ticks.is_empty() {
            let imax = ticks.len();
            let (lo, hi) = if res.decade_unit > 0 {
                (
                    if tight { min.ln() } else { ticks[0].value.ln() },
                    if tight {
                        max.ln()
                    } else {
                        ticks[imax - 1].value.ln()
                    },
                )
            } else {
                (
                    if tight {
                        max.ln()
                    } else {
                        ticks[imax - 1].value.ln()
                    },
                    if tight { min.ln() } else { ticks[0].value.ln() },
                )
            };
            let mut span = hi - lo;
            if span == 0.0 || !span.is_finite() {
                span = 1.0;
            }
            for tick in &mut ticks {
                let fraction = (tick.value.ln() - lo) / span;
                tick.position = if res.decade_unit > 0 {
                    fraction
                } else {
                    1.0 - fraction
                };
            }
        }
        trace!(count = ticks.len(), "generated log ticks");
        Ok(ticks)
    }

    /// Generates whole-number ticks for an index-based axis.
    ///
    /// The unit is always a positive integer so every tick lands on a
    /// category index; a range narrower than one index may yield a single
    /// tick or none.
    #[must_use]
    pub fn generate_index_ticks(&mut self, min: f64, max: f64, max_ticks: usize) -> Vec<Tick> {
        self.reversed = max < min;
        self.spec = None;
        if !min.is_finite() || !max.is_finite() {
            return Vec::new();
        }
        let (lo, hi) = if self.reversed { (max, min) } else { (min, max) };
        let budget = (max_ticks as i64).max(2);

        let mut divisor = budget - 1;
        let (unit, graph_min, intervals) = loop {
            let unit = nice_num((hi - lo) / divisor as f64, true)
                .as_f64()
                .floor()
                .max(1.0);
            let graph_min = ((lo / unit).ceil() * unit).ceil();
            let graph_max = ((hi / unit).floor() * unit).floor();
            let intervals = ((graph_max - graph_min) / unit).floor() as i64;
            // Keep shrinking the unit until an interval fits; a unit of one
            // is the floor and ends the search.
            if intervals < 1 && unit > 1.0 {
                divisor += 1;
            } else {
                break (unit, graph_min, intervals);
            }
        };

        let mut ticks: Vec<Tick> = Vec::new();
        let mut i = 0i64;
        while i <= intervals {
            let p = graph_min + i as f64 * unit;
            ticks.push(Tick::new(p, self.tick_text(p)));
            i += 1;
        }

        if self.format == TickFormat::Auto && !ticks.is_empty() {
            self.relabel_index_ticks(&mut ticks);
        }

        let span = if hi > lo { hi - lo } else { 1.0 };
        for tick in &mut ticks {
            tick.position = (tick.value - lo) / span;
        }
        if self.reversed {
            for tick in &mut ticks {
                tick.position = 1.0 - tick.position;
            }
            ticks.reverse();
        }
        trace!(count = ticks.len(), "generated index ticks");
        ticks
    }

    /// Index ticks in auto mode label the mapped category value, as a plain
    /// integer whenever every mapped value is integral.
    fn relabel_index_ticks(&self, ticks: &mut [Tick]) {
        match self.scale {
            Some(scale) if scale.is_label_customised() => {
                let all_ints = ticks.iter().all(|tick| {
                    let mapped = scale.label_value(tick.value);
                    mapped.is_nan() || mapped == mapped.trunc()
                });
                for tick in ticks {
                    let mapped = scale.label_value(tick.value);
                    if mapped.is_nan() {
                        tick.text.clear();
                    } else if all_ints {
                        tick.text = format!("{}", mapped as i64);
                    } else {
                        tick.text = scale.format(mapped);
                    }
                }
            }
            _ => {
                let vmin = ticks[0].value;
                let vmax = ticks[ticks.len() - 1].value;
                let readable = vmin.abs().log10() >= f64::from(DIGITS_LOWER_LIMIT)
                    || vmax.abs().log10() <= f64::from(DIGITS_UPPER_LIMIT);
                if readable {
                    for tick in ticks {
                        tick.text = format!("{}", tick.value as i64);
                    }
                }
            }
        }
    }
}

fn cmp(greater: bool, a: f64, b: f64) -> bool {
    if greater { a > b } else { a < b }
}

fn in_range(x: f64, min: f64, max: f64, reversed: bool) -> bool {
    if reversed {
        x >= max && x <= min
    } else {
        x >= min && x <= max
    }
}

fn in_range_log(x: f64, min: f64, max: f64, reversed: bool) -> bool {
    if reversed {
        x >= max - REL_ERROR && x <= min
    } else {
        x >= min - REL_ERROR && x <= max
    }
}

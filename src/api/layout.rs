//! Pixel-space tick layout.
//!
//! [`TickLayout`] drives the generation loop for one axis: it derives a tick
//! budget from the axis length, generates candidate ticks, measures and
//! places their labels, retries with fewer ticks on collision, and finally
//! fills in minor tick positions.

use smallvec::SmallVec;
use tracing::{debug, trace, warn};

use crate::core::format::{TickFormat, date_format_pattern, format_date_label};
use crate::core::generator::{Tick, TickFactory};
use crate::core::nice::nice_num;
use crate::core::provider::ScaleProvider;
use crate::core::range::Range;
use crate::core::unit::DIGITS_LOWER_LIMIT;
use crate::error::ScaleResult;

/// Hard ceiling on major ticks for any axis length.
pub const MAX_MAJOR_TICKS: i32 = 12;
/// Floor below which the collision loop stops removing ticks and starts
/// blanking labels instead.
pub const MIN_MAJOR_TICKS: i32 = 3;

/// Fraction of a space character required between neighbouring horizontal
/// labels.
const LABEL_GAP_RATIO: f64 = 0.67;

/// Magnitude (as a power of ten) beyond which the default pattern switches
/// to engineering notation.
const ENGINEERING_LIMIT: i32 = 12;
const DEFAULT_ENGINEERING_FORMAT: &str = "0.####E0";
const MAX_FRACTION_PATTERN: &str = "############.##";

/// Tick layout state for a single axis.
///
/// The layout borrows its [`ScaleProvider`] and owns the tick lists it
/// computes; an unchanged `(range, length)` input returns the cached result
/// without recomputation.
pub struct TickLayout<'a> {
    scale: &'a dyn ScaleProvider,
    format: TickFormat,
    ticks: Vec<Tick>,
    major_positions: Vec<i32>,
    minor_positions: SmallVec<[i32; 32]>,
    max_width: i32,
    max_height: i32,
    head_margin: i32,
    tail_margin: i32,
    reversed: bool,
    last_input: Option<(u64, u64, i32)>,
    last_range: Range,
}

impl<'a> TickLayout<'a> {
    #[must_use]
    pub fn new(scale: &'a dyn ScaleProvider) -> Self {
        Self {
            scale,
            format: TickFormat::Auto,
            ticks: Vec::new(),
            major_positions: Vec::new(),
            minor_positions: SmallVec::new(),
            max_width: 0,
            max_height: 0,
            head_margin: 0,
            tail_margin: 0,
            reversed: false,
            last_input: None,
            last_range: Range::new(0.0, 0.0),
        }
    }

    #[must_use]
    pub fn with_format(mut self, format: TickFormat) -> Self {
        self.format = format;
        self
    }

    /// Recomputes ticks, labels and minor ticks for `range` over an axis of
    /// `length` pixels.
    ///
    /// Returns the effective range: the requested one, or the widened one
    /// when the scale asks for ticks at both ends. Repeating a call with
    /// bit-identical inputs returns the cached result unchanged.
    ///
    /// # Errors
    ///
    /// Propagates [`crate::error::ScaleError::NonPositiveLogRange`] from a
    /// log-scale axis with a non-positive bound.
    pub fn update(&mut self, range: Range, length: i32) -> ScaleResult<Range> {
        let key = (
            range.lower().to_bits(),
            range.upper().to_bits(),
            length,
        );
        if self.last_input == Some(key) {
            trace!("layout input unchanged, reusing cached ticks");
            return Ok(self.last_range);
        }

        let lower = range.lower();
        let upper = range.upper();
        let tight = !self.scale.has_ticks_at_ends();
        let hint = self.scale.major_tick_step_hint().max(1);
        let budget = (length / hint + 1).clamp(MIN_MAJOR_TICKS, MAX_MAJOR_TICKS);

        let mut num_ticks = budget;
        loop {
            let mut factory = TickFactory::new(self.format, Some(self.scale));
            self.ticks = if self.scale.is_log_scale_enabled() {
                factory.generate_log_ticks(lower, upper, num_ticks as usize, true, tight)?
            } else if self.scale.is_index_based() {
                factory.generate_index_ticks(lower, upper, num_ticks as usize)
            } else {
                factory.generate_ticks(lower, upper, num_ticks as usize, true, tight)
            };
            self.reversed = factory.is_reversed();

            if self.scale.is_date_enabled() {
                self.apply_date_labels(lower, upper);
            }
            self.measure_labels(lower);

            let at_floor =
                self.ticks.len() as i32 <= MIN_MAJOR_TICKS || num_ticks <= MIN_MAJOR_TICKS;
            if self.place_labels(length, at_floor) {
                break;
            }
            debug!(num_ticks, "labels collide, retrying with fewer ticks");
            num_ticks -= 1;
        }

        self.update_minor_ticks(length);

        let effective = if self.scale.has_ticks_at_ends() && self.ticks.len() > 1 {
            let first = self.ticks[0].value();
            let last = self.ticks[self.ticks.len() - 1].value();
            if self.reversed {
                Range::new(first.max(lower), last.min(upper))
            } else {
                Range::new(first.min(lower), last.max(upper))
            }
        } else {
            range
        };

        self.last_input = Some(key);
        self.last_range = effective;
        debug!(
            majors = self.ticks.len(),
            minors = self.minor_positions.len(),
            "layout updated"
        );
        Ok(effective)
    }

    fn apply_date_labels(&mut self, lower: f64, upper: f64) {
        let pattern = date_format_pattern((upper - lower).abs(), self.scale.time_unit());
        for tick in &mut self.ticks {
            tick.set_text(format_date_label(tick.value(), pattern));
        }
    }

    /// Measures every label and derives the head and tail margins. With no
    /// ticks at all the margin falls back to a label for the range bound.
    fn measure_labels(&mut self, lower: f64) {
        self.max_width = 0;
        self.max_height = 0;
        for tick in &self.ticks {
            if tick.text().is_empty() {
                continue;
            }
            let extent = self.scale.measure_label(tick.text());
            self.max_width = self.max_width.max(extent.width);
            self.max_height = self.max_height.max(extent.height);
        }
        if self.max_width == 0 && self.max_height == 0 {
            let extent = self.scale.measure_label(&self.scale.format(lower));
            self.max_width = extent.width;
            self.max_height = extent.height;
        }
        let margin = if self.scale.is_horizontal() {
            (self.max_width + 1) / 2
        } else {
            (self.max_height + 1) / 2
        };
        self.head_margin = margin;
        self.tail_margin = margin;
    }

    /// Assigns pixel positions and label origins.
    ///
    /// Returns `false` when two labels collide and the caller still has
    /// budget to retry with fewer ticks. At the floor, colliding labels are
    /// blanked instead and the layout is accepted.
    fn place_labels(&mut self, length: i32, at_floor: bool) -> bool {
        let horizontal = self.scale.is_horizontal();
        let total = self.head_margin + length + self.tail_margin;
        let gap = if horizontal {
            (f64::from(self.scale.measure_label(" ").width) * LABEL_GAP_RATIO) as i32
        } else {
            0
        };
        let minus_width = self.scale.measure_label("-").width;

        let mut ticks = std::mem::take(&mut self.ticks);
        self.major_positions.clear();
        let mut prev_end: Option<i32> = None;
        let mut placed = true;
        for tick in &mut ticks {
            let pixel =
                self.head_margin + (tick.position() * f64::from(length)).round() as i32;
            self.major_positions.push(pixel);
            if tick.text().is_empty() {
                tick.set_text_position(pixel);
                continue;
            }

            let extent = self.scale.measure_label(tick.text());
            let size = if horizontal { extent.width } else { extent.height };
            let origin = (pixel - size / 2).clamp(0, (total - size).max(0));
            tick.set_text_position(origin);

            // Labels only run along the axis on a horizontal layout, so only
            // there can neighbours collide.
            if horizontal {
                let mut start = origin;
                if tick.text().starts_with('-') {
                    // The minus sign carries no digit, so it may intrude
                    // into the gap.
                    start += minus_width;
                }
                if let Some(end) = prev_end {
                    if start < end + gap {
                        if !at_floor {
                            placed = false;
                            break;
                        }
                        warn!(label = tick.text(), "blanking label at minimum tick count");
                        tick.clear_text();
                        continue;
                    }
                }
                prev_end = Some(origin + size);
            }
        }
        self.ticks = ticks;
        placed
    }

    fn update_minor_ticks(&mut self, length: i32) {
        self.minor_positions.clear();
        let n = self.major_positions.len();
        if n < 2 {
            return;
        }
        let end = self.head_margin + length;

        for w in 0..n - 1 {
            let p0 = self.major_positions[w];
            let p1 = self.major_positions[w + 1];
            if p1 <= p0 {
                continue;
            }
            let gap = p1 - p0;
            for fraction in self.minor_fractions(
                self.ticks[w].value(),
                self.ticks[w + 1].value(),
                gap,
            ) {
                let p = p0 + (fraction * f64::from(gap)).round() as i32;
                if p > p0 && p < p1 {
                    self.minor_positions.push(p);
                }
            }
        }

        // One extra pattern of minors beyond each end, clipped to the axis.
        // The phantom neighbour extends the grid linearly, or by another
        // decade step on a log axis.
        let log = self.scale.is_log_scale_enabled();
        let first_gap = self.major_positions[1] - self.major_positions[0];
        if first_gap > 0 {
            let base = self.major_positions[0] - first_gap;
            let v0 = self.ticks[0].value();
            let v1 = self.ticks[1].value();
            let before = if log && v1 != 0.0 {
                v0 * v0 / v1
            } else {
                v0 - (v1 - v0)
            };
            for fraction in self.minor_fractions(before, v0, first_gap) {
                let p = base + (fraction * f64::from(first_gap)).round() as i32;
                if p >= 0 && p < self.major_positions[0] {
                    self.minor_positions.push(p);
                }
            }
        }
        let last_gap = self.major_positions[n - 1] - self.major_positions[n - 2];
        if last_gap > 0 {
            let base = self.major_positions[n - 1];
            let v0 = self.ticks[n - 1].value();
            let v1 = self.ticks[n - 2].value();
            let beyond = if log && v1 != 0.0 {
                v0 * v0 / v1
            } else {
                v0 + (v0 - v1)
            };
            for fraction in self.minor_fractions(v0, beyond, last_gap) {
                let p = base + (fraction * f64::from(last_gap)).round() as i32;
                if p > base && p < end {
                    self.minor_positions.push(p);
                }
            }
        }
        self.minor_positions.sort_unstable();
    }

    /// Fractional offsets of the minor ticks inside one major interval.
    fn minor_fractions(&self, lo_value: f64, hi_value: f64, pixel_gap: i32) -> Vec<f64> {
        if self.scale.is_log_scale_enabled() && is_decade_pair(lo_value, hi_value) {
            return (2..=9).map(|j| f64::from(j).log10()).collect();
        }
        let count = if self.scale.is_date_enabled() {
            6
        } else if self.scale.is_index_based() {
            let span = (hi_value - lo_value).abs().round() as i64;
            let hint = self.scale.minor_tick_step_hint().max(1);
            // One minor per index, unless that packs them tighter than the
            // pixel hint allows.
            if (1..=5).contains(&span) && pixel_gap / span as i32 >= hint {
                span as i32
            } else {
                self.minor_ladder(pixel_gap)
            }
        } else {
            self.minor_ladder(pixel_gap)
        };
        (1..count).map(|j| f64::from(j) / f64::from(count)).collect()
    }

    fn minor_ladder(&self, pixel_gap: i32) -> i32 {
        let hint = self.scale.minor_tick_step_hint().max(1);
        if pixel_gap / 5 >= hint {
            5
        } else if pixel_gap / 4 >= hint {
            4
        } else {
            2
        }
    }

    /// Default numeric format pattern for a range, in decimal-format syntax.
    #[must_use]
    pub fn default_format_pattern(&self, range: Range) -> String {
        if self.scale.is_date_enabled() {
            return date_format_pattern(range.span().abs(), self.scale.time_unit()).to_string();
        }
        let engineering = |v: f64| {
            if v == 0.0 {
                return false;
            }
            let power = v.abs().log10();
            power >= f64::from(ENGINEERING_LIMIT) || power < f64::from(DIGITS_LOWER_LIMIT)
        };
        if engineering(range.lower()) || engineering(range.upper()) {
            return DEFAULT_ENGINEERING_FORMAT.to_string();
        }
        let span = range.span().abs();
        if span == 0.0 || !span.is_finite() {
            return MAX_FRACTION_PATTERN.to_string();
        }
        let step = span / f64::from(MAX_MAJOR_TICKS - 1);
        let decimals = nice_num(step, true).label_scale().max(0);
        if decimals == 0 {
            return "##0".to_string();
        }
        let mut pattern = String::from("##0.00");
        for _ in 2..decimals {
            pattern.push('#');
        }
        pattern
    }

    #[must_use]
    pub fn ticks(&self) -> &[Tick] {
        &self.ticks
    }

    #[must_use]
    pub fn major_count(&self) -> usize {
        self.ticks.len()
    }

    #[must_use]
    pub fn minor_count(&self) -> usize {
        self.minor_positions.len()
    }

    /// Pixel position of major tick `index` along the axis.
    #[must_use]
    pub fn major_position(&self, index: usize) -> i32 {
        self.major_positions[index]
    }

    #[must_use]
    pub fn value(&self, index: usize) -> f64 {
        self.ticks[index].value()
    }

    #[must_use]
    pub fn label(&self, index: usize) -> &str {
        self.ticks[index].text()
    }

    /// Pixel origin of label `index`; meaningless when the label is blank.
    #[must_use]
    pub fn label_position(&self, index: usize) -> i32 {
        self.ticks[index].text_position()
    }

    /// A tick is visible when its label survived collision blanking.
    #[must_use]
    pub fn is_visible(&self, index: usize) -> bool {
        !self.ticks[index].text().is_empty()
    }

    #[must_use]
    pub fn minor_position(&self, index: usize) -> i32 {
        self.minor_positions[index]
    }

    #[must_use]
    pub fn max_label_width(&self) -> i32 {
        self.max_width
    }

    #[must_use]
    pub fn max_label_height(&self) -> i32 {
        self.max_height
    }

    #[must_use]
    pub fn head_margin(&self) -> i32 {
        self.head_margin
    }

    #[must_use]
    pub fn tail_margin(&self) -> i32 {
        self.tail_margin
    }

    #[must_use]
    pub fn is_reversed(&self) -> bool {
        self.reversed
    }
}

fn is_decade_pair(a: f64, b: f64) -> bool {
    if a == 0.0 || b == 0.0 {
        return false;
    }
    let ratio = if b.abs() > a.abs() { b / a } else { a / b };
    (ratio - 10.0).abs() < 1e-6 * 10.0
}

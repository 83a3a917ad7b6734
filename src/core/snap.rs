//! Bound snapping: rounding an axis bound down or up to a multiple of the
//! tick unit.
//!
//! The arithmetic runs in exact decimal space (`rust_decimal`) with both
//! operands rescaled by the unit's power of ten, so a bound like
//! `0.12345678901234561` snaps against a unit of `2e-17` without binary
//! floating-point drift. A remainder within `ROUND_FRACTION` of zero or of
//! the unit collapses onto the clean multiple instead of leaving a
//! near-duplicate tick at the boundary.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use tracing::debug;

use super::nice::{floor_log10, sci_parts};

/// Fraction of the unit within which a remainder counts as zero.
pub(crate) const ROUND_FRACTION: f64 = 2e-6;

/// Rounds `value` down to a multiple of `unit`.
///
/// If the clean multiple would overflow to infinity, the unrounded `value`
/// is returned instead so the graph bounds always stay finite.
#[must_use]
pub fn round_down(value: f64, unit: f64) -> f64 {
    snap(value, unit, false)
}

/// Rounds `value` up to a multiple of `unit`; same overflow fallback as
/// [`round_down`].
#[must_use]
pub fn round_up(value: f64, unit: f64) -> f64 {
    snap(value, unit, true)
}

fn snap(value: f64, unit: f64, up: bool) -> f64 {
    assert!(
        unit != 0.0 && unit.is_finite(),
        "snap unit must be finite and non-zero"
    );
    if value == 0.0 {
        return 0.0;
    }
    if !value.is_finite() {
        return value;
    }

    let negative = (value < 0.0) != (unit < 0.0);
    let value_abs = value.abs();
    let unit_abs = unit.abs();
    let shift = floor_log10(unit_abs);

    let snapped = rescaled(value_abs, -shift)
        .zip(rescaled(unit_abs, -shift))
        .and_then(|(num, den)| snap_decimal(num, den, negative, up, shift))
        .unwrap_or_else(|| snap_f64(value_abs, unit_abs, negative, up));

    if snapped.is_finite() {
        snapped
    } else {
        debug!(value, unit, "snapped bound overflowed, keeping unrounded bound");
        value
    }
}

/// Exact decimal of `x * 10^delta`, built from the shortest decimal
/// representation so no binary rounding sneaks in. `None` when the result
/// does not fit a `Decimal`.
fn rescaled(x: f64, delta: i32) -> Option<Decimal> {
    let parts = sci_parts(x);
    let exponent = i64::from(parts.exponent) + i64::from(delta);
    let (head, tail) = parts.digits.split_at(1);
    let text = if tail.is_empty() {
        format!("{head}e{exponent}")
    } else {
        format!("{head}.{tail}e{exponent}")
    };
    Decimal::from_scientific(&text).ok()
}

fn snap_decimal(num: Decimal, den: Decimal, negative: bool, up: bool, shift: i32) -> Option<f64> {
    let rem = num.checked_rem(den)?;
    let mut whole = ((num.checked_sub(rem)?).checked_div(den)?).round();
    let mut has_rem = !rem.is_zero();

    let den_f = den.to_f64()?;
    let rem_f = rem.to_f64().unwrap_or(0.0);
    if has_rem {
        if rem_f < ROUND_FRACTION * den_f {
            has_rem = false;
        } else if rem_f > (1.0 - ROUND_FRACTION) * den_f {
            has_rem = false;
            whole = whole.checked_add(Decimal::ONE)?;
        }
    }

    let multiple = |w: Decimal| -> Option<f64> { Some(unscale(w.checked_mul(den)?, shift)) };

    if !has_rem {
        let m = multiple(whole)?;
        return Some(if negative { -m } else { m });
    }

    if up {
        if negative {
            if whole.is_zero() {
                Some(0.0)
            } else {
                Some(-multiple(whole)?)
            }
        } else {
            multiple(whole.checked_add(Decimal::ONE)?)
        }
    } else if negative {
        Some(-multiple(whole.checked_add(Decimal::ONE)?)?)
    } else {
        multiple(whole)
    }
}

/// Converts `scaled * 10^shift` back to `f64` through a decimal literal, so
/// the unscaling itself cannot drift; overflow parses to infinity and is
/// handled by the caller.
fn unscale(scaled: Decimal, shift: i32) -> f64 {
    format!("{scaled}e{shift}").parse().expect("decimal literal")
}

/// Plain floating-point fallback for magnitudes outside `Decimal` range.
/// At such ratios the quotient has no fractional bits left, so the bound is
/// already a multiple of the unit to representable precision.
fn snap_f64(value_abs: f64, unit_abs: f64, negative: bool, up: bool) -> f64 {
    let q = value_abs / unit_abs;
    if !q.is_finite() || q >= 9.0e15 {
        return if negative { -value_abs } else { value_abs };
    }

    let mut whole = q.trunc();
    let mut frac = q.fract();
    if frac < ROUND_FRACTION {
        frac = 0.0;
    } else if frac > 1.0 - ROUND_FRACTION {
        frac = 0.0;
        whole += 1.0;
    }

    if frac == 0.0 {
        let m = whole * unit_abs;
        return if negative { -m } else { m };
    }
    if up {
        if negative {
            if whole == 0.0 { 0.0 } else { -whole * unit_abs }
        } else {
            (whole + 1.0) * unit_abs
        }
    } else if negative {
        -(whole + 1.0) * unit_abs
    } else {
        whole * unit_abs
    }
}

//! Nice-number rounding.
//!
//! Every tick step in the engine, linear or logarithmic, is one of the
//! mantissas {1, 2, 2.5, 5, 10} times a power of ten. `NiceNum` keeps that
//! decomposition explicit so spacing arithmetic stays in decimal space
//! instead of accumulating binary floating-point drift.

/// Shortest-representation scientific decomposition of a finite `f64`.
///
/// `digits` are the significant digits without sign or decimal point and
/// `exponent` is the power of ten of the leading digit, so the magnitude is
/// `d.dddd... x 10^exponent`. This is exact: Rust's `{:e}` formatting emits
/// the shortest decimal string that round-trips.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SciParts {
    pub digits: String,
    pub exponent: i32,
}

pub(crate) fn sci_parts(value: f64) -> SciParts {
    debug_assert!(value.is_finite() && value != 0.0);
    let text = format!("{:e}", value.abs());
    let (mantissa, exponent) = text.split_once('e').expect("scientific form");
    let exponent: i32 = exponent.parse().expect("scientific exponent");
    let digits = mantissa.replace('.', "");
    SciParts { digits, exponent }
}

/// Floor of log10 of `|value|`, exact for any finite non-zero input.
pub(crate) fn floor_log10(value: f64) -> i32 {
    sci_parts(value).exponent
}

/// Largest magnitude of the two bounds, used as a common scaling factor so
/// position arithmetic keeps its precision for very large bounds.
pub(crate) fn max_magnitude(a: f64, b: f64) -> f64 {
    a.abs().max(b.abs())
}

/// A "nice" round number: `{1, 2, 2.5, 5} x 10^exponent`, signed.
///
/// The mantissa is stored in tenths (10, 20, 25, 50) so comparisons and
/// ratios between nice numbers are exact integer arithmetic. A mantissa of
/// ten normalizes into the exponent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NiceNum {
    tenths: i16,
    exponent: i32,
    negative: bool,
}

impl NiceNum {
    pub const ZERO: Self = Self {
        tenths: 0,
        exponent: 0,
        negative: false,
    };

    fn new(tenths: i16, exponent: i32, negative: bool) -> Self {
        if tenths == 100 {
            Self {
                tenths: 10,
                exponent: exponent + 1,
                negative,
            }
        } else {
            Self {
                tenths,
                exponent,
                negative,
            }
        }
    }

    #[must_use]
    pub fn is_zero(self) -> bool {
        self.tenths == 0
    }

    #[must_use]
    pub fn exponent(self) -> i32 {
        self.exponent
    }

    fn mantissa_digits(self) -> &'static str {
        match self.tenths {
            10 => "1",
            20 => "2",
            25 => "2.5",
            50 => "5",
            _ => "0",
        }
    }

    /// The closest `f64` to the exact decimal value.
    #[must_use]
    pub fn as_f64(self) -> f64 {
        if self.is_zero() {
            return 0.0;
        }
        let text = format!("{}e{}", self.mantissa_digits(), self.exponent);
        let value: f64 = text.parse().expect("nice number literal");
        if self.negative { -value } else { value }
    }

    /// Number of digits right of the decimal point, mirroring the scale of
    /// an exact-decimal representation with trailing zeros stripped
    /// (negative when the value ends in trailing zeros left of the point).
    fn decimal_scale(self) -> i32 {
        if self.tenths == 25 {
            1 - self.exponent
        } else {
            -self.exponent
        }
    }

    fn significant_digits(self) -> i32 {
        if self.tenths == 25 { 2 } else { 1 }
    }

    /// `self / divisor` as `f64`, with the power of ten applied after the
    /// mantissa division so a nice range just past `f64::MAX` still yields
    /// a finite quotient.
    pub(crate) fn divided_by(self, divisor: i64) -> f64 {
        if self.is_zero() || divisor == 0 {
            return 0.0;
        }
        let mantissa = f64::from(self.tenths) / divisor as f64;
        let value = mantissa * 10f64.powi(self.exponent - 1);
        if self.negative { -value } else { value }
    }

    /// Fractional digits a label needs to render one step of this size,
    /// before combining with the magnitude of the graph bounds.
    pub(crate) fn label_scale(self) -> i32 {
        let scale = self.decimal_scale();
        if scale < 0 {
            self.significant_digits() + scale - 1
        } else {
            scale
        }
    }
}

/// Returns the nearest nice number to `x`.
///
/// With `round` set, the mantissa snaps to the closest of {1, 2, 2.5, 5, 10}
/// using fixed thresholds; otherwise it snaps up to the next of {1, 2, 5, 10}
/// (ceiling mode). Zero input returns zero.
#[must_use]
pub fn nice_num(x: f64, round: bool) -> NiceNum {
    if x == 0.0 || !x.is_finite() {
        return NiceNum::ZERO;
    }
    let negative = x < 0.0;
    let parts = sci_parts(x);
    let (head, tail) = parts.digits.split_at(1);
    let f: f64 = if tail.is_empty() {
        head.parse()
    } else {
        format!("{head}.{tail}").parse()
    }
    .expect("scientific mantissa");

    let tenths = if round {
        if f < 1.5 {
            10
        } else if f < 2.25 {
            20
        } else if f < 3.25 {
            25
        } else if f < 7.5 {
            50
        } else {
            100
        }
    } else if f <= 1.0 {
        10
    } else if f <= 2.0 {
        20
    } else if f <= 5.0 {
        50
    } else {
        100
    };

    NiceNum::new(tenths, parts.exponent, negative)
}

/// Integral part of `numerator / denominator` for two positive nice numbers,
/// computed in decimal space so ratios like 1 / 0.2 come out exact.
pub(crate) fn integral_ratio(numerator: NiceNum, denominator: NiceNum) -> i64 {
    if numerator.is_zero() || denominator.is_zero() {
        return 0;
    }
    let delta = numerator.exponent - denominator.exponent;
    let ratio =
        (f64::from(numerator.tenths) / f64::from(denominator.tenths)) * 10f64.powi(delta);
    if !ratio.is_finite() {
        return i64::MAX;
    }
    (ratio + 1e-9).floor() as i64
}

//! Tick label formatting.

use serde::{Deserialize, Serialize};

/// Tick formatting modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum TickFormat {
    /// Automatically adjust precision to the tick unit and bound magnitude.
    #[default]
    Auto,
    /// Always use exponential notation.
    Exponent,
    /// Round or chop to the nearest integer.
    RoundAndChop,
    /// Use SI suffixes (k, M, G, ...).
    SiUnits,
    /// Delegate to the host scale's formatter.
    Custom,
}

/// Derived precision for auto-formatted labels: how many fractional digits,
/// and whether to render in exponential notation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatSpec {
    pub precision: u32,
    pub exponential: bool,
}

impl FormatSpec {
    #[must_use]
    pub fn apply(self, value: f64) -> String {
        if self.exponential {
            format_exponential(value, self.precision)
        } else {
            let precision = self.precision as usize;
            format!("{value:.precision$}")
        }
    }
}

/// Exponential notation with a signed, zero-padded two-digit exponent,
/// e.g. `1e+05` or `1.2345678901234560e-20`.
#[must_use]
pub fn format_exponential(value: f64, precision: u32) -> String {
    let precision = precision as usize;
    let text = format!("{value:.precision$e}");
    let (mantissa, exponent) = text.split_once('e').expect("exponential form");
    let exponent: i32 = exponent.parse().expect("exponent digits");
    if exponent < 0 {
        format!("{mantissa}e-{:02}", -exponent)
    } else {
        format!("{mantissa}e+{exponent:02}")
    }
}

/// Nearest-integer label.
#[must_use]
pub fn format_round_chop(value: f64) -> String {
    format!("{}", value.round() as i64)
}

/// Two-decimal label with an SI magnitude suffix; values at or beyond
/// 10^18 have no suffix and format as empty.
#[must_use]
pub fn format_si(value: f64) -> String {
    let magnitude = value.abs();
    if magnitude == 0.0 {
        format!("{value:6.2}")
    } else if magnitude <= 1e-15 {
        format!("{:6.2}f", value * 1e15)
    } else if magnitude <= 1e-12 {
        format!("{:6.2}p", value * 1e12)
    } else if magnitude <= 1e-9 {
        format!("{:6.2}n", value * 1e9)
    } else if magnitude <= 1e-6 {
        format!("{:6.2}\u{b5}", value * 1e6)
    } else if magnitude <= 1e-3 {
        format!("{:6.2}m", value * 1e3)
    } else if magnitude < 1e3 {
        format!("{value:6.2}")
    } else if magnitude < 1e6 {
        format!("{:6.2}k", value * 1e-3)
    } else if magnitude < 1e9 {
        format!("{:6.2}M", value * 1e-6)
    } else if magnitude < 1e12 {
        format!("{:6.2}G", value * 1e-9)
    } else if magnitude < 1e15 {
        format!("{:6.2}T", value * 1e-12)
    } else if magnitude < 1e18 {
        format!("{:6.2}P", value * 1e-15)
    } else {
        String::new()
    }
}

/// General-purpose fallback formatter: plain decimal for readable
/// magnitudes, four-digit exponential outside them.
#[must_use]
pub fn format_default(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    let magnitude = value.abs();
    if magnitude != 0.0 && !(1e-6..1e7).contains(&magnitude) {
        format_exponential(value, 4)
    } else {
        format!("{value}")
    }
}

/// Units a date-enabled axis may tick on; supplied by the host to bias the
/// default format pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum TimeUnit {
    #[default]
    Seconds,
    Minutes,
    Hours,
    Days,
    Months,
    Years,
}

/// Picks a strftime pattern for a date axis from the visible span in
/// seconds and the host's preferred unit.
#[must_use]
pub fn date_format_pattern(span_seconds: f64, unit: TimeUnit) -> &'static str {
    match unit {
        TimeUnit::Months | TimeUnit::Years => "%Y-%m",
        TimeUnit::Days => "%Y-%m-%d",
        _ => {
            let span = span_seconds.abs();
            if span <= 600.0 {
                "%H:%M:%S"
            } else if span <= 172_800.0 {
                "%m-%d %H:%M"
            } else {
                "%Y-%m-%d"
            }
        }
    }
}

/// Formats a unix-seconds tick value with a strftime pattern; out-of-range
/// timestamps render as empty.
#[must_use]
pub fn format_date_label(unix_seconds: f64, pattern: &str) -> String {
    if !unix_seconds.is_finite() {
        return String::new();
    }
    let secs = unix_seconds.floor();
    let nanos = ((unix_seconds - secs) * 1e9) as u32;
    chrono::DateTime::from_timestamp(secs as i64, nanos)
        .map(|dt| dt.format(pattern).to_string())
        .unwrap_or_default()
}

/// An ordered pair of axis bounds.
///
/// `lower > upper` is the legal encoding of a reversed axis, not an error;
/// the tick engine detects the reversal and mirrors its output ordering.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Range {
    lower: f64,
    upper: f64,
}

impl Range {
    #[must_use]
    pub fn new(lower: f64, upper: f64) -> Self {
        Self { lower, upper }
    }

    #[must_use]
    pub fn lower(self) -> f64 {
        self.lower
    }

    #[must_use]
    pub fn upper(self) -> f64 {
        self.upper
    }

    #[must_use]
    pub fn is_reversed(self) -> bool {
        self.lower > self.upper
    }

    /// Signed extent of the range; negative when reversed.
    #[must_use]
    pub fn span(self) -> f64 {
        self.upper - self.lower
    }

    /// Bounds in ascending order regardless of reversal.
    #[must_use]
    pub fn min_max(self) -> (f64, f64) {
        if self.is_reversed() {
            (self.upper, self.lower)
        } else {
            (self.lower, self.upper)
        }
    }
}

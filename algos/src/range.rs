use std::fmt;

/// Closed interval `[low, high]` over suffix-array index space.
///
/// Ordering is lexicographic on `(low, high)`, which is what the range tree
/// sorts by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Range {
    low: usize,
    high: usize,
}

impl Range {
    pub fn new(low: usize, high: usize) -> Self {
        assert!(low <= high, "range low must not exceed high");
        Self { low, high }
    }

    pub fn low(&self) -> usize {
        self.low
    }

    pub fn high(&self) -> usize {
        self.high
    }

    pub fn set_low(&mut self, low: usize) {
        debug_assert!(low <= self.high);
        self.low = low;
    }

    pub fn set_high(&mut self, high: usize) {
        debug_assert!(self.low <= high);
        self.high = high;
    }

    pub fn len(&self) -> usize {
        self.high - self.low + 1
    }

    pub fn overlaps(&self, other: &Range) -> bool {
        self.low <= other.high && other.low <= self.high
    }

    /// True iff the two ranges overlap or touch, i.e. their union is one
    /// contiguous range.
    pub fn touches(&self, other: &Range) -> bool {
        self.low <= other.high.saturating_add(1) && other.low <= self.high.saturating_add(1)
    }

    pub fn is_left_of(&self, other: &Range) -> bool {
        self.high < other.low
    }

    pub fn is_right_of(&self, other: &Range) -> bool {
        other.is_left_of(self)
    }

    /// Smallest range covering both.
    pub fn cover(&self, other: &Range) -> Range {
        Range {
            low: self.low.min(other.low),
            high: self.high.max(other.high),
        }
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.low, self.high)
    }
}

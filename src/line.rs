//! Charlieplex drive lines and the trait platform backends implement.
//!
//! Each of the five lines is a bidirectional I/O pin with three useful
//! electrical states: high impedance (input, no pull), driven low and
//! driven high. Implementations must update the output latch before the
//! direction so no transition ever drives a line unintentionally.

use heapless::Vec;

/// Number of physical drive lines in the matrix.
pub const LINE_COUNT: usize = 5;

/// A drive line index in `0..5`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Line(u8);

impl Line {
    pub const L0: Self = Self(0);
    pub const L1: Self = Self(1);
    pub const L2: Self = Self(2);
    pub const L3: Self = Self(3);
    pub const L4: Self = Self(4);

    /// All lines in index order.
    pub const ALL: [Line; LINE_COUNT] = [Self::L0, Self::L1, Self::L2, Self::L3, Self::L4];

    /// Create a line from a raw index, or `None` if out of range.
    #[inline]
    #[must_use]
    pub const fn new(index: u8) -> Option<Self> {
        if (index as usize) < LINE_COUNT {
            Some(Self(index))
        } else {
            None
        }
    }

    /// Raw index as `usize` for array lookups.
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// Electrical configuration of a line.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LineLevel {
    /// Input without pull: neither sources nor sinks current.
    #[default]
    HiZ,
    /// Output driven low (LED cathode side).
    Low,
    /// Output driven high (LED anode side).
    High,
}

/// Platform access to the five Charlieplex lines.
///
/// Every method is idempotent and may be called in any order. Lines are
/// addressed by [`Line`], so the index precondition holds by construction.
pub trait LineDriver {
    /// Clear the output latch, then switch the line to input.
    fn set_hi_z(&mut self, line: Line);

    /// Clear the output latch, then switch the line to output.
    fn set_low(&mut self, line: Line);

    /// Set the output latch, then switch the line to output.
    fn set_high(&mut self, line: Line);

    /// Put every line into high impedance.
    fn all_hi_z(&mut self) {
        for line in Line::ALL {
            self.set_hi_z(line);
        }
    }
}

impl<T: LineDriver + ?Sized> LineDriver for &mut T {
    #[inline]
    fn set_hi_z(&mut self, line: Line) {
        (**self).set_hi_z(line);
    }

    #[inline]
    fn set_low(&mut self, line: Line) {
        (**self).set_low(line);
    }

    #[inline]
    fn set_high(&mut self, line: Line) {
        (**self).set_high(line);
    }
}

/// Return the `(source, sink)` pair if exactly one line is high, exactly
/// one is low and the rest float. Any other combination lights no single
/// LED deterministically and yields `None`.
#[must_use]
pub fn energized_pair(levels: &[LineLevel; LINE_COUNT]) -> Option<(Line, Line)> {
    let mut source = None;
    let mut sink = None;
    for (line, level) in Line::ALL.iter().zip(levels) {
        match level {
            LineLevel::HiZ => {}
            LineLevel::High if source.is_none() => source = Some(*line),
            LineLevel::Low if sink.is_none() => sink = Some(*line),
            _ => return None,
        }
    }
    source.zip(sink)
}

/// One recorded line change of [`FakeLines`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LineOp {
    pub line: Line,
    pub level: LineLevel,
}

/// In-memory line backend for host tests.
///
/// Tracks the current level of every line and keeps a log of the first
/// `N` operations. Operations past capacity are counted in
/// [`dropped`](Self::dropped) instead of logged.
#[derive(Debug, Default)]
pub struct FakeLines<const N: usize = 64> {
    levels: [LineLevel; LINE_COUNT],
    ops: Vec<LineOp, N>,
    dropped: usize,
}

impl<const N: usize> FakeLines<N> {
    /// All lines floating, empty log.
    #[must_use]
    pub fn new() -> Self {
        Self {
            levels: [LineLevel::HiZ; LINE_COUNT],
            ops: Vec::new(),
            dropped: 0,
        }
    }

    /// Current level of every line.
    #[inline]
    #[must_use]
    pub fn levels(&self) -> &[LineLevel; LINE_COUNT] {
        &self.levels
    }

    /// Current level of one line.
    #[inline]
    #[must_use]
    pub fn level(&self, line: Line) -> LineLevel {
        self.levels[line.index()]
    }

    /// True if every line floats.
    #[must_use]
    pub fn all_floating(&self) -> bool {
        self.levels.iter().all(|level| *level == LineLevel::HiZ)
    }

    /// Logged operations, oldest first.
    #[inline]
    #[must_use]
    pub fn ops(&self) -> &[LineOp] {
        &self.ops
    }

    /// Operations that did not fit in the log.
    #[inline]
    #[must_use]
    pub fn dropped(&self) -> usize {
        self.dropped
    }

    /// Forget logged operations, keeping the current levels.
    pub fn clear_log(&mut self) {
        self.ops.clear();
        self.dropped = 0;
    }

    fn record(&mut self, line: Line, level: LineLevel) {
        self.levels[line.index()] = level;
        if self.ops.push(LineOp { line, level }).is_err() {
            self.dropped += 1;
        }
    }
}

impl<const N: usize> LineDriver for FakeLines<N> {
    fn set_hi_z(&mut self, line: Line) {
        self.record(line, LineLevel::HiZ);
    }

    fn set_low(&mut self, line: Line) {
        self.record(line, LineLevel::Low);
    }

    fn set_high(&mut self, line: Line) {
        self.record(line, LineLevel::High);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_range() {
        assert_eq!(Line::new(4), Some(Line::L4));
        assert_eq!(Line::new(5), None);
    }

    #[test]
    fn test_fake_lines_records_levels() {
        let mut lines: FakeLines = FakeLines::new();
        lines.set_high(Line::L0);
        lines.set_low(Line::L3);
        assert_eq!(lines.level(Line::L0), LineLevel::High);
        assert_eq!(lines.level(Line::L3), LineLevel::Low);
        assert_eq!(energized_pair(lines.levels()), Some((Line::L0, Line::L3)));

        lines.all_hi_z();
        assert!(lines.all_floating());
        assert_eq!(lines.ops().len(), 2 + LINE_COUNT);
    }

    #[test]
    fn test_fake_lines_idempotent() {
        let mut lines: FakeLines = FakeLines::new();
        lines.set_low(Line::L2);
        lines.set_low(Line::L2);
        lines.set_hi_z(Line::L2);
        lines.set_hi_z(Line::L2);
        assert!(lines.all_floating());
    }

    #[test]
    fn test_fake_lines_log_overflow() {
        let mut lines: FakeLines<2> = FakeLines::new();
        lines.all_hi_z();
        assert_eq!(lines.ops().len(), 2);
        assert_eq!(lines.dropped(), LINE_COUNT - 2);
        lines.clear_log();
        assert!(lines.ops().is_empty());
        assert_eq!(lines.dropped(), 0);
    }

    #[test]
    fn test_energized_pair_rejects_ambiguous() {
        let mut levels = [LineLevel::HiZ; LINE_COUNT];
        assert_eq!(energized_pair(&levels), None);
        levels[0] = LineLevel::High;
        assert_eq!(energized_pair(&levels), None);
        levels[1] = LineLevel::Low;
        levels[2] = LineLevel::Low;
        assert_eq!(energized_pair(&levels), None);
    }

    #[test]
    fn test_driver_through_mut_ref() {
        fn drive(mut driver: impl LineDriver) {
            driver.set_high(Line::L1);
        }

        let mut lines: FakeLines = FakeLines::new();
        drive(&mut lines);
        assert_eq!(lines.level(Line::L1), LineLevel::High);
    }
}

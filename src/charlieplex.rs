//! Charlieplexed LED driver.
//!
//! Five lines carry the 18 logical LEDs (9 cells x 2 colors). Each cell
//! holds a red/green LED pair wired anti-parallel between two lines, so
//! the same pair lights red with one polarity and green with the other.
//!
//! # Ghosting
//!
//! Floating lines keep charge after an LED is switched off and leak it
//! into neighbouring LEDs as a faint glow. [`Charlieplex::discharge`]
//! briefly pulls every line low after each LED-on period to drain it.

use crate::clock::Clock;
use crate::line::{Line, LineDriver};
use crate::types::{Cell, Color, CELL_COUNT};

/// Line pair of one cell in red orientation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LinePair {
    /// Driven high to light the red LED.
    pub anode: Line,
    /// Driven low to light the red LED.
    pub cathode: Line,
}

impl LinePair {
    const fn new(anode: Line, cathode: Line) -> Self {
        Self { anode, cathode }
    }
}

/// Cell-to-line wiring of the board, red orientation.
pub const TOPOLOGY: [LinePair; CELL_COUNT] = [
    LinePair::new(Line::L0, Line::L1),
    LinePair::new(Line::L0, Line::L2),
    LinePair::new(Line::L0, Line::L3),
    LinePair::new(Line::L1, Line::L2),
    LinePair::new(Line::L1, Line::L3),
    LinePair::new(Line::L3, Line::L4),
    LinePair::new(Line::L2, Line::L3),
    LinePair::new(Line::L1, Line::L4),
    LinePair::new(Line::L0, Line::L4),
];

/// Resolve the `(source, sink)` lines that light `cell` in `color`.
///
/// Green swaps the red anode and cathode.
#[inline]
#[must_use]
pub const fn resolve_pair(color: Color, cell: Cell) -> (Line, Line) {
    let pair = TOPOLOGY[cell.index()];
    match color {
        Color::Red => (pair.anode, pair.cathode),
        Color::Green => (pair.cathode, pair.anode),
    }
}

/// LED driver over a set of Charlieplex lines.
pub struct Charlieplex<L> {
    lines: L,
}

impl<L: LineDriver> Charlieplex<L> {
    /// Take ownership of the lines and float all of them.
    pub fn new(mut lines: L) -> Self {
        lines.all_hi_z();
        Self { lines }
    }

    /// Energize one LED: `source` high, `sink` low.
    ///
    /// Every other line must already float; this is not re-checked.
    #[inline]
    pub fn drive(&mut self, source: Line, sink: Line) {
        self.lines.set_high(source);
        self.lines.set_low(sink);
    }

    /// Switch the LED driven from `source` off and drain all lines.
    ///
    /// The source is floated first so it never transiently pulls against
    /// the sink, then every line is pulled low and floated again.
    pub fn discharge(&mut self, source: Line) {
        self.lines.set_hi_z(source);
        for line in Line::ALL {
            self.lines.set_low(line);
        }
        self.lines.all_hi_z();
    }

    /// Float every line.
    #[inline]
    pub fn all_hi_z(&mut self) {
        self.lines.all_hi_z();
    }

    /// Light `cell` in `color` for `ticks`, then discharge.
    pub fn light_cell<C: Clock>(&mut self, color: Color, cell: Cell, ticks: u32, clock: &mut C) {
        let (source, sink) = resolve_pair(color, cell);
        self.drive(source, sink);
        clock.advance(ticks);
        self.discharge(source);
    }

    /// Multiplex the cells set in `mask` in `color` until `duration` ticks of
    /// LED-on time have elapsed, holding each cell for `step` ticks.
    ///
    /// An empty mask, or a zero `step`, just waits dark for `duration`.
    pub fn light_mask<C: Clock>(
        &mut self,
        color: Color,
        mask: &[bool; CELL_COUNT],
        duration: u32,
        step: u32,
        clock: &mut C,
    ) {
        if step == 0 || !mask.iter().any(|lit| *lit) {
            self.all_hi_z();
            clock.advance(duration);
            return;
        }

        let mut elapsed = 0u32;
        'hold: while elapsed < duration {
            for cell in Cell::all().filter(|cell| mask[cell.index()]) {
                self.light_cell(color, cell, step, clock);
                elapsed = elapsed.saturating_add(step);
                if elapsed >= duration {
                    break 'hold;
                }
            }
        }

        self.all_hi_z();
    }

    /// Get a reference to the lines.
    pub fn lines(&self) -> &L {
        &self.lines
    }

    /// Get a mutable reference to the lines.
    pub fn lines_mut(&mut self) -> &mut L {
        &mut self.lines
    }

    /// Decompose the driver into its lines.
    pub fn into_inner(self) -> L {
        self.lines
    }
}

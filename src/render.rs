//! Board renderer.
//!
//! One frame lights every occupied cell in turn, then the blinking cursor.
//! Frame time is therefore the sum of the LED hold times, which bounds the
//! refresh rate of the matrix.

use crate::board::Board;
use crate::charlieplex::Charlieplex;
use crate::clock::Clock;
use crate::config::DisplayTiming;
use crate::line::LineDriver;
use crate::types::{Cell, Color};

/// Draws a [`Board`] through a [`Charlieplex`] driver.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Renderer {
    timing: DisplayTiming,
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new(DisplayTiming::DEFAULT)
    }
}

impl Renderer {
    /// Create a renderer. A zero blink period keeps the cursor hidden.
    #[must_use]
    pub const fn new(timing: DisplayTiming) -> Self {
        Self { timing }
    }

    /// Whether the cursor is in the visible part of its blink period at `now`.
    #[must_use]
    pub const fn cursor_visible(&self, now: u32) -> bool {
        let period = self.timing.blink_period();
        period != 0 && now % period < self.timing.blink_on
    }

    /// Color shown for `cell`, red winning if both grids claim it.
    #[must_use]
    pub const fn cell_color(board: &Board, cell: Cell) -> Option<Color> {
        if board.has(Color::Red, cell) {
            Some(Color::Red)
        } else if board.has(Color::Green, cell) {
            Some(Color::Green)
        } else {
            None
        }
    }

    /// Draw one frame of `board`.
    ///
    /// Ends with every line floating.
    pub fn render<L: LineDriver, C: Clock>(
        &self,
        board: &Board,
        driver: &mut Charlieplex<L>,
        clock: &mut C,
    ) {
        for cell in Cell::all() {
            if let Some(color) = Self::cell_color(board, cell) {
                driver.light_cell(color, cell, self.timing.cell_hold, clock);
            }
        }

        let cursor = board.cursor();
        if self.cursor_visible(clock.now()) && !board.cell_occupied(cursor) {
            driver.light_cell(board.active(), cursor, self.timing.cursor_hold, clock);
        }

        driver.all_hi_z();
    }
}

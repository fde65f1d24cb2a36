//! End-of-game animation.
//!
//! A win fills the board in the winner's color; a stalemate flashes an
//! "X" alternating red and green. Each call to [`Animation::play`] runs one
//! lit-then-dark cycle to completion, and the animation reports it is done
//! after the configured number of cycles.

use crate::board::X_PATTERN;
use crate::charlieplex::Charlieplex;
use crate::clock::Clock;
use crate::config::AnimationTiming;
use crate::line::LineDriver;
use crate::types::{Color, GameOutcome, CELL_COUNT};

const FULL_PATTERN: [bool; CELL_COUNT] = [true; CELL_COUNT];

/// Animation state carried between loop iterations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Animation {
    timing: AnimationTiming,
    last: GameOutcome,
    started: bool,
    cycle: u8,
}

impl Default for Animation {
    fn default() -> Self {
        Self::new(AnimationTiming::DEFAULT)
    }
}

impl Animation {
    #[must_use]
    pub const fn new(timing: AnimationTiming) -> Self {
        Self {
            timing,
            last: GameOutcome::Restart,
            started: false,
            cycle: 0,
        }
    }

    /// Cycles already played for the current outcome.
    #[inline]
    #[must_use]
    pub const fn cycle(&self) -> u8 {
        self.cycle
    }

    /// True while a sequence is in progress.
    #[inline]
    #[must_use]
    pub const fn is_running(&self) -> bool {
        self.started
    }

    /// Pattern and color shown in the current cycle for `outcome`.
    ///
    /// Anything but a win shows the stalemate X, red on even cycles.
    #[must_use]
    pub const fn frame(&self, outcome: GameOutcome) -> (Color, &'static [bool; CELL_COUNT]) {
        match outcome {
            GameOutcome::RedWins => (Color::Red, &FULL_PATTERN),
            GameOutcome::GreenWins => (Color::Green, &FULL_PATTERN),
            _ => {
                let color = if self.cycle % 2 == 0 {
                    Color::Red
                } else {
                    Color::Green
                };
                (color, &X_PATTERN)
            }
        }
    }

    /// Play one cycle for `outcome`; returns `true` once the sequence is
    /// complete and the game may restart.
    ///
    /// A different outcome than on the previous call starts over at cycle 0.
    pub fn play<L: LineDriver, C: Clock>(
        &mut self,
        outcome: GameOutcome,
        driver: &mut Charlieplex<L>,
        clock: &mut C,
    ) -> bool {
        if !self.started || self.last != outcome {
            self.started = true;
            self.last = outcome;
            self.cycle = 0;
        }

        let (color, mask) = self.frame(outcome);
        driver.light_mask(
            color,
            mask,
            self.timing.on,
            self.timing.mask_step,
            clock,
        );
        driver.all_hi_z();
        clock.advance(self.timing.off);

        self.cycle = self.cycle.saturating_add(1);
        if self.cycle >= self.timing.cycles {
            self.started = false;
            self.cycle = 0;
            driver.all_hi_z();
            #[cfg(feature = "defmt")]
            defmt::info!("animation for {} complete", outcome);
            return true;
        }
        false
    }
}

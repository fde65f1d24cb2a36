//! Single-button Charlieplexed tic-tac-toe for RP2040.
//!
//! This crate provides the RP2040 backends for [`tictactoe_core`]: the
//! five Charlieplex drive lines on bidirectional GPIOs, the active-low
//! button and the blocking millisecond delay.
//!
//! # Hardware Configuration
//!
//! | Function | GPIO | Description |
//! |----------|------|-------------|
//! | Line 0   | 2    | Charlieplex drive line |
//! | Line 1   | 3    | Charlieplex drive line |
//! | Line 2   | 4    | Charlieplex drive line |
//! | Line 3   | 5    | Charlieplex drive line |
//! | Line 4   | 6    | Charlieplex drive line |
//! | Button   | 15   | Push-button to GND, internal pull-up |
//!
//! Each cell is a red/green LED pair wired anti-parallel between two lines
//! (with a series resistor per line), following [`TOPOLOGY`].
//!
//! # Features
//!
//! - **`dev-panic`** (default): Use `panic-probe` for development (prints panic info via RTT)
//! - **`prod-panic`**: Use `panic-reset` for production (silent watchdog reset)
//!
//! # Re-exports
//!
//! This crate re-exports the public items of [`tictactoe_core`] used by
//! the binary, so consumers only need to depend on this crate.

#![no_std]

use embassy_rp::gpio::{Flex, Pull};

// Re-export core types for convenience
pub use tictactoe_core::{
    Board, ButtonEvent, Clock, DelayClock, Game, GameOutcome, Line, LineDriver, Timing,
    LINE_COUNT, TOPOLOGY,
};

/// The five Charlieplex lines as RP2040 GPIOs.
///
/// Every transition writes the output latch first and the direction
/// second, so switching between floating and driven never glitches the
/// line to the wrong level.
pub struct RpLines<'d> {
    pins: [Flex<'d>; LINE_COUNT],
}

impl<'d> RpLines<'d> {
    /// Take the line pins in [`Line`] order and float all of them.
    #[must_use]
    pub fn new(mut pins: [Flex<'d>; LINE_COUNT]) -> Self {
        for pin in &mut pins {
            pin.set_pull(Pull::None);
            pin.set_low();
            pin.set_as_input();
        }
        Self { pins }
    }

    #[inline]
    fn pin(&mut self, line: Line) -> &mut Flex<'d> {
        &mut self.pins[line.index()]
    }
}

impl LineDriver for RpLines<'_> {
    fn set_hi_z(&mut self, line: Line) {
        let pin = self.pin(line);
        pin.set_low();
        pin.set_as_input();
    }

    fn set_low(&mut self, line: Line) {
        let pin = self.pin(line);
        pin.set_low();
        pin.set_as_output();
    }

    fn set_high(&mut self, line: Line) {
        let pin = self.pin(line);
        pin.set_high();
        pin.set_as_output();
    }
}

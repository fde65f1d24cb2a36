//! Platform-agnostic tic-tac-toe for a Charlieplexed LED matrix.
//!
//! The board is a 3x3 grid of red/green LED pairs wired as a Charlieplexed
//! matrix on five lines, played with a single push-button. This crate
//! contains everything except the pin and timer backends, so it runs both
//! on the target and on the host for testing.
//!
//! # Overview
//!
//! - [`line`]: Drive line abstraction ([`LineDriver`], [`FakeLines`])
//! - [`clock`]: Delay-and-tick source ([`Clock`], [`DelayClock`], [`ManualClock`])
//! - [`charlieplex`]: Cell-to-line wiring and LED driving ([`Charlieplex`])
//! - [`render`]: Board scan with blinking cursor ([`Renderer`])
//! - [`button`]: Debounce and gesture detection ([`ButtonFsm`], [`Button`])
//! - [`board`]: Cursor, placement, win and stalemate rules ([`Board`])
//! - [`animation`]: End-of-game light show ([`Animation`])
//! - [`game`]: The main loop context tying it together ([`Game`])
//! - [`config`]: Tick thresholds ([`Timing`])
//!
//! # Controls
//!
//! | Gesture      | Effect                               |
//! |--------------|--------------------------------------|
//! | Short press  | Cursor to the next free cell         |
//! | Double press | Cursor to the previous free cell     |
//! | Long press   | Place the current color at the cursor |
//!
//! # Example
//!
//! ```rust
//! use tictactoe_core::{Board, ButtonEvent, GameOutcome};
//!
//! let mut board = Board::new();
//! assert_eq!(board.check_board(Some(ButtonEvent::LongPress)), GameOutcome::Ongoing);
//! assert!(board.cell_occupied(board.cursor().wrapping_prev()));
//! ```
//!
//! # Features
//!
//! - **`std`**: Enable standard library support (for host testing)
//! - **`defmt`**: Enable defmt formatting and logging (for embedded targets)
//!
//! # No-std Support
//!
//! This crate is `#![no_std]` by default and uses no heap allocations.

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(feature = "std")]
extern crate std;

pub mod animation;
pub mod board;
pub mod button;
pub mod charlieplex;
pub mod clock;
pub mod config;
pub mod error;
pub mod game;
pub mod line;
pub mod render;
pub mod types;

#[cfg(test)]
mod testing;

// Re-export main types at crate root
pub use animation::Animation;
pub use board::{Board, WIN_LINES, X_PATTERN};
pub use button::{Button, ButtonFsm, PressState};
pub use charlieplex::{resolve_pair, Charlieplex, LinePair, TOPOLOGY};
pub use clock::{Clock, DelayClock, ManualClock};
pub use config::{AnimationTiming, ButtonTiming, DisplayTiming, Timing};
pub use error::ConfigError;
pub use game::{Game, LOOP_TICKS};
pub use line::{energized_pair, FakeLines, Line, LineDriver, LineLevel, LineOp, LINE_COUNT};
pub use render::Renderer;
pub use types::{ButtonEvent, Cell, Color, Direction, GameOutcome, CELL_COUNT};

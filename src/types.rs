//! Core game types: Color, Cell, Direction, ButtonEvent, GameOutcome.

/// Number of cells on the 3x3 board.
pub const CELL_COUNT: usize = 9;

/// LED color of a cell, doubling as the player identity.
///
/// Red is the first player after every reset.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Color {
    #[default]
    Red = 0,
    Green = 1,
}

impl Color {
    /// Both colors, in grid order.
    pub const ALL: [Color; 2] = [Color::Red, Color::Green];

    /// The other player's color.
    #[inline]
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            Color::Red => Color::Green,
            Color::Green => Color::Red,
        }
    }

    /// Index of this color's occupancy grid.
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// A board cell index in `0..9`, row-major from the top-left corner.
///
/// Out-of-range values cannot be constructed, so every table lookup keyed
/// by a `Cell` is in bounds.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Cell(u8);

impl Cell {
    /// Top-left cell, where the cursor starts.
    pub const FIRST: Self = Self(0);

    /// Create a cell from a raw index, or `None` if it is off the board.
    #[inline]
    #[must_use]
    pub const fn new(index: u8) -> Option<Self> {
        if (index as usize) < CELL_COUNT {
            Some(Self(index))
        } else {
            None
        }
    }

    /// Raw index as `usize` for table lookups.
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Next cell in scan order, wrapping from 8 back to 0.
    #[inline]
    #[must_use]
    pub const fn wrapping_next(self) -> Self {
        Self((self.0 + 1) % CELL_COUNT as u8)
    }

    /// Previous cell in scan order, wrapping from 0 to 8.
    #[inline]
    #[must_use]
    pub const fn wrapping_prev(self) -> Self {
        if self.0 == 0 {
            Self(CELL_COUNT as u8 - 1)
        } else {
            Self(self.0 - 1)
        }
    }

    /// Step one cell in `direction`, wrapping around the board.
    #[inline]
    #[must_use]
    pub const fn step(self, direction: Direction) -> Self {
        match direction {
            Direction::Forward => self.wrapping_next(),
            Direction::Backward => self.wrapping_prev(),
        }
    }

    /// Iterate over all nine cells in scan order.
    pub fn all() -> impl Iterator<Item = Cell> {
        (0..CELL_COUNT as u8).map(Cell)
    }
}

/// Cursor travel direction over the circular cell order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    /// +1, wrapping 8 -> 0.
    Forward,
    /// -1, wrapping 0 -> 8.
    Backward,
}

/// Gesture classified from the single push-button.
///
/// "No gesture this tick" is expressed as `None` by the producers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ButtonEvent {
    /// One press shorter than the long-press threshold, no second press in the window.
    ShortPress,
    /// Two short presses, the second starting inside the double-press window.
    DoublePress,
    /// A press held at least the long-press threshold.
    LongPress,
}

/// State of the game as seen by the top-level loop.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GameOutcome {
    /// A fresh game must be set up.
    #[default]
    Restart,
    /// Players are still placing marks.
    Ongoing,
    /// Board full, nobody won.
    Stalemate,
    RedWins,
    GreenWins,
}

impl GameOutcome {
    /// Winning outcome for `color`.
    #[inline]
    #[must_use]
    pub const fn win_for(color: Color) -> Self {
        match color {
            Color::Red => GameOutcome::RedWins,
            Color::Green => GameOutcome::GreenWins,
        }
    }

    /// True for outcomes that end the game and start the animation.
    #[inline]
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(
            self,
            GameOutcome::Stalemate | GameOutcome::RedWins | GameOutcome::GreenWins
        )
    }
}

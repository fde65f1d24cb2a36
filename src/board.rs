//! Board state and game rules.
//!
//! The board owns one occupancy grid per color, the cursor and the color
//! whose turn it is. Marks are only ever placed into free cells, so a
//! cell is set in at most one grid.

use crate::types::{ButtonEvent, Cell, Color, Direction, GameOutcome, CELL_COUNT};

/// The eight winning lines: rows, columns, diagonals.
pub const WIN_LINES: [[u8; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

/// Cells lit by the stalemate "X" pattern.
#[rustfmt::skip]
pub const X_PATTERN: [bool; CELL_COUNT] = [
    true,  false, true,
    false, true,  false,
    true,  false, true,
];

/// Complete board state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Board {
    grids: [[bool; CELL_COUNT]; 2],
    cursor: Cell,
    active: Color,
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// Empty board, cursor on cell 0, red to move.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            grids: [[false; CELL_COUNT]; 2],
            cursor: Cell::FIRST,
            active: Color::Red,
        }
    }

    /// Cell under the cursor.
    #[inline]
    #[must_use]
    pub const fn cursor(&self) -> Cell {
        self.cursor
    }

    /// Color whose turn it is.
    #[inline]
    #[must_use]
    pub const fn active(&self) -> Color {
        self.active
    }

    /// Occupancy grid of one color.
    #[inline]
    #[must_use]
    pub const fn grid(&self, color: Color) -> &[bool; CELL_COUNT] {
        &self.grids[color.index()]
    }

    /// True if `cell` is set in `color`'s grid.
    #[inline]
    #[must_use]
    pub const fn has(&self, color: Color, cell: Cell) -> bool {
        self.grids[color.index()][cell.index()]
    }

    /// True if `cell` holds a mark of either color.
    #[inline]
    #[must_use]
    pub const fn cell_occupied(&self, cell: Cell) -> bool {
        self.has(Color::Red, cell) || self.has(Color::Green, cell)
    }

    /// True if no free cell remains.
    #[must_use]
    pub fn is_full(&self) -> bool {
        Cell::all().all(|cell| self.cell_occupied(cell))
    }

    /// True if `color` owns all three cells of any winning line.
    #[must_use]
    pub fn has_win(&self, color: Color) -> bool {
        let grid = self.grid(color);
        WIN_LINES
            .iter()
            .any(|line| line.iter().all(|&cell| grid[cell as usize]))
    }

    /// Find the first free cell scanning from `start` (inclusive) in
    /// `direction`, visiting each cell at most once.
    #[must_use]
    pub fn find_next_free_from(&self, start: Cell, direction: Direction) -> Option<Cell> {
        let mut cell = start;
        for _ in 0..CELL_COUNT {
            if !self.cell_occupied(cell) {
                return Some(cell);
            }
            cell = cell.step(direction);
        }
        None
    }

    /// Move the cursor to the next free cell after the current one in
    /// `direction`. A full board leaves the cursor where it is.
    pub fn move_cursor(&mut self, direction: Direction) {
        let start = self.cursor.step(direction);
        if let Some(next) = self.find_next_free_from(start, direction) {
            self.cursor = next;
        }
    }

    /// Place the active color at the cursor and finish the turn.
    ///
    /// An occupied cursor cell cannot be played; the cursor advances to
    /// the next free cell instead and the game goes on.
    pub fn place(&mut self) -> GameOutcome {
        if self.cell_occupied(self.cursor) {
            self.move_cursor(Direction::Forward);
            return GameOutcome::Ongoing;
        }

        self.grids[self.active.index()][self.cursor.index()] = true;
        #[cfg(feature = "defmt")]
        defmt::debug!("{} placed at cell {}", self.active, self.cursor.index());
        self.end_turn()
    }

    /// Evaluate the board after the active color placed a mark.
    ///
    /// A win by the active color takes precedence over a full board.
    /// Otherwise the turn passes and the cursor moves to the next free cell.
    pub fn end_turn(&mut self) -> GameOutcome {
        if self.has_win(self.active) {
            return GameOutcome::win_for(self.active);
        }
        if self.is_full() {
            return GameOutcome::Stalemate;
        }

        self.active = self.active.opponent();
        self.move_cursor(Direction::Forward);
        GameOutcome::Ongoing
    }

    /// Apply one button gesture and report the resulting outcome.
    ///
    /// - Short press: cursor forward.
    /// - Double press: cursor backward.
    /// - Long press: place at the cursor.
    /// - No gesture: nothing.
    ///
    /// After the gesture the cursor is moved off any occupied cell, then the
    /// whole board is re-checked in order red win, green win, full board.
    pub fn check_board(&mut self, event: Option<ButtonEvent>) -> GameOutcome {
        match event {
            Some(ButtonEvent::ShortPress) => self.move_cursor(Direction::Forward),
            Some(ButtonEvent::DoublePress) => self.move_cursor(Direction::Backward),
            Some(ButtonEvent::LongPress) => {
                if !self.cell_occupied(self.cursor) {
                    let outcome = self.place();
                    if outcome != GameOutcome::Ongoing {
                        return outcome;
                    }
                } else {
                    self.move_cursor(Direction::Forward);
                }
            }
            None => {}
        }

        if self.cell_occupied(self.cursor) {
            match self.find_next_free_from(self.cursor, Direction::Forward) {
                Some(free) => self.cursor = free,
                None => return GameOutcome::Stalemate,
            }
        }

        if self.has_win(Color::Red) {
            GameOutcome::RedWins
        } else if self.has_win(Color::Green) {
            GameOutcome::GreenWins
        } else if self.is_full() {
            GameOutcome::Stalemate
        } else {
            GameOutcome::Ongoing
        }
    }

    /// Board with the given cells set, for tests and replays.
    ///
    /// A cell listed for both colors is kept red only. The cursor is moved
    /// to the first free cell.
    #[must_use]
    pub fn with_marks(red: &[Cell], green: &[Cell], active: Color) -> Self {
        let mut board = Self::new();
        for cell in red {
            board.grids[Color::Red.index()][cell.index()] = true;
        }
        for cell in green {
            if !board.has(Color::Red, *cell) {
                board.grids[Color::Green.index()][cell.index()] = true;
            }
        }
        board.active = active;
        if let Some(free) = board.find_next_free_from(Cell::FIRST, Direction::Forward) {
            board.cursor = free;
        }
        board
    }

    /// Set a mark bypassing the exclusivity rule, to exercise repair paths.
    #[cfg(test)]
    pub(crate) fn force_mark(&mut self, color: Color, cell: Cell) {
        self.grids[color.index()][cell.index()] = true;
    }
}

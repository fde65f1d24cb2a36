//! Game: the process-wide context driven by the main loop.
//!
//! Owns the board, the outcome, both state machines, the LED driver and
//! the clock. One [`Game::step`] is one loop iteration:
//!
//! 1. sample the button and classify a gesture,
//! 2. while playing, apply the gesture and draw the board; once the game
//!    is over, play one animation cycle and restart when it completes,
//! 3. wait one tick.

use embedded_hal::digital::InputPin;

use crate::animation::Animation;
use crate::board::Board;
use crate::button::Button;
use crate::charlieplex::Charlieplex;
use crate::clock::Clock;
use crate::config::Timing;
use crate::error::ConfigError;
use crate::line::LineDriver;
use crate::render::Renderer;
use crate::types::{ButtonEvent, GameOutcome};

/// Ticks waited at the end of every loop iteration.
pub const LOOP_TICKS: u32 = 1;

/// Tic-tac-toe on a Charlieplexed matrix with a single button.
pub struct Game<L, C, P> {
    driver: Charlieplex<L>,
    clock: C,
    button: Button<P>,
    renderer: Renderer,
    animation: Animation,
    board: Board,
    outcome: GameOutcome,
}

impl<L: LineDriver, C: Clock, P: InputPin> Game<L, C, P> {
    /// Take the hardware, float every line and set up a fresh game.
    pub fn new(lines: L, clock: C, button: P, timing: Timing) -> Result<Self, ConfigError> {
        let timing = timing.validate()?;
        let mut game = Self {
            driver: Charlieplex::new(lines),
            clock,
            button: Button::new(button, timing.button),
            renderer: Renderer::new(timing.display),
            animation: Animation::new(timing.animation),
            board: Board::new(),
            outcome: GameOutcome::Restart,
        };
        game.reset();
        Ok(game)
    }

    /// Empty board, cursor on cell 0, red to move, game ongoing.
    pub fn reset(&mut self) {
        self.board = Board::new();
        self.set_outcome(GameOutcome::Ongoing);
    }

    /// Apply a gesture to the board while the game is ongoing.
    ///
    /// Ignored once the game is over.
    pub fn handle_event(&mut self, event: Option<ButtonEvent>) -> GameOutcome {
        if self.outcome == GameOutcome::Ongoing && event.is_some() {
            let outcome = self.board.check_board(event);
            self.set_outcome(outcome);
        }
        self.outcome
    }

    /// Run one loop iteration and return the outcome after it.
    pub fn step(&mut self) -> GameOutcome {
        let event = self.button.poll(self.clock.now());

        match self.outcome {
            GameOutcome::Ongoing => {
                self.handle_event(event);
                self.renderer
                    .render(&self.board, &mut self.driver, &mut self.clock);
            }
            GameOutcome::Stalemate | GameOutcome::RedWins | GameOutcome::GreenWins => {
                if self
                    .animation
                    .play(self.outcome, &mut self.driver, &mut self.clock)
                {
                    self.reset();
                }
            }
            GameOutcome::Restart => self.reset(),
        }

        self.clock.advance(LOOP_TICKS);
        self.outcome
    }

    /// Run the game loop forever.
    pub fn run(&mut self) -> ! {
        loop {
            self.step();
        }
    }

    fn set_outcome(&mut self, outcome: GameOutcome) {
        if outcome != self.outcome {
            #[cfg(feature = "defmt")]
            defmt::info!("game outcome: {} -> {}", self.outcome, outcome);
            self.outcome = outcome;
        }
    }

    /// Current outcome.
    #[inline]
    pub fn outcome(&self) -> GameOutcome {
        self.outcome
    }

    /// Get a reference to the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Get a mutable reference to the board.
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    /// Get a reference to the clock.
    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Get a reference to the button.
    pub fn button(&self) -> &Button<P> {
        &self.button
    }

    /// Get a reference to the LED driver.
    pub fn driver(&self) -> &Charlieplex<L> {
        &self.driver
    }

    /// Decompose the game into its lines, clock and button pin.
    pub fn into_parts(self) -> (L, C, P) {
        (
            self.driver.into_inner(),
            self.clock,
            self.button.into_inner(),
        )
    }
}

#![no_std]
#![no_main]

use charlieplex_tictactoe_rp2040::{DelayClock, Game, RpLines, Timing};
use defmt::{info, unwrap};
use defmt_rtt as _;
use embassy_executor::Spawner;
use embassy_rp::gpio::{Flex, Input, Pull};
use embassy_time::Delay;

#[cfg(feature = "dev-panic")]
use panic_probe as _;
#[cfg(feature = "prod-panic")]
use panic_reset as _;

#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    info!("Charlieplex tic-tac-toe starting...");

    let p = embassy_rp::init(embassy_rp::config::Config::default());

    // --- LED matrix lines (Line 0..4) ---
    let lines = RpLines::new([
        Flex::new(p.PIN_2),
        Flex::new(p.PIN_3),
        Flex::new(p.PIN_4),
        Flex::new(p.PIN_5),
        Flex::new(p.PIN_6),
    ]);

    // --- Button (active-low) ---
    let button = Input::new(p.PIN_15, Pull::Up);

    // --- Tick source: blocking 1 ms delay ---
    let clock = DelayClock::new(Delay);

    let mut game = unwrap!(Game::new(lines, clock, button, Timing::DEFAULT));

    info!("Game initialized, red to move");

    // The game loop blocks on its own delay; nothing else runs on this core.
    game.run()
}

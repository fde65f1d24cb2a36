//! Shared host-test doubles for code that drives lines and waits on a clock.

extern crate std;

use crate::charlieplex::{resolve_pair, Charlieplex};
use crate::clock::Clock;
use crate::line::{energized_pair, Line, LineDriver, LineLevel, LINE_COUNT};
use crate::types::{Cell, Color};
use std::cell::RefCell;
use std::rc::Rc;
use std::vec::Vec;

/// One LED-on period observed by the probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Lit {
    pub source: Line,
    pub sink: Line,
    pub ticks: u32,
}

impl Lit {
    /// Color and cell that this line pair lights, if it is wired.
    pub fn led(&self) -> Option<(Color, Cell)> {
        Color::ALL.into_iter().find_map(|color| {
            Cell::all()
                .find(|cell| resolve_pair(color, *cell) == (self.source, self.sink))
                .map(|cell| (color, cell))
        })
    }
}

#[derive(Default)]
pub(crate) struct Probe {
    pub levels: [LineLevel; LINE_COUNT],
    pub now: u32,
    pub lit: Vec<Lit>,
    /// Ticks waited with no LED energized.
    pub dark: u32,
}

/// Line and clock halves sharing one probe, so every clock advance can be
/// attributed to the LED energized at that moment.
pub(crate) struct ProbeLines(pub Rc<RefCell<Probe>>);
pub(crate) struct ProbeClock(pub Rc<RefCell<Probe>>);

impl LineDriver for ProbeLines {
    fn set_hi_z(&mut self, line: Line) {
        self.0.borrow_mut().levels[line.index()] = LineLevel::HiZ;
    }

    fn set_low(&mut self, line: Line) {
        self.0.borrow_mut().levels[line.index()] = LineLevel::Low;
    }

    fn set_high(&mut self, line: Line) {
        self.0.borrow_mut().levels[line.index()] = LineLevel::High;
    }
}

impl Clock for ProbeClock {
    fn now(&self) -> u32 {
        self.0.borrow().now
    }

    fn advance(&mut self, ticks: u32) {
        let mut probe = self.0.borrow_mut();
        probe.now = probe.now.wrapping_add(ticks);
        let pair = energized_pair(&probe.levels);
        match pair {
            Some((source, sink)) => probe.lit.push(Lit {
                source,
                sink,
                ticks,
            }),
            None => probe.dark += ticks,
        }
    }
}

/// Probe, driver and clock starting at tick `now`.
pub(crate) fn setup(now: u32) -> (Rc<RefCell<Probe>>, Charlieplex<ProbeLines>, ProbeClock) {
    let probe = Rc::new(RefCell::new(Probe {
        now,
        ..Probe::default()
    }));
    let driver = Charlieplex::new(ProbeLines(probe.clone()));
    (probe.clone(), driver, ProbeClock(probe))
}

/// Expected observation of `color` at cell `index` held for `ticks`.
pub(crate) fn lit(color: Color, index: u8, ticks: u32) -> Lit {
    let (source, sink) = resolve_pair(color, Cell::new(index).unwrap());
    Lit {
        source,
        sink,
        ticks,
    }
}

//! The delay-and-tick collaborator.
//!
//! All LED hold times and all button/animation thresholds are counted in
//! ticks of a single monotonic counter. Whoever blocks must also advance
//! that counter by the same amount, which is why waiting and counting are
//! one operation here.

use embedded_hal::delay::DelayNs;

/// Monotonic tick source that can block for a number of ticks.
///
/// One tick is one millisecond on hardware. The counter wraps at
/// `u32::MAX`; consumers compare instants with `wrapping_sub`.
pub trait Clock {
    /// Current tick count.
    fn now(&self) -> u32;

    /// Block for `ticks` and advance the counter by exactly `ticks`.
    fn advance(&mut self, ticks: u32);
}

impl<T: Clock + ?Sized> Clock for &mut T {
    #[inline]
    fn now(&self) -> u32 {
        (**self).now()
    }

    #[inline]
    fn advance(&mut self, ticks: u32) {
        (**self).advance(ticks);
    }
}

/// Clock that never waits; time moves only through [`Clock::advance`].
///
/// Used for deterministic host tests.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
pub struct ManualClock {
    now: u32,
}

impl ManualClock {
    /// Start at tick `now`.
    #[must_use]
    pub const fn starting_at(now: u32) -> Self {
        Self { now }
    }
}

impl Clock for ManualClock {
    #[inline]
    fn now(&self) -> u32 {
        self.now
    }

    #[inline]
    fn advance(&mut self, ticks: u32) {
        self.now = self.now.wrapping_add(ticks);
    }
}

/// Clock backed by a blocking [`DelayNs`] implementation, one tick per millisecond.
pub struct DelayClock<D> {
    delay: D,
    now: u32,
}

impl<D: DelayNs> DelayClock<D> {
    /// Wrap a blocking delay, starting the counter at zero.
    #[must_use]
    pub const fn new(delay: D) -> Self {
        Self { delay, now: 0 }
    }

    /// Decompose into the wrapped delay.
    pub fn into_inner(self) -> D {
        self.delay
    }
}

impl<D: DelayNs> Clock for DelayClock<D> {
    #[inline]
    fn now(&self) -> u32 {
        self.now
    }

    fn advance(&mut self, ticks: u32) {
        self.delay.delay_ms(ticks);
        self.now = self.now.wrapping_add(ticks);
    }
}

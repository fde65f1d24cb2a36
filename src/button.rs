//! Single push-button gesture detection.
//!
//! The raw level is sampled once per tick and classified into short,
//! double and long presses. Every level change must be stable for the
//! debounce window before it is accepted.
//!
//! | Gesture      | Condition                                                   |
//! |--------------|-------------------------------------------------------------|
//! | Short press  | Release before the long threshold, no second press in window |
//! | Double press | Second short press starts inside the window                 |
//! | Long press   | First (or second) press held at least the long threshold    |
//!
//! The machine must be fed on a fixed cadence since all thresholds are
//! counted in ticks of the shared [`Clock`](crate::clock::Clock).

use embedded_hal::digital::InputPin;

use crate::config::ButtonTiming;
use crate::types::ButtonEvent;

/// Internal state of [`ButtonFsm`].
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum PressState {
    #[default]
    Idle = 0,
    DebouncePress = 1,
    Pressed = 2,
    DebounceRelease = 3,
    WaitSecondPress = 4,
    DebouncePress2 = 5,
    Pressed2 = 6,
    DebounceRelease2 = 7,
}

impl From<u8> for PressState {
    /// Unknown codes map to `Idle`.
    fn from(raw: u8) -> Self {
        match raw {
            1 => PressState::DebouncePress,
            2 => PressState::Pressed,
            3 => PressState::DebounceRelease,
            4 => PressState::WaitSecondPress,
            5 => PressState::DebouncePress2,
            6 => PressState::Pressed2,
            7 => PressState::DebounceRelease2,
            _ => PressState::Idle,
        }
    }
}

/// Debounce and gesture state machine.
///
/// Emits at most one event per [`update`](Self::update).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ButtonFsm {
    timing: ButtonTiming,
    state: PressState,
    /// Entry tick of the current debounce phase.
    since: u32,
    /// Tick at which the current press was confirmed.
    press_start: u32,
    /// Tick at which the first release was confirmed.
    window_start: u32,
    first_duration: u32,
    second_duration: u32,
}

impl Default for ButtonFsm {
    fn default() -> Self {
        Self::new(ButtonTiming::DEFAULT)
    }
}

impl ButtonFsm {
    /// Idle machine with the given thresholds.
    #[must_use]
    pub const fn new(timing: ButtonTiming) -> Self {
        Self {
            timing,
            state: PressState::Idle,
            since: 0,
            press_start: 0,
            window_start: 0,
            first_duration: 0,
            second_duration: 0,
        }
    }

    /// Current state.
    #[inline]
    #[must_use]
    pub const fn state(&self) -> PressState {
        self.state
    }

    /// Duration of the last confirmed first press.
    #[inline]
    #[must_use]
    pub const fn first_duration(&self) -> u32 {
        self.first_duration
    }

    /// Duration of the last confirmed second press.
    #[inline]
    #[must_use]
    pub const fn second_duration(&self) -> u32 {
        self.second_duration
    }

    /// Resume from a raw state code, e.g. one kept in retained RAM.
    ///
    /// Codes that name no state reset the machine to `Idle`.
    pub fn restore(&mut self, raw: u8, now: u32) {
        self.state = PressState::from(raw);
        if self.state == PressState::Idle && raw != PressState::Idle as u8 {
            #[cfg(feature = "defmt")]
            defmt::warn!("invalid button state {=u8}, back to idle", raw);
        }
        self.since = now;
        self.press_start = now;
        self.window_start = now;
    }

    /// Feed one sample of the button level taken at tick `now`.
    pub fn update(&mut self, pressed: bool, now: u32) -> Option<ButtonEvent> {
        let debounce = self.timing.debounce;
        let elapsed = now.wrapping_sub(self.since);

        match self.state {
            PressState::Idle => {
                if pressed {
                    self.enter(PressState::DebouncePress, now);
                }
            }
            PressState::DebouncePress => {
                if !pressed {
                    self.state = PressState::Idle;
                } else if elapsed >= debounce {
                    self.enter(PressState::Pressed, now);
                    self.press_start = now;
                }
            }
            PressState::Pressed => {
                if !pressed {
                    self.first_duration = now.wrapping_sub(self.press_start);
                    self.enter(PressState::DebounceRelease, now);
                }
            }
            PressState::DebounceRelease => {
                if pressed {
                    self.state = PressState::Pressed;
                } else if elapsed >= debounce {
                    if self.first_duration >= self.timing.long_press {
                        return self.finish(ButtonEvent::LongPress);
                    }
                    self.enter(PressState::WaitSecondPress, now);
                    self.window_start = now;
                }
            }
            PressState::WaitSecondPress => {
                if pressed {
                    self.enter(PressState::DebouncePress2, now);
                } else if now.wrapping_sub(self.window_start) >= self.timing.double_window {
                    return self.finish(ButtonEvent::ShortPress);
                }
            }
            PressState::DebouncePress2 => {
                if !pressed {
                    self.state = PressState::WaitSecondPress;
                } else if elapsed >= debounce {
                    self.enter(PressState::Pressed2, now);
                    self.press_start = now;
                }
            }
            PressState::Pressed2 => {
                if !pressed {
                    self.second_duration = now.wrapping_sub(self.press_start);
                    self.enter(PressState::DebounceRelease2, now);
                }
            }
            PressState::DebounceRelease2 => {
                if pressed {
                    self.state = PressState::Pressed2;
                } else if elapsed >= debounce {
                    if self.second_duration >= self.timing.long_press {
                        return self.finish(ButtonEvent::LongPress);
                    }
                    return self.finish(ButtonEvent::DoublePress);
                }
            }
        }

        None
    }

    #[inline]
    fn enter(&mut self, state: PressState, now: u32) {
        self.state = state;
        self.since = now;
    }

    fn finish(&mut self, event: ButtonEvent) -> Option<ButtonEvent> {
        self.state = PressState::Idle;
        #[cfg(feature = "defmt")]
        defmt::debug!("button gesture: {}", event);
        Some(event)
    }
}

/// Active-low push-button with its gesture machine.
///
/// Expects the pin to be configured with a pull-up. A failed read counts
/// as "released".
pub struct Button<P> {
    pin: P,
    fsm: ButtonFsm,
}

impl<P: InputPin> Button<P> {
    /// Create a button with the given thresholds.
    pub fn new(pin: P, timing: ButtonTiming) -> Self {
        Self {
            pin,
            fsm: ButtonFsm::new(timing),
        }
    }

    /// Sample the pin at tick `now` and classify.
    pub fn poll(&mut self, now: u32) -> Option<ButtonEvent> {
        let pressed = self.pin.is_low().unwrap_or(false);
        self.fsm.update(pressed, now)
    }

    /// Get a reference to the gesture machine.
    pub fn fsm(&self) -> &ButtonFsm {
        &self.fsm
    }

    /// Get a mutable reference to the gesture machine.
    pub fn fsm_mut(&mut self) -> &mut ButtonFsm {
        &mut self.fsm
    }

    /// Decompose into the pin.
    pub fn into_inner(self) -> P {
        self.pin
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use embedded_hal::digital::{ErrorKind, ErrorType};
    use std::vec::Vec;

    /// Feed `(level, ticks)` segments one tick at a time starting at tick 0,
    /// collecting every emitted event with its tick.
    fn run(fsm: &mut ButtonFsm, script: &[(bool, u32)]) -> Vec<(u32, ButtonEvent)> {
        let mut now = 0u32;
        let mut events = Vec::new();
        for &(pressed, ticks) in script {
            for _ in 0..ticks {
                if let Some(event) = fsm.update(pressed, now) {
                    events.push((now, event));
                }
                now += 1;
            }
        }
        events
    }

    fn gestures(script: &[(bool, u32)]) -> Vec<ButtonEvent> {
        let mut fsm = ButtonFsm::default();
        let events = run(&mut fsm, script);
        assert_eq!(fsm.state(), PressState::Idle);
        events.into_iter().map(|(_, event)| event).collect()
    }

    #[test]
    fn test_short_press() {
        let mut fsm = ButtonFsm::default();
        let events = run(&mut fsm, &[(true, 15), (false, 600)]);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].1, ButtonEvent::ShortPress);
        assert_eq!(fsm.state(), PressState::Idle);
        // Press confirmed at 10, released at 15.
        assert_eq!(fsm.first_duration(), 5);
    }

    #[test]
    fn test_short_press_fires_when_window_expires() {
        let mut fsm = ButtonFsm::default();
        let events = run(&mut fsm, &[(true, 15), (false, 600)]);
        // Release at 15, confirmed at 25, window closes 500 ticks later.
        assert_eq!(events[0].0, 525);
    }

    #[test]
    fn test_long_press() {
        let mut fsm = ButtonFsm::default();
        let events = run(&mut fsm, &[(true, 1200), (false, 50)]);
        assert_eq!(events, [(1210, ButtonEvent::LongPress)]);
        assert_eq!(fsm.first_duration(), 1190);
    }

    #[test]
    fn test_long_press_does_not_wait_for_window() {
        assert_eq!(
            gestures(&[(true, 1200), (false, 600)]),
            [ButtonEvent::LongPress]
        );
    }

    #[test]
    fn test_double_press() {
        assert_eq!(
            gestures(&[(true, 50), (false, 200), (true, 50), (false, 600)]),
            [ButtonEvent::DoublePress]
        );
    }

    #[test]
    fn test_second_press_long_is_long_press() {
        assert_eq!(
            gestures(&[(true, 50), (false, 100), (true, 1100), (false, 600)]),
            [ButtonEvent::LongPress]
        );
    }

    #[test]
    fn test_second_press_after_window_is_separate() {
        assert_eq!(
            gestures(&[(true, 50), (false, 700), (true, 50), (false, 700)]),
            [ButtonEvent::ShortPress, ButtonEvent::ShortPress]
        );
    }

    #[test]
    fn test_press_bounce_rejected() {
        let script = [
            (true, 3),
            (false, 2),
            (true, 5),
            (false, 4),
            (true, 9),
            (false, 2000),
        ];
        assert!(gestures(&script).is_empty());
    }

    #[test]
    fn test_release_bounce_keeps_press_duration() {
        // Release chatters for a few ticks in the middle of a long press.
        let mut fsm = ButtonFsm::default();
        let events = run(
            &mut fsm,
            &[(true, 600), (false, 3), (true, 600), (false, 50)],
        );
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].1, ButtonEvent::LongPress);
        assert_eq!(fsm.first_duration(), 1193);
    }

    #[test]
    fn test_second_press_bounce_returns_to_window() {
        assert_eq!(
            gestures(&[(true, 50), (false, 100), (true, 4), (false, 600)]),
            [ButtonEvent::ShortPress]
        );
    }

    #[test]
    fn test_restore_invalid_state_recovers() {
        let mut fsm = ButtonFsm::default();
        fsm.restore(0xAA, 100);
        assert_eq!(fsm.state(), PressState::Idle);
        assert_eq!(fsm.update(false, 101), None);

        fsm.restore(PressState::WaitSecondPress as u8, 200);
        assert_eq!(fsm.state(), PressState::WaitSecondPress);
        assert_eq!(fsm.update(false, 700), Some(ButtonEvent::ShortPress));
    }

    #[test]
    fn test_tick_counter_wraparound() {
        let mut fsm = ButtonFsm::default();
        let start = u32::MAX - 20;
        let mut event = None;
        for offset in 0..1300u32 {
            let now = start.wrapping_add(offset);
            let pressed = offset < 1100;
            if let Some(e) = fsm.update(pressed, now) {
                event = Some(e);
            }
        }
        assert_eq!(event, Some(ButtonEvent::LongPress));
    }

    struct ScriptedPin {
        low: bool,
        fail: bool,
    }

    #[derive(Debug)]
    struct PinFault;

    impl embedded_hal::digital::Error for PinFault {
        fn kind(&self) -> ErrorKind {
            ErrorKind::Other
        }
    }

    impl ErrorType for ScriptedPin {
        type Error = PinFault;
    }

    impl InputPin for ScriptedPin {
        fn is_high(&mut self) -> Result<bool, Self::Error> {
            self.is_low().map(|low| !low)
        }

        fn is_low(&mut self) -> Result<bool, Self::Error> {
            if self.fail {
                Err(PinFault)
            } else {
                Ok(self.low)
            }
        }
    }

    #[test]
    fn test_button_is_active_low() {
        let pin = ScriptedPin {
            low: true,
            fail: false,
        };
        let mut button = Button::new(pin, ButtonTiming::DEFAULT);
        assert_eq!(button.poll(0), None);
        assert_eq!(button.fsm().state(), PressState::DebouncePress);
    }

    #[test]
    fn test_button_read_error_counts_as_released() {
        let pin = ScriptedPin {
            low: true,
            fail: true,
        };
        let mut button = Button::new(pin, ButtonTiming::DEFAULT);
        for now in 0..100 {
            assert_eq!(button.poll(now), None);
        }
        assert_eq!(button.fsm().state(), PressState::Idle);
    }
}

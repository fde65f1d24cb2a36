//! Tick thresholds for the button, display and animation state machines.
//!
//! [`Timing::DEFAULT`] matches the board as shipped: one tick is one
//! millisecond of the blocking delay.

use crate::error::ConfigError;

/// Button gesture thresholds, in ticks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ButtonTiming {
    /// A level must hold this long before a press or release is accepted.
    pub debounce: u32,
    /// Presses at least this long are long presses.
    pub long_press: u32,
    /// Time after the first release during which a second press makes a double press.
    pub double_window: u32,
}

impl ButtonTiming {
    pub const DEFAULT: Self = Self {
        debounce: 10,
        long_press: 1000,
        double_window: 500,
    };
}

/// Board scan and cursor blink timing, in ticks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DisplayTiming {
    /// Hold time of each occupied cell per frame.
    pub cell_hold: u32,
    /// Hold time of the cursor LED per frame.
    pub cursor_hold: u32,
    /// Part of the blink period during which the cursor is shown.
    pub blink_on: u32,
    /// Part of the blink period during which the cursor is hidden.
    pub blink_off: u32,
}

impl DisplayTiming {
    pub const DEFAULT: Self = Self {
        cell_hold: 3,
        cursor_hold: 1,
        blink_on: 500,
        blink_off: 100,
    };

    /// Full blink period.
    #[inline]
    #[must_use]
    pub const fn blink_period(&self) -> u32 {
        self.blink_on.saturating_add(self.blink_off)
    }
}

/// End-of-game animation timing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AnimationTiming {
    /// Lit time of the fill or X pattern per cycle.
    pub on: u32,
    /// Dark pause after the pattern.
    pub off: u32,
    /// Hold time of each cell while a pattern is multiplexed.
    pub mask_step: u32,
    /// Cycles played before the game restarts.
    pub cycles: u8,
}

impl AnimationTiming {
    pub const DEFAULT: Self = Self {
        on: 1000,
        off: 500,
        mask_step: 2,
        cycles: 3,
    };
}

/// Complete timing configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Timing {
    pub button: ButtonTiming,
    pub display: DisplayTiming,
    pub animation: AnimationTiming,
}

impl Timing {
    pub const DEFAULT: Self = Self {
        button: ButtonTiming::DEFAULT,
        display: DisplayTiming::DEFAULT,
        animation: AnimationTiming::DEFAULT,
    };

    /// Check that the thresholds keep every state machine live.
    pub const fn validate(self) -> Result<Self, ConfigError> {
        if self.display.blink_period() == 0 {
            return Err(ConfigError::BlinkPeriodZero);
        }
        if self.animation.mask_step == 0 {
            return Err(ConfigError::MaskStepZero);
        }
        if self.animation.cycles == 0 {
            return Err(ConfigError::AnimationCyclesZero);
        }
        if self.button.long_press <= self.button.debounce {
            return Err(ConfigError::LongPressWithinDebounce);
        }
        if self.button.double_window <= self.button.debounce {
            return Err(ConfigError::DoubleWindowWithinDebounce);
        }
        Ok(self)
    }
}

impl Default for Timing {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert_eq!(Timing::DEFAULT.validate(), Ok(Timing::DEFAULT));
        assert_eq!(Timing::DEFAULT.display.blink_period(), 600);
    }

    #[test]
    fn test_rejects_zero_blink_period() {
        let mut timing = Timing::DEFAULT;
        timing.display.blink_on = 0;
        timing.display.blink_off = 0;
        assert_eq!(timing.validate(), Err(ConfigError::BlinkPeriodZero));
    }

    #[test]
    fn test_rejects_stalling_animation() {
        let mut timing = Timing::DEFAULT;
        timing.animation.mask_step = 0;
        assert_eq!(timing.validate(), Err(ConfigError::MaskStepZero));

        let mut timing = Timing::DEFAULT;
        timing.animation.cycles = 0;
        assert_eq!(timing.validate(), Err(ConfigError::AnimationCyclesZero));
    }

    #[test]
    fn test_rejects_button_thresholds_inside_debounce() {
        let mut timing = Timing::DEFAULT;
        timing.button.long_press = timing.button.debounce;
        assert_eq!(timing.validate(), Err(ConfigError::LongPressWithinDebounce));

        let mut timing = Timing::DEFAULT;
        timing.button.double_window = 5;
        assert_eq!(
            timing.validate(),
            Err(ConfigError::DoubleWindowWithinDebounce)
        );
    }
}

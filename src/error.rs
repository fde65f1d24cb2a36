//! Error types.

use core::fmt;

/// Rejected [`Timing`](crate::config::Timing) value.
///
/// Each variant names the threshold that would stall or break a state
/// machine if accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Cursor blink on + off period is zero.
    BlinkPeriodZero,
    /// Animation mask step is zero, so the hold loop would never finish.
    MaskStepZero,
    /// Animation would never report completion.
    AnimationCyclesZero,
    /// Long-press threshold does not exceed the debounce window.
    LongPressWithinDebounce,
    /// Double-press window does not exceed the debounce window.
    DoubleWindowWithinDebounce,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            ConfigError::BlinkPeriodZero => "cursor blink period must be non-zero",
            ConfigError::MaskStepZero => "animation mask step must be non-zero",
            ConfigError::AnimationCyclesZero => "animation must run at least one cycle",
            ConfigError::LongPressWithinDebounce => {
                "long-press threshold must exceed the debounce window"
            }
            ConfigError::DoubleWindowWithinDebounce => {
                "double-press window must exceed the debounce window"
            }
        };
        f.write_str(msg)
    }
}

//! Tank-level float switch.
//!
//! Mechanical reed float on a single GPIO.  With the default polarity the
//! contact closes (line HIGH) while the float rides at or above the
//! minimum level.  A broken wire reads LOW, which decodes to the safe
//! `LevelLow`.

use serde::{Deserialize, Serialize};

/// Debounced tank-level reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum FloatState {
    /// Below the minimum level.  Cold-start default (dry-run safe).
    #[default]
    LevelLow,
    /// At or above the minimum level.
    LevelOk,
}

impl FloatState {
    /// Decode a raw line level given the configured polarity.
    pub fn from_line(level_high: bool, ok_when_high: bool) -> Self {
        if level_high == ok_when_high {
            Self::LevelOk
        } else {
            Self::LevelLow
        }
    }

    pub fn is_ok(self) -> bool {
        matches!(self, Self::LevelOk)
    }
}

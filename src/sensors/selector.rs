//! Three-position selector switch (OFF / HAND / AUTO).
//!
//! ## Hardware
//!
//! Single-pole, triple-throw rotary switch.  The common is tied to the
//! supply; the HAND and AUTO throws each land on their own input line and
//! the OFF throw is left unconnected:
//!
//! | HAND line | AUTO line | Position                     |
//! |-----------|-----------|------------------------------|
//! | low       | low       | OFF                          |
//! | high      | low       | MANUAL                       |
//! | low       | high      | AUTO                         |
//! | high      | high      | invalid (wiring fault)       |
//!
//! The mapping is carried in a [`SelectorDecodeTable`] so a board with
//! different wiring only needs a config change.

use serde::{Deserialize, Serialize};

/// Debounced position of the selector switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SelectorState {
    /// Pump disabled.  Also the cold-start and wiring-fault fallback.
    #[default]
    Off,
    /// Operator override: pump runs regardless of tank level.
    Manual,
    /// Pump follows the float switch.
    Auto,
}

impl SelectorState {
    pub const ALL: [SelectorState; 3] = [Self::Off, Self::Manual, Self::Auto];
}

/// Result of decoding one raw pattern of the two selector lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SelectorReading {
    Position(SelectorState),
    /// Electrically impossible pattern.
    Invalid,
}

/// Electrical levels of the two selector lines (`true` = HIGH).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SelectorLines {
    pub hand: bool,
    pub auto: bool,
}

/// Maps every raw line pattern to a reading.  Polarity lives here too:
/// an active-low board maps `both` (idle pull-ups) to OFF.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectorDecodeTable {
    /// Both lines LOW.
    pub none: SelectorReading,
    /// Only the HAND line HIGH.
    pub hand_only: SelectorReading,
    /// Only the AUTO line HIGH.
    pub auto_only: SelectorReading,
    /// Both lines HIGH.
    pub both: SelectorReading,
}

impl Default for SelectorDecodeTable {
    fn default() -> Self {
        Self {
            none: SelectorReading::Position(SelectorState::Off),
            hand_only: SelectorReading::Position(SelectorState::Manual),
            auto_only: SelectorReading::Position(SelectorState::Auto),
            both: SelectorReading::Invalid,
        }
    }
}

impl SelectorDecodeTable {
    pub fn decode(&self, lines: SelectorLines) -> SelectorReading {
        match (lines.hand, lines.auto) {
            (false, false) => self.none,
            (true, false) => self.hand_only,
            (false, true) => self.auto_only,
            (true, true) => self.both,
        }
    }

    /// True if every switch position can be produced by some pattern.
    pub fn covers_all_positions(&self) -> bool {
        let entries = [self.none, self.hand_only, self.auto_only, self.both];
        SelectorState::ALL
            .iter()
            .all(|s| entries.contains(&SelectorReading::Position(*s)))
    }
}

//! Signal classification: raw switch lines in, debounced semantic states out.
//!
//! The [`SignalClassifier`] owns one [`DebounceWindow`] per monitored input
//! and is the only producer of [`SelectorState`] and [`FloatState`].  Each
//! sampling tick it decodes a [`RawSample`], feeds the windows, and exposes
//! the last *confirmed* values as [`ClassifiedInputs`].
//!
//! ```text
//!  RawSample ──▶ decode ──▶ DebounceWindow<SelectorReading> ──▶ selector / wiring_fault
//!            └─▶ decode ──▶ DebounceWindow<FloatState>      ──▶ float
//! ```

pub mod debounce;
pub mod float_switch;
pub mod selector;

use log::{debug, error, info};

use crate::config::ControllerConfig;
use debounce::{DebounceWindow, Debounced};
pub use float_switch::FloatState;
pub use selector::{SelectorDecodeTable, SelectorLines, SelectorReading, SelectorState};

/// One instantaneous read of every raw line.  Consumed once, then dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RawSample {
    /// Monotonic milliseconds since boot (wrapping).
    pub timestamp_ms: u32,
    /// Electrical level of the selector HAND line.
    pub hand_line: bool,
    /// Electrical level of the selector AUTO line.
    pub auto_line: bool,
    /// Electrical level of the float line.
    pub float_line: bool,
}

impl RawSample {
    pub fn selector_lines(&self) -> SelectorLines {
        SelectorLines {
            hand: self.hand_line,
            auto: self.auto_line,
        }
    }
}

/// The confirmed view handed to the pump supervisor each cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ClassifiedInputs {
    pub selector: SelectorState,
    pub float: FloatState,
    /// Both selector lines confirmed engaged.  `selector` reads `Off`
    /// while this is set.
    pub wiring_fault: bool,
}

/// Counters for rejected noise and accepted transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ClassifierStats {
    pub samples: u64,
    pub selector_glitches: u32,
    pub float_glitches: u32,
    pub selector_transitions: u32,
    pub float_transitions: u32,
}

/// Debounces the selector and float lines.
pub struct SignalClassifier {
    table: SelectorDecodeTable,
    float_ok_when_high: bool,
    selector: DebounceWindow<SelectorReading>,
    float: DebounceWindow<FloatState>,
    samples: u64,
    selector_transitions: u32,
    float_transitions: u32,
    last_sample_ms: Option<u32>,
}

impl SignalClassifier {
    pub fn new(config: &ControllerConfig) -> Self {
        let threshold = config.debounce_threshold_ticks;
        Self {
            table: config.selector_table,
            float_ok_when_high: config.float_ok_when_high,
            selector: DebounceWindow::new(
                SelectorReading::Position(SelectorState::default()),
                threshold,
            ),
            float: DebounceWindow::new(FloatState::default(), threshold),
            samples: 0,
            selector_transitions: 0,
            float_transitions: 0,
            last_sample_ms: None,
        }
    }

    /// Feed one sampling tick.  Returns the confirmed view after the update.
    pub fn sample(&mut self, raw: &RawSample) -> ClassifiedInputs {
        self.samples += 1;
        self.last_sample_ms = Some(raw.timestamp_ms);

        let reading = self.table.decode(raw.selector_lines());
        if let Debounced::Confirmed { from, to } = self.selector.update(reading) {
            self.selector_transitions = self.selector_transitions.saturating_add(1);
            match (from, to) {
                (_, SelectorReading::Invalid) => {
                    error!(
                        "selector: both lines engaged for {} ticks, wiring fault",
                        self.selector.threshold()
                    );
                }
                (SelectorReading::Invalid, SelectorReading::Position(pos)) => {
                    info!("selector: wiring fault cleared, position {:?}", pos);
                }
                (_, SelectorReading::Position(pos)) => {
                    debug!("selector: confirmed {:?} at {}ms", pos, raw.timestamp_ms);
                }
            }
        }

        let level = FloatState::from_line(raw.float_line, self.float_ok_when_high);
        if let Debounced::Confirmed { to, .. } = self.float.update(level) {
            self.float_transitions = self.float_transitions.saturating_add(1);
            debug!("float: confirmed {:?} at {}ms", to, raw.timestamp_ms);
        }

        self.inputs()
    }

    /// Last confirmed selector position.  `Off` at cold start and while a
    /// wiring fault is confirmed.
    pub fn selector_state(&self) -> SelectorState {
        match self.selector.confirmed() {
            SelectorReading::Position(pos) => pos,
            SelectorReading::Invalid => SelectorState::Off,
        }
    }

    /// Last confirmed float level.  `LevelLow` at cold start.
    pub fn float_state(&self) -> FloatState {
        self.float.confirmed()
    }

    pub fn wiring_fault(&self) -> bool {
        self.selector.confirmed() == SelectorReading::Invalid
    }

    pub fn inputs(&self) -> ClassifiedInputs {
        ClassifiedInputs {
            selector: self.selector_state(),
            float: self.float_state(),
            wiring_fault: self.wiring_fault(),
        }
    }

    /// True once both inputs have completed at least one full window.
    pub fn is_settled(&self) -> bool {
        self.selector.has_settled() && self.float.has_settled()
    }

    pub fn last_sample_ms(&self) -> Option<u32> {
        self.last_sample_ms
    }

    pub fn stats(&self) -> ClassifierStats {
        ClassifierStats {
            samples: self.samples,
            selector_glitches: self.selector.glitches_rejected(),
            float_glitches: self.float.glitches_rejected(),
            selector_transitions: self.selector_transitions,
            float_transitions: self.float_transitions,
        }
    }
}

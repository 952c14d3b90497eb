//! Outbound application events.
//!
//! The [`PumpController`](super::service::PumpController) emits these
//! through the [`EventSink`](super::ports::EventSink) port.  Adapters on
//! the other side decide what to do with them: serial log, panel LEDs,
//! a local display.

use crate::fsm::StateId;
use crate::fsm::context::PumpCommand;
use crate::sensors::{ClassifierStats, FloatState, SelectorState};

/// Structured events emitted by the application core.
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// Periodic telemetry snapshot.
    Telemetry(TelemetryData),

    /// The supervisor moved between states.
    StateChanged { from: StateId, to: StateId },

    /// One or more faults were raised (bitmask).
    FaultDetected(u8),

    /// All faults have cleared.
    FaultCleared,

    /// The controller has started (carries initial state).
    Started(StateId),
}

/// A point-in-time snapshot for logging or display.
#[derive(Debug, Clone)]
pub struct TelemetryData {
    pub state: StateId,
    pub selector: SelectorState,
    pub float: FloatState,
    pub wiring_fault: bool,
    pub command: PumpCommand,
    pub fault_flags: u8,
    pub cycles: u64,
    pub classifier: ClassifierStats,
}

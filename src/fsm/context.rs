//! Shared context threaded through every supervisor state handler.
//!
//! Handlers read the classified inputs and fault mask, and write the pump
//! command.  The service copies the command out after each tick and hands
//! it to the actuator.

use crate::error::FaultTag;
use crate::sensors::ClassifiedInputs;

// ---------------------------------------------------------------------------
// Pump command (written by state handlers; consumed by the service)
// ---------------------------------------------------------------------------

/// Desired relay state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize)]
pub enum PumpCommand {
    #[default]
    Off,
    On,
}

impl PumpCommand {
    pub fn is_on(self) -> bool {
        matches!(self, Self::On)
    }
}

/// One control cycle's output: the command plus the fault that forced it
/// off, if any.  Handed to the actuator and dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PumpDecision {
    pub command: PumpCommand,
    pub fault: Option<FaultTag>,
}

// ---------------------------------------------------------------------------
// FsmContext
// ---------------------------------------------------------------------------

/// The context passed to every state handler.
#[derive(Debug, Clone, Default)]
pub struct FsmContext {
    // -- Timing --
    /// Control cycles since the current state was entered.
    pub ticks_in_state: u64,
    /// Monotonic control cycle count.
    pub total_ticks: u64,

    // -- Inputs --
    /// Confirmed selector/float view for this cycle.
    pub inputs: ClassifiedInputs,

    // -- Output --
    /// Command to apply after the tick.
    pub command: PumpCommand,

    // -- Safety --
    /// Active fault bitmask (see [`FaultTag::mask`]).
    pub fault_flags: u8,
}

impl FsmContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if **any** fault is active.
    pub fn has_faults(&self) -> bool {
        self.fault_flags != 0
    }

    pub fn has_fault(&self, fault: FaultTag) -> bool {
        self.fault_flags & fault.mask() != 0
    }
}

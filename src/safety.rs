//! Fault latch.
//!
//! Runs **every cycle before the FSM** and rebuilds the fault bitmask from
//! the classifier's confirmed view.  The supervisor forces `Fault` while
//! the mask is non-zero and the service refuses to energise the pump.
//!
//! ## Fault lifecycle
//!
//! 1. The classifier confirms an invalid selector pattern.
//! 2. The latch sets [`FaultTag::WiringFault`] and logs it once.
//! 3. The service jumps the FSM to `Fault`; the pump is commanded off.
//! 4. Each cycle the latch re-evaluates.  Once the classifier confirms a
//!    valid pattern the bit is cleared.
//! 5. With the mask at zero the FSM leaves `Fault` for whatever state the
//!    current inputs call for.
//!
//! There is no manual reset: every fault is self-clearing.

use crate::error::FaultTag;
use crate::sensors::ClassifiedInputs;
use log::{error, info};

pub struct FaultLatch {
    faults: u8,
    /// Number of times any fault bit went from clear to set.
    raised: u32,
}

impl Default for FaultLatch {
    fn default() -> Self {
        Self::new()
    }
}

impl FaultLatch {
    pub fn new() -> Self {
        Self {
            faults: 0,
            raised: 0,
        }
    }

    /// Evaluate every fault condition.  Returns the updated bitmask.
    pub fn evaluate(&mut self, inputs: &ClassifiedInputs) -> u8 {
        self.eval_fault(FaultTag::WiringFault, inputs.wiring_fault);
        self.faults
    }

    pub fn faults(&self) -> u8 {
        self.faults
    }

    pub fn has_faults(&self) -> bool {
        self.faults != 0
    }

    pub fn has_fault(&self, fault: FaultTag) -> bool {
        self.faults & fault.mask() != 0
    }

    pub fn times_raised(&self) -> u32 {
        self.raised
    }

    // ── Internal ──────────────────────────────────────────────────

    fn eval_fault(&mut self, fault: FaultTag, condition: bool) {
        if condition {
            if self.faults & fault.mask() == 0 {
                error!("FAULT SET: {fault}");
                self.raised = self.raised.saturating_add(1);
            }
            self.faults |= fault.mask();
        } else {
            if self.faults & fault.mask() != 0 {
                info!("FAULT CLEARED: {fault}");
            }
            self.faults &= !fault.mask();
        }
    }
}

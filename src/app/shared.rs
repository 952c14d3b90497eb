//! Controller behind a single task-level mutex.
//!
//! For hosts where more than one task can reach the controller (a timer
//! task running cycles, a display task reading telemetry).  The lock is
//! held for a whole cycle, so a reader can never observe classifier and
//! supervisor state from two different cycles.
//!
//! The cycle logs, writes GPIO and emits events, so the lock is a
//! [`TaskRawMutex`]: a blocking OS mutex (pthread, FreeRTOS underneath on
//! ESP-IDF) that leaves interrupts enabled.  Call it from tasks only, never
//! from an ISR or from inside another critical section.  The lock is not
//! reentrant: calling back into the same `SharedController` from inside
//! [`SharedController::with`] deadlocks.

use core::cell::RefCell;
use std::sync::{Mutex as OsMutex, PoisonError};

use embassy_sync::blocking_mutex::Mutex;
use embassy_sync::blocking_mutex::raw::RawMutex;

use crate::fsm::StateId;
use crate::fsm::context::PumpDecision;

use super::events::TelemetryData;
use super::ports::{ActuatorPort, EventSink, RawInputPort};
use super::service::PumpController;

/// [`RawMutex`] over an OS mutex.  Contending tasks block; interrupts stay
/// enabled for the whole locked region.
pub struct TaskRawMutex(OsMutex<()>);

impl TaskRawMutex {
    pub const fn new() -> Self {
        Self(OsMutex::new(()))
    }
}

impl Default for TaskRawMutex {
    fn default() -> Self {
        Self::new()
    }
}

// SAFETY: `lock` runs `f` only while holding the OS mutex, so no two
// callers are ever inside `f` at once.
unsafe impl RawMutex for TaskRawMutex {
    #[allow(clippy::declare_interior_mutable_const)]
    const INIT: Self = Self::new();

    fn lock<R>(&self, f: impl FnOnce() -> R) -> R {
        // A panic in an earlier cycle poisons the lock; the controller state
        // behind it is still whole (the RefCell borrow was released).
        let _guard = self.0.lock().unwrap_or_else(PoisonError::into_inner);
        f()
    }
}

pub struct SharedController {
    inner: Mutex<TaskRawMutex, RefCell<PumpController>>,
}

impl SharedController {
    pub fn new(controller: PumpController) -> Self {
        Self {
            inner: Mutex::new(RefCell::new(controller)),
        }
    }

    /// [`PumpController::run_cycle`] under the lock.
    pub fn run_cycle(
        &self,
        now_ms: u32,
        inputs: &mut impl RawInputPort,
        actuator: &mut impl ActuatorPort,
        sink: &mut impl EventSink,
    ) -> PumpDecision {
        self.inner
            .lock(|c| c.borrow_mut().run_cycle(now_ms, inputs, actuator, sink))
    }

    /// [`PumpController::on_sample_tick`] under the lock.
    pub fn on_sample_tick(
        &self,
        now_ms: u32,
        inputs: &mut impl RawInputPort,
        actuator: &mut impl ActuatorPort,
        sink: &mut impl EventSink,
    ) -> Option<PumpDecision> {
        self.inner
            .lock(|c| c.borrow_mut().on_sample_tick(now_ms, inputs, actuator, sink))
    }

    pub fn state(&self) -> StateId {
        self.inner.lock(|c| c.borrow().state())
    }

    pub fn telemetry(&self) -> TelemetryData {
        self.inner.lock(|c| c.borrow().build_telemetry())
    }

    /// Run `f` with exclusive access for the duration of the closure.
    pub fn with<R>(&self, f: impl FnOnce(&mut PumpController) -> R) -> R {
        self.inner.lock(|c| f(&mut c.borrow_mut()))
    }
}

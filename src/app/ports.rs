//! Port traits: the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ PumpController (domain)
//! ```
//!
//! Driven adapters (GPIO lines, the pump relay, log output) implement these
//! traits.  The [`PumpController`](super::service::PumpController) consumes
//! them via generics, so the domain core never touches hardware directly.
//!
//! Every port is synchronous and infallible from the core's point of view:
//! adapters absorb their own I/O errors and fall back to safe levels.

use crate::fsm::context::PumpCommand;
use crate::sensors::RawSample;

// ───────────────────────────────────────────────────────────────
// Raw input port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Instantaneous read of the selector and float lines.
pub trait RawInputPort {
    /// Must not block.  `now_ms` is stamped into the returned sample.
    fn read_raw(&mut self, now_ms: u32) -> RawSample;
}

// ───────────────────────────────────────────────────────────────
// Actuator port (driven adapter: domain → hardware)
// ───────────────────────────────────────────────────────────────

/// Write-side port for the pump contactor.
pub trait ActuatorPort {
    /// Drive the pump.  Idempotent: repeating a command has no further effect.
    fn set_pump(&mut self, command: PumpCommand);

    /// Whether the pump is currently energised.
    fn is_pump_on(&self) -> bool;
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging / display)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port.  Delivery is fire-and-forget; the controller never
/// waits on or checks the sink.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}

/// Sink that drops every event, for callers without a display or log.
pub struct NullSink;

impl EventSink for NullSink {
    fn emit(&mut self, _event: &super::events::AppEvent) {}
}

//! Mock hardware adapters for integration tests.
//!
//! Records every actuator call and event so tests can assert on the full
//! history without touching real GPIO.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use embedded_hal::digital::{ErrorType, InputPin, OutputPin};
use tankpump::app::events::AppEvent;
use tankpump::app::ports::{ActuatorPort, EventSink, RawInputPort};
use tankpump::fsm::context::PumpCommand;
use tankpump::sensors::RawSample;

// ── Scripted raw inputs ──────────────────────────────────────

/// Raw line levels the next read will return.
#[derive(Debug, Clone, Copy, Default)]
pub struct MockInputs {
    pub hand: bool,
    pub auto: bool,
    pub float_ok: bool,
}

#[allow(dead_code)]
impl MockInputs {
    pub fn off(float_ok: bool) -> Self {
        Self {
            hand: false,
            auto: false,
            float_ok,
        }
    }

    pub fn manual(float_ok: bool) -> Self {
        Self {
            hand: true,
            auto: false,
            float_ok,
        }
    }

    pub fn auto(float_ok: bool) -> Self {
        Self {
            hand: false,
            auto: true,
            float_ok,
        }
    }

    pub fn both(float_ok: bool) -> Self {
        Self {
            hand: true,
            auto: true,
            float_ok,
        }
    }
}

impl RawInputPort for MockInputs {
    fn read_raw(&mut self, now_ms: u32) -> RawSample {
        RawSample {
            timestamp_ms: now_ms,
            hand_line: self.hand,
            auto_line: self.auto,
            float_line: self.float_ok,
        }
    }
}

// ── MockPump ──────────────────────────────────────────────────

pub struct MockPump {
    pub calls: Vec<PumpCommand>,
}

#[allow(dead_code)]
impl MockPump {
    pub fn new() -> Self {
        Self { calls: Vec::new() }
    }

    pub fn last(&self) -> Option<PumpCommand> {
        self.calls.last().copied()
    }
}

impl Default for MockPump {
    fn default() -> Self {
        Self::new()
    }
}

impl ActuatorPort for MockPump {
    fn set_pump(&mut self, command: PumpCommand) {
        self.calls.push(command);
    }

    fn is_pump_on(&self) -> bool {
        self.last() == Some(PumpCommand::On)
    }
}

// ── Recording event sink ─────────────────────────────────────

pub struct RecordingSink {
    pub events: Vec<AppEvent>,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn count(&self, pred: impl Fn(&AppEvent) -> bool) -> usize {
        self.events.iter().filter(|e| pred(e)).count()
    }
}

impl Default for RecordingSink {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(event.clone());
    }
}

// ── embedded-hal pins backed by shared atomics ───────────────

/// Input pin whose level the test flips from outside.
#[derive(Clone, Default)]
pub struct SimPin(pub Arc<AtomicBool>);

#[allow(dead_code)]
impl SimPin {
    pub fn set(&self, high: bool) {
        self.0.store(high, Ordering::SeqCst);
    }

    pub fn get(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

impl ErrorType for SimPin {
    type Error = core::convert::Infallible;
}

impl InputPin for SimPin {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        Ok(self.get())
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        Ok(!self.get())
    }
}

impl OutputPin for SimPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.set(false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.set(true);
        Ok(())
    }
}

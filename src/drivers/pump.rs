//! Pump contactor driver.
//!
//! One digital output drives the coil of the pump contactor (via a
//! transistor stage).  HIGH = energised = pump running.
//!
//! ## Safety contract
//!
//! The relay is a dumb actuator.  Dry-run and fault interlocks are enforced
//! by the supervisor before a command ever reaches this driver.
//!
//! ## Idempotence
//!
//! The output is only written when the command changes (and always on the
//! first command), so repeating a command never re-toggles the coil.

use embedded_hal::digital::{Error as _, OutputPin};
use log::{debug, info, warn};

use crate::app::ports::ActuatorPort;
use crate::error::{Error, GpioError};
use crate::fsm::context::PumpCommand;

pub struct PumpRelay<P> {
    pin: P,
    /// Last command successfully written, `None` until the first write.
    applied: Option<PumpCommand>,
    switch_count: u32,
    write_failures: u32,
}

impl<P: OutputPin> PumpRelay<P> {
    pub fn new(pin: P) -> Self {
        Self {
            pin,
            applied: None,
            switch_count: 0,
            write_failures: 0,
        }
    }

    /// Drive the contactor.  On a failed pin write the recorded state is
    /// left untouched, so repeating the command retries it.
    pub fn try_set(&mut self, command: PumpCommand) -> Result<(), Error> {
        if self.applied == Some(command) {
            return Ok(());
        }

        let result = match command {
            PumpCommand::On => self.pin.set_high(),
            PumpCommand::Off => self.pin.set_low(),
        };
        if let Err(e) = result {
            self.write_failures = self.write_failures.saturating_add(1);
            debug!("pump: pin error {:?}", e.kind());
            return Err(GpioError::WriteFailed.into());
        }

        if self.applied.is_some() {
            self.switch_count = self.switch_count.saturating_add(1);
        }
        self.applied = Some(command);
        match command {
            PumpCommand::On => info!("pump: contactor energised"),
            PumpCommand::Off => info!("pump: contactor released"),
        }
        Ok(())
    }

    /// [`try_set`](Self::try_set) for the control loop: failures are logged
    /// and retried on the next cycle.
    pub fn set(&mut self, command: PumpCommand) {
        if let Err(e) = self.try_set(command) {
            warn!("pump: {} driving {:?}, retrying next cycle", e, command);
        }
    }

    /// Last command that reached the pin, `None` before the first write.
    pub fn command(&self) -> Option<PumpCommand> {
        self.applied
    }

    pub fn is_running(&self) -> bool {
        self.applied == Some(PumpCommand::On)
    }

    /// On/off changes since the first write.
    pub fn switch_count(&self) -> u32 {
        self.switch_count
    }

    pub fn write_failures(&self) -> u32 {
        self.write_failures
    }
}

impl<P: OutputPin> ActuatorPort for PumpRelay<P> {
    fn set_pump(&mut self, command: PumpCommand) {
        self.set(command);
    }

    fn is_pump_on(&self) -> bool {
        self.is_running()
    }
}

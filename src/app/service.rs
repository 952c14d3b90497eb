//! Application service: the hexagonal core.
//!
//! [`PumpController`] owns the signal classifier, the supervisor FSM and
//! the fault latch.  All I/O flows through port traits injected at call
//! sites, so the whole cycle runs against mock adapters in tests.
//!
//! ```text
//!  RawInputPort ──▶ ┌──────────────────────────────┐ ──▶ EventSink
//!                   │        PumpController        │
//!  ActuatorPort ◀── │ Classifier · Latch · FSM     │
//!                   └──────────────────────────────┘
//! ```
//!
//! A cycle is: sample → evaluate → apply.  The actuator is written once,
//! at the very end, with the decision of a fully evaluated cycle.

use log::{info, warn};

use crate::config::ControllerConfig;
use crate::error::{ConfigError, FaultTag};
use crate::fsm::context::{FsmContext, PumpCommand, PumpDecision};
use crate::fsm::states::build_state_table;
use crate::fsm::{Fsm, StateId};
use crate::safety::FaultLatch;
use crate::sensors::{FloatState, SelectorState, SignalClassifier};

use super::events::{AppEvent, TelemetryData};
use super::ports::{ActuatorPort, EventSink, RawInputPort};

// ───────────────────────────────────────────────────────────────
// PumpController
// ───────────────────────────────────────────────────────────────

/// The application service orchestrates all domain logic.
pub struct PumpController {
    config: ControllerConfig,
    classifier: SignalClassifier,
    fsm: Fsm,
    ctx: FsmContext,
    latch: FaultLatch,
    /// Sampling ticks since the last evaluation (see [`Self::on_sample_tick`]).
    pending_samples: u32,
    cycle_count: u64,
}

impl PumpController {
    /// Construct the controller from a validated configuration.
    ///
    /// Does **not** start the FSM; call [`start`](Self::start) next.
    pub fn new(config: ControllerConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let classifier = SignalClassifier::new(&config);
        let fsm = Fsm::new(build_state_table(), StateId::Idle);

        Ok(Self {
            config,
            classifier,
            fsm,
            ctx: FsmContext::new(),
            latch: FaultLatch::new(),
            pending_samples: 0,
            cycle_count: 0,
        })
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Enter `Idle` and drive the pump off before any data is confirmed.
    pub fn start(&mut self, actuator: &mut impl ActuatorPort, sink: &mut impl EventSink) {
        self.fsm.start(&mut self.ctx);
        actuator.set_pump(PumpCommand::Off);
        sink.emit(&AppEvent::Started(self.fsm.current_state()));
        info!(
            "PumpController started in {:?} (debounce {} ticks / {} ms)",
            self.fsm.current_state(),
            self.config.debounce_threshold_ticks,
            self.config.debounce_window_ms()
        );
    }

    // ── Per-cycle orchestration ───────────────────────────────

    /// Run one full control cycle: sample → evaluate → apply.
    pub fn run_cycle(
        &mut self,
        now_ms: u32,
        inputs: &mut impl RawInputPort,
        actuator: &mut impl ActuatorPort,
        sink: &mut impl EventSink,
    ) -> PumpDecision {
        let raw = inputs.read_raw(now_ms);
        self.classifier.sample(&raw);
        self.pending_samples = 0;
        self.evaluate(actuator, sink)
    }

    /// Sampling-rate entry point.  Samples on every call and evaluates on
    /// every `samples_per_cycle()`-th call, returning that cycle's decision.
    pub fn on_sample_tick(
        &mut self,
        now_ms: u32,
        inputs: &mut impl RawInputPort,
        actuator: &mut impl ActuatorPort,
        sink: &mut impl EventSink,
    ) -> Option<PumpDecision> {
        let raw = inputs.read_raw(now_ms);
        self.classifier.sample(&raw);
        self.pending_samples += 1;

        if self.pending_samples < self.config.samples_per_cycle() {
            return None;
        }
        self.pending_samples = 0;
        Some(self.evaluate(actuator, sink))
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn state(&self) -> StateId {
        self.fsm.current_state()
    }

    pub fn selector_state(&self) -> SelectorState {
        self.classifier.selector_state()
    }

    pub fn float_state(&self) -> FloatState {
        self.classifier.float_state()
    }

    /// Current active fault bitmask (0 = no faults).
    pub fn fault_flags(&self) -> u8 {
        self.latch.faults()
    }

    /// Control cycles evaluated since start-up.
    pub fn cycle_count(&self) -> u64 {
        self.cycle_count
    }

    pub fn classifier(&self) -> &SignalClassifier {
        &self.classifier
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    pub fn build_telemetry(&self) -> TelemetryData {
        let inputs = self.classifier.inputs();
        TelemetryData {
            state: self.fsm.current_state(),
            selector: inputs.selector,
            float: inputs.float,
            wiring_fault: inputs.wiring_fault,
            command: self.gated_command(),
            fault_flags: self.latch.faults(),
            cycles: self.cycle_count,
            classifier: self.classifier.stats(),
        }
    }

    // ── Internal ──────────────────────────────────────────────

    fn evaluate(
        &mut self,
        actuator: &mut impl ActuatorPort,
        sink: &mut impl EventSink,
    ) -> PumpDecision {
        self.cycle_count += 1;
        let prev_state = self.fsm.current_state();

        // 1. Latest confirmed view from the classifier
        self.ctx.inputs = self.classifier.inputs();

        // 2. Fault evaluation
        let prev_faults = self.latch.faults();
        let faults = self.latch.evaluate(&self.ctx.inputs);
        self.ctx.fault_flags = faults;

        if faults != 0 && self.fsm.current_state() != StateId::Fault {
            warn!("Fault! flags=0b{:08b}", faults);
            self.fsm.force_transition(StateId::Fault, &mut self.ctx);
        }
        if faults != 0 && prev_faults == 0 {
            sink.emit(&AppEvent::FaultDetected(faults));
        } else if faults == 0 && prev_faults != 0 {
            sink.emit(&AppEvent::FaultCleared);
        }

        // 3. FSM tick (pure state logic)
        self.fsm.tick(&mut self.ctx);

        // 4. Apply the finished decision
        let decision = PumpDecision {
            command: self.gated_command(),
            fault: FaultTag::first_in(faults),
        };
        actuator.set_pump(decision.command);

        // 5. Events
        let new_state = self.fsm.current_state();
        if new_state != prev_state {
            sink.emit(&AppEvent::StateChanged {
                from: prev_state,
                to: new_state,
            });
        }

        let every = self.config.telemetry_interval_cycles;
        if every != 0 && self.cycle_count % every as u64 == 0 {
            sink.emit(&AppEvent::Telemetry(self.build_telemetry()));
        }

        decision
    }

    /// The FSM's command, vetoed by any active fault.
    fn gated_command(&self) -> PumpCommand {
        if self.ctx.command.is_on() && !self.latch.has_faults() {
            PumpCommand::On
        } else {
            PumpCommand::Off
        }
    }
}

//! SharedController: cycles on one thread, readers on another.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;

use crate::mock_hw::{MockInputs, MockPump, RecordingSink};

use tankpump::app::ports::NullSink;
use tankpump::app::service::PumpController;
use tankpump::app::shared::SharedController;
use tankpump::config::ControllerConfig;
use tankpump::fsm::StateId;
use tankpump::fsm::context::PumpCommand;

fn shared(threshold: u16) -> SharedController {
    let config = ControllerConfig {
        debounce_threshold_ticks: threshold,
        telemetry_interval_cycles: 0,
        ..ControllerConfig::default()
    };
    let mut controller = PumpController::new(config).unwrap();
    controller.start(&mut MockPump::new(), &mut NullSink);
    SharedController::new(controller)
}

#[test]
fn run_cycle_through_the_lock() {
    let shared = shared(2);
    let mut lines = MockInputs::manual(false);
    let mut pump = MockPump::new();
    let mut sink = RecordingSink::new();

    shared.run_cycle(0, &mut lines, &mut pump, &mut sink);
    assert_eq!(shared.state(), StateId::Idle);
    let decision = shared.run_cycle(20, &mut lines, &mut pump, &mut sink);
    assert_eq!(decision.command, PumpCommand::On);
    assert_eq!(shared.state(), StateId::ManualRun);
    assert_eq!(shared.with(|c| c.cycle_count()), 2);
}

#[test]
fn readers_never_see_a_torn_snapshot() {
    let shared = Arc::new(shared(3));
    let done = Arc::new(AtomicBool::new(false));

    let writer = {
        let shared = Arc::clone(&shared);
        let done = Arc::clone(&done);
        thread::spawn(move || {
            let mut pump = MockPump::new();
            let patterns = [
                MockInputs::auto(true),
                MockInputs::manual(false),
                MockInputs::off(true),
                MockInputs::both(true),
                MockInputs::auto(false),
            ];
            let mut now = 0u32;
            for lines in patterns.iter().cycle().take(25) {
                let mut lines = *lines;
                for _ in 0..4 {
                    shared.run_cycle(now, &mut lines, &mut pump, &mut NullSink);
                    now += 20;
                }
            }
            done.store(true, Ordering::SeqCst);
            pump
        })
    };

    let mut last_cycles = 0;
    while !done.load(Ordering::SeqCst) {
        let t = shared.telemetry();
        assert!(t.cycles >= last_cycles);
        last_cycles = t.cycles;

        match t.state {
            StateId::ManualRun | StateId::AutoRun => assert_eq!(t.command, PumpCommand::On),
            StateId::Idle | StateId::Fault => assert_eq!(t.command, PumpCommand::Off),
        }
        assert_eq!(t.state == StateId::Fault, t.wiring_fault);
    }

    let pump = writer.join().unwrap();
    assert_eq!(shared.telemetry().cycles, 100);
    // start() went through its own pump; this one only saw cycles.
    assert_eq!(pump.calls.len(), 100);
}

#[test]
fn on_sample_tick_through_the_lock() {
    let config = ControllerConfig {
        sample_period_ms: 10,
        control_period_ms: 20,
        debounce_threshold_ticks: 1,
        ..ControllerConfig::default()
    };
    let shared = SharedController::new(PumpController::new(config).unwrap());
    shared.with(|c| c.start(&mut MockPump::new(), &mut NullSink));

    let mut lines = MockInputs::auto(true);
    let mut pump = MockPump::new();
    assert!(shared.on_sample_tick(0, &mut lines, &mut pump, &mut NullSink).is_none());
    let decision = shared.on_sample_tick(10, &mut lines, &mut pump, &mut NullSink);
    assert_eq!(decision.map(|d| d.command), Some(PumpCommand::On));
    assert_eq!(shared.state(), StateId::AutoRun);
}

//! PumpController → events → actuator, against mock adapters.

use crate::mock_hw::{MockInputs, MockPump, RecordingSink};

use tankpump::app::events::AppEvent;
use tankpump::app::service::PumpController;
use tankpump::config::ControllerConfig;
use tankpump::error::FaultTag;
use tankpump::fsm::StateId;
use tankpump::fsm::context::PumpCommand;

fn make_app(threshold: u16) -> (PumpController, MockPump, RecordingSink) {
    let config = ControllerConfig {
        debounce_threshold_ticks: threshold,
        telemetry_interval_cycles: 0,
        ..ControllerConfig::default()
    };
    let mut app = PumpController::new(config).unwrap();
    let mut pump = MockPump::new();
    let mut sink = RecordingSink::new();
    app.start(&mut pump, &mut sink);
    (app, pump, sink)
}

fn run(
    app: &mut PumpController,
    lines: MockInputs,
    cycles: u32,
    pump: &mut MockPump,
    sink: &mut RecordingSink,
) {
    let mut lines = lines;
    for i in 0..cycles {
        app.run_cycle(i * 20, &mut lines, pump, sink);
    }
}

#[test]
fn start_emits_started_and_stops_pump() {
    let (app, pump, sink) = make_app(3);
    assert_eq!(app.state(), StateId::Idle);
    assert_eq!(pump.calls, vec![PumpCommand::Off]);
    assert!(matches!(sink.events.as_slice(), [AppEvent::Started(StateId::Idle)]));
}

#[test]
fn every_cycle_writes_the_actuator_once() {
    let (mut app, mut pump, mut sink) = make_app(3);
    run(&mut app, MockInputs::off(true), 10, &mut pump, &mut sink);
    // One write from start() plus one per cycle.
    assert_eq!(pump.calls.len(), 11);
    assert!(pump.calls.iter().all(|c| *c == PumpCommand::Off));
    assert_eq!(app.cycle_count(), 10);
}

#[test]
fn state_change_events_follow_transitions() {
    let (mut app, mut pump, mut sink) = make_app(2);
    run(&mut app, MockInputs::manual(false), 2, &mut pump, &mut sink);
    run(&mut app, MockInputs::off(false), 2, &mut pump, &mut sink);

    let changes: Vec<_> = sink
        .events
        .iter()
        .filter_map(|e| match e {
            AppEvent::StateChanged { from, to } => Some((*from, *to)),
            _ => None,
        })
        .collect();
    assert_eq!(
        changes,
        vec![
            (StateId::Idle, StateId::ManualRun),
            (StateId::ManualRun, StateId::Idle),
        ]
    );
}

#[test]
fn wiring_fault_raises_and_clears_events() {
    let (mut app, mut pump, mut sink) = make_app(3);
    run(&mut app, MockInputs::auto(true), 3, &mut pump, &mut sink);
    assert_eq!(app.state(), StateId::AutoRun);

    let mut lines = MockInputs::both(true);
    let d1 = app.run_cycle(100, &mut lines, &mut pump, &mut sink);
    let d2 = app.run_cycle(120, &mut lines, &mut pump, &mut sink);
    assert_eq!(d1.command, PumpCommand::On, "bounce must not stop the pump");
    assert_eq!(d2.command, PumpCommand::On);

    let d3 = app.run_cycle(140, &mut lines, &mut pump, &mut sink);
    assert_eq!(d3.command, PumpCommand::Off);
    assert_eq!(d3.fault, Some(FaultTag::WiringFault));
    assert_eq!(app.state(), StateId::Fault);
    assert_eq!(app.fault_flags(), FaultTag::WiringFault.mask());
    assert_eq!(sink.count(|e| matches!(e, AppEvent::FaultDetected(_))), 1);

    // Fault persists while the clean pattern is still being confirmed.
    let mut lines = MockInputs::auto(true);
    for t in [160, 180] {
        let d = app.run_cycle(t, &mut lines, &mut pump, &mut sink);
        assert_eq!(d.command, PumpCommand::Off);
        assert_eq!(app.state(), StateId::Fault);
    }

    let d = app.run_cycle(200, &mut lines, &mut pump, &mut sink);
    assert_eq!(d.command, PumpCommand::On);
    assert_eq!(d.fault, None);
    assert_eq!(app.state(), StateId::AutoRun);
    assert_eq!(sink.count(|e| matches!(e, AppEvent::FaultCleared)), 1);
}

#[test]
fn telemetry_emitted_on_interval() {
    let config = ControllerConfig {
        telemetry_interval_cycles: 5,
        ..ControllerConfig::default()
    };
    let mut app = PumpController::new(config).unwrap();
    let mut pump = MockPump::new();
    let mut sink = RecordingSink::new();
    app.start(&mut pump, &mut sink);

    run(&mut app, MockInputs::off(true), 12, &mut pump, &mut sink);
    let telemetry: Vec<_> = sink
        .events
        .iter()
        .filter_map(|e| match e {
            AppEvent::Telemetry(t) => Some(t.cycles),
            _ => None,
        })
        .collect();
    assert_eq!(telemetry, vec![5, 10]);
}

#[test]
fn chattering_float_never_reaches_the_pump() {
    let (mut app, mut pump, mut sink) = make_app(4);
    run(&mut app, MockInputs::auto(true), 4, &mut pump, &mut sink);
    assert_eq!(app.state(), StateId::AutoRun);

    // Float chatters low for up to three ticks at a time.
    for burst in [1, 2, 3, 1, 3] {
        run(&mut app, MockInputs::auto(false), burst, &mut pump, &mut sink);
        run(&mut app, MockInputs::auto(true), 1, &mut pump, &mut sink);
    }
    assert_eq!(app.state(), StateId::AutoRun);
    assert!(pump.calls.iter().skip(4).all(|c| *c == PumpCommand::On));
    assert_eq!(app.classifier().stats().float_glitches, 5);
}

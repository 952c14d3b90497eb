//! Pins → GpioInputs → PumpController → PumpRelay → pin, end to end.

use crate::mock_hw::{RecordingSink, SimPin};

use tankpump::adapters::gpio::GpioInputs;
use tankpump::app::events::AppEvent;
use tankpump::app::service::PumpController;
use tankpump::config::ControllerConfig;
use tankpump::drivers::pump::PumpRelay;
use tankpump::fsm::StateId;

struct Rig {
    hand: SimPin,
    auto: SimPin,
    float: SimPin,
    coil: SimPin,
    inputs: GpioInputs<SimPin, SimPin, SimPin>,
    relay: PumpRelay<SimPin>,
    sink: RecordingSink,
    app: PumpController,
    now: u32,
}

impl Rig {
    fn new(config: ControllerConfig) -> Self {
        let (hand, auto, float, coil) = (
            SimPin::default(),
            SimPin::default(),
            SimPin::default(),
            SimPin::default(),
        );
        // Contactor starts energised to prove start() releases it.
        coil.set(true);

        let mut rig = Self {
            inputs: GpioInputs::new(hand.clone(), auto.clone(), float.clone()),
            relay: PumpRelay::new(coil.clone()),
            sink: RecordingSink::new(),
            app: PumpController::new(config).unwrap(),
            hand,
            auto,
            float,
            coil,
            now: 0,
        };
        rig.app.start(&mut rig.relay, &mut rig.sink);
        rig
    }

    fn cycles(&mut self, n: u32) {
        for _ in 0..n {
            self.app
                .run_cycle(self.now, &mut self.inputs, &mut self.relay, &mut self.sink);
            self.now += 20;
        }
    }
}

#[test]
fn start_releases_contactor() {
    let rig = Rig::new(ControllerConfig::default());
    assert!(!rig.coil.get());
    assert_eq!(rig.relay.switch_count(), 0);
}

#[test]
fn operator_cycle_through_every_position() {
    let mut rig = Rig::new(ControllerConfig::default());

    rig.hand.set(true);
    rig.cycles(3);
    assert_eq!(rig.app.state(), StateId::ManualRun);
    assert!(rig.coil.get(), "manual runs even with the tank low");

    rig.hand.set(false);
    rig.auto.set(true);
    rig.cycles(3);
    assert_eq!(rig.app.state(), StateId::Idle);
    assert!(!rig.coil.get(), "auto must not run dry");

    rig.float.set(true);
    rig.cycles(3);
    assert_eq!(rig.app.state(), StateId::AutoRun);
    assert!(rig.coil.get());

    rig.auto.set(false);
    rig.cycles(3);
    assert_eq!(rig.app.state(), StateId::Idle);
    assert!(!rig.coil.get());

    // on, off, on, off after the initial release
    assert_eq!(rig.relay.switch_count(), 4);
}

#[test]
fn crossed_selector_wiring_stops_the_pump() {
    let mut rig = Rig::new(ControllerConfig::default());
    rig.auto.set(true);
    rig.float.set(true);
    rig.cycles(3);
    assert!(rig.coil.get());

    rig.hand.set(true);
    rig.cycles(3);
    assert_eq!(rig.app.state(), StateId::Fault);
    assert!(!rig.coil.get());
    assert_eq!(rig.sink.count(|e| matches!(e, AppEvent::FaultDetected(_))), 1);

    rig.hand.set(false);
    rig.cycles(3);
    assert_eq!(rig.app.state(), StateId::AutoRun);
    assert!(rig.coil.get());
}

#[test]
fn inverted_float_polarity() {
    let config = ControllerConfig {
        float_ok_when_high: false,
        ..ControllerConfig::default()
    };
    let mut rig = Rig::new(config);

    // Float line LOW means level OK with this wiring.
    rig.auto.set(true);
    rig.cycles(3);
    assert_eq!(rig.app.state(), StateId::AutoRun);
    assert!(rig.coil.get());

    rig.float.set(true);
    rig.cycles(3);
    assert_eq!(rig.app.state(), StateId::Idle);
    assert!(!rig.coil.get());
}

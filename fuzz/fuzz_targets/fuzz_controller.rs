//! Fuzz target: `PumpController::run_cycle`
//!
//! The first byte picks the debounce threshold; every following byte is
//! one sampling tick (bit 0 = HAND line, bit 1 = AUTO line, bit 2 = float
//! line).  After each cycle the pump command must agree with the safety
//! interlocks: never on with a wiring fault, never on in AUTO with the
//! tank low.
//!
//! cargo fuzz run fuzz_controller

#![no_main]

use libfuzzer_sys::fuzz_target;
use tankpump::app::ports::{ActuatorPort, NullSink, RawInputPort};
use tankpump::app::service::PumpController;
use tankpump::config::ControllerConfig;
use tankpump::fsm::StateId;
use tankpump::fsm::context::PumpCommand;
use tankpump::sensors::{FloatState, RawSample, SelectorState};

struct Byte(u8);

impl RawInputPort for Byte {
    fn read_raw(&mut self, now_ms: u32) -> RawSample {
        RawSample {
            timestamp_ms: now_ms,
            hand_line: self.0 & 0b001 != 0,
            auto_line: self.0 & 0b010 != 0,
            float_line: self.0 & 0b100 != 0,
        }
    }
}

struct Relay(PumpCommand);

impl ActuatorPort for Relay {
    fn set_pump(&mut self, command: PumpCommand) {
        self.0 = command;
    }

    fn is_pump_on(&self) -> bool {
        self.0.is_on()
    }
}

fuzz_target!(|data: &[u8]| {
    let Some((&first, ticks)) = data.split_first() else {
        return;
    };

    let config = ControllerConfig {
        debounce_threshold_ticks: u16::from(first % 16) + 1,
        ..ControllerConfig::default()
    };
    let Ok(mut app) = PumpController::new(config) else {
        return;
    };
    let mut relay = Relay(PumpCommand::On);
    app.start(&mut relay, &mut NullSink);
    assert_eq!(relay.0, PumpCommand::Off, "start must release the pump");

    for (i, &b) in ticks.iter().enumerate() {
        let decision = app.run_cycle(i as u32 * 20, &mut Byte(b), &mut relay, &mut NullSink);
        let inputs = app.classifier().inputs();

        assert_eq!(relay.0, decision.command);
        if inputs.wiring_fault {
            assert_eq!(app.state(), StateId::Fault);
            assert_eq!(decision.command, PumpCommand::Off);
        }
        if inputs.selector == SelectorState::Auto && inputs.float == FloatState::LevelLow {
            assert_eq!(decision.command, PumpCommand::Off, "dry run in AUTO");
        }
        if inputs.selector == SelectorState::Off {
            assert_eq!(decision.command, PumpCommand::Off);
        }
    }
});

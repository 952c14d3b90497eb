//! Tank pump controller firmware: main entry point.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                    Adapters (outer ring)                     │
//! │                                                              │
//! │  GpioInputs        PumpRelay        LogEventSink   Clock     │
//! │  (RawInputPort)    (ActuatorPort)   (EventSink)              │
//! │                                                              │
//! │  ───────────────── Port Trait Boundary ────────────────      │
//! │                                                              │
//! │  ┌──────────────────────────────────────────────────────┐    │
//! │  │            PumpController (pure logic)               │    │
//! │  │  SignalClassifier · FaultLatch · Supervisor FSM      │    │
//! │  └──────────────────────────────────────────────────────┘    │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! The main loop runs at the sampling period and never exits.
#![deny(unused_must_use)]

use anyhow::Result;
use esp_idf_hal::delay::FreeRtos;
use esp_idf_hal::gpio::{AnyIOPin, AnyOutputPin, PinDriver, Pull};
use log::{info, warn};

use tankpump::adapters::gpio::GpioInputs;
use tankpump::adapters::log_sink::LogEventSink;
use tankpump::adapters::time::MonotonicClock;
use tankpump::app::service::PumpController;
use tankpump::config::ControllerConfig;
use tankpump::drivers::pump::PumpRelay;
use tankpump::error::Error;
use tankpump::pins;

/// Optional build-time override, e.g. `TANKPUMP_CONFIG='{"debounce_threshold_ticks":5,...}'`.
const CONFIG_OVERRIDE: Option<&str> = option_env!("TANKPUMP_CONFIG");

fn load_config() -> ControllerConfig {
    match CONFIG_OVERRIDE.map(ControllerConfig::from_json) {
        Some(Ok(config)) => {
            info!("Config: build-time override");
            config
        }
        Some(Err(e)) => {
            warn!("Config override rejected ({}), using defaults", e);
            ControllerConfig::default()
        }
        None => ControllerConfig::default(),
    }
}

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("tankpump v{}", env!("CARGO_PKG_VERSION"));

    // ── 2. Configuration (immutable from here on) ─────────────
    let config = load_config();
    let period_ms = config.sample_period_ms;

    // ── 3. Pins ───────────────────────────────────────────────
    // Inputs are claimed as IO pins: `set_pull` needs both directions.
    // SAFETY: each GPIO number is claimed exactly once, here.
    let (hand, auto, float, relay) = unsafe {
        (
            AnyIOPin::new(pins::SELECTOR_HAND_GPIO),
            AnyIOPin::new(pins::SELECTOR_AUTO_GPIO),
            AnyIOPin::new(pins::FLOAT_GPIO),
            AnyOutputPin::new(pins::PUMP_RELAY_GPIO),
        )
    };

    let mut hand = PinDriver::input(hand)?;
    hand.set_pull(Pull::Down)?;
    let mut auto = PinDriver::input(auto)?;
    auto.set_pull(Pull::Down)?;
    let mut float = PinDriver::input(float)?;
    float.set_pull(Pull::Down)?;

    let mut inputs = GpioInputs::new(hand, auto, float);
    let mut pump = PumpRelay::new(PinDriver::output(relay)?);
    let mut sink = LogEventSink::new();
    let clock = MonotonicClock::new();

    // ── 4. Controller ─────────────────────────────────────────
    let mut controller = PumpController::new(config).map_err(Error::from)?;
    controller.start(&mut pump, &mut sink);

    // ── 5. Fixed-period loop ──────────────────────────────────
    let mut next_tick = clock.now_ms();
    loop {
        let now = clock.now_ms();
        controller.on_sample_tick(now, &mut inputs, &mut pump, &mut sink);

        next_tick = next_tick.wrapping_add(period_ms);
        let remaining = next_tick.wrapping_sub(clock.now_ms());
        if remaining > 0 && remaining <= period_ms {
            FreeRtos::delay_ms(remaining);
        } else {
            // Overran the period; resynchronise instead of bursting.
            next_tick = clock.now_ms();
        }
    }
}

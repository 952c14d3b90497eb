//! Fuzz target: `ControllerConfig::from_json` / `from_blob`
//!
//! Arbitrary bytes must either be rejected with a `ConfigError` or produce
//! a configuration that passes validation and builds a controller.
//!
//! cargo fuzz run fuzz_config

#![no_main]

use libfuzzer_sys::fuzz_target;
use tankpump::app::service::PumpController;
use tankpump::config::ControllerConfig;

fuzz_target!(|data: &[u8]| {
    if let Ok(config) = ControllerConfig::from_blob(data) {
        assert!(config.validate().is_ok());
        assert!(PumpController::new(config).is_ok());
    }

    if let Ok(text) = core::str::from_utf8(data) {
        if let Ok(config) = ControllerConfig::from_json(text) {
            assert!(config.validate().is_ok());
            assert!(config.samples_per_cycle() >= 1);
        }
    }
});

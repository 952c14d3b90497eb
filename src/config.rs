//! Controller configuration parameters
//!
//! Supplied once at start-up and immutable for the life of the process.
//! Values come from defaults, a JSON document (bench/provisioning), or a
//! postcard blob kept in flash.  Every entry point validates before
//! handing a config to the controller.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::sensors::SelectorDecodeTable;

/// Upper bound on the debounce threshold (ticks).
pub const MAX_DEBOUNCE_TICKS: u16 = 1000;
/// Upper bound on the sampling period (milliseconds).
pub const MAX_SAMPLE_PERIOD_MS: u32 = 1000;
/// Upper bound on the control period (milliseconds).
pub const MAX_CONTROL_PERIOD_MS: u32 = 60_000;

/// Core controller configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControllerConfig {
    // --- Signal classification ---
    /// Consecutive identical samples required to confirm a new value
    pub debounce_threshold_ticks: u16,
    /// Raw line pattern → selector position
    pub selector_table: SelectorDecodeTable,
    /// Float line level that means "tank OK"
    pub float_ok_when_high: bool,

    // --- Timing ---
    /// Sampling tick period (milliseconds)
    pub sample_period_ms: u32,
    /// Control cycle period (milliseconds), a multiple of the sample period
    pub control_period_ms: u32,

    // --- Telemetry ---
    /// Control cycles between telemetry events (0 = disabled)
    pub telemetry_interval_cycles: u32,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            // Classification
            debounce_threshold_ticks: 3, // 60 ms at 20 ms ticks
            selector_table: SelectorDecodeTable::default(),
            float_ok_when_high: true,

            // Timing
            sample_period_ms: 20,  // 50 Hz
            control_period_ms: 20, // evaluate every sample

            // Telemetry
            telemetry_interval_cycles: 50, // ~1 s
        }
    }
}

impl ControllerConfig {
    /// Range and consistency checks.  Invalid values are rejected, never
    /// clamped.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.debounce_threshold_ticks == 0 {
            return Err(ConfigError::DebounceThresholdZero);
        }
        if self.debounce_threshold_ticks > MAX_DEBOUNCE_TICKS {
            return Err(ConfigError::DebounceThresholdTooLarge(
                self.debounce_threshold_ticks,
            ));
        }
        if self.sample_period_ms == 0 || self.sample_period_ms > MAX_SAMPLE_PERIOD_MS {
            return Err(ConfigError::PeriodOutOfRange("sample_period_ms"));
        }
        if self.control_period_ms == 0 || self.control_period_ms > MAX_CONTROL_PERIOD_MS {
            return Err(ConfigError::PeriodOutOfRange("control_period_ms"));
        }
        if self.control_period_ms % self.sample_period_ms != 0 {
            return Err(ConfigError::PeriodNotMultiple);
        }
        if !self.selector_table.covers_all_positions() {
            return Err(ConfigError::SelectorTableIncomplete);
        }
        Ok(())
    }

    /// Sampling ticks per control cycle (at least 1).
    pub fn samples_per_cycle(&self) -> u32 {
        (self.control_period_ms / self.sample_period_ms.max(1)).max(1)
    }

    /// Shortest glitch (milliseconds) that survives the debounce.
    pub fn debounce_window_ms(&self) -> u32 {
        self.debounce_threshold_ticks as u32 * self.sample_period_ms
    }

    /// Parse and validate a JSON document.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text).map_err(|_| ConfigError::Decode)?;
        config.validate()?;
        Ok(config)
    }

    /// Encode for flash storage.
    pub fn to_blob(&self) -> Result<Vec<u8>, ConfigError> {
        postcard::to_allocvec(self).map_err(|_| ConfigError::Decode)
    }

    /// Decode and validate a stored blob.
    pub fn from_blob(bytes: &[u8]) -> Result<Self, ConfigError> {
        let config: Self = postcard::from_bytes(bytes).map_err(|_| ConfigError::Decode)?;
        config.validate()?;
        Ok(config)
    }
}

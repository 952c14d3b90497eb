//! Unified error and fault types for the pump controller firmware.
//!
//! Two categories live here:
//!
//! - [`Error`]: things that can go wrong at the edges (bad configuration,
//!   GPIO reads and writes).  The control path itself never returns an error.
//! - [`FaultTag`]: reportable plant conditions.  A fault is not a program
//!   error; it forces the pump off and clears itself once the condition
//!   disappears.
//!
//! All types are `Copy` so they pass through the supervisor and event
//! sinks without allocation.

use core::fmt;

// ---------------------------------------------------------------------------
// Top-level firmware error
// ---------------------------------------------------------------------------

/// Every fallible edge operation in the firmware funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Configuration is invalid or could not be decoded.
    Config(ConfigError),
    /// A GPIO line could not be read or driven.
    Gpio(GpioError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(e) => write!(f, "config: {e}"),
            Self::Gpio(e) => write!(f, "gpio: {e}"),
        }
    }
}

impl core::error::Error for Error {}

// ---------------------------------------------------------------------------
// Configuration errors
// ---------------------------------------------------------------------------

/// Range and consistency failures from [`ControllerConfig::validate`].
///
/// [`ControllerConfig::validate`]: crate::config::ControllerConfig::validate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// A debounce threshold of zero would confirm nothing.
    DebounceThresholdZero,
    /// Threshold above the supported maximum.
    DebounceThresholdTooLarge(u16),
    /// Sampling or control period outside the supported range.
    PeriodOutOfRange(&'static str),
    /// Control period is not a whole multiple of the sampling period.
    PeriodNotMultiple,
    /// The selector table leaves a switch position unreachable.
    SelectorTableIncomplete,
    /// Stored or supplied config could not be deserialised.
    Decode,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DebounceThresholdZero => write!(f, "debounce threshold must be at least 1 tick"),
            Self::DebounceThresholdTooLarge(n) => {
                write!(f, "debounce threshold {n} exceeds maximum")
            }
            Self::PeriodOutOfRange(which) => write!(f, "{which} out of range"),
            Self::PeriodNotMultiple => {
                write!(f, "control period must be a multiple of the sample period")
            }
            Self::SelectorTableIncomplete => {
                write!(f, "selector table does not reach every switch position")
            }
            Self::Decode => write!(f, "config could not be decoded"),
        }
    }
}

impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

// ---------------------------------------------------------------------------
// GPIO errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GpioError {
    /// Reading an input line failed.
    ReadFailed,
    /// Driving an output line failed.
    WriteFailed,
}

impl fmt::Display for GpioError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ReadFailed => write!(f, "GPIO read failed"),
            Self::WriteFailed => write!(f, "GPIO write failed"),
        }
    }
}

impl From<GpioError> for Error {
    fn from(e: GpioError) -> Self {
        Self::Gpio(e)
    }
}

// ---------------------------------------------------------------------------
// Plant faults
// ---------------------------------------------------------------------------

/// Fault conditions raised against the plant.  Accumulated in a bitmask
/// by the [`FaultLatch`](crate::safety::FaultLatch) so several can be
/// active at once and cleared individually.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[repr(u8)]
pub enum FaultTag {
    /// Both selector lines asserted at once: impossible for a healthy
    /// single-pole switch.
    WiringFault = 0b0000_0001,
}

impl FaultTag {
    /// Every fault tag, in bit order.
    pub const ALL: [FaultTag; 1] = [FaultTag::WiringFault];

    /// Return the bitmask for this fault.
    pub const fn mask(self) -> u8 {
        self as u8
    }

    /// Highest-priority fault present in `flags`, if any.
    pub fn first_in(flags: u8) -> Option<FaultTag> {
        Self::ALL.into_iter().find(|f| flags & f.mask() != 0)
    }
}

impl fmt::Display for FaultTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WiringFault => write!(f, "selector wiring fault"),
        }
    }
}

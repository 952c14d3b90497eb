//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter    | Implements    | Connects to                     |
//! |------------|---------------|---------------------------------|
//! | `gpio`     | RawInputPort  | selector + float input pins     |
//! | `log_sink` | EventSink     | Serial log output               |
//! | `time`     | -             | ESP32 system timer / `Instant`  |
//!
//! The pump contactor ([`ActuatorPort`](crate::app::ports::ActuatorPort))
//! lives in [`drivers::pump`](crate::drivers::pump).

pub mod gpio;
pub mod log_sink;
pub mod time;

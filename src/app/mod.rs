//! Application core: pure domain logic, zero I/O.
//!
//! Signal classification, fault evaluation and the pump supervisor are
//! orchestrated here.  All interaction with hardware happens through
//! **port traits** defined in [`ports`], keeping this layer testable
//! without real peripherals.

pub mod events;
pub mod ports;
pub mod service;
pub mod shared;

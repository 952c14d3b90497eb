//! Tank pump controller firmware library.
//!
//! Exposes the pure-logic modules for integration testing and the
//! hardware adapters the firmware binary wires together.  ESP-IDF-specific
//! code is guarded by `#[cfg(target_os = "espidf")]` within each module.

#![deny(unused_must_use)]

pub mod adapters;
pub mod app;
pub mod config;
pub mod drivers;
pub mod error;
pub mod fsm;
pub mod pins;
pub mod safety;
pub mod sensors;

//! GPIO pin assignments for the pump controller board.
//!
//! Single source of truth: `main` picks peripherals by these numbers and
//! nothing else hard-codes a pin.

// ---------------------------------------------------------------------------
// Selector switch (SP3T, common tied to 3V3, inputs pulled down)
// ---------------------------------------------------------------------------

/// HIGH while the selector sits at HAND.
pub const SELECTOR_HAND_GPIO: i32 = 4;
/// HIGH while the selector sits at AUTO.
pub const SELECTOR_AUTO_GPIO: i32 = 5;

// ---------------------------------------------------------------------------
// Float switch (reed, pulled down)
// ---------------------------------------------------------------------------

/// HIGH while the tank is at or above the minimum level.
pub const FLOAT_GPIO: i32 = 6;

// ---------------------------------------------------------------------------
// Pump contactor
// ---------------------------------------------------------------------------

/// Digital output: HIGH energises the contactor coil.
pub const PUMP_RELAY_GPIO: i32 = 7;

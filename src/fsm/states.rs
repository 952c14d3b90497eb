//! Concrete state handler functions and table builder.
//!
//! Every state shares one transition rule, [`target_state`], so the next
//! state depends only on the current inputs and never on history:
//!
//! ```text
//!            ┌────────── selector OFF ──────────┐
//!            ▼                                  │
//!          IDLE ◀── AUTO + LEVEL_LOW ──┐        │
//!            │                         │        │
//!   MANUAL   │   AUTO + LEVEL_OK       │        │
//!     ▼      ▼                         │        │
//!  MANUAL_RUN    AUTO_RUN ─────────────┘        │
//!
//!  Any state ──[wiring fault]──▶ FAULT ──[fault gone]──▶ (recomputed)
//! ```

use super::context::{FsmContext, PumpCommand};
use super::{StateDescriptor, StateId};
use crate::error::FaultTag;
use crate::sensors::{FloatState, SelectorState};
use log::{info, warn};

// ═══════════════════════════════════════════════════════════════════════════
//  Table builder
// ═══════════════════════════════════════════════════════════════════════════

/// Build the state table.  Called once at startup.
pub fn build_state_table() -> [StateDescriptor; StateId::COUNT] {
    [
        // Index 0: Idle
        StateDescriptor {
            id: StateId::Idle,
            name: "Idle",
            on_enter: Some(idle_enter),
            on_exit: None,
            on_update: idle_update,
        },
        // Index 1: ManualRun
        StateDescriptor {
            id: StateId::ManualRun,
            name: "ManualRun",
            on_enter: Some(manual_run_enter),
            on_exit: None,
            on_update: manual_run_update,
        },
        // Index 2: AutoRun
        StateDescriptor {
            id: StateId::AutoRun,
            name: "AutoRun",
            on_enter: Some(auto_run_enter),
            on_exit: None,
            on_update: auto_run_update,
        },
        // Index 3: Fault
        StateDescriptor {
            id: StateId::Fault,
            name: "Fault",
            on_enter: Some(fault_enter),
            on_exit: Some(fault_exit),
            on_update: fault_update,
        },
    ]
}

// ═══════════════════════════════════════════════════════════════════════════
//  Transition rule
// ═══════════════════════════════════════════════════════════════════════════

/// Where the supervisor must be for the given context.  Faults win over
/// every selector position.
pub fn target_state(ctx: &FsmContext) -> StateId {
    if ctx.has_faults() || ctx.inputs.wiring_fault {
        return StateId::Fault;
    }

    match (ctx.inputs.selector, ctx.inputs.float) {
        (SelectorState::Off, _) => StateId::Idle,
        (SelectorState::Manual, _) => StateId::ManualRun,
        (SelectorState::Auto, FloatState::LevelLow) => StateId::Idle,
        (SelectorState::Auto, FloatState::LevelOk) => StateId::AutoRun,
    }
}

fn leave_if_needed(ctx: &FsmContext, current: StateId) -> Option<StateId> {
    let next = target_state(ctx);
    (next != current).then_some(next)
}

// ═══════════════════════════════════════════════════════════════════════════
//  IDLE state
// ═══════════════════════════════════════════════════════════════════════════

fn idle_enter(ctx: &mut FsmContext) {
    ctx.command = PumpCommand::Off;
    if ctx.inputs.selector == SelectorState::Auto {
        info!("IDLE: tank level low, dry-run protection holding pump off");
    } else {
        info!("IDLE: pump off");
    }
}

fn idle_update(ctx: &mut FsmContext) -> Option<StateId> {
    // Re-assert every cycle so a stale command can never survive.
    ctx.command = PumpCommand::Off;
    leave_if_needed(ctx, StateId::Idle)
}

// ═══════════════════════════════════════════════════════════════════════════
//  MANUAL_RUN state: operator override, float ignored
// ═══════════════════════════════════════════════════════════════════════════

fn manual_run_enter(ctx: &mut FsmContext) {
    ctx.command = PumpCommand::On;
    if ctx.inputs.float == FloatState::LevelLow {
        warn!("MANUAL_RUN: pump on by operator with tank level low");
    } else {
        info!("MANUAL_RUN: pump on by operator");
    }
}

fn manual_run_update(ctx: &mut FsmContext) -> Option<StateId> {
    ctx.command = PumpCommand::On;
    leave_if_needed(ctx, StateId::ManualRun)
}

// ═══════════════════════════════════════════════════════════════════════════
//  AUTO_RUN state: float OK, pump on
// ═══════════════════════════════════════════════════════════════════════════

fn auto_run_enter(ctx: &mut FsmContext) {
    ctx.command = PumpCommand::On;
    info!("AUTO_RUN: tank level OK, pump on");
}

fn auto_run_update(ctx: &mut FsmContext) -> Option<StateId> {
    ctx.command = PumpCommand::On;
    leave_if_needed(ctx, StateId::AutoRun)
}

// ═══════════════════════════════════════════════════════════════════════════
//  FAULT state: pump forced off until the condition clears
// ═══════════════════════════════════════════════════════════════════════════

fn fault_enter(ctx: &mut FsmContext) {
    ctx.command = PumpCommand::Off;
    if ctx.has_fault(FaultTag::WiringFault) || ctx.inputs.wiring_fault {
        warn!(
            "FAULT: selector wiring fault at cycle {}, pump forced off",
            ctx.total_ticks
        );
    } else {
        warn!(
            "FAULT: pump forced off at cycle {}, fault_flags=0b{:08b}",
            ctx.total_ticks, ctx.fault_flags
        );
    }
}

fn fault_exit(ctx: &mut FsmContext) {
    info!(
        "FAULT: cleared after {} cycles, resuming normal operation",
        ctx.ticks_in_state
    );
}

fn fault_update(ctx: &mut FsmContext) -> Option<StateId> {
    ctx.command = PumpCommand::Off;
    leave_if_needed(ctx, StateId::Fault)
}

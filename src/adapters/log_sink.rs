//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to
//! the logger (UART / USB-CDC on the board, stderr on a host).

use log::{info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;
use crate::error::FaultTag;
use crate::sensors::FloatState;

/// Adapter that logs every [`AppEvent`].
#[derive(Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Telemetry(t) => {
                info!(
                    "TELEM | state={} | selector={:?} float={} | pump={:?} | \
                     faults=0b{:08b} | cycles={} glitches={}/{}",
                    t.state.name(),
                    t.selector,
                    if t.float == FloatState::LevelOk { "OK" } else { "LOW" },
                    t.command,
                    t.fault_flags,
                    t.cycles,
                    t.classifier.selector_glitches,
                    t.classifier.float_glitches,
                );
            }
            AppEvent::StateChanged { from, to } => {
                info!("STATE | {} -> {}", from.name(), to.name());
            }
            AppEvent::FaultDetected(flags) => match FaultTag::first_in(*flags) {
                Some(tag) => warn!("FAULT | detected: {}, flags=0b{:08b}", tag, flags),
                None => warn!("FAULT | detected, flags=0b{:08b}", flags),
            },
            AppEvent::FaultCleared => {
                info!("FAULT | all cleared");
            }
            AppEvent::Started(state) => {
                info!("START | initial_state={}", state.name());
            }
        }
    }
}

//! GPIO input adapter: the three switch lines behind [`RawInputPort`].
//!
//! Generic over `embedded_hal::digital::InputPin`, so the same adapter
//! runs on ESP-IDF `PinDriver`s and on host test pins.
//!
//! A failed read is reported as LOW.  With the default wiring that is the
//! safe level for every line: selector OFF, float LEVEL_LOW.  The first
//! failure of a streak is logged; the rest stay quiet until the line
//! reads cleanly again.

use embedded_hal::digital::{Error as _, InputPin};
use log::{debug, warn};

use crate::app::ports::RawInputPort;
use crate::error::{Error, GpioError};
use crate::sensors::RawSample;

/// Which physical line a read belongs to (for logging).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Line {
    SelectorHand,
    SelectorAuto,
    Float,
}

pub struct GpioInputs<H, A, F> {
    hand: H,
    auto: A,
    float: F,
    /// Per-line "currently failing" flags, indexed by `Line as usize`.
    failing: [bool; 3],
    read_failures: u32,
}

impl<H, A, F> GpioInputs<H, A, F>
where
    H: InputPin,
    A: InputPin,
    F: InputPin,
{
    pub fn new(hand: H, auto: A, float: F) -> Self {
        Self {
            hand,
            auto,
            float,
            failing: [false; 3],
            read_failures: 0,
        }
    }

    /// Total failed line reads since construction.
    pub fn read_failures(&self) -> u32 {
        self.read_failures
    }

    /// Level of one line, or [`GpioError::ReadFailed`].
    pub fn read_line(&mut self, line: Line) -> Result<bool, Error> {
        let result = match line {
            Line::SelectorHand => self.hand.is_high().map_err(|e| e.kind()),
            Line::SelectorAuto => self.auto.is_high().map_err(|e| e.kind()),
            Line::Float => self.float.is_high().map_err(|e| e.kind()),
        };
        result.map_err(|kind| {
            debug!("gpio: {:?} pin error {:?}", line, kind);
            GpioError::ReadFailed.into()
        })
    }

    fn settle(&mut self, line: Line) -> bool {
        let result = self.read_line(line);
        let slot = &mut self.failing[line as usize];
        match result {
            Ok(level) => {
                *slot = false;
                level
            }
            Err(e) => {
                if !*slot {
                    warn!("gpio: {:?}: {}, treating as LOW", line, e);
                }
                *slot = true;
                self.read_failures = self.read_failures.saturating_add(1);
                false
            }
        }
    }
}

impl<H, A, F> RawInputPort for GpioInputs<H, A, F>
where
    H: InputPin,
    A: InputPin,
    F: InputPin,
{
    fn read_raw(&mut self, now_ms: u32) -> RawSample {
        let hand_line = self.settle(Line::SelectorHand);
        let auto_line = self.settle(Line::SelectorAuto);
        let float_line = self.settle(Line::Float);

        RawSample {
            timestamp_ms: now_ms,
            hand_line,
            auto_line,
            float_line,
        }
    }
}

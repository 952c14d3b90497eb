//! Run-length debounce window.
//!
//! A raw value must be observed on `threshold` consecutive samples before
//! it replaces the confirmed value.  Anything shorter is treated as
//! contact bounce or float chatter and dropped.
//!
//! ```text
//!  raw:        A A B B A B B B B
//!  pending:    A A B B A B B B B
//!  run:        1 2 1 2 1 1 2 3 4
//!  confirmed:  - - - - - - - B B     (threshold = 3)
//! ```

/// Outcome of feeding one sample into a [`DebounceWindow`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Debounced<T> {
    /// Nothing changed in the confirmed value.
    Unchanged,
    /// The pending value reached the threshold and was confirmed.
    Confirmed { from: T, to: T },
}

/// Per-input debounce state.
#[derive(Debug, Clone)]
pub struct DebounceWindow<T> {
    /// Value currently accumulating a run, `None` before the first sample.
    pending: Option<T>,
    /// Consecutive samples equal to `pending` (saturates).
    run: u16,
    /// Last confirmed value; the cold-start default until a window completes.
    confirmed: T,
    threshold: u16,
    /// Runs abandoned before reaching the threshold.
    glitches: u32,
    /// Set once any run has reached the threshold.
    settled: bool,
}

impl<T: Copy + PartialEq> DebounceWindow<T> {
    /// `initial` is reported until the first full window is confirmed.
    /// A threshold of zero is treated as one.
    pub fn new(initial: T, threshold: u16) -> Self {
        Self {
            pending: None,
            run: 0,
            confirmed: initial,
            threshold: threshold.max(1),
            glitches: 0,
            settled: false,
        }
    }

    /// Feed one raw observation.
    pub fn update(&mut self, raw: T) -> Debounced<T> {
        match self.pending {
            Some(p) if p == raw => {
                self.run = self.run.saturating_add(1);
            }
            previous => {
                let confirmed = self.confirmed;
                if previous.is_some_and(|p| p != confirmed) && self.run < self.threshold {
                    self.glitches = self.glitches.saturating_add(1);
                }
                self.pending = Some(raw);
                self.run = 1;
            }
        }

        // Confirm exactly on the tick the run reaches the threshold.
        if self.run == self.threshold {
            self.settled = true;
        }
        if self.run == self.threshold && raw != self.confirmed {
            let from = self.confirmed;
            self.confirmed = raw;
            return Debounced::Confirmed { from, to: raw };
        }

        Debounced::Unchanged
    }

    pub fn confirmed(&self) -> T {
        self.confirmed
    }

    pub fn pending(&self) -> Option<T> {
        self.pending
    }

    /// Length of the current run of identical samples.
    pub fn run_length(&self) -> u16 {
        self.run
    }

    /// True once at least one full window has been observed, i.e. the
    /// confirmed value reflects real data rather than the cold-start default.
    pub fn has_settled(&self) -> bool {
        self.settled
    }

    pub fn glitches_rejected(&self) -> u32 {
        self.glitches
    }

    pub fn threshold(&self) -> u16 {
        self.threshold
    }
}

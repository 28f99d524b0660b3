//! Single-slot deferred task bookkeeping.
//!
//! A slot holds at most one pending deadline. Arming replaces whatever was
//! pending, so repeated activity pushes the deadline out instead of queueing
//! extra firings. Time is passed in explicitly (milliseconds) which keeps the
//! logic deterministic under test; the web front end wakes the slot with a
//! real `setTimeout` at `deadline()`.

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct DeferredSlot {
    deadline_ms: Option<f64>,
}

impl DeferredSlot {
    pub const fn new() -> Self {
        Self { deadline_ms: None }
    }

    /// Cancel any pending firing and schedule a new one `delay_ms` after `now_ms`.
    pub fn arm(&mut self, now_ms: f64, delay_ms: f64) {
        self.deadline_ms = Some(now_ms + delay_ms.max(0.0));
    }

    pub fn cancel(&mut self) {
        self.deadline_ms = None;
    }

    pub fn is_armed(&self) -> bool {
        self.deadline_ms.is_some()
    }

    pub fn deadline(&self) -> Option<f64> {
        self.deadline_ms
    }

    /// Milliseconds until the slot is due, clamped at zero.
    pub fn remaining(&self, now_ms: f64) -> Option<f64> {
        self.deadline_ms.map(|d| (d - now_ms).max(0.0))
    }

    /// Returns true exactly once when the deadline has been reached, disarming
    /// the slot.
    pub fn fire_if_due(&mut self, now_ms: f64) -> bool {
        match self.deadline_ms {
            Some(d) if now_ms >= d => {
                self.deadline_ms = None;
                true
            }
            _ => false,
        }
    }
}

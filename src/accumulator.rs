//! Per-device gesture accumulation.
//!
//! Swipe and pinch are tracked independently: a begin of one kind zeroes only that
//! kind's totals. Ordering is trusted; an update or end without a preceding begin
//! simply continues from whatever residual state is present.

use crate::classifier::{classify_pinch, classify_swipe, Thresholds};
use crate::gesture::Gesture;

/// Accumulation phase of one gesture kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Accumulating,
}

/// Running totals for one device.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GestureAccumulator {
    /// Sum of unaccelerated x deltas since the last swipe begin.
    pub dx_total: f64,
    /// Sum of unaccelerated y deltas since the last swipe begin.
    pub dy_total: f64,
    /// Sum of `1.0 - scale` since the last pinch begin.
    pub scale_total: f64,
    /// Finger count of the most recent end event (0 until one arrives).
    pub finger_count: u32,
    swipe: Phase,
    pinch: Phase,
}

impl GestureAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn swipe_phase(&self) -> Phase {
        self.swipe
    }

    pub fn pinch_phase(&self) -> Phase {
        self.pinch
    }

    pub fn begin_swipe(&mut self) {
        self.dx_total = 0.0;
        self.dy_total = 0.0;
        self.finger_count = 0;
        self.swipe = Phase::Accumulating;
    }

    pub fn update_swipe(&mut self, dx_unaccel: f64, dy_unaccel: f64) {
        self.dx_total += dx_unaccel;
        self.dy_total += dy_unaccel;
    }

    /// Finish a swipe: classify the totals, then return to idle.
    pub fn end_swipe(&mut self, fingers: u32, thresholds: &Thresholds) -> Option<Gesture> {
        self.finger_count = fingers;
        let verdict = classify_swipe(self.dx_total, self.dy_total, fingers, thresholds);
        self.dx_total = 0.0;
        self.dy_total = 0.0;
        self.finger_count = 0;
        self.swipe = Phase::Idle;
        verdict
    }

    pub fn begin_pinch(&mut self) {
        self.scale_total = 0.0;
        self.finger_count = 0;
        self.pinch = Phase::Accumulating;
    }

    pub fn update_pinch(&mut self, scale: f64) {
        self.scale_total += 1.0 - scale;
    }

    /// Finish a pinch: classify the total, then return to idle.
    pub fn end_pinch(&mut self, fingers: u32) -> Option<Gesture> {
        self.finger_count = fingers;
        let verdict = classify_pinch(self.scale_total, fingers);
        self.scale_total = 0.0;
        self.finger_count = 0;
        self.pinch = Phase::Idle;
        verdict
    }
}

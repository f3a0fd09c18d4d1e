//! Gesture classification.
//!
//! Pure functions over the terminal accumulated values of one gesture. Every input
//! maps to either `Some(Gesture)` or `None` ("no gesture").

use crate::gesture::{Direction, Gesture};
use serde::{Deserialize, Serialize};

/// Default swipe gate: minimum `|dx - dy|` in unaccelerated device units.
pub const SWIPE_THRESHOLD: f64 = 70.0;

/// Tunable classification thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    pub swipe: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            swipe: SWIPE_THRESHOLD,
        }
    }
}

/// Classify a finished swipe from its accumulated unaccelerated deltas.
///
/// The gate compares the difference of the two signed totals, not the travelled
/// distance: `|dx - dy| < threshold` never fires. Ties between the axes resolve to
/// the vertical direction.
pub fn classify_swipe(dx: f64, dy: f64, fingers: u32, thresholds: &Thresholds) -> Option<Gesture> {
    if (dx - dy).abs() < thresholds.swipe {
        return None;
    }

    let direction = if dx.abs() > dy.abs() {
        if dx < 0.0 {
            Direction::Left
        } else {
            Direction::Right
        }
    } else if dy < 0.0 {
        Direction::Up
    } else {
        Direction::Down
    };

    Some(Gesture::swipe(direction, fingers))
}

/// Classify a finished pinch from its accumulated `sum(1.0 - scale)`.
///
/// Exactly zero means no scale change was observed and nothing fires.
pub fn classify_pinch(scale_total: f64, fingers: u32) -> Option<Gesture> {
    if scale_total == 0.0 {
        return None;
    }

    let direction = if scale_total >= 0.0 {
        Direction::In
    } else {
        Direction::Out
    };

    Some(Gesture::pinch(direction, fingers))
}

//! Raw events consumed by the router.
//!
//! Event sources translate platform events (libinput, replay scripts) into
//! [`RawEvent`]s: a device identity plus a small, kind-specific payload
//! ([`RawEventKind`]).
//!
//! ## Value conventions
//! - **Swipe deltas** are *unaccelerated* device units, exactly as reported by the
//!   platform. No normalization is applied.
//! - **Pinch scale** is the absolute scale relative to the start of the pinch
//!   (`1.0` = unchanged, `< 1.0` = fingers closer together).
//! - **Finger counts** are carried only by end events.
//!
//! ## JSON form
//! Events (de)serialize with an internal `"type"` tag so replay scripts stay
//! readable:
//! ```text
//! {"device":"/dev/input/event5","type":"swipe_update","dx_unaccel":12.5,"dy_unaccel":-1.0}
//! ```

use crate::device::{DeviceCaps, DeviceId};
use serde::{Deserialize, Serialize};

/// Kind-specific payload of a raw event.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RawEventKind {
    /// A device appeared. `caps` decides whether it is tracked.
    DeviceAdded { caps: DeviceCaps },

    /// A device disappeared.
    DeviceRemoved,

    SwipeBegin,

    /// One swipe motion step.
    SwipeUpdate { dx_unaccel: f64, dy_unaccel: f64 },

    SwipeEnd { fingers: u32 },

    PinchBegin,

    /// One pinch step. `scale` is the absolute scale since the pinch began.
    PinchUpdate { scale: f64 },

    PinchEnd { fingers: u32 },

    /// Anything the router does not interpret (pointer, touch, keyboard, ...).
    Other,
}

/// One event from an event source, tagged with the device that produced it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RawEvent {
    pub device: DeviceId,
    #[serde(flatten)]
    pub kind: RawEventKind,
}

impl RawEvent {
    pub fn new(device: impl Into<DeviceId>, kind: RawEventKind) -> Self {
        Self {
            device: device.into(),
            kind,
        }
    }

    /// `true` for begin/update/end events of either gesture kind.
    pub fn is_gesture(&self) -> bool {
        matches!(
            self.kind,
            RawEventKind::SwipeBegin
                | RawEventKind::SwipeUpdate { .. }
                | RawEventKind::SwipeEnd { .. }
                | RawEventKind::PinchBegin
                | RawEventKind::PinchUpdate { .. }
                | RawEventKind::PinchEnd { .. }
        )
    }
}

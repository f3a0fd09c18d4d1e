//! Device identity and capability description.
//!
//! A [`DeviceId`] is the device node path reported by the event source
//! (e.g. `/dev/input/event5`). It is stable for as long as the device is plugged
//! in; a device that is removed and re-added under the same node is treated as a
//! new device.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque, value-typed device identifier (device node path).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeviceId(String);

impl DeviceId {
    pub fn new(node: impl Into<String>) -> Self {
        Self(node.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DeviceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for DeviceId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for DeviceId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Capabilities reported for a device when it is added.
///
/// Backends fill this from the platform's capability queries; unknown values stay
/// at their defaults (no capability, zero tap fingers).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceCaps {
    /// Human-readable device name, when known. Diagnostics only.
    #[serde(default)]
    pub name: Option<String>,

    /// Device is a touch digitizer (touchscreen).
    #[serde(default)]
    pub touch: bool,

    /// Device reports pointer motion (mouse, touchpad).
    #[serde(default)]
    pub pointer: bool,

    /// Configured maximum tap finger count. Only meaningful for pointer devices;
    /// touchpads report a positive value, plain mice report `0`.
    #[serde(default)]
    pub tap_finger_count: u32,
}

impl DeviceCaps {
    /// Capabilities of a touchscreen.
    pub fn touchscreen() -> Self {
        Self {
            touch: true,
            ..Self::default()
        }
    }

    /// Capabilities of a touchpad supporting `tap_fingers`-finger taps.
    pub fn touchpad(tap_fingers: u32) -> Self {
        Self {
            pointer: true,
            tap_finger_count: tap_fingers,
            ..Self::default()
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Whether the device should be tracked for gestures at all.
    ///
    /// Touch digitizers always qualify. Pointer devices qualify only when they
    /// expose a positive multi-finger tap configuration.
    pub fn is_multitouch(&self) -> bool {
        self.touch || (self.pointer && self.tap_finger_count > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn touchscreen_qualifies() {
        assert!(DeviceCaps::touchscreen().is_multitouch());
    }

    #[test]
    fn touchpad_with_tap_fingers_qualifies() {
        assert!(DeviceCaps::touchpad(3).is_multitouch());
    }

    #[test]
    fn pointer_without_tap_fingers_is_ignored() {
        assert!(!DeviceCaps::touchpad(0).is_multitouch());
    }

    #[test]
    fn tap_fingers_without_pointer_is_ignored() {
        let caps = DeviceCaps {
            tap_finger_count: 4,
            ..DeviceCaps::default()
        };
        assert!(!caps.is_multitouch());
        assert!(!DeviceCaps::default().is_multitouch());
    }

    #[test]
    fn device_id_is_a_plain_string_in_json() {
        let id = DeviceId::new("/dev/input/event5");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"/dev/input/event5\"");
        assert_eq!(id.to_string(), "/dev/input/event5");
    }
}

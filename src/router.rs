//! Event routing.
//!
//! [`EventRouter`] is the single processing path of the engine. It owns the
//! [`DeviceRegistry`] and the [`GestureHandler`], and consumes one [`RawEvent`] at a
//! time:
//!
//! - **device added**: registered if its capabilities qualify, ignored otherwise
//! - **device removed**: unregistered (a no-op for devices never tracked)
//! - **gesture begin/update/end**: fed into the device's accumulator; a positive
//!   classification at end is handed to the handler
//! - **anything else**: ignored
//!
//! Nothing here fails. Events for unknown devices are logged and dropped.
//!
//! # Example
//! ```
//! use multigest::{DeviceCaps, EventRouter, Gesture, RawEvent, RawEventKind};
//!
//! let mut router = EventRouter::new(Vec::<Gesture>::new());
//! let pad = "/dev/input/event5";
//! router.handle(RawEvent::new(pad, RawEventKind::DeviceAdded { caps: DeviceCaps::touchpad(3) }));
//! router.handle(RawEvent::new(pad, RawEventKind::SwipeBegin));
//! router.handle(RawEvent::new(pad, RawEventKind::SwipeUpdate { dx_unaccel: -150.0, dy_unaccel: 4.0 }));
//! router.handle(RawEvent::new(pad, RawEventKind::SwipeEnd { fingers: 3 }));
//!
//! assert_eq!(router.handler()[0].to_string(), "[Swipe] direction: left, fingers: 3");
//! ```

use crate::accumulator::GestureAccumulator;
use crate::classifier::Thresholds;
use crate::device::{DeviceCaps, DeviceId};
use crate::event::{RawEvent, RawEventKind};
use crate::eventbus::GestureHandler;
use crate::gesture::Gesture;
use crate::registry::DeviceRegistry;
use tracing::{debug, info, warn};

/// Counters describing what the router has done so far.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RouterStats {
    /// Events passed to [`EventRouter::handle`].
    pub events: u64,
    /// Gestures delivered to the handler.
    pub gestures: u64,
    /// Gesture events dropped because their device was not registered.
    pub unregistered: u64,
    /// Gesture ends that classified as "no gesture".
    pub below_threshold: u64,
}

pub struct EventRouter<H> {
    registry: DeviceRegistry,
    handler: H,
    thresholds: Thresholds,
    stats: RouterStats,
}

impl<H: GestureHandler> EventRouter<H> {
    /// Router with the default thresholds.
    pub fn new(handler: H) -> Self {
        Self::with_thresholds(handler, Thresholds::default())
    }

    pub fn with_thresholds(handler: H, thresholds: Thresholds) -> Self {
        Self {
            registry: DeviceRegistry::new(),
            handler,
            thresholds,
            stats: RouterStats::default(),
        }
    }

    pub fn registry(&self) -> &DeviceRegistry {
        &self.registry
    }

    pub fn handler(&self) -> &H {
        &self.handler
    }

    pub fn handler_mut(&mut self) -> &mut H {
        &mut self.handler
    }

    pub fn thresholds(&self) -> &Thresholds {
        &self.thresholds
    }

    pub fn stats(&self) -> RouterStats {
        self.stats
    }

    /// Tear down the router, releasing all device state, and return the handler.
    pub fn into_handler(self) -> H {
        self.handler
    }

    /// Process a batch of events in order.
    pub fn handle_all(&mut self, events: impl IntoIterator<Item = RawEvent>) {
        for event in events {
            self.handle(event);
        }
    }

    /// Process one event to completion.
    pub fn handle(&mut self, event: RawEvent) {
        self.stats.events += 1;
        let RawEvent { device, kind } = event;

        match kind {
            RawEventKind::DeviceAdded { caps } => self.device_added(device, &caps),
            RawEventKind::DeviceRemoved => self.device_removed(&device),
            RawEventKind::Other => {}
            gesture => self.gesture_event(&device, gesture),
        }
    }

    fn device_added(&mut self, device: DeviceId, caps: &DeviceCaps) {
        let name = caps.name.as_deref().unwrap_or("unknown");
        if !caps.is_multitouch() {
            debug!("ignoring {device} ({name}): not a multitouch device");
            return;
        }
        info!("tracking {device} ({name})");
        self.registry.register(device);
    }

    fn device_removed(&mut self, device: &DeviceId) {
        if self.registry.unregister(device) {
            info!("stopped tracking {device}");
        } else {
            debug!("removed untracked device {device}");
        }
    }

    fn gesture_event(&mut self, device: &DeviceId, kind: RawEventKind) {
        let Some(acc) = self.registry.get_mut(device) else {
            warn!("gesture event for unregistered device {device}; dropped");
            self.stats.unregistered += 1;
            return;
        };

        let outcome = match drive(acc, kind, &self.thresholds) {
            Step::Continue => return,
            Step::Finished(outcome) => outcome,
        };

        match outcome {
            Some(gesture) => {
                debug!("{device}: {gesture}");
                self.stats.gestures += 1;
                self.handler.on_gesture(&gesture);
            }
            None => {
                debug!("{device}: movement below threshold, no gesture");
                self.stats.below_threshold += 1;
            }
        }
    }
}

enum Step {
    Continue,
    Finished(Option<Gesture>),
}

fn drive(acc: &mut GestureAccumulator, kind: RawEventKind, thresholds: &Thresholds) -> Step {
    match kind {
        RawEventKind::SwipeBegin => acc.begin_swipe(),
        RawEventKind::SwipeUpdate {
            dx_unaccel,
            dy_unaccel,
        } => acc.update_swipe(dx_unaccel, dy_unaccel),
        RawEventKind::SwipeEnd { fingers } => {
            return Step::Finished(acc.end_swipe(fingers, thresholds))
        }
        RawEventKind::PinchBegin => acc.begin_pinch(),
        RawEventKind::PinchUpdate { scale } => acc.update_pinch(scale),
        RawEventKind::PinchEnd { fingers } => return Step::Finished(acc.end_pinch(fingers)),
        RawEventKind::DeviceAdded { .. } | RawEventKind::DeviceRemoved | RawEventKind::Other => {}
    }
    Step::Continue
}

//! libinput event source (Linux).
//!
//! Opens a udev-backed libinput context on a seat, waits on its fd with `poll(2)`,
//! and translates libinput events into [`RawEvent`]s:
//!
//! - device added/removed carry the device's touch/pointer capabilities and its
//!   configured tap finger count
//! - swipe updates carry *unaccelerated* deltas
//! - pinch updates carry the absolute scale
//! - gesture ends carry the finger count; the `cancelled` flag is not interpreted
//!
//! Device ids are the device node, derived from the kernel sysname
//! (`event5` → `/dev/input/event5`).
//!
//! This module requires the `libinput` feature and the system `libinput`/`libudev`
//! libraries. Device nodes usually need membership in the `input` group.

use crate::backends::EventSource;
use crate::device::{DeviceCaps, DeviceId};
use crate::error::{Error, Result};
use crate::event::{RawEvent, RawEventKind};
use input::event::device::DeviceEvent;
use input::event::gesture::{
    GestureEvent, GestureEventCoordinates, GestureEventTrait, GesturePinchEvent,
    GesturePinchEventTrait, GestureSwipeEvent,
};
use input::event::{Event, EventTrait};
use input::{Device, DeviceCapability, Libinput, LibinputInterface};
use std::fs::{File, OpenOptions};
use std::os::fd::{AsRawFd, OwnedFd};
use std::os::unix::fs::OpenOptionsExt;
use std::path::Path;

/// How long one `poll(2)` waits before returning an empty batch, so callers can
/// observe their stop flag.
const POLL_TIMEOUT_MS: i32 = 500;

/// Opens device nodes directly with the caller's permissions.
struct Interface;

impl LibinputInterface for Interface {
    fn open_restricted(&mut self, path: &Path, flags: i32) -> std::result::Result<OwnedFd, i32> {
        let access = flags & libc::O_ACCMODE;
        OpenOptions::new()
            .custom_flags(flags)
            .read(access == libc::O_RDONLY || access == libc::O_RDWR)
            .write(access == libc::O_WRONLY || access == libc::O_RDWR)
            .open(path)
            .map(OwnedFd::from)
            .map_err(|e| {
                tracing::warn!("failed to open {}: {e}", path.display());
                e.raw_os_error().unwrap_or(libc::EIO)
            })
    }

    fn close_restricted(&mut self, fd: OwnedFd) {
        drop(File::from(fd));
    }
}

fn open_seat(seat: &str) -> Result<Libinput> {
    let mut li = Libinput::new_with_udev(Interface);
    li.udev_assign_seat(seat)
        .map_err(|()| Error::Source(format!("failed to assign seat '{seat}'")))?;
    Ok(li)
}

fn device_id(device: &Device) -> DeviceId {
    DeviceId::new(format!("/dev/input/{}", device.sysname()))
}

fn device_caps(device: &Device) -> DeviceCaps {
    let pointer = device.has_capability(DeviceCapability::Pointer);
    DeviceCaps {
        name: Some(device.name().to_string()),
        touch: device.has_capability(DeviceCapability::Touch),
        pointer,
        tap_finger_count: if pointer {
            device.config_tap_finger_count()
        } else {
            0
        },
    }
}

fn fingers(count: i32) -> u32 {
    u32::try_from(count).unwrap_or(0)
}

fn translate(event: &Event) -> RawEvent {
    let device = event.device();
    let kind = match event {
        Event::Device(DeviceEvent::Added(_)) => RawEventKind::DeviceAdded {
            caps: device_caps(&device),
        },
        Event::Device(DeviceEvent::Removed(_)) => RawEventKind::DeviceRemoved,
        Event::Gesture(GestureEvent::Swipe(swipe)) => match swipe {
            GestureSwipeEvent::Begin(_) => RawEventKind::SwipeBegin,
            GestureSwipeEvent::Update(u) => RawEventKind::SwipeUpdate {
                dx_unaccel: u.dx_unaccelerated(),
                dy_unaccel: u.dy_unaccelerated(),
            },
            GestureSwipeEvent::End(e) => RawEventKind::SwipeEnd {
                fingers: fingers(e.finger_count()),
            },
            _ => RawEventKind::Other,
        },
        Event::Gesture(GestureEvent::Pinch(pinch)) => match pinch {
            GesturePinchEvent::Begin(_) => RawEventKind::PinchBegin,
            GesturePinchEvent::Update(u) => RawEventKind::PinchUpdate { scale: u.scale() },
            GesturePinchEvent::End(e) => RawEventKind::PinchEnd {
                fingers: fingers(e.finger_count()),
            },
            _ => RawEventKind::Other,
        },
        _ => RawEventKind::Other,
    };
    RawEvent {
        device: device_id(&device),
        kind,
    }
}

/// Live libinput source bound to one seat.
pub struct LibinputSource {
    li: Libinput,
}

impl LibinputSource {
    /// Open a udev context on `seat` (usually `"seat0"`).
    ///
    /// Fails if the context cannot be created or the seat cannot be assigned; no
    /// partial source is returned.
    pub fn open(seat: &str) -> Result<Self> {
        let li = open_seat(seat)?;
        tracing::info!("listening for gestures on {seat}");
        Ok(Self { li })
    }

    fn drain(&mut self) -> Result<Vec<RawEvent>> {
        self.li
            .dispatch()
            .map_err(|e| Error::Source(format!("libinput dispatch failed: {e}")))?;
        let mut out = Vec::new();
        for event in &mut self.li {
            out.push(translate(&event));
        }
        Ok(out)
    }

    fn wait_readable(&self) -> Result<bool> {
        let mut fds = libc::pollfd {
            fd: self.li.as_raw_fd(),
            events: libc::POLLIN,
            revents: 0,
        };
        // SAFETY: `fds` is a valid pollfd for the duration of the call.
        let rc = unsafe { libc::poll(&mut fds, 1, POLL_TIMEOUT_MS) };
        if rc < 0 {
            let err = std::io::Error::last_os_error();
            if err.kind() == std::io::ErrorKind::Interrupted {
                return Ok(false);
            }
            return Err(err.into());
        }
        Ok(rc > 0)
    }
}

impl EventSource for LibinputSource {
    fn next_batch(&mut self) -> Result<Vec<RawEvent>> {
        // Events queued at startup (initial device-added burst) are pending before
        // the fd ever becomes readable, so drain first and only then wait.
        let pending = self.drain()?;
        if !pending.is_empty() {
            return Ok(pending);
        }
        if self.wait_readable()? {
            self.drain()
        } else {
            Ok(Vec::new())
        }
    }
}

/// Enumerate the node ids of every multitouch-capable device on `seat`.
pub fn list_multitouch_devices(seat: &str) -> Result<Vec<DeviceId>> {
    let mut li = open_seat(seat)?;
    li.dispatch()
        .map_err(|e| Error::Source(format!("libinput dispatch failed: {e}")))?;

    let mut found = Vec::new();
    for event in &mut li {
        if let Event::Device(DeviceEvent::Added(_)) = &event {
            let device = event.device();
            if device_caps(&device).is_multitouch() {
                found.push(device_id(&device));
            }
        }
    }
    found.sort();
    Ok(found)
}

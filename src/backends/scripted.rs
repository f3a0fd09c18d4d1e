//! In-memory and file-backed event replay.
//!
//! [`ScriptedSource`] is a queue of [`RawEvent`]s. Feed it programmatically, or
//! load a replay script: one JSON event per line, blank lines and lines starting
//! with `#` are skipped.
//!
//! ```text
//! # three-finger swipe left on a touchpad
//! {"device":"/dev/input/event5","type":"device_added","caps":{"pointer":true,"tap_finger_count":3}}
//! {"device":"/dev/input/event5","type":"swipe_begin"}
//! {"device":"/dev/input/event5","type":"swipe_update","dx_unaccel":-90.0,"dy_unaccel":2.0}
//! {"device":"/dev/input/event5","type":"swipe_end","fingers":3}
//! ```

use crate::backends::EventSource;
use crate::device::{DeviceCaps, DeviceId};
use crate::error::{Error, Result};
use crate::event::{RawEvent, RawEventKind};
use std::collections::VecDeque;
use std::io::BufRead;
use std::path::Path;

/// Events are delivered in batches of at most this many per `next_batch` call.
const MAX_EVENTS_PER_BATCH: usize = 64;

#[derive(Debug, Default)]
pub struct ScriptedSource {
    events: VecDeque<RawEvent>,
}

impl ScriptedSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue one event.
    pub fn feed(&mut self, event: RawEvent) {
        self.events.push_back(event);
    }

    pub fn add_device(&mut self, device: &str, caps: DeviceCaps) {
        self.feed(RawEvent::new(device, RawEventKind::DeviceAdded { caps }));
    }

    pub fn remove_device(&mut self, device: &str) {
        self.feed(RawEvent::new(device, RawEventKind::DeviceRemoved));
    }

    /// Queue a complete swipe: begin, one update per delta, end.
    pub fn swipe(&mut self, device: &str, deltas: &[(f64, f64)], fingers: u32) {
        let id = DeviceId::new(device);
        self.feed(RawEvent::new(id.clone(), RawEventKind::SwipeBegin));
        for &(dx_unaccel, dy_unaccel) in deltas {
            self.feed(RawEvent::new(
                id.clone(),
                RawEventKind::SwipeUpdate {
                    dx_unaccel,
                    dy_unaccel,
                },
            ));
        }
        self.feed(RawEvent::new(id, RawEventKind::SwipeEnd { fingers }));
    }

    /// Queue a complete pinch: begin, one update per absolute scale, end.
    pub fn pinch(&mut self, device: &str, scales: &[f64], fingers: u32) {
        let id = DeviceId::new(device);
        self.feed(RawEvent::new(id.clone(), RawEventKind::PinchBegin));
        for &scale in scales {
            self.feed(RawEvent::new(id.clone(), RawEventKind::PinchUpdate { scale }));
        }
        self.feed(RawEvent::new(id, RawEventKind::PinchEnd { fingers }));
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Parse a JSON-lines replay script.
    pub fn from_json_lines(reader: impl BufRead) -> Result<Self> {
        let mut source = Self::new();
        for (idx, line) in reader.lines().enumerate() {
            let line = line?;
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            let event: RawEvent = serde_json::from_str(trimmed).map_err(|e| Error::Replay {
                line: idx + 1,
                message: e.to_string(),
            })?;
            source.feed(event);
        }
        tracing::debug!("loaded {} scripted event(s)", source.len());
        Ok(source)
    }

    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        Self::from_json_lines(std::io::BufReader::new(file))
    }
}

impl EventSource for ScriptedSource {
    fn next_batch(&mut self) -> Result<Vec<RawEvent>> {
        let n = self.events.len().min(MAX_EVENTS_PER_BATCH);
        Ok(self.events.drain(..n).collect())
    }

    fn is_exhausted(&self) -> bool {
        self.events.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn swipe_helper_queues_begin_updates_end() {
        let mut src = ScriptedSource::new();
        src.swipe("/dev/input/event5", &[(1.0, 2.0), (3.0, 4.0)], 3);
        assert_eq!(src.len(), 4);
        let batch = src.next_batch().unwrap();
        assert_eq!(batch[0].kind, RawEventKind::SwipeBegin);
        assert_eq!(batch[3].kind, RawEventKind::SwipeEnd { fingers: 3 });
        assert!(src.is_exhausted());
    }

    #[test]
    fn batches_are_bounded() {
        let mut src = ScriptedSource::new();
        for _ in 0..(MAX_EVENTS_PER_BATCH + 6) {
            src.feed(RawEvent::new("d", RawEventKind::Other));
        }
        assert_eq!(src.next_batch().unwrap().len(), MAX_EVENTS_PER_BATCH);
        assert_eq!(src.next_batch().unwrap().len(), 6);
        assert!(src.next_batch().unwrap().is_empty());
    }

    #[test]
    fn parses_script_skipping_comments() {
        let script = "# header\n\n{\"device\":\"d\",\"type\":\"pinch_begin\"}\n  {\"device\":\"d\",\"type\":\"pinch_update\",\"scale\":0.5}\n";
        let src = ScriptedSource::from_json_lines(script.as_bytes()).unwrap();
        assert_eq!(src.len(), 2);
    }

    #[test]
    fn reports_bad_line_number() {
        let script = "{\"device\":\"d\",\"type\":\"swipe_begin\"}\n{\"device\":\"d\",\"type\":\"wobble\"}\n";
        match ScriptedSource::from_json_lines(script.as_bytes()) {
            Err(Error::Replay { line, .. }) => assert_eq!(line, 2),
            other => panic!("expected replay error, got {other:?}"),
        }
    }
}

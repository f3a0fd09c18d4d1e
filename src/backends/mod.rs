//! Event sources for `multigest`.
//!
//! Implementations of [`EventSource`] translate a platform event stream into
//! [`RawEvent`]s for the router.
//!
//! # Feature flags
//! - **`libinput`**: enables [`libinput::LibinputSource`] (Linux, udev seat). Needs the
//!   system `libinput` and `libudev` libraries.
//!
//! [`scripted::ScriptedSource`] is always available; it replays events fed in memory
//! or read from a JSON-lines script.

use crate::error::Result;
use crate::event::RawEvent;
use crate::eventbus::GestureHandler;
use crate::router::EventRouter;
use std::sync::atomic::{AtomicBool, Ordering};

#[cfg(all(feature = "libinput", target_os = "linux"))]
#[cfg_attr(docsrs, doc(cfg(all(feature = "libinput", target_os = "linux"))))]
pub mod libinput;

pub mod scripted;

/// A producer of raw events.
pub trait EventSource {
    /// Returns the next batch of events in arrival order.
    ///
    /// May block until events are available. An empty batch is a valid wakeup with
    /// nothing to deliver.
    fn next_batch(&mut self) -> Result<Vec<RawEvent>>;

    /// `true` once the source will never produce another event.
    fn is_exhausted(&self) -> bool {
        false
    }
}

/// Drive `source` through `router` until the source is exhausted or `stop` is set.
///
/// `stop` is checked between batches; the router itself never blocks.
pub fn run<S, H>(source: &mut S, router: &mut EventRouter<H>, stop: &AtomicBool) -> Result<()>
where
    S: EventSource + ?Sized,
    H: GestureHandler,
{
    while !stop.load(Ordering::SeqCst) && !source.is_exhausted() {
        let batch = source.next_batch()?;
        router.handle_all(batch);
    }
    Ok(())
}

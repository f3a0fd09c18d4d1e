//! multigest: multi-touch gesture classification.
//!
//! Turns a stream of raw touchpad/touchscreen gesture events into discrete swipes
//! (up/down/left/right) and pinches (in/out), each tagged with its finger count.
//!
//! The engine is four small pieces on a single processing path:
//! [`DeviceRegistry`] tracks qualifying devices, [`GestureAccumulator`] integrates
//! deltas between begin and end, the [`classifier`] decides what fired, and
//! [`EventRouter`] ties them together and hands results to a [`GestureHandler`].
//! Event sources live in [`backends`].

pub mod accumulator;
pub mod backends;
pub mod classifier;
pub mod config;
pub mod device;
pub mod error;
pub mod event;
pub mod eventbus;
pub mod filtered_listener;
pub mod gesture;
pub mod logger;
pub mod registry;
pub mod router;

pub use accumulator::*;
pub use classifier::{classify_pinch, classify_swipe, Thresholds, SWIPE_THRESHOLD};
pub use config::Config;
pub use device::*;
pub use error::{Error, Result};
pub use event::*;
pub use eventbus::*;
pub use filtered_listener::FilteredHandler;
pub use gesture::*;
pub use logger::{GestureLogger, JsonLinesWriter};
pub use registry::DeviceRegistry;
pub use router::*;

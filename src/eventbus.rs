//! Gesture delivery.
//!
//! The router hands every classified [`Gesture`] to one [`GestureHandler`]. Anything
//! can be a handler: a closure, an `mpsc::Sender<Gesture>`, a `Vec<Gesture>` (handy in
//! tests), or a [`GestureBus`] that fans out to several filtered listeners.

use crate::gesture::{Gesture, GestureKind};
use std::collections::BTreeMap;
use std::sync::mpsc::Sender;

/// Receives classified gestures. Called synchronously at gesture end.
pub trait GestureHandler {
    fn on_gesture(&mut self, gesture: &Gesture);
}

impl<F> GestureHandler for F
where
    F: FnMut(&Gesture),
{
    fn on_gesture(&mut self, gesture: &Gesture) {
        self(gesture)
    }
}

impl GestureHandler for Vec<Gesture> {
    fn on_gesture(&mut self, gesture: &Gesture) {
        self.push(*gesture);
    }
}

/// Forwards to a channel. A disconnected receiver is ignored.
impl GestureHandler for Sender<Gesture> {
    fn on_gesture(&mut self, gesture: &Gesture) {
        if self.send(*gesture).is_err() {
            tracing::debug!("gesture receiver dropped; discarding {gesture}");
        }
    }
}

/// Determines which gestures a listener wants to receive.
#[derive(Debug, Clone, Copy)]
pub enum GestureFilter {
    All,
    SwipesOnly,
    PinchesOnly,
    /// Only gestures performed with exactly this many fingers.
    Fingers(u32),
    Custom(fn(&Gesture) -> bool),
}

impl GestureFilter {
    pub fn accepts(&self, gesture: &Gesture) -> bool {
        match *self {
            GestureFilter::All => true,
            GestureFilter::SwipesOnly => gesture.kind == GestureKind::Swipe,
            GestureFilter::PinchesOnly => gesture.kind == GestureKind::Pinch,
            GestureFilter::Fingers(n) => gesture.fingers == n,
            GestureFilter::Custom(f) => f(gesture),
        }
    }
}

struct ListenerEntry {
    listener: Box<dyn GestureHandler>,
    enabled: bool,
    filter: GestureFilter,
}

/// Fan-out handler with per-listener filters and mute switches.
///
/// Listeners are invoked in registration order.
#[derive(Default)]
pub struct GestureBus {
    next_id: u64,
    listeners: BTreeMap<u64, ListenerEntry>,
}

impl GestureBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a listener and returns its id.
    pub fn add_listener(
        &mut self,
        listener: impl GestureHandler + 'static,
        filter: GestureFilter,
    ) -> u64 {
        let id = self.next_id;
        self.listeners.insert(
            id,
            ListenerEntry {
                listener: Box::new(listener),
                enabled: true,
                filter,
            },
        );
        self.next_id += 1;
        id
    }

    pub fn enable(&mut self, id: u64) {
        if let Some(entry) = self.listeners.get_mut(&id) {
            entry.enabled = true;
        }
    }

    /// Mutes a listener without removing it.
    pub fn disable(&mut self, id: u64) {
        if let Some(entry) = self.listeners.get_mut(&id) {
            entry.enabled = false;
        }
    }

    pub fn remove_listener(&mut self, id: u64) {
        self.listeners.remove(&id);
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}

impl GestureHandler for GestureBus {
    fn on_gesture(&mut self, gesture: &Gesture) {
        for entry in self.listeners.values_mut() {
            if entry.enabled && entry.filter.accepts(gesture) {
                entry.listener.on_gesture(gesture);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gesture::Direction;
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::sync::mpsc;

    fn recorder() -> (Rc<RefCell<Vec<Gesture>>>, impl FnMut(&Gesture)) {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        (seen, move |g: &Gesture| sink.borrow_mut().push(*g))
    }

    #[test]
    fn filters_by_kind_and_fingers() {
        let mut bus = GestureBus::new();
        let (swipes, on_swipe) = recorder();
        let (fours, on_four) = recorder();
        bus.add_listener(on_swipe, GestureFilter::SwipesOnly);
        bus.add_listener(on_four, GestureFilter::Fingers(4));

        bus.on_gesture(&Gesture::swipe(Direction::Up, 3));
        bus.on_gesture(&Gesture::pinch(Direction::In, 4));

        assert_eq!(*swipes.borrow(), vec![Gesture::swipe(Direction::Up, 3)]);
        assert_eq!(*fours.borrow(), vec![Gesture::pinch(Direction::In, 4)]);
    }

    #[test]
    fn disabled_listener_is_skipped_until_enabled() {
        let mut bus = GestureBus::new();
        let (seen, on) = recorder();
        let id = bus.add_listener(on, GestureFilter::All);

        bus.disable(id);
        bus.on_gesture(&Gesture::swipe(Direction::Left, 3));
        assert!(seen.borrow().is_empty());

        bus.enable(id);
        bus.on_gesture(&Gesture::swipe(Direction::Left, 3));
        assert_eq!(seen.borrow().len(), 1);

        bus.remove_listener(id);
        assert!(bus.is_empty());
    }

    #[test]
    fn custom_filter() {
        fn only_vertical(g: &Gesture) -> bool {
            matches!(g.direction, Direction::Up | Direction::Down)
        }
        let mut bus = GestureBus::new();
        let (seen, on) = recorder();
        bus.add_listener(on, GestureFilter::Custom(only_vertical));
        bus.on_gesture(&Gesture::swipe(Direction::Right, 3));
        bus.on_gesture(&Gesture::swipe(Direction::Down, 3));
        assert_eq!(*seen.borrow(), vec![Gesture::swipe(Direction::Down, 3)]);
    }

    #[test]
    fn sender_forwards_and_tolerates_closed_receiver() {
        let (mut tx, rx) = mpsc::channel::<Gesture>();
        tx.on_gesture(&Gesture::pinch(Direction::Out, 2));
        assert_eq!(rx.recv().unwrap(), Gesture::pinch(Direction::Out, 2));
        drop(rx);
        tx.on_gesture(&Gesture::pinch(Direction::Out, 2));
    }
}

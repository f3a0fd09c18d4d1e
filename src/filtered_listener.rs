use crate::eventbus::GestureHandler;
use crate::gesture::Gesture;

/// Wraps a handler and forwards only gestures matching a user-supplied predicate.
pub struct FilteredHandler<H> {
    predicate: Box<dyn Fn(&Gesture) -> bool + Send + Sync>,
    inner: H,
}

impl<H: GestureHandler> FilteredHandler<H> {
    pub fn new(predicate: impl Fn(&Gesture) -> bool + Send + Sync + 'static, inner: H) -> Self {
        Self {
            predicate: Box::new(predicate),
            inner,
        }
    }

    pub fn into_inner(self) -> H {
        self.inner
    }
}

impl<H: GestureHandler> GestureHandler for FilteredHandler<H> {
    fn on_gesture(&mut self, gesture: &Gesture) {
        if (self.predicate)(gesture) {
            self.inner.on_gesture(gesture);
        }
    }
}

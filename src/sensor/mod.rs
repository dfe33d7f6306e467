//! Device orientation input.
//!
//! A host platform exposes its tilt sensor as an [`OrientationSource`].
//! Subscribing hands the source a channel sender and yields a
//! [`Subscription`]; dropping the subscription detaches the platform
//! listener. [`OrientationFeed`] bundles the receiving end with the
//! subscription so the engine owns exactly one value per connected sensor.
//!
//! Readings are queued, never coalesced: the scroll mapping is incremental,
//! so every reading must be applied in arrival order.

mod simulated;
#[cfg(all(feature = "web", target_arch = "wasm32"))]
mod dom;

use std::fmt;
use std::sync::mpsc::{self, Receiver, Sender};

#[cfg(all(feature = "web", target_arch = "wasm32"))]
pub use dom::DomOrientationSource;
pub use simulated::SimulatedSensor;

use crate::error::TiltScrollError;

/// One device-orientation event.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct OrientationReading {
    /// Front-to-back tilt in degrees (rotation about the device's lateral
    /// axis). `None` when the platform fired the event without a value.
    pub beta: Option<f32>,
}

impl OrientationReading {
    /// Reading with the given tilt angle.
    #[must_use]
    pub fn new(beta: Option<f32>) -> Self {
        Self { beta }
    }
}

/// Handle for a registered orientation listener.
///
/// The listener is removed when the handle is dropped or
/// [`cancel`](Self::cancel)led.
pub struct Subscription {
    unsubscribe: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    /// Wrap the platform-specific teardown for a listener.
    pub fn new(unsubscribe: impl FnOnce() + 'static) -> Self {
        Self {
            unsubscribe: Some(Box::new(unsubscribe)),
        }
    }

    /// Remove the listener now.
    pub fn cancel(mut self) {
        self.run_unsubscribe();
    }

    fn run_unsubscribe(&mut self) {
        if let Some(unsubscribe) = self.unsubscribe.take() {
            unsubscribe();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.run_unsubscribe();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.unsubscribe.is_some())
            .finish()
    }
}

/// A platform tilt sensor that pushes readings into a channel.
pub trait OrientationSource {
    /// Register a listener that forwards every reading to `sink`.
    ///
    /// # Errors
    ///
    /// Returns [`TiltScrollError::Platform`] if the host refuses the
    /// listener.
    fn subscribe(
        &self,
        sink: Sender<OrientationReading>,
    ) -> Result<Subscription, TiltScrollError>;
}

/// Receiving end of a live sensor subscription.
#[derive(Debug)]
pub struct OrientationFeed {
    rx: Receiver<OrientationReading>,
    subscription: Subscription,
}

impl OrientationFeed {
    /// Subscribe to `source` and keep the receiving end.
    ///
    /// # Errors
    ///
    /// Propagates the source's subscription failure.
    pub fn connect(
        source: &dyn OrientationSource,
    ) -> Result<Self, TiltScrollError> {
        let (tx, rx) = mpsc::channel();
        let subscription = source.subscribe(tx)?;
        log::info!("orientation listener attached");
        Ok(Self { rx, subscription })
    }

    /// Take every reading queued since the last drain, oldest first.
    pub fn drain(&self) -> impl Iterator<Item = OrientationReading> + '_ {
        self.rx.try_iter()
    }

    /// Remove the platform listener and discard anything still queued.
    pub fn disconnect(self) {
        self.subscription.cancel();
        log::info!("orientation listener detached");
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::*;

    #[test]
    fn subscription_unsubscribes_once_on_drop() {
        let calls = Rc::new(Cell::new(0));
        let counter = Rc::clone(&calls);
        let sub = Subscription::new(move || counter.set(counter.get() + 1));
        drop(sub);
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn cancel_does_not_double_unsubscribe() {
        let calls = Rc::new(Cell::new(0));
        let counter = Rc::clone(&calls);
        let sub = Subscription::new(move || counter.set(counter.get() + 1));
        sub.cancel();
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn feed_drains_in_arrival_order() {
        let sensor = SimulatedSensor::new();
        let feed = OrientationFeed::connect(&sensor).unwrap();
        assert_eq!(sensor.tilt(10.0), 1);
        assert_eq!(sensor.emit(OrientationReading::new(None)), 1);
        assert_eq!(sensor.tilt(-5.0), 1);

        let readings: Vec<_> = feed.drain().map(|r| r.beta).collect();
        assert_eq!(readings, vec![Some(10.0), None, Some(-5.0)]);
        assert_eq!(feed.drain().count(), 0);
    }

    #[test]
    fn disconnect_removes_listener() {
        let sensor = SimulatedSensor::new();
        let feed = OrientationFeed::connect(&sensor).unwrap();
        assert_eq!(sensor.listener_count(), 1);
        feed.disconnect();
        assert_eq!(sensor.listener_count(), 0);
        assert_eq!(sensor.tilt(30.0), 0);
    }
}

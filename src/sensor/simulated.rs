//! In-process orientation source for hosts without a tilt sensor.
//!
//! The native viewer drives this from the keyboard; tests drive it
//! directly.

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::mpsc::Sender;

use super::{OrientationReading, OrientationSource, Subscription};
use crate::error::TiltScrollError;

#[derive(Default)]
struct Listeners {
    next_id: u64,
    sinks: Vec<(u64, Sender<OrientationReading>)>,
}

/// Orientation source whose readings are emitted by the caller.
///
/// Cloning yields another handle onto the same listener set.
#[derive(Clone, Default)]
pub struct SimulatedSensor {
    listeners: Rc<RefCell<Listeners>>,
}

impl SimulatedSensor {
    /// Sensor with no listeners.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Deliver `reading` to every live listener. Returns how many received
    /// it. Listeners whose receiving end is gone are pruned.
    pub fn emit(&self, reading: OrientationReading) -> usize {
        let mut listeners = self.listeners.borrow_mut();
        listeners.sinks.retain(|(_, tx)| tx.send(reading).is_ok());
        log::debug!(
            "simulated tilt {:?} -> {} listener(s)",
            reading.beta,
            listeners.sinks.len()
        );
        listeners.sinks.len()
    }

    /// Shorthand for emitting a reading with a tilt angle.
    pub fn tilt(&self, beta: f32) -> usize {
        self.emit(OrientationReading::new(Some(beta)))
    }

    /// Number of registered listeners.
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().sinks.len()
    }
}

impl OrientationSource for SimulatedSensor {
    fn subscribe(
        &self,
        sink: Sender<OrientationReading>,
    ) -> Result<Subscription, TiltScrollError> {
        let id = {
            let mut listeners = self.listeners.borrow_mut();
            let id = listeners.next_id;
            listeners.next_id += 1;
            listeners.sinks.push((id, sink));
            id
        };
        let weak = Rc::downgrade(&self.listeners);
        Ok(Subscription::new(move || {
            if let Some(listeners) = weak.upgrade() {
                listeners.borrow_mut().sinks.retain(|(sid, _)| *sid != id);
            }
        }))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::mpsc;

    use super::*;

    #[test]
    fn only_dropped_subscription_is_removed() {
        let sensor = SimulatedSensor::new();
        let (tx_a, rx_a) = mpsc::channel();
        let (tx_b, rx_b) = mpsc::channel();
        let sub_a = sensor.subscribe(tx_a).unwrap();
        let _sub_b = sensor.subscribe(tx_b).unwrap();
        assert_eq!(sensor.listener_count(), 2);

        drop(sub_a);
        assert_eq!(sensor.tilt(5.0), 1);
        assert!(rx_a.try_recv().is_err());
        assert_eq!(rx_b.try_recv().unwrap().beta, Some(5.0));
    }

    #[test]
    fn dead_receivers_are_pruned_on_emit() {
        let sensor = SimulatedSensor::new();
        let (tx, rx) = mpsc::channel();
        let _sub = sensor.subscribe(tx).unwrap();
        drop(rx);
        assert_eq!(sensor.tilt(1.0), 0);
        assert_eq!(sensor.listener_count(), 0);
    }

    #[test]
    fn subscription_outliving_sensor_is_harmless() {
        let (tx, _rx) = mpsc::channel();
        let sub = SimulatedSensor::new().subscribe(tx).unwrap();
        drop(sub);
    }
}

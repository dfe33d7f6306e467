//! Browser `deviceorientation` listener.

use std::sync::mpsc::Sender;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{DeviceOrientationEvent, Window};

use super::{OrientationReading, OrientationSource, Subscription};
use crate::error::TiltScrollError;

const EVENT: &str = "deviceorientation";

/// Orientation source backed by the window's `deviceorientation` event.
pub struct DomOrientationSource {
    window: Window,
}

impl DomOrientationSource {
    /// Source bound to the global `window`.
    ///
    /// # Errors
    ///
    /// Returns [`TiltScrollError::Platform`] outside a browser context.
    pub fn new() -> Result<Self, TiltScrollError> {
        let window = web_sys::window().ok_or_else(|| {
            TiltScrollError::Platform("no global `window` exists".into())
        })?;
        Ok(Self { window })
    }
}

impl OrientationSource for DomOrientationSource {
    fn subscribe(
        &self,
        sink: Sender<OrientationReading>,
    ) -> Result<Subscription, TiltScrollError> {
        let closure = Closure::<dyn FnMut(DeviceOrientationEvent)>::new(
            move |event: DeviceOrientationEvent| {
                let reading =
                    OrientationReading::new(event.beta().map(|b| b as f32));
                // The receiver only disappears during teardown.
                let _ = sink.send(reading);
            },
        );
        self.window
            .add_event_listener_with_callback(
                EVENT,
                closure.as_ref().unchecked_ref(),
            )
            .map_err(|e| {
                TiltScrollError::Platform(format!(
                    "failed to add {EVENT} listener: {e:?}"
                ))
            })?;

        let window = self.window.clone();
        Ok(Subscription::new(move || {
            if let Err(e) = window.remove_event_listener_with_callback(
                EVENT,
                closure.as_ref().unchecked_ref(),
            ) {
                log::error!("failed to remove {EVENT} listener: {e:?}");
            }
            drop(closure);
        }))
    }
}

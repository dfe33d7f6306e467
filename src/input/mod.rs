//! Keyboard actions for hosts that simulate the tilt sensor.

mod keyboard;

pub use keyboard::KeyAction;

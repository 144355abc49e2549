//! Hardware implementations of the panel's abstraction traits.
//!
//! Currently ships the mock layer used by tests and the desktop simulator.
//! Board-specific backends implement the same traits against their GPIO
//! and I2C layers.

pub mod mock;

pub use mock::{MockClock, MockDisplay, MockEncoder, MockTrackPower};

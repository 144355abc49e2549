//! Trait definitions for hardware abstraction and the display boundary.
//!
//! This module defines the seams that allow rs-yardz to run on different
//! hardware (panel GPIO, desktop mock):
//!
//! - `hardware`: track power output, selector encoder, clock
//! - `display`: panel display rendering requests
//!
//! # Hardware Abstraction
//!
//! The key traits are:
//!
//! - [`TrackPower`]: relay output for the selected staging track
//! - [`EncoderInput`]: rotary encoder with push switch
//! - [`Clock`]: monotonic time source for `no_std` environments
//! - [`PanelDisplay`]: status screen collaborator

pub mod display;
pub mod hardware;

pub use display::*;
pub use hardware::*;

//! Pen plotter actuator library.
//!
//! Drives a two-axis pen (tilt + traverse) built from two motors and a
//! contact sensor.  The pen is never commanded before its position is known
//! and homes itself to a known reference after power-up.  All hardware is
//! reached through the port traits in [`app::ports`], so the whole crate
//! runs on the host against simulated hardware.

#![deny(unused_must_use)]

pub mod alarm;
pub mod app;
pub mod config;
pub mod drivers;
pub mod error;
pub mod pen;
pub mod printer;

pub use error::{PenError, ReasonCode, Result};
pub use pen::{Pen, PenState};
pub use printer::{BoundingBox, Printer};

//! Hardware boundary for the plotter core.
//!
//! All interaction with motors, the contact sensor and the operator display
//! happens through the **port traits** defined in [`ports`], keeping the pen
//! state machine fully testable without real peripherals.

pub mod ports;

//! Port traits: the hexagonal boundary between the pen logic and the hardware.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ Pen / Printer (domain)
//! ```
//!
//! Motor, sensor and alarm adapters implement these traits.  The
//! [`Pen`](crate::pen::Pen) owns its motors and sensor as generic
//! parameters, so the domain core never touches hardware directly and tests
//! substitute a simulated rig.
//!
//! ## Blocking contract
//!
//! Every motion call returns only once the physical motion is over:
//! - [`MotorPort::run`] with `Some(rotations)` blocks until the rotation
//!   count completes; with `None` it starts an unbounded run and returns
//!   immediately.
//! - [`ProximitySensorPort::pause_until`] blocks until the event fires.

// ───────────────────────────────────────────────────────────────
// Motor port (driven adapter: domain → hardware)
// ───────────────────────────────────────────────────────────────

/// A single motor with an encoder.
pub trait MotorPort {
    /// Reset the encoder and clear any pending command.
    fn reset(&mut self);

    /// Hold position (`true`) or coast (`false`) when stopped.
    fn set_brake(&mut self, enabled: bool);

    /// Swap the meaning of positive and negative power.
    fn set_inverted(&mut self, inverted: bool);

    /// Run at `power` (-100..=100 percent).  `Some(rotations)` blocks until
    /// the rotations complete; `None` runs until [`stop`](Self::stop).
    fn run(&mut self, power: i8, rotations: Option<f32>);

    /// Stop immediately.
    fn stop(&mut self);
}

// ───────────────────────────────────────────────────────────────
// Proximity sensor port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Sensor operating mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorMode {
    /// Report distance to the nearest object.
    Proximity,
}

/// Threshold-crossing event raised by the sensor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProximityEvent {
    /// An object came within the configured threshold.
    ObjectNear,
}

/// Read-side port for the tilt contact sensor.
pub trait ProximitySensorPort {
    fn set_mode(&mut self, mode: SensorMode);

    /// Register `threshold` as the trigger value for `event`.
    fn set_proximity_threshold(&mut self, event: ProximityEvent, threshold: u8);

    /// Current proximity reading in sensor units.
    fn proximity(&mut self) -> u8;

    /// Block until `event` fires.
    fn pause_until(&mut self, event: ProximityEvent);
}

// ───────────────────────────────────────────────────────────────
// Alarm port (driven adapter: domain → operator)
// ───────────────────────────────────────────────────────────────

/// Status light patterns available on the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLight {
    Off,
    Green,
    RedFlash,
}

/// Operator-facing output used to report a fault: a small text display, a
/// status light and a speaker.
pub trait AlarmPort {
    fn clear_screen(&mut self);

    fn set_status_light(&mut self, light: StatusLight);

    /// Show `text` on display row `line` (1-based).
    fn show_line(&mut self, text: &str, line: u8);

    /// Play the alarm sound to completion.
    fn play_alarm_sound(&mut self);
}

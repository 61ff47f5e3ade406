//! Pen actuator: tilt + traverse state machine.
//!
//! ```text
//!             initialize / auto-init
//!   Unknown ─────────────────────────▶ RaisedAllTheWay
//!                                       │   ▲
//!                    prepare_for_writing│   │raise_all_the_way
//!                                       ▼   │
//!                                      Ready ◀──────┐
//!                          lower_to_write│          │prepare_for_writing
//!                                        ▼          │
//!                                      Writing ─────┘
//! ```
//!
//! The pen owns its tilt motor, traverse motor and contact sensor.  Every
//! public operation returns a [`Result`]; on failure the pen stops both
//! motors and hands the error back, leaving recovery to the caller.
//!
//! Raise, prepare and lower home the pen first when its position is not yet
//! known.  While a homing run is in progress every public operation is
//! refused with `NotAllowed` / "Pen initializing".

mod homing;
mod motion;
pub mod state;

pub use motion::{TraverseMove, plan_traverse};
pub use state::PenState;

use log::{debug, info, warn};

use crate::app::ports::{MotorPort, ProximityEvent, ProximitySensorPort};
use crate::config::PenConfig;
use crate::drivers::motor;
use crate::error::{ConfigError, PenError, ReasonCode, Result};

const RAISE_FN: &str = "Pen.raiseAllTheWay";
const PREPARE_FN: &str = "Pen.prepareForWriting";
const LOWER_FN: &str = "Pen.lowerToWrite";

/// Message carried by every operation refused during homing.
pub const INITIALIZING_MESSAGE: &str = "Pen initializing";

// ───────────────────────────────────────────────────────────────
// Pen
// ───────────────────────────────────────────────────────────────

/// The pen actuator.
pub struct Pen<M: MotorPort, S: ProximitySensorPort> {
    tilt: M,
    traverse: M,
    sensor: S,
    config: PenConfig,
    state: PenState,
    /// Carriage location in device units; `None` until homed.
    location: Option<f32>,
    /// Set for the duration of a homing run.
    initializing: bool,
}

impl<M: MotorPort, S: ProximitySensorPort> Pen<M, S> {
    /// Validate `config`, take ownership of the hardware and apply the motor
    /// defaults.  An invalid config is rejected before any motor is touched.
    pub fn new(
        mut tilt: M,
        mut traverse: M,
        sensor: S,
        config: PenConfig,
    ) -> core::result::Result<Self, ConfigError> {
        config.validate()?;
        motor::apply_defaults(&mut tilt);
        motor::apply_defaults(&mut traverse);

        Ok(Self {
            tilt,
            traverse,
            sensor,
            config,
            state: PenState::Unknown,
            location: None,
            initializing: false,
        })
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn state(&self) -> PenState {
        self.state
    }

    pub fn location(&self) -> Option<f32> {
        self.location
    }

    /// Tilt and carriage position are both trusted.
    pub fn is_initialized(&self) -> bool {
        self.state.is_known() && self.location.is_some()
    }

    pub fn is_initializing(&self) -> bool {
        self.initializing
    }

    pub fn config(&self) -> &PenConfig {
        &self.config
    }

    // ── Tilt operations ───────────────────────────────────────

    /// Lift the pen fully clear of the surface.
    ///
    /// From `Ready` or `Writing` the pen is first lowered onto the surface
    /// so the lift always starts from the contact point.
    pub fn raise_all_the_way(&mut self) -> Result<()> {
        self.ensure_initialized(RAISE_FN)?;
        self.raise_inner()
    }

    /// Lift the pen just off the surface.
    pub fn prepare_for_writing(&mut self) -> Result<()> {
        self.ensure_initialized(PREPARE_FN)?;
        self.prepare_inner()
    }

    /// Put the pen tip on the surface.
    pub fn lower_to_write(&mut self) -> Result<()> {
        self.ensure_initialized(LOWER_FN)?;
        self.lower_inner()
    }

    // ── Hardware housekeeping ─────────────────────────────────

    /// Stop both motors immediately.
    pub fn stop(&mut self) {
        self.tilt.stop();
        self.traverse.stop();
    }

    /// Reset both motor encoders.  Forgets nothing about the pen state.
    pub fn reset_motors(&mut self) {
        self.tilt.reset();
        self.traverse.reset();
    }

    // -----------------------------------------------------------------------
    // Internal
    // -----------------------------------------------------------------------

    fn ensure_initialized(&mut self, function: &'static str) -> Result<()> {
        self.check_not_initializing(function)?;
        if !self.is_initialized() {
            info!("PEN | {function} before homing, initializing first");
            self.initialize()?;
        }
        Ok(())
    }

    fn check_not_initializing(&mut self, function: &'static str) -> Result<()> {
        if self.initializing {
            return Err(self.halt(PenError::new(
                function,
                ReasonCode::NotAllowed,
                INITIALIZING_MESSAGE,
            )));
        }
        Ok(())
    }

    fn raise_inner(&mut self) -> Result<()> {
        match self.state {
            PenState::RaisedAllTheWay => Ok(()),
            PenState::Ready | PenState::Writing => {
                self.lower_inner()?;
                self.tilt_up(self.config.raise_rotations);
                self.set_state(PenState::RaisedAllTheWay);
                Ok(())
            }
            PenState::Unknown => Err(self.unrecognized_state(RAISE_FN)),
        }
    }

    fn prepare_inner(&mut self) -> Result<()> {
        match self.state {
            PenState::RaisedAllTheWay => {
                self.lower_fully();
                self.tilt_up(self.config.prepare_rotations);
                self.set_state(PenState::Ready);
                Ok(())
            }
            PenState::Ready => Ok(()),
            PenState::Writing => {
                self.tilt_up(self.config.prepare_rotations);
                self.set_state(PenState::Ready);
                Ok(())
            }
            PenState::Unknown => Err(self.unrecognized_state(PREPARE_FN)),
        }
    }

    fn lower_inner(&mut self) -> Result<()> {
        match self.state {
            PenState::RaisedAllTheWay => {
                self.park();
                self.lower_fully();
                Ok(())
            }
            PenState::Ready => {
                self.lower_fully();
                Ok(())
            }
            PenState::Writing => Ok(()),
            PenState::Unknown => Err(self.unrecognized_state(LOWER_FN)),
        }
    }

    /// Drive the carriage against the left stop, then back off to the
    /// location where tilting cannot jam the carriage.
    fn park(&mut self) {
        let power = self.drive_power();
        debug!("PEN | parking carriage");
        self.traverse.run(-power, Some(self.config.park_left_rotations));
        self.traverse.run(power, Some(self.config.park_right_rotations));
        if self.location.is_some() {
            self.location = Some(self.config.park_location());
        }
    }

    /// Tilt down until the contact sensor fires.  Skipped when the sensor
    /// already reads the contact value.
    fn lower_fully(&mut self) {
        let threshold = self.config.proximity_threshold;
        if self.sensor.proximity() != threshold {
            debug!("PEN | lowering until contact");
            self.tilt.run(-self.drive_power(), None);
            self.sensor.pause_until(ProximityEvent::ObjectNear);
            self.tilt.stop();
        }
        self.set_state(PenState::Writing);
    }

    fn tilt_up(&mut self, rotations: f32) {
        debug!("PEN | tilting up {rotations} rotations");
        self.tilt.run(self.drive_power(), Some(rotations));
    }

    /// Validated config keeps the power within 1-100.
    fn drive_power(&self) -> i8 {
        i8::try_from(self.config.default_motor_power.min(100)).unwrap_or(100)
    }

    fn set_state(&mut self, next: PenState) {
        if next != self.state {
            info!("PEN | {} -> {}", self.state, next);
            self.state = next;
        }
    }

    /// Reached only when a tilt operation finds no trusted state after the
    /// automatic homing.  Nothing about the pen is trusted afterwards.
    fn unrecognized_state(&mut self, function: &'static str) -> PenError {
        let err = PenError::with_args(
            function,
            ReasonCode::Unknown,
            format_args!("pen state {}", self.state),
        );
        self.state = PenState::Unknown;
        self.location = None;
        self.halt(err)
    }

    /// Stop all motion and pass the error through.
    fn halt(&mut self, err: PenError) -> PenError {
        self.stop();
        warn!("PEN | rejected: {err}");
        err
    }
}

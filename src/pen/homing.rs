//! Homing run.
//!
//! Establishes a trusted tilt and carriage reference after power-up.  The
//! sequence never traverses with the pen on the surface: the carriage is
//! parked before the first tilt move, and the pen is lifted before the
//! carriage is driven to its zero stop and centred.
//!
//! 1. Park the carriage at the safe tilt location.
//! 2. Lower until the contact sensor fires.
//! 3. Lift to the writing-ready height.
//! 4. Drive to the left stop, call it zero, centre the carriage.
//! 5. Lift fully.

use log::{error, info};

use super::{Pen, PenState};
use crate::app::ports::{MotorPort, ProximityEvent, ProximitySensorPort, SensorMode};
use crate::drivers::motor;
use crate::error::Result;

const INIT_FN: &str = "Pen.initialize";

impl<M: MotorPort, S: ProximitySensorPort> Pen<M, S> {
    /// Run the homing sequence.  Ends in `RaisedAllTheWay` with the carriage
    /// centred.
    ///
    /// The initializing flag is cleared on every exit path.  A failed run
    /// leaves the pen `Unknown` so the next operation homes again.
    pub fn initialize(&mut self) -> Result<()> {
        self.check_not_initializing(INIT_FN)?;

        info!("PEN | homing started");
        self.initializing = true;
        self.set_state(PenState::Unknown);
        self.location = None;

        let result = self.home();
        self.initializing = false;

        match &result {
            Ok(()) => info!("PEN | homed, carriage at {:?}", self.location),
            Err(e) => {
                self.set_state(PenState::Unknown);
                self.location = None;
                error!("PEN | homing failed: {e}");
            }
        }
        result
    }

    fn home(&mut self) -> Result<()> {
        motor::rearm(&mut self.tilt);
        motor::rearm(&mut self.traverse);
        self.sensor.set_mode(SensorMode::Proximity);
        self.sensor
            .set_proximity_threshold(ProximityEvent::ObjectNear, self.config.proximity_threshold);

        self.park();
        self.lower_fully();
        self.prepare_inner()?;

        self.traverse
            .run(-self.drive_power(), Some(self.config.park_left_rotations));
        self.location = Some(0.0);
        self.move_to_inner(
            self.config.centre_location(),
            i16::from(self.config.default_motor_power),
        )?;

        self.raise_inner()
    }
}

//! Motor setup helpers.
//!
//! The pen motors are mounted so that positive power lifts the pen and moves
//! the carriage right only once the motor direction is inverted.  Both also
//! need to hold position when stopped so the pen does not sag under its own
//! weight.

use log::debug;

use crate::app::ports::MotorPort;

/// Reset the encoder, enable brake-on-stop and invert the direction.
pub fn apply_defaults(motor: &mut impl MotorPort) {
    motor.reset();
    motor.set_brake(true);
    motor.set_inverted(true);
    debug!("motor defaults applied (brake, inverted)");
}

/// Reset the encoder and re-enable the brake without touching direction.
pub fn rearm(motor: &mut impl MotorPort) {
    motor.reset();
    motor.set_brake(true);
}

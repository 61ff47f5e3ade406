//! Carriage traverse: bounds checking and the distance-to-rotations move.

use log::debug;

use super::{Pen, PenState};
use crate::app::ports::{MotorPort, ProximitySensorPort};
use crate::config::PenConfig;
use crate::error::{PenError, ReasonCode, Result};

const MOVE_FN: &str = "Pen.moveTo";

/// A validated traverse command.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TraverseMove {
    /// Signed motor power; negative moves left.
    pub power: i8,
    /// Motor rotations to run.
    pub rotations: f32,
}

/// Validate a `move_to` request and work out the motor command.
///
/// Checks run in order and the first failure wins: state, then location,
/// then speed.  `Ok(None)` means there is nothing to do (already there, or
/// zero speed).
pub fn plan_traverse(
    config: &PenConfig,
    state: PenState,
    current: Option<f32>,
    target: f32,
    speed: i16,
) -> Result<Option<TraverseMove>> {
    if !state.can_traverse() {
        return Err(PenError::with_args(
            MOVE_FN,
            ReasonCode::NotAllowed,
            format_args!("cannot traverse in state {state}"),
        ));
    }
    if !(0.0..=config.max_location).contains(&target) {
        return Err(PenError::with_args(
            MOVE_FN,
            ReasonCode::InvalidParameters,
            format_args!("location {target} outside 0-{}", config.max_location),
        ));
    }
    if !(0..=i16::from(config.max_speed)).contains(&speed) {
        return Err(PenError::with_args(
            MOVE_FN,
            ReasonCode::InvalidParameters,
            format_args!("speed {speed} outside 0-{}", config.max_speed),
        ));
    }
    let Some(current) = current else {
        return Err(PenError::new(
            MOVE_FN,
            ReasonCode::NotAllowed,
            "carriage location unknown",
        ));
    };

    if target == current || speed == 0 {
        return Ok(None);
    }

    // Speed is within 0-100 for a validated config.
    let magnitude = i8::try_from(speed.min(100)).unwrap_or(100);
    let power = if target < current { -magnitude } else { magnitude };
    Ok(Some(TraverseMove {
        power,
        rotations: (target - current).abs() / config.units_per_rotation,
    }))
}

impl<M: MotorPort, S: ProximitySensorPort> Pen<M, S> {
    /// Traverse the carriage to `location` at `speed` percent.
    ///
    /// Only allowed in `Ready` or `Writing`.  Moving to the current location
    /// or at zero speed is a silent no-op.  Blocks until the move completes.
    pub fn move_to(&mut self, location: f32, speed: i16) -> Result<()> {
        self.check_not_initializing(MOVE_FN)?;
        self.move_to_inner(location, speed)
    }

    pub(super) fn move_to_inner(&mut self, location: f32, speed: i16) -> Result<()> {
        let plan = plan_traverse(&self.config, self.state, self.location, location, speed);
        match plan {
            Ok(Some(mv)) => {
                debug!(
                    "PEN | traverse {:?} -> {location} (power {}, {} rotations)",
                    self.location, mv.power, mv.rotations
                );
                self.traverse.run(mv.power, Some(mv.rotations));
                self.location = Some(location);
                Ok(())
            }
            Ok(None) => Ok(()),
            Err(err) => Err(self.halt(err)),
        }
    }
}

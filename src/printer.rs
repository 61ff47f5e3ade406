//! Printer: the pen plus its working area and the operator alarm.
//!
//! ```text
//!  caller ──▶ ┌──────────────────────┐ ──▶ AlarmPort
//!             │       Printer        │
//!             │  bounding box · Pen  │ ──▶ MotorPort ×2, ProximitySensorPort
//!             └──────────────────────┘
//! ```
//!
//! Every pen failure is reported on the alarm before it is returned, so the
//! caller only has to decide what to do next.

use log::info;

use crate::alarm;
use crate::app::ports::{AlarmPort, MotorPort, ProximitySensorPort, StatusLight};
use crate::config::PrinterConfig;
use crate::error::{ConfigError, Result};
use crate::pen::Pen;

/// Reachable area in device units: `x` is the pen traverse, `y` the paper
/// feed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub x: f32,
    pub y: f32,
}

impl BoundingBox {
    pub fn contains(&self, x: f32, y: f32) -> bool {
        (0.0..=self.x).contains(&x) && (0.0..=self.y).contains(&y)
    }
}

/// Owns the pen and the alarm output.
pub struct Printer<M: MotorPort, S: ProximitySensorPort, A: AlarmPort> {
    pen: Pen<M, S>,
    alarm: A,
    bounds: BoundingBox,
}

impl<M: MotorPort, S: ProximitySensorPort, A: AlarmPort> Printer<M, S, A> {
    /// Validate `config` and assemble the printer.
    pub fn new(
        tilt: M,
        traverse: M,
        sensor: S,
        alarm: A,
        config: PrinterConfig,
    ) -> core::result::Result<Self, ConfigError> {
        config.validate()?;
        let bounds = BoundingBox {
            x: config.pen.max_location,
            y: config.max_paper_feed_location,
        };
        Ok(Self {
            pen: Pen::new(tilt, traverse, sensor, config.pen)?,
            alarm,
            bounds,
        })
    }

    pub fn bounding_box(&self) -> BoundingBox {
        self.bounds
    }

    pub fn pen(&self) -> &Pen<M, S> {
        &self.pen
    }

    pub fn alarm(&self) -> &A {
        &self.alarm
    }

    /// Reset every motor encoder, then home the pen.
    pub fn initialize(&mut self) -> Result<()> {
        info!(
            "PRINTER | initializing, area {}x{}",
            self.bounds.x, self.bounds.y
        );
        self.pen.reset_motors();
        let result = self.pen.initialize();
        self.report(result)?;
        self.alarm.set_status_light(StatusLight::Green);
        Ok(())
    }

    pub fn raise_pen(&mut self) -> Result<()> {
        let result = self.pen.raise_all_the_way();
        self.report(result)
    }

    pub fn prepare_pen(&mut self) -> Result<()> {
        let result = self.pen.prepare_for_writing();
        self.report(result)
    }

    pub fn lower_pen(&mut self) -> Result<()> {
        let result = self.pen.lower_to_write();
        self.report(result)
    }

    pub fn move_pen(&mut self, location: f32, speed: i16) -> Result<()> {
        let result = self.pen.move_to(location, speed);
        self.report(result)
    }

    fn report(&mut self, result: Result<()>) -> Result<()> {
        if let Err(err) = &result {
            alarm::raise(&mut self.alarm, err);
        }
        result
    }
}

//! Simulated plotter rig for integration tests.
//!
//! Records every port call and models just enough physics to check the
//! pen's bookkeeping: the tilt height above the surface (in motor rotations)
//! drives the contact sensor, and the carriage position is clamped by the
//! mechanical stops at both ends of the traverse.

use std::cell::RefCell;
use std::rc::Rc;

use penplotter::app::ports::{
    AlarmPort, MotorPort, ProximityEvent, ProximitySensorPort, SensorMode, StatusLight,
};
use penplotter::config::{PenConfig, PrinterConfig};
use penplotter::error::ConfigError;
use penplotter::{Pen, Printer};

// ── Call record ───────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotorId {
    Tilt,
    Traverse,
}

#[derive(Debug, Clone, PartialEq)]
pub enum HwCall {
    Reset(MotorId),
    SetBrake(MotorId, bool),
    SetInverted(MotorId, bool),
    Run {
        motor: MotorId,
        power: i8,
        rotations: Option<f32>,
    },
    Stop(MotorId),
    SetMode(SensorMode),
    SetThreshold(u8),
    PauseUntil(ProximityEvent),
}

// ── Rig ───────────────────────────────────────────────────────

/// Reading reported while the tip is clear of the surface, above threshold.
const CLEARANCE_READING: u8 = 40;

pub struct Rig {
    pub calls: Vec<HwCall>,
    /// Tilt height above the surface in rotations; 0 is contact.
    pub tilt_height: f32,
    tilt_running_down: bool,
    /// Carriage position in device units from the left stop.
    pub carriage: f32,
    /// Traverse moves issued while the tip was on the surface.
    pub traverse_while_down: usize,
    threshold: u8,
    travel: f32,
    units_per_rotation: f32,
}

pub type SharedRig = Rc<RefCell<Rig>>;

#[allow(dead_code)]
impl Rig {
    /// A rig with the pen `tilt_height` rotations up and the carriage
    /// somewhere in the middle of its travel.
    pub fn shared(tilt_height: f32) -> SharedRig {
        let config = PenConfig::default();
        Rc::new(RefCell::new(Self {
            calls: Vec::new(),
            tilt_height,
            tilt_running_down: false,
            carriage: 200.0,
            traverse_while_down: 0,
            threshold: config.proximity_threshold,
            travel: config.max_location,
            units_per_rotation: config.units_per_rotation,
        }))
    }

    pub fn runs(&self) -> Vec<HwCall> {
        self.calls
            .iter()
            .filter(|c| matches!(c, HwCall::Run { .. }))
            .cloned()
            .collect()
    }

    pub fn touching(&self) -> bool {
        self.tilt_height <= 0.0
    }

    fn run(&mut self, motor: MotorId, power: i8, rotations: Option<f32>) {
        self.calls.push(HwCall::Run {
            motor,
            power,
            rotations,
        });
        let sign = f32::from(power.signum());
        match (motor, rotations) {
            (MotorId::Tilt, Some(r)) => {
                self.tilt_height = (self.tilt_height + sign * r).max(0.0);
            }
            (MotorId::Tilt, None) => {
                self.tilt_running_down = power < 0;
            }
            (MotorId::Traverse, Some(r)) => {
                if self.touching() {
                    self.traverse_while_down += 1;
                }
                let next = self.carriage + sign * r * self.units_per_rotation;
                self.carriage = next.clamp(0.0, self.travel);
            }
            (MotorId::Traverse, None) => {}
        }
    }
}

// ── Motors and sensor ─────────────────────────────────────────

pub struct MockMotor {
    rig: SharedRig,
    id: MotorId,
}

impl MotorPort for MockMotor {
    fn reset(&mut self) {
        self.rig.borrow_mut().calls.push(HwCall::Reset(self.id));
    }

    fn set_brake(&mut self, enabled: bool) {
        self.rig
            .borrow_mut()
            .calls
            .push(HwCall::SetBrake(self.id, enabled));
    }

    fn set_inverted(&mut self, inverted: bool) {
        self.rig
            .borrow_mut()
            .calls
            .push(HwCall::SetInverted(self.id, inverted));
    }

    fn run(&mut self, power: i8, rotations: Option<f32>) {
        self.rig.borrow_mut().run(self.id, power, rotations);
    }

    fn stop(&mut self) {
        let mut rig = self.rig.borrow_mut();
        rig.calls.push(HwCall::Stop(self.id));
        if self.id == MotorId::Tilt {
            rig.tilt_running_down = false;
        }
    }
}

pub struct MockSensor {
    rig: SharedRig,
}

impl ProximitySensorPort for MockSensor {
    fn set_mode(&mut self, mode: SensorMode) {
        self.rig.borrow_mut().calls.push(HwCall::SetMode(mode));
    }

    fn set_proximity_threshold(&mut self, _event: ProximityEvent, threshold: u8) {
        let mut rig = self.rig.borrow_mut();
        rig.threshold = threshold;
        rig.calls.push(HwCall::SetThreshold(threshold));
    }

    fn proximity(&mut self) -> u8 {
        let rig = self.rig.borrow();
        if rig.touching() {
            rig.threshold
        } else {
            rig.threshold.saturating_add(CLEARANCE_READING)
        }
    }

    fn pause_until(&mut self, event: ProximityEvent) {
        let mut rig = self.rig.borrow_mut();
        rig.calls.push(HwCall::PauseUntil(event));
        assert!(
            rig.tilt_running_down || rig.touching(),
            "waiting for contact with the tilt motor idle would block forever"
        );
        rig.tilt_height = 0.0;
    }
}

// ── Alarm ─────────────────────────────────────────────────────

#[allow(dead_code)]
#[derive(Default)]
pub struct MockAlarm {
    pub lines: Vec<(u8, String)>,
    pub light: Option<StatusLight>,
    pub sounds: usize,
}

impl AlarmPort for MockAlarm {
    fn clear_screen(&mut self) {
        self.lines.clear();
    }

    fn set_status_light(&mut self, light: StatusLight) {
        self.light = Some(light);
    }

    fn show_line(&mut self, text: &str, line: u8) {
        self.lines.push((line, text.to_string()));
    }

    fn play_alarm_sound(&mut self) {
        self.sounds += 1;
    }
}

// ── Builders ──────────────────────────────────────────────────

pub type MockPen = Pen<MockMotor, MockSensor>;

#[allow(dead_code)]
pub fn mock_pen_with(rig: &SharedRig, config: PenConfig) -> Result<MockPen, ConfigError> {
    Pen::new(
        MockMotor {
            rig: Rc::clone(rig),
            id: MotorId::Tilt,
        },
        MockMotor {
            rig: Rc::clone(rig),
            id: MotorId::Traverse,
        },
        MockSensor {
            rig: Rc::clone(rig),
        },
        config,
    )
}

#[allow(dead_code)]
pub fn mock_pen(rig: &SharedRig) -> MockPen {
    mock_pen_with(rig, PenConfig::default()).unwrap()
}

#[allow(dead_code)]
pub fn mock_printer(
    rig: &SharedRig,
    config: PrinterConfig,
) -> Result<Printer<MockMotor, MockSensor, MockAlarm>, ConfigError> {
    Printer::new(
        MockMotor {
            rig: Rc::clone(rig),
            id: MotorId::Tilt,
        },
        MockMotor {
            rig: Rc::clone(rig),
            id: MotorId::Traverse,
        },
        MockSensor {
            rig: Rc::clone(rig),
        },
        MockAlarm::default(),
        config,
    )
}

/// Forget the calls recorded so far.
#[allow(dead_code)]
pub fn clear_calls(rig: &SharedRig) {
    rig.borrow_mut().calls.clear();
}

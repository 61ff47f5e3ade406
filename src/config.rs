//! Plotter configuration parameters
//!
//! Tunable constants for the pen actuator and the printer bounding box.
//! Defaults match the reference machine; a JSON document can override them.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Pen actuator configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PenConfig {
    // --- Motors ---
    /// Drive power used for tilt moves and homing traverses (percent)
    pub default_motor_power: u8,
    /// Upper bound accepted by `move_to` for speed (percent)
    pub max_speed: u8,

    // --- Geometry ---
    /// Rightmost pen location (device units); leftmost is 0
    pub max_location: f32,
    /// Device units travelled per traverse motor rotation
    pub units_per_rotation: f32,

    // --- Tilt ---
    /// Rotations from contact to fully raised
    pub raise_rotations: f32,
    /// Rotations from contact to the writing-ready lift
    pub prepare_rotations: f32,
    /// Sensor reading that means the tip touches the surface
    pub proximity_threshold: u8,

    // --- Parking ---
    /// Leftward rotations that drive the carriage against the left stop
    pub park_left_rotations: f32,
    /// Rightward rotations back off the stop to the safe tilt location
    pub park_right_rotations: f32,
}

impl Default for PenConfig {
    fn default() -> Self {
        Self {
            // Motors
            default_motor_power: 30,
            max_speed: 100,

            // Geometry
            max_location: 285.0,
            units_per_rotation: 100.0,

            // Tilt
            raise_rotations: 2.5,
            prepare_rotations: 1.0,
            proximity_threshold: 5,

            // Parking
            park_left_rotations: 3.5,
            park_right_rotations: 1.0,
        }
    }
}

impl PenConfig {
    /// Location reached after parking against the left stop.
    pub fn park_location(&self) -> f32 {
        self.park_right_rotations * self.units_per_rotation
    }

    /// Location the homing run centres the carriage on.
    pub fn centre_location(&self) -> f32 {
        self.max_location / 2.0
    }

    /// Check every field.  Invalid values are rejected, not clamped.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !positive(self.max_location) {
            return Err(ConfigError::ValidationFailed("max_location must be > 0"));
        }
        if !positive(self.units_per_rotation) {
            return Err(ConfigError::ValidationFailed("units_per_rotation must be > 0"));
        }
        if self.max_speed == 0 || self.max_speed > 100 {
            return Err(ConfigError::ValidationFailed("max_speed must be 1-100"));
        }
        if self.default_motor_power == 0 || self.default_motor_power > self.max_speed {
            return Err(ConfigError::ValidationFailed("default_motor_power must be 1..=max_speed"));
        }
        if !positive(self.raise_rotations) || !positive(self.prepare_rotations) {
            return Err(ConfigError::ValidationFailed("tilt rotations must be > 0"));
        }
        if self.prepare_rotations >= self.raise_rotations {
            return Err(ConfigError::ValidationFailed(
                "prepare_rotations must be below raise_rotations",
            ));
        }
        if self.park_left_rotations * self.units_per_rotation < self.max_location {
            return Err(ConfigError::ValidationFailed(
                "park_left_rotations must reach the left stop",
            ));
        }
        let park = self.park_location();
        if !positive(self.park_right_rotations) || park > self.max_location {
            return Err(ConfigError::ValidationFailed(
                "park_right_rotations must stay within travel",
            ));
        }
        Ok(())
    }
}

/// Printer configuration: the pen plus the paper axis bound
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrinterConfig {
    pub pen: PenConfig,
    /// Furthest paper feed location (device units)
    pub max_paper_feed_location: f32,
}

impl Default for PrinterConfig {
    fn default() -> Self {
        Self {
            pen: PenConfig::default(),
            max_paper_feed_location: 325.0,
        }
    }
}

impl PrinterConfig {
    /// Parse a JSON document and validate it.  Missing fields take defaults.
    pub fn from_json(bytes: &[u8]) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_slice(bytes).map_err(|_| ConfigError::Malformed)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.pen.validate()?;
        if !positive(self.max_paper_feed_location) {
            return Err(ConfigError::ValidationFailed("max_paper_feed_location must be > 0"));
        }
        Ok(())
    }
}

fn positive(value: f32) -> bool {
    value.is_finite() && value > 0.0
}

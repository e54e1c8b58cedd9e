//! Robot geometry and raw encoder state

use crate::error::ConfigurationError;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Static wheel geometry of a differential-drive base
///
/// Only constructible through [`WheelGeometry::new`], so every instance in
/// circulation has a positive radius, base length and tick count.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WheelGeometry {
    radius: f64,
    base_length: f64,
    ticks_per_revolution: u32,
    max_wheel_speed: Option<f64>,
}

impl WheelGeometry {
    /// Create a validated geometry
    ///
    /// # Arguments
    /// * `radius` - Wheel radius in meters
    /// * `base_length` - Distance between the wheels in meters
    /// * `ticks_per_revolution` - Encoder ticks per full wheel turn
    pub fn new(
        radius: f64,
        base_length: f64,
        ticks_per_revolution: u32,
    ) -> Result<Self, ConfigurationError> {
        if !(radius.is_finite() && radius > 0.0) {
            return Err(ConfigurationError::InvalidRadius(radius));
        }
        if !(base_length.is_finite() && base_length > 0.0) {
            return Err(ConfigurationError::InvalidBaseLength(base_length));
        }
        if ticks_per_revolution == 0 {
            return Err(ConfigurationError::InvalidTicksPerRevolution);
        }

        Ok(WheelGeometry {
            radius,
            base_length,
            ticks_per_revolution,
            max_wheel_speed: None,
        })
    }

    /// Limit the wheel speed (rad/s) the simulated motors can reach
    ///
    /// Non-finite limits are ignored and leave the motors unlimited.
    pub fn with_max_wheel_speed(mut self, max_wheel_speed: f64) -> Self {
        self.max_wheel_speed = max_wheel_speed
            .is_finite()
            .then(|| max_wheel_speed.abs());
        self
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn base_length(&self) -> f64 {
        self.base_length
    }

    pub fn ticks_per_revolution(&self) -> u32 {
        self.ticks_per_revolution
    }

    pub fn max_wheel_speed(&self) -> Option<f64> {
        self.max_wheel_speed
    }

    /// Distance a wheel rolls per encoder tick
    pub fn meters_per_tick(&self) -> f64 {
        2.0 * PI * self.radius / self.ticks_per_revolution as f64
    }
}

/// Raw wheel encoder counts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EncoderState {
    pub left_ticks: i64,
    pub right_ticks: i64,
}

impl EncoderState {
    pub fn new(left_ticks: i64, right_ticks: i64) -> Self {
        EncoderState {
            left_ticks,
            right_ticks,
        }
    }
}

/// Everything the robot reports to its supervisor on one tick
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RobotState {
    pub wheels: EncoderState,
    /// Proximity sensor readings; passed through untouched
    #[serde(default)]
    pub proximity: Vec<f64>,
}

impl RobotState {
    pub fn from_ticks(left_ticks: i64, right_ticks: i64) -> Self {
        RobotState {
            wheels: EncoderState::new(left_ticks, right_ticks),
            proximity: Vec::new(),
        }
    }
}

//! Static robot configuration
//!
//! Loaded once from a TOML file when a robot and its supervisor are created.
//! Nothing in here can change while the supervisor runs.

use crate::common::{Pose, WheelGeometry};
use crate::error::ConfigurationError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Top-level robot configuration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct RobotConfig {
    pub wheels: WheelsConfig,
    #[serde(default)]
    pub initial_pose: Pose,
    pub supervisor: SupervisorConfig,
}

/// Wheel geometry as written in the file
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct WheelsConfig {
    /// Wheel radius in meters
    pub radius: f64,
    /// Distance between the wheels in meters
    pub base_length: f64,
    pub ticks_per_rev: u32,
    /// Motor limit in rad/s
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_velocity: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct SupervisorConfig {
    /// Name of the controller to start with
    pub controller: String,
    /// Control period in milliseconds
    pub tick_ms: u64,
}

impl RobotConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigurationError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .map_err(|e| ConfigurationError::Config(format!("{}: {}", path.display(), e)))?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Self, ConfigurationError> {
        let config: RobotConfig =
            toml::from_str(contents).map_err(|e| ConfigurationError::Config(e.to_string()))?;
        if config.supervisor.tick_ms == 0 {
            return Err(ConfigurationError::Config(
                "supervisor.tick_ms must be positive".to_string(),
            ));
        }
        Ok(config)
    }

    pub fn to_toml(&self) -> Result<String, ConfigurationError> {
        toml::to_string_pretty(self).map_err(|e| ConfigurationError::Config(e.to_string()))
    }

    /// Validated wheel geometry
    pub fn geometry(&self) -> Result<WheelGeometry, ConfigurationError> {
        let geometry = WheelGeometry::new(
            self.wheels.radius,
            self.wheels.base_length,
            self.wheels.ticks_per_rev,
        )?;
        Ok(match self.wheels.max_velocity {
            Some(max) => geometry.with_max_wheel_speed(max),
            None => geometry,
        })
    }

    /// Control period in seconds
    pub fn tick_seconds(&self) -> f64 {
        self.supervisor.tick_ms as f64 / 1000.0
    }

    /// Khepera III with the go-to-goal controller
    pub fn khepera3_defaults() -> Self {
        RobotConfig {
            wheels: WheelsConfig {
                radius: 0.021,
                base_length: 0.0885,
                ticks_per_rev: 2765,
                max_velocity: Some(2.0 * std::f64::consts::PI * 130.0 / 60.0),
            },
            initial_pose: Pose::origin(),
            supervisor: SupervisorConfig {
                controller: "GoToGoal".to_string(),
                tick_ms: 50,
            },
        }
    }
}

impl Default for RobotConfig {
    fn default() -> Self {
        Self::khepera3_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = RobotConfig::default();
        let geometry = config.geometry().unwrap();
        assert_eq!(geometry.ticks_per_revolution(), 2765);
        assert!(geometry.max_wheel_speed().is_some());
        assert_eq!(config.tick_seconds(), 0.05);
    }

    #[test]
    fn test_toml_round_trip() {
        let config = RobotConfig::khepera3_defaults();
        let text = config.to_toml().unwrap();
        assert_eq!(RobotConfig::from_toml(&text).unwrap(), config);
    }

    #[test]
    fn test_parse_minimal() {
        let config = RobotConfig::from_toml(
            r#"
            [wheels]
            radius = 0.02
            base_length = 0.1
            ticks_per_rev = 100

            [supervisor]
            controller = "Hold"
            tick_ms = 100
            "#,
        )
        .unwrap();
        assert_eq!(config.initial_pose, Pose::origin());
        assert_eq!(config.wheels.max_velocity, None);
        assert_eq!(config.supervisor.controller, "Hold");
    }

    #[test]
    fn test_bad_geometry_fails_at_construction() {
        let mut config = RobotConfig::default();
        config.wheels.base_length = 0.0;
        assert_eq!(
            config.geometry(),
            Err(ConfigurationError::InvalidBaseLength(0.0))
        );
    }

    #[test]
    fn test_zero_tick_period_rejected() {
        let mut config = RobotConfig::default();
        config.supervisor.tick_ms = 0;
        let text = config.to_toml().unwrap();
        assert!(RobotConfig::from_toml(&text).is_err());
    }
}

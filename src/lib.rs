//! Supervisor core for the Prometheus differential-drive simulator
//!
//! A [`Supervisor`] keeps a dead-reckoning pose estimate from wheel encoder
//! ticks, runs a [`Controller`](control::Controller) against a typed
//! [`ParameterTree`](params::ParameterTree) and converts the resulting
//! unicycle command into left and right wheel speeds.
pub mod common;
pub mod config;
pub mod control;
pub mod error;
pub mod params;
pub mod perception;
pub mod simulation;
pub mod supervisor;

pub use crate::common::{EncoderState, Pose, RobotState, WheelGeometry};
pub use crate::config::RobotConfig;
pub use crate::error::{ConfigurationError, SupervisorError, ValidationError};
pub use crate::supervisor::Supervisor;

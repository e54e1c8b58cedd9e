//! Per-robot supervisor
//!
//! One [`Supervisor`] runs per simulated robot. Each tick it integrates the
//! encoder readings into a pose estimate, runs the active controller against
//! a snapshot of its parameters and turns the resulting unicycle command into
//! wheel speeds. It never actuates anything itself; the caller applies the
//! returned speeds.
//!
//! A supervisor does no internal locking. Callers that share one between
//! tasks must put `execute`, `get_parameters` and `set_parameters` behind a
//! single mutex.

use crate::common::{Pose, RobotState, WheelGeometry};
use crate::control::{unicycle_to_wheels, Controller};
use crate::error::{ConfigurationError, Result, ValidationError};
use crate::params::{ParamPath, ParamRecord, ParameterTree};
use crate::perception::OdometryEstimator;
use log::{debug, info, warn};

/// Control loop of a single robot
#[derive(Debug)]
pub struct Supervisor {
    geometry: WheelGeometry,
    odometry: OdometryEstimator,
    parameters: ParameterTree,
    controller: Box<dyn Controller>,
}

impl Supervisor {
    /// Create a supervisor running `controller` with its default parameters
    ///
    /// # Arguments
    /// * `geometry` - Wheel geometry of the robot
    /// * `initial_pose` - Where the robot starts
    /// * `initial_state` - Robot state read at start, seeds the encoder memory
    /// * `controller` - Controller to run
    pub fn new(
        geometry: WheelGeometry,
        initial_pose: Pose,
        initial_state: &RobotState,
        controller: Box<dyn Controller>,
    ) -> Result<Self, ConfigurationError> {
        let parameters = controller.default_parameters()?;
        info!(
            "Supervisor created with controller {} at ({:.3}, {:.3}, {:.3})",
            controller.name(),
            initial_pose.x,
            initial_pose.y,
            initial_pose.theta
        );

        Ok(Supervisor {
            geometry,
            odometry: OdometryEstimator::new(initial_pose, initial_state.wheels),
            parameters,
            controller,
        })
    }

    /// Run one control tick
    ///
    /// # Arguments
    /// * `robot_state` - Current encoder counts and sensor readings
    /// * `dt` - Seconds since the previous tick
    ///
    /// # Returns
    /// Left and right wheel speeds in rad/s. When `dt` is zero the pose is
    /// still updated but no control is applied and `(0.0, 0.0)` is returned.
    pub fn execute(&mut self, robot_state: &RobotState, dt: f64) -> Result<(f64, f64)> {
        if !(dt.is_finite() && dt >= 0.0) {
            return Err(ValidationError::new(
                ParamPath::from("dt"),
                format!("time step must be finite and non-negative, got {dt}"),
            )
            .into());
        }

        let pose = self.odometry.update(
            robot_state.wheels.left_ticks,
            robot_state.wheels.right_ticks,
            &self.geometry,
        );

        if dt == 0.0 {
            return Ok((0.0, 0.0));
        }

        let (v, w) = self
            .controller
            .compute(&pose, dt, &self.parameters.get_snapshot())?;
        let (vl, vr) = unicycle_to_wheels(v, w, &self.geometry);

        debug!(
            "Tick dt={:.3}: pose=({:.3}, {:.3}, {:.3}) uni=({:.3}, {:.3}) wheels=({:.3}, {:.3})",
            dt, pose.x, pose.y, pose.theta, v, w, vl, vr
        );

        Ok((vl, vr))
    }

    /// Snapshot of the active controller's parameters
    pub fn get_parameters(&self) -> ParamRecord {
        self.parameters.get_snapshot()
    }

    /// Replace parameter values; all or nothing
    pub fn set_parameters(&mut self, record: &ParamRecord) -> Result<(), ValidationError> {
        self.parameters.set_record(record).map_err(|e| {
            warn!("Rejected parameters for {}: {}", self.controller.name(), e);
            e
        })
    }

    /// Read-only view of the parameter tree, for renderers
    pub fn describe_parameters(&self) -> &ParameterTree {
        &self.parameters
    }

    /// Switch to another controller
    ///
    /// With `parameters` given, the tree must have the controller's expected
    /// shape; otherwise the controller's defaults are installed. On error the
    /// supervisor keeps its current controller and parameters.
    pub fn select_controller(
        &mut self,
        mut controller: Box<dyn Controller>,
        parameters: Option<ParameterTree>,
    ) -> Result<(), ConfigurationError> {
        let template = controller.default_parameters()?;
        let parameters = match parameters {
            Some(tree) if tree.matches_schema(&template) => tree,
            Some(_) => {
                return Err(ConfigurationError::SchemaMismatch {
                    controller: controller.name().to_string(),
                })
            }
            None => template,
        };

        controller.reset();
        info!(
            "Switching controller {} -> {}",
            self.controller.name(),
            controller.name()
        );
        self.controller = controller;
        self.parameters = parameters;
        Ok(())
    }

    pub fn controller_name(&self) -> &str {
        self.controller.name()
    }

    /// Current dead-reckoning pose estimate
    pub fn pose_estimate(&self) -> Pose {
        self.odometry.pose()
    }

    pub fn geometry(&self) -> &WheelGeometry {
        &self.geometry
    }
}

//! PID go-to-goal controller

use super::{required, Controller};
use crate::common::{normalize_angle, Pose};
use crate::error::{ConfigurationError, ValidationError};
use crate::params::{ParamRecord, ParameterNode, ParameterTree};
use log::debug;

/// Distance at which the goal counts as reached
const DEFAULT_GOAL_TOLERANCE: f64 = 0.02;

/// Steers toward a goal point at constant speed
///
/// The angular velocity comes from a PID loop on the heading error. The
/// pose heading itself may be unwrapped; only the error is wrapped to
/// [-pi, pi].
#[derive(Debug, Clone)]
pub struct GoToGoal {
    goal_tolerance: f64,
    integral: f64,
    previous_error: Option<f64>,
}

impl GoToGoal {
    pub fn new() -> Self {
        GoToGoal {
            goal_tolerance: DEFAULT_GOAL_TOLERANCE,
            integral: 0.0,
            previous_error: None,
        }
    }

    /// Stop within `tolerance` meters of the goal instead of the default
    pub fn with_goal_tolerance(mut self, tolerance: f64) -> Self {
        self.goal_tolerance = tolerance.abs();
        self
    }
}

impl Default for GoToGoal {
    fn default() -> Self {
        Self::new()
    }
}

impl Controller for GoToGoal {
    fn name(&self) -> &str {
        "GoToGoal"
    }

    fn default_parameters(&self) -> Result<ParameterTree, ConfigurationError> {
        ParameterTree::builder()
            .group("goal", |g| {
                g.leaf("x", ParameterNode::float(-5.0, -1000.0, 1000.0, 0.5))
                    .leaf("y", ParameterNode::float(5.0, -1000.0, 1000.0, 0.5))
            })
            .group("velocity", |g| {
                g.leaf("v", ParameterNode::float(2.0, 0.0, 100.0, 0.1))
            })
            .group("gains", |g| {
                g.labelled("kp", "Proportional gain", ParameterNode::float(1.0, 0.0, 100.0, 0.01))
                    .labelled("ki", "Integral gain", ParameterNode::float(0.1, 0.0, 100.0, 0.01))
                    .labelled("kd", "Differential gain", ParameterNode::float(0.0, 0.0, 100.0, 0.01))
            })
            .build()
    }

    fn compute(
        &mut self,
        pose: &Pose,
        dt: f64,
        params: &ParamRecord,
    ) -> Result<(f64, f64), ValidationError> {
        let goal = Pose::new(required(params, "goal.x")?, required(params, "goal.y")?, 0.0);
        let v = required(params, "velocity.v")?;
        let kp = required(params, "gains.kp")?;
        let ki = required(params, "gains.ki")?;
        let kd = required(params, "gains.kd")?;

        let distance = pose.distance_to(&goal);
        if distance < self.goal_tolerance {
            debug!("Goal reached at distance {:.4}", distance);
            self.reset();
            return Ok((0.0, 0.0));
        }

        let heading_to_goal = (goal.y - pose.y).atan2(goal.x - pose.x);
        let error = normalize_angle(heading_to_goal - pose.theta);

        self.integral += error * dt;
        let derivative = match self.previous_error {
            Some(previous) if dt > 0.0 => (error - previous) / dt,
            _ => 0.0,
        };
        self.previous_error = Some(error);

        let w = kp * error + ki * self.integral + kd * derivative;
        Ok((v, w))
    }

    fn reset(&mut self) {
        self.integral = 0.0;
        self.previous_error = None;
    }
}

//! Dead-reckoning localization from wheel encoders

use crate::common::{EncoderState, Pose, WheelGeometry};
use log::trace;

/// Odometry estimator for a differential-drive robot
///
/// Integrates encoder tick deltas into a pose using the midpoint heading of
/// each step. The heading accumulates without wrapping. Encoder wraparound
/// is not handled; counters are assumed to only move by the real tick delta.
#[derive(Debug, Clone)]
pub struct OdometryEstimator {
    pose: Pose,
    previous_ticks: EncoderState,
}

impl OdometryEstimator {
    /// Create a new estimator
    ///
    /// # Arguments
    /// * `initial_pose` - Pose of the robot when `initial_ticks` were read
    /// * `initial_ticks` - Encoder counts at the same instant
    pub fn new(initial_pose: Pose, initial_ticks: EncoderState) -> Self {
        OdometryEstimator {
            pose: initial_pose,
            previous_ticks: initial_ticks,
        }
    }

    /// Update the pose estimate with new encoder counts
    pub fn update(&mut self, left_ticks: i64, right_ticks: i64, geometry: &WheelGeometry) -> Pose {
        let dtl = left_ticks - self.previous_ticks.left_ticks;
        let dtr = right_ticks - self.previous_ticks.right_ticks;
        self.previous_ticks = EncoderState::new(left_ticks, right_ticks);

        if dtl == 0 && dtr == 0 {
            return self.pose;
        }

        let meters_per_tick = geometry.meters_per_tick();
        let dl = dtl as f64 * meters_per_tick;
        let dr = dtr as f64 * meters_per_tick;

        let dtheta = (dr - dl) / geometry.base_length();
        let theta_mid = self.pose.theta + dtheta / 2.0;
        let distance = (dr + dl) / 2.0;

        self.pose = Pose::new(
            self.pose.x + distance * theta_mid.cos(),
            self.pose.y + distance * theta_mid.sin(),
            self.pose.theta + dtheta,
        );
        trace!(
            "Odometry: dtl={} dtr={} -> ({:.4}, {:.4}, {:.4})",
            dtl,
            dtr,
            self.pose.x,
            self.pose.y,
            self.pose.theta
        );

        self.pose
    }

    /// Get the current pose estimate
    pub fn pose(&self) -> Pose {
        self.pose
    }

    pub fn previous_ticks(&self) -> EncoderState {
        self.previous_ticks
    }

    /// Restart integration from a known pose and tick reading
    pub fn reset(&mut self, pose: Pose, ticks: EncoderState) {
        self.pose = pose;
        self.previous_ticks = ticks;
    }
}

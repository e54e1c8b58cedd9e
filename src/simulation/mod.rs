//! Simulated differential-drive robot
//!
//! Plays the part of the robot/motor interface: it takes the wheel speeds a
//! supervisor returns, moves the true pose and produces the encoder counts
//! the supervisor reads back on the next tick.

use crate::common::{Pose, RobotState, WheelGeometry};
use std::f64::consts::PI;

/// Ground-truth model of a two-wheeled robot
#[derive(Debug, Clone)]
pub struct SimulatedRobot {
    geometry: WheelGeometry,
    pose: Pose,
    wheel_speeds: (f64, f64),
    // Fractional ticks; reported counts are floored
    left_ticks: f64,
    right_ticks: f64,
}

impl SimulatedRobot {
    pub fn new(geometry: WheelGeometry, pose: Pose) -> Self {
        SimulatedRobot {
            geometry,
            pose,
            wheel_speeds: (0.0, 0.0),
            left_ticks: 0.0,
            right_ticks: 0.0,
        }
    }

    /// Command wheel angular velocities in rad/s, clamped to the motor limit
    pub fn set_wheel_speeds(&mut self, vl: f64, vr: f64) {
        let clamp = |speed: f64| match self.geometry.max_wheel_speed() {
            Some(max) => speed.clamp(-max, max),
            None => speed,
        };
        self.wheel_speeds = (clamp(vl), clamp(vr));
    }

    pub fn wheel_speeds(&self) -> (f64, f64) {
        self.wheel_speeds
    }

    /// Advance the simulation by `dt` seconds
    pub fn step(&mut self, dt: f64) {
        if dt <= 0.0 {
            return;
        }

        let (vl, vr) = self.wheel_speeds;
        let r = self.geometry.radius();
        let ticks_per_radian = self.geometry.ticks_per_revolution() as f64 / (2.0 * PI);
        self.left_ticks += vl * dt * ticks_per_radian;
        self.right_ticks += vr * dt * ticks_per_radian;

        let dl = vl * r * dt;
        let dr = vr * r * dt;
        let dtheta = (dr - dl) / self.geometry.base_length();
        let theta_mid = self.pose.theta + dtheta / 2.0;
        let distance = (dr + dl) / 2.0;

        self.pose = Pose::new(
            self.pose.x + distance * theta_mid.cos(),
            self.pose.y + distance * theta_mid.sin(),
            self.pose.theta + dtheta,
        );
    }

    /// Ground-truth pose
    pub fn pose(&self) -> Pose {
        self.pose
    }

    /// What the robot reports to its supervisor
    pub fn robot_state(&self) -> RobotState {
        RobotState::from_ticks(self.left_ticks.floor() as i64, self.right_ticks.floor() as i64)
    }
}

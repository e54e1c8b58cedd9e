//! 2D pose of a rigid body

use nalgebra::{Rotation2, Vector2};
use serde::{Deserialize, Serialize};

/// Position and heading in the plane
///
/// The heading accumulates without wrapping; use
/// [`normalize_angle`](super::normalize_angle) before comparing headings.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Pose {
    pub x: f64,
    pub y: f64,
    pub theta: f64,
}

impl Pose {
    pub fn new(x: f64, y: f64, theta: f64) -> Self {
        Pose { x, y, theta }
    }

    pub fn origin() -> Self {
        Pose::default()
    }

    /// Express `other`, given in this pose's frame, in the frame this pose lives in
    ///
    /// A sensor mounted at `sensor` on a chassis sitting at `chassis` in the
    /// world is at `chassis.compose(sensor)` in world coordinates.
    pub fn compose(self, other: Pose) -> Pose {
        let offset = Rotation2::new(self.theta) * Vector2::new(other.x, other.y);
        Pose {
            x: self.x + offset.x,
            y: self.y + offset.y,
            theta: self.theta + other.theta,
        }
    }

    /// Euclidean distance between the positions of two poses
    pub fn distance_to(&self, other: &Pose) -> f64 {
        (Vector2::new(other.x, other.y) - Vector2::new(self.x, self.y)).norm()
    }

    pub fn position(&self) -> Vector2<f64> {
        Vector2::new(self.x, self.y)
    }
}

impl From<(f64, f64, f64)> for Pose {
    fn from((x, y, theta): (f64, f64, f64)) -> Self {
        Pose { x, y, theta }
    }
}

impl From<Pose> for (f64, f64, f64) {
    fn from(pose: Pose) -> Self {
        (pose.x, pose.y, pose.theta)
    }
}

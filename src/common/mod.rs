//! Common types shared across the supervisor
pub mod geometry;
pub mod pose;

pub use self::geometry::{EncoderState, RobotState, WheelGeometry};
pub use self::pose::Pose;

/// Wrap an angle to [-pi, pi]
pub fn normalize_angle(angle: f64) -> f64 {
    // atan2 keeps the result exact for any number of full turns
    angle.sin().atan2(angle.cos())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::PI;

    #[test]
    fn test_normalize_angle() {
        assert_relative_eq!(normalize_angle(0.5), 0.5, epsilon = 1e-12);
        assert_relative_eq!(normalize_angle(2.0 * PI + 0.5), 0.5, epsilon = 1e-12);
        assert_relative_eq!(normalize_angle(-7.0 * PI / 2.0), PI / 2.0, epsilon = 1e-12);
    }
}

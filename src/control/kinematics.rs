//! Differential-drive kinematics
//!
//! Wheel speeds are wheel angular velocities in rad/s; multiply by the wheel
//! radius for the rim speed.

use crate::common::WheelGeometry;

/// Convert a unicycle command into left and right wheel speeds
///
/// # Arguments
/// * `v` - Linear velocity in m/s
/// * `w` - Angular velocity in rad/s
/// * `geometry` - Wheel radius and base length
///
/// # Returns
/// `(vl, vr)` wheel angular velocities
pub fn unicycle_to_wheels(v: f64, w: f64, geometry: &WheelGeometry) -> (f64, f64) {
    let r = geometry.radius();
    let l = geometry.base_length();

    let vr = (l * w + 2.0 * v) / (2.0 * r);
    let vl = vr - l * w / r;
    (vl, vr)
}

/// Convert wheel speeds back into the unicycle command they realize
pub fn wheels_to_unicycle(vl: f64, vr: f64, geometry: &WheelGeometry) -> (f64, f64) {
    let r = geometry.radius();
    let l = geometry.base_length();

    let v = r * (vr + vl) / 2.0;
    let w = r * (vr - vl) / l;
    (v, w)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn geometry() -> WheelGeometry {
        WheelGeometry::new(0.02, 0.1, 100).unwrap()
    }

    #[test]
    fn test_straight_line_gives_equal_wheels() {
        for v in [-1.5, 0.0, 0.3, 2.0] {
            let (vl, vr) = unicycle_to_wheels(v, 0.0, &geometry());
            assert_eq!(vl, vr);
            assert_relative_eq!(vr, v / 0.02, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_spin_in_place() {
        let (vl, vr) = unicycle_to_wheels(0.0, 1.0, &geometry());
        // vr = L*w / 2R = 2.5, vl = vr - L*w/R = -2.5
        assert_relative_eq!(vr, 2.5, epsilon = 1e-12);
        assert_relative_eq!(vl, -2.5, epsilon = 1e-12);
    }

    #[test]
    fn test_matches_textbook_form() {
        let g = geometry();
        let (v, w) = (0.4, -0.7);
        let (vl, vr) = unicycle_to_wheels(v, w, &g);
        let (r, l) = (g.radius(), g.base_length());
        assert_relative_eq!(vr, (2.0 * v + w * l) / (2.0 * r), epsilon = 1e-12);
        assert_relative_eq!(vl, (2.0 * v - w * l) / (2.0 * r), epsilon = 1e-12);
    }

    #[test]
    fn test_forward_kinematics_inverts() {
        let g = geometry();
        let (vl, vr) = unicycle_to_wheels(0.25, 1.2, &g);
        let (v, w) = wheels_to_unicycle(vl, vr, &g);
        assert_relative_eq!(v, 0.25, epsilon = 1e-12);
        assert_relative_eq!(w, 1.2, epsilon = 1e-12);
    }

    #[test]
    fn test_zero_command() {
        assert_eq!(unicycle_to_wheels(0.0, 0.0, &geometry()), (0.0, 0.0));
    }
}

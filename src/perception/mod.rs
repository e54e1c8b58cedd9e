//! Perception module: pose estimation from the robot's internal sensors
pub mod localization;

pub use self::localization::OdometryEstimator;

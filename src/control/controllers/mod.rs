//! Controllers the supervisor can run
//!
//! Each controller is paired with the parameter template it consumes; the
//! supervisor only ever runs a controller against a tree of that shape.

use crate::common::Pose;
use crate::error::{ConfigurationError, ValidationError};
use crate::params::{ParamPath, ParamRecord, ParameterTree};
use std::fmt::Debug;

pub mod go_to_goal;
pub mod hold;

pub use go_to_goal::GoToGoal;
pub use hold::Hold;

/// Trait for unicycle controllers
pub trait Controller: Debug + Send {
    /// Get the name of this controller
    fn name(&self) -> &str;

    /// The parameter template this controller expects
    fn default_parameters(&self) -> Result<ParameterTree, ConfigurationError>;

    /// Compute a unicycle command `(v, w)` for the current pose estimate
    fn compute(
        &mut self,
        pose: &Pose,
        dt: f64,
        params: &ParamRecord,
    ) -> Result<(f64, f64), ValidationError>;

    /// Forget any state accumulated across ticks
    fn reset(&mut self) {}
}

/// Create a controller from its name
pub fn controller_by_name(name: &str) -> Result<Box<dyn Controller>, ConfigurationError> {
    match name {
        "GoToGoal" | "pid" => Ok(Box::new(GoToGoal::new())),
        "Hold" | "hold" => Ok(Box::new(Hold::new())),
        other => Err(ConfigurationError::UnknownController(other.to_string())),
    }
}

/// Read a numeric parameter a controller cannot run without
pub(crate) fn required(params: &ParamRecord, path: &str) -> Result<f64, ValidationError> {
    params
        .get_f64(path)
        .ok_or_else(|| ValidationError::new(ParamPath::from(path), "missing numeric parameter"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_controller_by_name() {
        assert_eq!(controller_by_name("GoToGoal").unwrap().name(), "GoToGoal");
        assert_eq!(controller_by_name("pid").unwrap().name(), "GoToGoal");
        assert_eq!(controller_by_name("Hold").unwrap().name(), "Hold");
        assert_eq!(
            controller_by_name("Wander").unwrap_err(),
            ConfigurationError::UnknownController("Wander".to_string())
        );
    }

    #[test]
    fn test_required() {
        let params = ParamRecord::new().with("gains", ParamRecord::new().with("kp", 2.0));
        assert_eq!(required(&params, "gains.kp"), Ok(2.0));
        assert_eq!(
            required(&params, "gains.ki").unwrap_err().path,
            ParamPath::from("gains.ki")
        );
    }
}

//! Controller that keeps the robot still

use super::Controller;
use crate::common::Pose;
use crate::error::{ConfigurationError, ValidationError};
use crate::params::{ParamRecord, ParameterTree};

/// Always commands zero velocity; takes no parameters
#[derive(Debug, Clone, Default)]
pub struct Hold;

impl Hold {
    pub fn new() -> Self {
        Hold
    }
}

impl Controller for Hold {
    fn name(&self) -> &str {
        "Hold"
    }

    fn default_parameters(&self) -> Result<ParameterTree, ConfigurationError> {
        Ok(ParameterTree::empty())
    }

    fn compute(
        &mut self,
        _pose: &Pose,
        _dt: f64,
        _params: &ParamRecord,
    ) -> Result<(f64, f64), ValidationError> {
        Ok((0.0, 0.0))
    }
}

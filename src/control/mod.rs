//! Control module for the supervisor
pub mod controllers;
pub mod kinematics;

pub use self::controllers::{controller_by_name, Controller, GoToGoal, Hold};
pub use self::kinematics::{unicycle_to_wheels, wheels_to_unicycle};

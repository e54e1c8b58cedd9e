//! Error types for the Prometheus supervisor

use crate::params::ParamPath;

/// A parameter update or per-tick input was rejected
///
/// Always recoverable: the operation that returned it left every piece of
/// supervisor state exactly as it was.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("invalid value for '{path}': {reason}")]
pub struct ValidationError {
    /// Offending key path
    pub path: ParamPath,
    /// Human readable explanation
    pub reason: String,
}

impl ValidationError {
    pub fn new(path: ParamPath, reason: impl Into<String>) -> Self {
        ValidationError {
            path,
            reason: reason.into(),
        }
    }
}

/// The supervisor cannot be built or reconfigured as requested
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigurationError {
    #[error("wheel radius must be positive, got {0}")]
    InvalidRadius(f64),

    #[error("wheel base length must be positive, got {0}")]
    InvalidBaseLength(f64),

    #[error("ticks per revolution must be positive")]
    InvalidTicksPerRevolution,

    #[error("controller '{controller}' does not accept the supplied parameter tree")]
    SchemaMismatch { controller: String },

    #[error("unknown controller '{0}'")]
    UnknownController(String),

    #[error("duplicate parameter name '{0}'")]
    DuplicateName(String),

    #[error("invalid default for parameter '{path}': {reason}")]
    InvalidDefault { path: ParamPath, reason: String },

    #[error("failed to load robot configuration: {0}")]
    Config(String),
}

/// Anything a supervisor tick can fail with
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SupervisorError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
}

pub type Result<T, E = SupervisorError> = std::result::Result<T, E>;

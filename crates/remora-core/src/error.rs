use thiserror::Error;

use crate::types::{BodyHandle, RevoluteHandle, SixDofHandle};

/// Top-level error type for the remora toolkit.
#[derive(Debug, Error)]
pub enum RemoraError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Actuator error: {0}")]
    Actuator(#[from] ActuatorError),
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid timestep: {0} (must be > 0)")]
    InvalidTimestep(f64),

    #[error("Invalid fluid density: {0} (must be > 0)")]
    InvalidFluidDensity(f32),

    #[error("buoyancy_substeps must be >= 1")]
    InvalidSubsteps,

    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },
}

/// Actuator initialization and construction errors.
///
/// Runtime application never errors: a handle whose referent is gone makes
/// `apply` a no-op, and degenerate numeric inputs yield zero force.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActuatorError {
    #[error("armature resistance must be non-zero")]
    ZeroArmatureResistance,

    #[error("body {0:?} is not present in the world")]
    BodyNotFound(BodyHandle),

    #[error("revolute joint {0:?} is not present in the world")]
    RevoluteNotFound(RevoluteHandle),

    #[error("six-DoF joint {0:?} is not present in the world")]
    SixDofNotFound(SixDofHandle),

    #[error("unknown actuator kind: {0}")]
    UnknownKind(String),

    #[error("invalid {kind} configuration: {message}")]
    InvalidConfig {
        kind: &'static str,
        message: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remora_error_from_config_error() {
        let err = ConfigError::InvalidTimestep(-0.5);
        let top: RemoraError = err.into();
        assert!(matches!(top, RemoraError::Config(_)));
        assert!(top.to_string().contains("-0.5"));
    }

    #[test]
    fn remora_error_from_actuator_error() {
        let err = ActuatorError::ZeroArmatureResistance;
        let top: RemoraError = err.into();
        assert!(matches!(top, RemoraError::Actuator(_)));
    }

    #[test]
    fn config_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: ConfigError = io_err.into();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn actuator_error_display_messages() {
        assert_eq!(
            ActuatorError::ZeroArmatureResistance.to_string(),
            "armature resistance must be non-zero"
        );
        assert_eq!(
            ActuatorError::BodyNotFound(BodyHandle(3)).to_string(),
            "body BodyHandle(3) is not present in the world"
        );
        assert_eq!(
            ActuatorError::UnknownKind("jet".into()).to_string(),
            "unknown actuator kind: jet"
        );
        assert_eq!(
            ActuatorError::InvalidConfig {
                kind: "spring",
                message: "body_a == body_b".into()
            }
            .to_string(),
            "invalid spring configuration: body_a == body_b"
        );
    }

    #[test]
    fn config_error_display_messages() {
        assert_eq!(
            ConfigError::InvalidTimestep(0.0).to_string(),
            "Invalid timestep: 0 (must be > 0)"
        );
        assert_eq!(
            ConfigError::InvalidSubsteps.to_string(),
            "buoyancy_substeps must be >= 1"
        );
        assert_eq!(
            ConfigError::InvalidValue {
                field: "gravity".into(),
                message: "must be finite".into()
            }
            .to_string(),
            "Invalid value for gravity: must be finite"
        );
    }

    #[test]
    fn actuator_error_is_clone_and_eq() {
        let err = ActuatorError::BodyNotFound(BodyHandle(1));
        assert_eq!(err.clone(), err);
    }
}

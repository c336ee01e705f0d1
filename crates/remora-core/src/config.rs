//! Environment configuration shared by the actuator models.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Standard gravitational acceleration (m/s²).
pub const STANDARD_GRAVITY: f32 = 9.81;

/// Density of fresh water at 20 °C (kg/m³).
pub const WATER_DENSITY: f32 = 998.29;

// ---------------------------------------------------------------------------
// Serde default functions
// ---------------------------------------------------------------------------

const fn default_timestep() -> f64 {
    0.01
}
const fn default_gravity() -> f32 {
    STANDARD_GRAVITY
}
const fn default_fluid_density() -> f32 {
    WATER_DENSITY
}
const fn default_buoyancy_substeps() -> u32 {
    10
}

// ---------------------------------------------------------------------------
// EnvConfig
// ---------------------------------------------------------------------------

/// Simulation environment parameters consumed by the actuator models.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnvConfig {
    /// Simulation timestep in seconds (default: 0.01 = 100 Hz).
    #[serde(default = "default_timestep")]
    pub timestep: f64,

    /// Gravitational acceleration magnitude in m/s², acting along world -Y.
    #[serde(default = "default_gravity")]
    pub gravity: f32,

    /// Ambient fluid density in kg/m³ (default: fresh water).
    #[serde(default = "default_fluid_density")]
    pub fluid_density: f32,

    /// Vertical sample count for the iterative buoyancy estimator.
    #[serde(default = "default_buoyancy_substeps")]
    pub buoyancy_substeps: u32,
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self {
            timestep: default_timestep(),
            gravity: default_gravity(),
            fluid_density: default_fluid_density(),
            buoyancy_substeps: default_buoyancy_substeps(),
        }
    }
}

impl EnvConfig {
    /// Validate configuration.  Returns `Err` on invalid values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.timestep <= 0.0 {
            return Err(ConfigError::InvalidTimestep(self.timestep));
        }
        if self.fluid_density <= 0.0 {
            return Err(ConfigError::InvalidFluidDensity(self.fluid_density));
        }
        if self.buoyancy_substeps == 0 {
            return Err(ConfigError::InvalidSubsteps);
        }
        if !self.gravity.is_finite() {
            return Err(ConfigError::InvalidValue {
                field: "gravity".into(),
                message: "must be finite".into(),
            });
        }
        Ok(())
    }

    /// Simulation rate in Hz.
    #[must_use]
    pub fn rate_hz(&self) -> f64 {
        1.0 / self.timestep
    }

    /// Load from a TOML file.
    pub fn from_file(path: impl AsRef<std::path::Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = EnvConfig::default();
        assert!(config.validate().is_ok());
        assert!((config.fluid_density - WATER_DENSITY).abs() < f32::EPSILON);
        assert_eq!(config.buoyancy_substeps, 10);
    }

    #[test]
    fn rate_hz_inverts_timestep() {
        let config = EnvConfig {
            timestep: 0.02,
            ..EnvConfig::default()
        };
        assert!((config.rate_hz() - 50.0).abs() < 1e-9);
    }

    #[test]
    fn zero_timestep_rejected() {
        let config = EnvConfig {
            timestep: 0.0,
            ..EnvConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidTimestep(_))
        ));
    }

    #[test]
    fn negative_density_rejected() {
        let config = EnvConfig {
            fluid_density: -1.0,
            ..EnvConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidFluidDensity(_))
        ));
    }

    #[test]
    fn zero_substeps_rejected() {
        let config = EnvConfig {
            buoyancy_substeps: 0,
            ..EnvConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::InvalidSubsteps)));
    }

    #[test]
    fn nonfinite_gravity_rejected() {
        let config = EnvConfig {
            gravity: f32::NAN,
            ..EnvConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { .. })
        ));
    }

    #[test]
    fn parses_partial_toml_with_defaults() {
        let config: EnvConfig = toml::from_str("timestep = 0.005").unwrap();
        assert!((config.timestep - 0.005).abs() < 1e-12);
        assert!((config.gravity - STANDARD_GRAVITY).abs() < f32::EPSILON);
        assert_eq!(config.buoyancy_substeps, 10);
    }

    #[test]
    fn serialize_roundtrip() {
        let config = EnvConfig {
            timestep: 0.002,
            gravity: 9.8,
            fluid_density: 1025.0,
            buoyancy_substeps: 16,
        };
        let json = serde_json::to_string(&config).unwrap();
        let config2: EnvConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, config2);
    }
}

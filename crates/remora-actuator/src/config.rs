//! Serde-backed actuator configuration.
//!
//! A [`RigConfig`] is a TOML-loadable list of actuator descriptors, each
//! tagged with its kind identifier; the
//! [`ActuatorRegistry`](crate::registry::ActuatorRegistry) turns descriptors
//! into live actuators against a concrete world.

use serde::{Deserialize, Serialize};

use remora_core::config::{STANDARD_GRAVITY, WATER_DENSITY};
use remora_core::error::ConfigError;
use remora_core::types::SpringDesc;

use crate::hydro::LiftCoefficients;
use crate::kind;

// ---------------------------------------------------------------------------
// Serde default functions
// ---------------------------------------------------------------------------

const fn default_density() -> f32 {
    WATER_DENSITY
}
const fn default_gravity() -> f32 {
    STANDARD_GRAVITY
}
const fn default_substeps() -> u32 {
    10
}

// ---------------------------------------------------------------------------
// DragConfig
// ---------------------------------------------------------------------------

/// Parameters of a drag model attached to a buoyancy actuator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DragConfig {
    /// Frontal area (m²).
    pub area: f32,
    /// Drag coefficient.
    pub drag_coefficient: f32,
    /// Fluid density (kg/m³).
    #[serde(default = "default_density")]
    pub density: f32,
}

// ---------------------------------------------------------------------------
// ActuatorConfig
// ---------------------------------------------------------------------------

/// One actuator descriptor, tagged by kind.
///
/// Handles are raw indices into the target world; points and axes are world
/// coordinates at attach time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ActuatorConfig {
    Force {
        body: u32,
        point: [f32; 3],
        axis: [f32; 3],
        #[serde(default)]
        force: f32,
    },
    Impulse {
        body: u32,
        point: [f32; 3],
        axis: [f32; 3],
        #[serde(default)]
        impulse: f32,
    },
    DcMotor {
        joint: u32,
        torque_constant: f32,
        back_emf_constant: f32,
        armature_resistance: f32,
    },
    Propeller {
        body: u32,
        point: [f32; 3],
        axis: [f32; 3],
        lumped_gain: f32,
        #[serde(default)]
        voltage: f32,
    },
    Hydrofoil {
        body: u32,
        point: [f32; 3],
        orientation_axis: [f32; 3],
        lift_axis: [f32; 3],
        area: f32,
        lift: LiftCoefficients,
        #[serde(default = "default_density")]
        density: f32,
    },
    LiquidDrag {
        body: u32,
        area: f32,
        drag_coefficient: f32,
        #[serde(default = "default_density")]
        density: f32,
    },
    Spring {
        body_a: u32,
        body_b: u32,
        #[serde(default)]
        target: f32,
        spring_coefficient: f32,
        #[serde(default)]
        damper_coefficient: f32,
    },
    LinkSpring {
        joint: u32,
        #[serde(default)]
        linear: [Option<SpringDesc>; 3],
        #[serde(default)]
        angular: [Option<SpringDesc>; 3],
    },
    Buoyancy {
        body: u32,
        half_extents: [f32; 3],
        #[serde(default)]
        center: [f32; 3],
        #[serde(default = "default_density")]
        density: f32,
        #[serde(default = "default_gravity")]
        gravity: f32,
        #[serde(default = "default_substeps")]
        substeps: u32,
        #[serde(default)]
        drag: Option<DragConfig>,
    },
}

impl ActuatorConfig {
    /// The kind identifier this descriptor builds (see [`crate::kind`]).
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Force { .. } => kind::FORCE,
            Self::Impulse { .. } => kind::IMPULSE,
            Self::DcMotor { .. } => kind::DC_MOTOR,
            Self::Propeller { .. } => kind::PROPELLER,
            Self::Hydrofoil { .. } => kind::HYDROFOIL,
            Self::LiquidDrag { .. } => kind::LIQUID_DRAG,
            Self::Spring { .. } => kind::SPRING,
            Self::LinkSpring { .. } => kind::LINK_SPRING,
            Self::Buoyancy { .. } => kind::BUOYANCY,
        }
    }
}

// ---------------------------------------------------------------------------
// RigConfig
// ---------------------------------------------------------------------------

/// A full actuator rig description.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RigConfig {
    /// Actuators in application order.
    #[serde(default)]
    pub actuators: Vec<ActuatorConfig>,
}

impl RigConfig {
    /// Load from a TOML file.
    pub fn from_file(path: impl AsRef<std::path::Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

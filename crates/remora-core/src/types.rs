//! Handles and shared value types.
//!
//! Actuators never hold references into the backend.  They store plain index
//! handles and resolve them through [`PhysicsWorld`](crate::traits::PhysicsWorld)
//! on every tick; a handle whose referent is gone resolves to `None` and the
//! actuator degrades to a no-op.  Handles do not extend the referent's
//! lifetime in any way.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Handles
// ---------------------------------------------------------------------------

/// Handle to a rigid body owned by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BodyHandle(pub u32);

/// Handle to a revolute (single-axis rotary) joint owned by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RevoluteHandle(pub u32);

/// Handle to a six-degree-of-freedom joint owned by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SixDofHandle(pub u32);

// ---------------------------------------------------------------------------
// Axis / JointDof
// ---------------------------------------------------------------------------

/// A principal axis of a joint frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    /// All three axes in order.
    pub const ALL: [Self; 3] = [Self::X, Self::Y, Self::Z];

    /// Index of the axis (X = 0, Y = 1, Z = 2).
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::X => 0,
            Self::Y => 1,
            Self::Z => 2,
        }
    }
}

/// One degree of freedom of a six-DoF joint: three linear, three angular.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum JointDof {
    /// Translation along an axis (m).
    Linear(Axis),
    /// Rotation about an axis (rad).
    Angular(Axis),
}

impl JointDof {
    /// All six degrees of freedom, linear first.
    pub const ALL: [Self; 6] = [
        Self::Linear(Axis::X),
        Self::Linear(Axis::Y),
        Self::Linear(Axis::Z),
        Self::Angular(Axis::X),
        Self::Angular(Axis::Y),
        Self::Angular(Axis::Z),
    ];

    /// Flat index in `[0, 6)`: linear X/Y/Z then angular X/Y/Z.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Linear(axis) => axis.index(),
            Self::Angular(axis) => 3 + axis.index(),
        }
    }

    /// Returns `true` for the three linear degrees of freedom.
    #[must_use]
    pub const fn is_linear(self) -> bool {
        matches!(self, Self::Linear(_))
    }
}

// ---------------------------------------------------------------------------
// SpringDesc
// ---------------------------------------------------------------------------

/// Spring parameters consumed by both two-body and joint springs.
///
/// - `target`: rest length (m) or neutral angle (rad).
/// - `spring_coefficient`: stiffness `ks` (N/m or Nm/rad).
/// - `damper_coefficient`: damping `kd` (Ns/m or Nms/rad).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SpringDesc {
    /// Rest position of the spring.
    #[serde(default)]
    pub target: f32,
    /// Stiffness coefficient.
    pub spring_coefficient: f32,
    /// Damping coefficient.
    #[serde(default)]
    pub damper_coefficient: f32,
}

impl SpringDesc {
    /// Create a spring description.
    #[must_use]
    pub const fn new(target: f32, spring_coefficient: f32, damper_coefficient: f32) -> Self {
        Self {
            target,
            spring_coefficient,
            damper_coefficient,
        }
    }

    /// Hookean force for a displacement and velocity along the spring axis.
    ///
    /// Returns `-ks·(displacement - target) - kd·velocity`.
    #[must_use]
    pub fn force(&self, displacement: f32, velocity: f32) -> f32 {
        (-self.spring_coefficient).mul_add(
            displacement - self.target,
            -(self.damper_coefficient * velocity),
        )
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

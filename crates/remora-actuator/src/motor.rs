//! Armature-controlled DC motor driving a revolute joint.

use remora_core::error::ActuatorError;
use remora_core::traits::{PhysicsWorld, RevoluteJoint};
use remora_core::types::RevoluteHandle;

use crate::{kind, Actuator};

// ---------------------------------------------------------------------------
// DcMotor
// ---------------------------------------------------------------------------

/// Standard armature-controlled DC motor model:
///
/// `T(t) = Kt · (V(t) - Kb·ω(t)) / Ra`
///
/// - `Kt`: motor torque constant (Nm/A).
/// - `V`: applied armature voltage (V).
/// - `Kb`: back-EMF constant (Vs/rad).
/// - `ω`: joint angular velocity (rad/s), read from the joint each tick.
/// - `Ra`: armature resistance (Ω), validated non-zero at attach.
#[derive(Debug, Clone)]
pub struct DcMotor {
    joint: RevoluteHandle,
    torque_constant: f32,
    back_emf_constant: f32,
    armature_resistance: f32,
    voltage: f32,
    last_torque: f32,
}

impl DcMotor {
    /// Attach to a revolute joint.
    ///
    /// Errors if the joint handle is dangling or `armature_resistance` is
    /// zero.
    pub fn attach<W: PhysicsWorld>(
        world: &W,
        joint: RevoluteHandle,
        torque_constant: f32,
        back_emf_constant: f32,
        armature_resistance: f32,
    ) -> Result<Self, ActuatorError> {
        if armature_resistance == 0.0 {
            return Err(ActuatorError::ZeroArmatureResistance);
        }
        if world.revolute(joint).is_none() {
            return Err(ActuatorError::RevoluteNotFound(joint));
        }
        Ok(Self {
            joint,
            torque_constant,
            back_emf_constant,
            armature_resistance,
            voltage: 0.0,
            last_torque: 0.0,
        })
    }

    /// Set the applied armature voltage (V).
    pub fn set_voltage(&mut self, voltage: f32) {
        self.voltage = voltage;
    }

    /// Current armature voltage (V).
    #[must_use]
    pub const fn voltage(&self) -> f32 {
        self.voltage
    }

    /// Torque applied on the most recent tick (Nm).
    #[must_use]
    pub const fn last_torque(&self) -> f32 {
        self.last_torque
    }

    /// Handle of the driven joint.
    #[must_use]
    pub const fn joint(&self) -> RevoluteHandle {
        self.joint
    }
}

impl<W: PhysicsWorld> Actuator<W> for DcMotor {
    fn apply(&mut self, world: &mut W, _dt: f32) {
        let Some(joint) = world.revolute_mut(self.joint) else {
            return;
        };
        let back_emf = self.back_emf_constant * joint.angular_velocity();
        let torque = self.torque_constant * (self.voltage - back_emf) / self.armature_resistance;
        joint.apply_torque(torque);
        self.last_torque = torque;
    }

    fn kind(&self) -> &'static str {
        kind::DC_MOTOR
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

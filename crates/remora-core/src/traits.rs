//! Capability traits the backend must implement.
//!
//! Any rigid-body engine (Rapier, a custom integrator, a test mock) exposes
//! its bodies and joints through these traits.  Actuators read kinematic
//! state and write forces, torques, and impulses; they never integrate
//! motion and never own the objects they drive.

use nalgebra::{Isometry3, Point3, Vector3};

use crate::types::{BodyHandle, JointDof, RevoluteHandle, SixDofHandle, SpringDesc};

// ---------------------------------------------------------------------------
// RigidBody
// ---------------------------------------------------------------------------

/// A rigid body the backend simulates.
///
/// Forces and torques accumulate into the backend's per-tick accumulators;
/// impulses are instantaneous momentum changes.  How the backend aggregates
/// writes from several actuators in one tick is its own concern.
pub trait RigidBody {
    /// Current world pose (the body's location matrix).
    fn pose(&self) -> Isometry3<f32>;

    /// Linear velocity in world coordinates (m/s).
    fn linear_velocity(&self) -> Vector3<f32>;

    /// Angular velocity in world coordinates (rad/s).
    fn angular_velocity(&self) -> Vector3<f32>;

    /// Accumulate a force through the body's center of mass (N).
    fn apply_force(&mut self, force: Vector3<f32>);

    /// Accumulate a torque (Nm).
    fn apply_torque(&mut self, torque: Vector3<f32>);

    /// Apply an instantaneous linear impulse (Ns).
    fn apply_impulse(&mut self, impulse: Vector3<f32>);

    /// Apply an instantaneous angular impulse (Nms).
    fn apply_angular_impulse(&mut self, impulse: Vector3<f32>);

    /// Accumulate a force acting at a world-space point.
    ///
    /// Composed from the primitives: the force through the center of mass
    /// plus the induced torque `r × F` about it.
    fn apply_force_at(&mut self, force: Vector3<f32>, point: Point3<f32>) {
        let lever = point - Point3::from(self.pose().translation.vector);
        self.apply_force(force);
        self.apply_torque(lever.cross(&force));
    }

    /// Apply an impulse acting at a world-space point.
    fn apply_impulse_at(&mut self, impulse: Vector3<f32>, point: Point3<f32>) {
        let lever = point - Point3::from(self.pose().translation.vector);
        self.apply_impulse(impulse);
        self.apply_angular_impulse(lever.cross(&impulse));
    }
}

// ---------------------------------------------------------------------------
// Joints
// ---------------------------------------------------------------------------

/// A single-axis rotary joint.
pub trait RevoluteJoint {
    /// Angular velocity about the joint axis (rad/s).
    fn angular_velocity(&self) -> f32;

    /// Accumulate a torque about the joint axis (Nm).
    fn apply_torque(&mut self, torque: f32);
}

/// A six-degree-of-freedom joint with per-axis spring support.
pub trait SixDofJoint {
    /// `true` when the backend integrates joint springs itself.
    ///
    /// When this returns `true`, spring actuators hand their descriptors to
    /// [`set_spring`](Self::set_spring) and skip per-tick force computation.
    fn drives_springs_internally(&self) -> bool {
        false
    }

    /// Configure a backend-side spring on one degree of freedom.
    fn set_spring(&mut self, dof: JointDof, desc: SpringDesc);

    /// Current displacement along a degree of freedom (m or rad).
    fn displacement(&self, dof: JointDof) -> f32;

    /// Current velocity along a degree of freedom (m/s or rad/s).
    fn velocity(&self, dof: JointDof) -> f32;

    /// Accumulate a force (N) or torque (Nm) along one degree of freedom.
    fn apply_axis_force(&mut self, dof: JointDof, magnitude: f32);
}

// ---------------------------------------------------------------------------
// WaterSurface
// ---------------------------------------------------------------------------

/// External water-surface query used by the buoyancy actuator.
///
/// Up-axis convention: world +Y is up.  The returned value is the Y
/// coordinate of the water surface above the horizontal position `(x, z)`;
/// `y` is provided so implementations can disambiguate stacked volumes.
pub trait WaterSurface: Send + Sync {
    /// Water surface height (world Y) at the given world position.
    fn height_at(&self, x: f32, y: f32, z: f32) -> f32;
}

// ---------------------------------------------------------------------------
// PhysicsWorld
// ---------------------------------------------------------------------------

/// Handle-resolving view of the backend's bodies and joints.
///
/// Lookups return `None` for a handle whose referent no longer exists;
/// actuators treat that as "skip this tick" rather than an error.
pub trait PhysicsWorld {
    /// Concrete rigid-body type.
    type Body: RigidBody;
    /// Concrete revolute-joint type.
    type Revolute: RevoluteJoint;
    /// Concrete six-DoF-joint type.
    type SixDof: SixDofJoint;

    /// Resolve a body handle for reading.
    fn body(&self, handle: BodyHandle) -> Option<&Self::Body>;

    /// Resolve a body handle for writing.
    fn body_mut(&mut self, handle: BodyHandle) -> Option<&mut Self::Body>;

    /// Resolve a revolute-joint handle for reading.
    fn revolute(&self, handle: RevoluteHandle) -> Option<&Self::Revolute>;

    /// Resolve a revolute-joint handle for writing.
    fn revolute_mut(&mut self, handle: RevoluteHandle) -> Option<&mut Self::Revolute>;

    /// Resolve a six-DoF-joint handle for reading.
    fn six_dof(&self, handle: SixDofHandle) -> Option<&Self::SixDof>;

    /// Resolve a six-DoF-joint handle for writing.
    fn six_dof_mut(&mut self, handle: SixDofHandle) -> Option<&mut Self::SixDof>;
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
